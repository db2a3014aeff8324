//! Navigation and view-state core: fragment parsing, the route table, and the
//! state objects every view handler reads from.

pub mod best;
pub mod config_store;
pub mod context;
pub mod fragment;
pub mod router;
pub mod session;
