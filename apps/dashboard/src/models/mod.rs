pub mod config;
pub mod jd;
