use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::shell::{Action, ActionOutcome, Page};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub fragment: String,
}

/// POST /api/v1/navigate
/// Evaluates a fragment and returns the view that ends up mounted.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<Page>, AppError> {
    let page = state.shell.navigate(&req.fragment).await?;
    Ok(Json(page))
}

/// POST /api/v1/action
pub async fn handle_action(
    State(state): State<AppState>,
    Json(action): Json<Action>,
) -> Result<Json<ActionOutcome>, AppError> {
    let outcome = state.shell.dispatch(action).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/current
pub async fn handle_current(State(state): State<AppState>) -> Result<Json<Page>, AppError> {
    state
        .shell
        .current()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No view has been mounted yet".to_string()))
}
