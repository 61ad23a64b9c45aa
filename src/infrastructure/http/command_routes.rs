//! Command API routes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::{Command, CommandOutcome};
use crate::application::ports::outbound::ChatMessage;
use crate::application::services::CommandError;
use crate::domain::value_objects::CoshSettings;
use crate::infrastructure::state::AppState;

/// Run one typed command
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    Json(command): Json<Command>,
) -> Result<Json<CommandOutcome>, (StatusCode, String)> {
    let mut commands = state.commands.lock().await;
    commands.execute(command).map(Json).map_err(|e| {
        let status = match e {
            CommandError::CharacterNotFound(_) | CommandError::TokenNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CommandError::TokenNotLinked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, e.to_string())
    })
}

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<CoshSettings> {
    Json(state.commands.lock().await.settings().clone())
}

/// Every message broadcast so far
pub async fn chat_log(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    Json(state.campaign.chat_log())
}
