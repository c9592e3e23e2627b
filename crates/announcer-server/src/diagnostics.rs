use std::sync::Arc;

use axum::{Json, extract::State};

use crate::state::{AppState, CredentialStatus};

/// Report whether AWS credentials were configured, without revealing them
pub async fn credential_status(State(state): State<Arc<AppState>>) -> Json<CredentialStatus> {
    Json(state.credentials)
}
