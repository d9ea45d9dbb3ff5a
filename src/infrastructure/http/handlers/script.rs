//! Script HTTP Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateScriptCommand;
use crate::infrastructure::http::dto::{GenerateScriptRequest, ScriptResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 根据主题生成对话脚本
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateScriptRequest>, JsonRejection>,
) -> Result<Json<ScriptResponse>, ApiError> {
    let Json(req) = payload?;

    let result = state
        .generate_script_handler
        .handle(GenerateScriptCommand { topic: req.topic })
        .await?;

    Ok(Json(ScriptResponse::from(result)))
}
