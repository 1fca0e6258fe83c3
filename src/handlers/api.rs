use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::task;

use crate::{
    error::{Error, Result},
    parameter::{choices::visible_item_count, DynamicParameterDefinition, ParameterValue},
    script::ScriptRuntime,
};

use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct DescriptorInfo {
    pub kind: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChoicesResponse {
    pub name: String,
    pub choices: Vec<Value>,
    pub visible_item_count: usize,
    pub choice_type: Option<String>,
    pub readonly_input_field: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceTypeRequest {
    pub choice_type: String,
}

fn error_response(e: Error) -> Response {
    let status = match &e {
        Error::UnknownParameter(_) => StatusCode::NOT_FOUND,
        Error::InvalidChoice(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Failed to evaluate parameter: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Runs `f` against a snapshot of the named definition on the blocking pool.
async fn evaluate<T, F>(state: &AppState, name: &str, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&DynamicParameterDefinition, &ScriptRuntime) -> Result<T> + Send + 'static,
{
    let definition = state.parameters.read().await.get(name)?.clone();
    let runtime = state.runtime.clone();
    let script_id = definition.script_id.clone();

    task::spawn_blocking(move || f(&definition, &runtime))
        .await
        .map_err(|e| Error::execution(&script_id, e.to_string()))?
}

pub async fn get_descriptors(State(state): State<AppState>) -> Response {
    let descriptors: Vec<DescriptorInfo> = state
        .descriptors
        .iter()
        .map(|d| DescriptorInfo {
            kind: d.kind().to_string(),
            display_name: d.display_name(&state.messages),
        })
        .collect();
    Json(descriptors).into_response()
}

pub async fn get_scripts(State(state): State<AppState>) -> Response {
    let runtime = state.runtime.clone();
    match task::spawn_blocking(move || runtime.registry().list_all()).await {
        Ok(Ok(scripts)) => Json(scripts).into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(Error::Registry(e.to_string())),
    }
}

pub async fn get_parameters(State(state): State<AppState>) -> Response {
    let parameters = state.parameters.read().await;
    Json(parameters.definitions().to_vec()).into_response()
}

pub async fn get_choices(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let result = evaluate(&state, &name, |definition, runtime| {
        let choices = definition.get_choices(runtime)?;
        Ok(ChoicesResponse {
            name: definition.name.clone(),
            visible_item_count: visible_item_count(choices.len()),
            choices,
            choice_type: definition.choice_type().map(str::to_string),
            readonly_input_field: definition.is_readonly_input_field(),
        })
    })
    .await;

    match result {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_default(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match evaluate(&state, &name, |definition, runtime| definition.get_default_parameter_value(runtime)).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn check_value(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<CheckRequest>,
) -> Response {
    let result = evaluate(&state, &name, move |definition, runtime| {
        definition.check_parameter_value(runtime, ParameterValue::new(definition.name.clone(), request.value))
    })
    .await;

    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_choice_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<ChoiceTypeRequest>,
) -> Response {
    let mut parameters = state.parameters.write().await;
    match parameters.set_choice_type(&name, &request.choice_type) {
        Ok(true) => {
            tracing::info!(parameter = %name, choice_type = %request.choice_type, "Updated choice type");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Parameter {} is not a choice parameter", name) })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn trigger(State(state): State<AppState>, Json(submitted): Json<HashMap<String, String>>) -> Response {
    let parameters = state.parameters.read().await.clone();
    let runtime = state.runtime.clone();

    let result = task::spawn_blocking(move || parameters.resolve(&runtime, &submitted))
        .await
        .map_err(|e| Error::Registry(e.to_string()))
        .and_then(|result| result);

    match result {
        Ok(values) => Json(values).into_response(),
        Err(e) => error_response(e),
    }
}
