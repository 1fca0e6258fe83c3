pub mod api;

use std::sync::Arc;

use axum::{routing, Router};
use tokio::sync::RwLock;

use crate::{
    parameter::{DescriptorRegistry, Messages, ParameterSet},
    script::ScriptRuntime,
};

pub use api::*;

#[derive(Clone)]
pub struct AppState {
    pub runtime: ScriptRuntime,
    pub parameters: Arc<RwLock<ParameterSet>>,
    pub descriptors: Arc<DescriptorRegistry>,
    pub messages: Arc<Messages>,
}

impl AppState {
    pub fn new(
        runtime: ScriptRuntime,
        parameters: ParameterSet,
        descriptors: DescriptorRegistry,
        messages: Messages,
    ) -> Self {
        AppState {
            runtime,
            parameters: Arc::new(RwLock::new(parameters)),
            descriptors: Arc::new(descriptors),
            messages: Arc::new(messages),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/descriptors", routing::get(get_descriptors))
        .route("/scripts", routing::get(get_scripts))
        .route("/parameters", routing::get(get_parameters))
        .route("/parameters/:name/choices", routing::get(get_choices))
        .route("/parameters/:name/default", routing::get(get_default))
        .route("/parameters/:name/check", routing::post(check_value))
        .route("/parameters/:name/choice-type", routing::put(update_choice_type))
        .route("/trigger", routing::post(trigger))
        .with_state(state)
}
