use std::sync::Arc;

use nomos_dynamic_parameter::{
    handlers::{router, AppState},
    parameter::{DescriptorRegistry, Messages, ParameterSet},
    script::{default_scripts_location, ScriptRuntime, ShellScriptExecutor, YamlScriptRegistry},
    settings::{default_settings_location, Settings},
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings_path = match std::env::args().nth(1) {
        Some(path) => path.into(),
        None => default_settings_location()?,
    };
    let settings = Settings::load(settings_path)?;

    let scripts_directory = match settings.scripts_directory.clone() {
        Some(directory) => directory,
        None => default_scripts_location()?,
    };
    let registry = YamlScriptRegistry::new(scripts_directory);
    tracing::info!("Reading scripts from {:?}", registry.directory());

    let runtime = ScriptRuntime::new(
        Arc::new(registry),
        Arc::new(ShellScriptExecutor::new(settings.remote_command.clone())),
    );
    let state = AppState::new(
        runtime,
        ParameterSet::new(settings.parameters),
        DescriptorRegistry::with_defaults(),
        Messages::new(settings.messages),
    );

    let app = router(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&settings.bind_address).await?;
    tracing::info!("Listening on {}", settings.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
