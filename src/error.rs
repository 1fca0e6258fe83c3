use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error("Error executing script {script_id}: {message}")]
    ScriptExecution { script_id: String, message: String },

    /// Carries the raw submitted string.
    #[error("Illegal choice: {0}")]
    InvalidChoice(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Script registry error: {0}")]
    Registry(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl Error {
    pub(crate) fn execution(script_id: &str, message: impl Into<String>) -> Self {
        Error::ScriptExecution {
            script_id: script_id.to_string(),
            message: message.into(),
        }
    }
}
