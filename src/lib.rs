//! Job parameters whose values come from running a named script.
//!
//! A [`parameter::DynamicParameterDefinition`] points at a script in a
//! [`script::ScriptRegistry`]. Each time the host renders, validates or
//! defaults the parameter, the script is executed again through a
//! [`script::ScriptExecutor`] and its result is turned into a list of choices.

pub mod error;
pub mod handlers;
pub mod parameter;
pub mod script;
pub mod settings;

pub use error::{Error, Result};
