use std::{collections::HashMap, process::Command};

use serde_json::Value;

use crate::error::{Error, Result};

use super::{
    models::Script,
    utils::{parse_script_output, ParameterSubstitution},
};

/// Runs a script with a set of named parameters and returns whatever it
/// computes. Failures inside the script surface as [`Error::ScriptExecution`].
pub trait ScriptExecutor: Send + Sync {
    fn execute(&self, script: &Script, parameters: &HashMap<String, String>, remote: bool) -> Result<Value>;
}

impl<F> ScriptExecutor for F
where
    F: Fn(&Script, &HashMap<String, String>, bool) -> Result<Value> + Send + Sync,
{
    fn execute(&self, script: &Script, parameters: &HashMap<String, String>, remote: bool) -> Result<Value> {
        self(script, parameters, remote)
    }
}

/// Executes script code with the system shell, or with a configured remote
/// command prefix (for example `ssh worker-1`) when asked to run remotely.
#[derive(Debug, Clone, Default)]
pub struct ShellScriptExecutor {
    remote_command: Option<Vec<String>>,
}

impl ShellScriptExecutor {
    pub fn new(remote_command: Option<Vec<String>>) -> Self {
        ShellScriptExecutor {
            remote_command: remote_command.filter(|command| !command.is_empty()),
        }
    }

    fn command(&self, script: &Script, code: &str, remote: bool) -> Result<Command> {
        if remote {
            let prefix = self
                .remote_command
                .as_ref()
                .ok_or_else(|| Error::execution(&script.id, "No remote command configured"))?;
            let mut cmd = Command::new(&prefix[0]);
            cmd.args(&prefix[1..]).arg(code);
            return Ok(cmd);
        }

        let cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", code]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(code);
            cmd
        };
        Ok(cmd)
    }
}

impl ScriptExecutor for ShellScriptExecutor {
    fn execute(&self, script: &Script, parameters: &HashMap<String, String>, remote: bool) -> Result<Value> {
        let code = script
            .code
            .substitute_parameters(parameters)
            .map_err(|e| Error::execution(&script.id, e))?;

        let mut cmd = self.command(script, &code, remote)?;
        for (name, value) in parameters {
            cmd.env(name, value);
        }

        tracing::debug!(script_id = %script.id, remote, "Executing script");
        let output = cmd.output().map_err(|e| Error::execution(&script.id, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("Process exited with status: {}", output.status),
                stderr => stderr.to_string(),
            };
            return Err(Error::execution(&script.id, message));
        }

        Ok(parse_script_output(&String::from_utf8_lossy(&output.stdout)))
    }
}
