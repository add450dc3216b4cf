use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use super::TypedTool;
use crate::errors::{Error, Result};

pub const DEFAULT_INTERPRETER: &str = "bash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShellInput {
    /// Script text handed verbatim to the interpreter's `-c` flag.
    pub bash_script: String,
}

impl ShellInput {
    pub fn new<S: Into<String>>(bash_script: S) -> Self {
        Self {
            bash_script: bash_script.into(),
        }
    }
}

/// Runs a script in a child shell process and returns its standard output.
///
/// # Security
///
/// The script is executed exactly as given. There is no sanitization, no allow-list and
/// no sandbox: anything the invoking user may do, the script may do. Only pass scripts
/// from a trusted source, never raw model output.
///
/// Every invocation spawns its own child, so concurrent invocations share nothing. The
/// tool neither times out nor kills the child if the returned future is dropped; callers
/// needing a deadline must enforce it themselves.
#[derive(Debug, Clone)]
pub struct ShellTool {
    interpreter: String,
}

impl Default for ShellTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellTool {
    pub fn new() -> Self {
        Self::with_interpreter(DEFAULT_INTERPRETER)
    }

    /// Use another interpreter accepting `-c <script>`, e.g. `sh` or `/bin/zsh`.
    pub fn with_interpreter<S: Into<String>>(interpreter: S) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

#[async_trait]
impl TypedTool for ShellTool {
    type Input = ShellInput;
    type Output = String;

    fn name(&self) -> &str {
        "shell"
    }

    fn description(&self) -> &str {
        "Run a script with a command-line shell and return its standard output. \
        The script is executed as-is without any sanitization."
    }

    async fn call(&self, input: ShellInput) -> Result<String> {
        debug!(interpreter = %self.interpreter, "running script");

        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(&input.bash_script)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                Error::launch_failed(format!("failed to start {}: {}", self.interpreter, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            warn!(status = %output.status, "script failed");
            return Err(Error::from_exit_status(output.status, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;
    use serde_json::json;
    use serial_test::serial;

    #[tokio::test]
    #[serial(spawn)]
    async fn test_shell_echo() {
        let tool = ShellTool::new();
        let output = tool.call(ShellInput::new("echo hi")).await.unwrap();
        assert_eq!(output, "hi\n");
    }

    #[tokio::test]
    #[serial(spawn)]
    async fn test_shell_exit_code() {
        let tool = ShellTool::new();
        let error = tool
            .call(ShellInput::new("echo oops >&2; exit 3"))
            .await
            .unwrap_err();
        match error {
            Error::ExecutionFailed {
                code,
                signal,
                stderr,
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(signal, None);
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("Expected ExecutionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial(spawn)]
    async fn test_stderr_not_merged_into_success() {
        let tool = ShellTool::new();
        let output = tool
            .call(ShellInput::new("echo out; echo err >&2"))
            .await
            .unwrap();
        assert_eq!(output, "out\n");
    }

    #[tokio::test]
    #[serial(spawn)]
    async fn test_missing_interpreter() {
        let tool = ShellTool::with_interpreter("/nonexistent/parley-shell");
        let error = tool.call(ShellInput::new("echo hi")).await.unwrap_err();
        assert!(matches!(
            error,
            Error::ExecutionFailed {
                code: None,
                signal: None,
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial(spawn)]
    async fn test_killed_script_reports_signal() {
        let tool = ShellTool::new();
        let error = tool.call(ShellInput::new("kill -9 $$")).await.unwrap_err();
        assert!(matches!(
            error,
            Error::ExecutionFailed {
                code: None,
                signal: Some(9),
                ..
            }
        ));
        assert!(error.to_string().contains("terminated by signal 9"));
    }

    #[tokio::test]
    #[serial(spawn)]
    async fn test_bad_field_is_rejected_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let tool = ShellTool::new().into_tool();

        let error = tool
            .invoke(json!({
                "badField": 1,
                "bashScript": format!("touch {}", marker.display())
            }))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));
        assert!(!marker.exists());
    }

    #[test]
    fn test_input_schema() {
        let tool = ShellTool::new().into_tool();
        let schema = &tool.descriptor().input_schema;
        assert_eq!(schema["properties"]["bashScript"]["type"], "string");
        assert_eq!(schema["required"], json!(["bashScript"]));
    }
}
