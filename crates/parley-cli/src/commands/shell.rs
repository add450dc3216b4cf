use anyhow::{bail, Result};
use console::style;
use parley::tools::{ShellTool, Tool, TypedTool};
use parley::Error;
use serde_json::json;

pub async fn execute(script: &str, interpreter: Option<String>) -> Result<()> {
    let tool = match interpreter {
        Some(interpreter) => ShellTool::with_interpreter(interpreter),
        None => ShellTool::new(),
    }
    .into_tool();

    match tool.invoke(json!({ "bashScript": script })).await {
        Ok(output) => {
            print!("{}", output.as_str().unwrap_or_default());
            Ok(())
        }
        Err(Error::ExecutionFailed {
            code,
            signal,
            stderr,
        }) => {
            eprint!("{}", style(stderr).red());
            match (code, signal) {
                (Some(code), _) => bail!("script exited with status {}", code),
                (None, Some(signal)) => bail!("script was terminated by signal {}", signal),
                (None, None) => bail!("script could not be started"),
            }
        }
        Err(e) => Err(e.into()),
    }
}
