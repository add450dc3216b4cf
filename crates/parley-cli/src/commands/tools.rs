use anyhow::Result;
use console::style;
use parley::tools::{ShellTool, Toolbox, TypedTool};

pub fn toolbox() -> Toolbox {
    Toolbox::new().with_tool(ShellTool::new().into_tool())
}

pub async fn execute() -> Result<()> {
    for descriptor in toolbox().descriptors() {
        println!("{}", style(&descriptor.name).bold().green());
        println!("  {}", descriptor.description);
        let schema = serde_json::to_string_pretty(&descriptor.input_schema)?;
        for line in schema.lines() {
            println!("  {}", style(line).dim());
        }
    }
    Ok(())
}
