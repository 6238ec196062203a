use anyhow::Result;
use listmonk_bridge::tools::catalog;
use serde_json::Value;

use super::ToolsArgs;

pub fn execute(args: &ToolsArgs) -> Result<()> {
    let tools = catalog();

    if args.names {
        for tool in &tools {
            println!("{}", tool.name);
        }
        return Ok(());
    }

    let listing = Value::Array(tools.iter().map(|t| t.to_json()).collect());
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
