use anyhow::Result;
use treehop::config::TreehopConfig;

use crate::context::TreehopContext;

pub fn run(context: &TreehopContext, schema: bool) -> Result<()> {
    if schema {
        let schema = schemars::schema_for!(TreehopConfig);
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        print!("{}", toml::to_string_pretty(&context.config)?);
    }
    Ok(())
}
