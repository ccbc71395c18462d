use anyhow::Result;
use log::info;

use crate::cli::Cli;
use treehop::config::{self, TreehopConfig};

pub struct TreehopContext {
    pub invocation: Cli,
    pub config: TreehopConfig,
}

impl TreehopContext {
    pub fn new(invocation: Cli) -> Result<Self> {
        let config = match &invocation.config {
            Some(path) => {
                info!("config: {}", path.display());
                config::load_from(path)?
            }
            None => config::load()?,
        };
        Ok(Self { invocation, config })
    }
}
