use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;
mod commands;
mod context;
mod logging;

use crate::cli::{Cli, Commands};
use crate::context::TreehopContext;
use crate::logging::LoggingMode;

fn main() -> Result<()> {
    let cli = Cli::parse();
    // The TUI owns the terminal, so its log lines go to a file.
    let logging_mode = match cli.command {
        Commands::View { .. } => LoggingMode::File,
        _ => cli.logging_mode,
    };
    logging::init_logging(logging_mode, cli.debug)?;
    info!("treehop starting");
    info!("logging mode: {:?}", logging_mode);
    info!("args: {:?}", std::env::args().collect::<Vec<_>>());
    let context = TreehopContext::new(cli)?;

    match &context.invocation.command {
        Commands::Hints {
            file,
            window,
            focus_line,
            json,
        } => commands::hints::run(&context, file, *window, *focus_line, *json),
        Commands::Jump {
            file,
            keys,
            window,
            json,
        } => commands::jump::run(&context, file, keys, *window, *json),
        Commands::View { file } => commands::view::run(&context, file),
        Commands::Config { schema } => commands::config::run(&context, *schema),
    }
}
