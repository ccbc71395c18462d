use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;
use std::path::Path;
use treehop::navigator::RecordingHost;
use treehop::{KeyOutcome, Navigator, ParsedSource, SyntaxTree};

use crate::cli::Window;
use crate::commands::hints::{HintRecord, hint_records};
use crate::commands::position;
use crate::context::TreehopContext;

#[derive(Debug, Serialize)]
struct JumpReport {
    offset: usize,
    line: usize,
    column: usize,
    active: bool,
    focus: Option<String>,
    outcomes: Vec<String>,
    hints: Vec<HintRecord>,
}

pub fn run(
    context: &TreehopContext,
    file: &Path,
    keys: &str,
    window: Window,
    json: bool,
) -> Result<()> {
    let source = ParsedSource::load(file)?;
    let mut host = RecordingHost::new(window.resolve(source.text.len()));
    let mut navigator = Navigator::new(context.config.clone());
    navigator
        .activate(source.syntax(), &mut host)
        .with_context(|| format!("Cannot place hints in {}", file.display()))?;

    let mut outcomes = Vec::new();
    for key in keys.chars() {
        let outcome = navigator
            .handle_key(key, &mut host)
            .with_context(|| format!("Key {:?} failed", key))?;
        if let KeyOutcome::ScrollRequested(direction) = outcome {
            warn!("jump has a fixed window, ignoring {:?} scroll", direction);
        }
        outcomes.push(format!("{:?}", outcome));
    }

    let (line, column) = position(&source.text, host.cursor);
    let report = JumpReport {
        offset: host.cursor,
        line,
        column,
        active: navigator.is_active(),
        focus: navigator
            .session()
            .map(|session| session.syntax().kind(session.focus()).to_string()),
        outcomes,
        hints: hint_records(&source.text, &host),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("cursor: {}:{} (offset {})", report.line, report.column, report.offset);
        match &report.focus {
            Some(focus) => println!("focus: {} ({} hints)", focus, report.hints.len()),
            None => println!("hints suspended"),
        }
    }
    Ok(())
}
