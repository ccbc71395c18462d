use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tree_sitter::Node;
use treehop::navigator::RecordingHost;
use treehop::syntax::covering_node;
use treehop::{Navigator, ParsedSource};

use crate::cli::Window;
use crate::commands::{line_span, position};
use crate::context::TreehopContext;

const SNIPPET_CHARS: usize = 40;

#[derive(Debug, Serialize)]
pub struct HintRecord {
    pub label: String,
    pub index: usize,
    pub kind: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub color: String,
}

pub fn run(
    context: &TreehopContext,
    file: &Path,
    window: Window,
    focus_line: Option<usize>,
    json: bool,
) -> Result<()> {
    let source = ParsedSource::load(file)?;
    let mut host = RecordingHost::new(window.resolve(source.text.len()));
    let mut navigator = Navigator::new(context.config.clone());
    navigator
        .activate(source.syntax(), &mut host)
        .with_context(|| format!("Cannot place hints in {}", file.display()))?;

    if let Some(line) = focus_line {
        let span = line_span(&source.text, line)
            .with_context(|| format!("Line {} is outside {}", line, file.display()))?;
        if let Some(focus) = navigator
            .session()
            .map(|session| covering_node(session.syntax(), span))
        {
            navigator
                .refocus(focus, &mut host)
                .with_context(|| format!("Cannot refocus on line {}", line))?;
        }
    }

    let records = hint_records(&source.text, &host);
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in records {
            println!(
                "{:<4} {:<24} {:>4}:{:<4} {:<8} {}",
                record.label, record.kind, record.line, record.column, record.color, record.text
            );
        }
    }
    Ok(())
}

pub(crate) fn hint_records(text: &str, host: &RecordingHost<Node<'_>>) -> Vec<HintRecord> {
    host.hints
        .iter()
        .enumerate()
        .map(|(index, (node, label, color))| {
            let start = node.start_byte();
            let end = node.end_byte();
            let (line, column) = position(text, start);
            HintRecord {
                label: label.clone(),
                index,
                kind: node.kind().to_string(),
                start,
                end,
                line,
                column,
                text: snippet(&text[start..end]),
                color: color.to_hex(),
            }
        })
        .collect()
}

fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > SNIPPET_CHARS || first_line.len() < text.trim_end().len() {
        let cut: String = first_line.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
