#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

pub const RUST_SAMPLE: &str = "fn main() {\n    let value = 1;\n}\n";

pub struct TestDir {
    pub path: PathBuf,
}

impl TestDir {
    pub fn new(name: &str) -> Result<Self> {
        let path = std::env::temp_dir()
            .join("treehop_tests")
            .join(name)
            .join(Uuid::new_v4().to_string());
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn write(&self, path: &str, content: &str) -> Result<()> {
        let p = self.path.join(path);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(p, content)?;
        Ok(())
    }

    pub fn run(&self, args: &[&str]) -> Result<String> {
        run_cmd(&self.path, args)
    }

    pub fn run_in(&self, args: &[&str], dir: &Path) -> Result<String> {
        run_cmd(dir, args)
    }

    pub fn run_err(&self, args: &[&str]) -> Result<String> {
        let output = build_cmd(&self.path, args).output()?;
        if output.status.success() {
            anyhow::bail!("treehop succeeded but expected failure");
        }
        Ok(String::from_utf8(output.stderr)?)
    }

    pub fn run_json(&self, args: &[&str]) -> Result<Value> {
        json(&self.run(args)?)
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn build_cmd(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_treehop"));
    cmd.args(args).current_dir(dir).env_remove("TREEHOP_CONFIG");
    cmd
}

fn run_cmd(dir: &Path, args: &[&str]) -> Result<String> {
    let output = build_cmd(dir, args).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "treehop failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8(output.stdout)?)
}

/// Parse CLI JSON output into a serde_json::Value.
pub fn json(output: &str) -> Result<Value> {
    serde_json::from_str(output).with_context(|| format!("Invalid JSON: {}", truncate(output, 200)))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max])
    }
}

/// Labels of a `hints --json` array, in index order.
pub fn labels(hints: &Value) -> Result<Vec<String>> {
    hints
        .as_array()
        .context("hints should be an array")?
        .iter()
        .map(|hint| {
            hint["label"]
                .as_str()
                .map(str::to_string)
                .context("label should be string")
        })
        .collect()
}

/// Source texts of a `hints --json` array, in index order.
pub fn texts(hints: &Value) -> Result<Vec<String>> {
    hints
        .as_array()
        .context("hints should be an array")?
        .iter()
        .map(|hint| {
            hint["text"]
                .as_str()
                .map(str::to_string)
                .context("text should be string")
        })
        .collect()
}
