//! Azure CLI command execution.
//!
//! Provides utilities for running Azure CLI commands and parsing their output.

use crate::config;
use crate::error::{CollectError, CollectResult};
use colored::Colorize;
use regex::Regex;
use serde_json::Value;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails, is not valid UTF-8 or produces too much output
pub fn run(cmd: &str) -> CollectResult<String> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);

    let Some((program, args)) = cmds.split_first() else {
        return Err(CollectError::Command {
            cmd: cmd.to_string(),
            stderr: "empty command".to_string(),
        });
    };

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        CollectError::Command {
            cmd: cmd.to_string(),
            stderr: e.to_string(),
        }
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > config::MAX_OUTPUT_BYTES {
            return Err(CollectError::OutputTooLarge {
                cmd: cmd.to_string(),
                len: output.stdout.len(),
            });
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(CollectError::Command {
            cmd: cmd.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8(output.stdout)?)
}

/// Parse az output that should hold a JSON array. Blank output is an empty list.
pub fn parse_list(output: &str) -> CollectResult<Vec<Value>> {
    if output.trim().is_empty() {
        return Ok(vec![]);
    }
    match serde_json::from_str(output)? {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

/// Parse az output that should hold one JSON object. Blank output is an empty object.
pub fn parse_object(output: &str) -> CollectResult<Value> {
    if output.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_str(output)?)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}
