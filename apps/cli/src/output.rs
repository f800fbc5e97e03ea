//! Human or JSON rendering of command results.

use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Text form of a command result.
pub trait Render {
    fn render(&self) -> String;
}

/// Where command results go: stdout, as text or pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Output { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Formats `value` without printing it.
    pub fn format<T: Serialize + Render>(&self, value: &T) -> CliResult<String> {
        if self.json {
            serde_json::to_string_pretty(value).map_err(|e| CliError::internal(e.to_string()))
        } else {
            Ok(value.render())
        }
    }

    pub fn emit<T: Serialize + Render>(&self, value: &T) -> CliResult<()> {
        println!("{}", self.format(value)?);
        Ok(())
    }
}

/// Prints a failed command to stderr.
pub fn report_error(err: &CliError, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string(err) {
            eprintln!("{text}");
            return;
        }
    }
    eprintln!("error: {err}");
}
