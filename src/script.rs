//! Call scripts: one API call per line, replayed against a session.
//!
//! ```text
//! # comments and blank lines are skipped
//! Initialize("")
//! SetValue("cmi.core.lesson_status", "passed")
//! GetValue("cmi.core.lesson_status")
//! GetLastError
//! Terminate("")
//! ```
//!
//! Arguments are JSON scalars. A `#` outside a string literal starts a
//! comment that runs to the end of the line.

use std::fmt;
use std::io::Read;

use serde::Serialize;
use tracing::debug;

use crate::error::RuntimeError;
use crate::runtime::{ApiCall, ApiResponse, CmiValue, ScormApi};
use crate::Result;

/// A parsed call and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub call: ApiCall,
}

/// One replayed call and what it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub line: usize,
    pub call: ApiCall,
    pub response: ApiResponse,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.call, self.response)
    }
}

/// Machine-readable form of a transcript entry.
///
/// `result` is omitted for `SetValue` and for an absent element. `GetValue`
/// records also carry `found`, so a stored `null` reads as
/// `"result":null,"found":true` and a missing element as `"found":false`.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    pub line: usize,
    pub method: &'static str,
    pub args: &'a [CmiValue],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a ApiResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
}

impl TranscriptEntry {
    pub fn record(&self) -> TranscriptRecord<'_> {
        let result = match &self.response {
            ApiResponse::Unit | ApiResponse::Value(None) => None,
            other => Some(other),
        };
        let found = match &self.response {
            ApiResponse::Value(value) => Some(value.is_some()),
            _ => None,
        };
        TranscriptRecord {
            line: self.line,
            method: self.call.method().name(),
            args: self.call.args(),
            result,
            found,
        }
    }
}

fn script_error(line: usize, message: impl Into<String>) -> RuntimeError {
    RuntimeError::Script {
        line,
        message: message.into(),
    }
}

/// Cut a trailing `#` comment, leaving `#` inside string literals alone.
fn strip_comment(text: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '#' if !in_string => return &text[..i],
            _ => {}
        }
    }
    text
}

/// Parse a single non-blank, non-comment line.
pub fn parse_line(line_no: usize, text: &str) -> Result<ScriptLine> {
    let text = text.trim();

    let (name, args) = match text.find('(') {
        None => (text, Vec::new()),
        Some(open) => {
            let inner = text[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| script_error(line_no, "missing closing ')'"))?;
            let values: Vec<serde_json::Value> = serde_json::from_str(&format!("[{}]", inner))
                .map_err(|e| script_error(line_no, format!("bad arguments: {}", e)))?;
            let args = values
                .into_iter()
                .map(CmiValue::try_from)
                .collect::<Result<Vec<_>>>()
                .map_err(|e| script_error(line_no, e.to_string()))?;
            (text[..open].trim_end(), args)
        }
    };

    let call = ApiCall::parse(name, args).map_err(|e| script_error(line_no, e.to_string()))?;
    Ok(ScriptLine {
        line: line_no,
        call,
    })
}

/// Parse a whole script.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, strip_comment(text).trim()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(line_no, text)| parse_line(line_no, text))
        .collect()
}

/// Read and parse a script from any reader.
pub fn read_script<R: Read>(mut reader: R) -> Result<Vec<ScriptLine>> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_script(&source)
}

/// Run each call in order against the session.
pub fn replay(api: &mut ScormApi, script: &[ScriptLine]) -> Vec<TranscriptEntry> {
    script
        .iter()
        .map(|line| {
            let response = api.dispatch(&line.call);
            debug!(session = %api.id(), line = line.line, call = %line.call, %response, "replayed");
            TranscriptEntry {
                line: line.line,
                call: line.call.clone(),
                response,
            }
        })
        .collect()
}
