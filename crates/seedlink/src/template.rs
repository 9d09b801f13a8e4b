//! Stub loading and placeholder substitution.

use std::fs;
use std::path::Path;

use crate::config::CodeStyle;
use crate::errors::GenerateError;

/// The stub shipped with seedlink.
pub const BUNDLED_STUB: &str = include_str!("../stubs/seed.stub");

const CLASS: &str = "class";
const TABLE: &str = "table";
const PRERUN_EVENT: &str = "prerun_event";
const POSTRUN_EVENT: &str = "postrun_event";
const INSERT_STATEMENTS: &str = "insert_statements";

/// Values for the stub placeholders.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    pub class: String,
    pub table: String,
    pub insert_statements: String,
    pub prerun_event: String,
    pub postrun_event: String,
}

impl Substitutions {
    fn lookup(&self, token: &str) -> Option<&str> {
        match token {
            CLASS => Some(&self.class),
            TABLE => Some(&self.table),
            INSERT_STATEMENTS => Some(&self.insert_statements),
            PRERUN_EVENT => Some(&self.prerun_event),
            POSTRUN_EVENT => Some(&self.postrun_event),
            _ => None,
        }
    }
}

/// Template text for a seeder class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    text: String,
}

impl Stub {
    /// Wraps template text, rewriting its line breaks to `newline`.
    pub fn from_text(text: &str, newline: &str) -> Self {
        let mut normalized = text.lines().collect::<Vec<_>>().join(newline);
        if text.ends_with('\n') {
            normalized.push_str(newline);
        }
        Self { text: normalized }
    }

    pub fn bundled(newline: &str) -> Self {
        Self::from_text(BUNDLED_STUB, newline)
    }

    pub fn load(path: &Path, newline: &str) -> Result<Self, GenerateError> {
        let text = fs::read_to_string(path).map_err(GenerateError::io(path))?;
        Ok(Self::from_text(&text, newline))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn populate(&self, substitutions: &Substitutions) -> String {
        populate(&self.text, substitutions)
    }
}

/// Replaces every `{{token}}` with its substitution in a single left to
/// right pass. Substituted text is never scanned again, so placeholders
/// appearing inside row data or class names stay as they are. Unknown
/// tokens are kept verbatim.
pub fn populate(stub: &str, substitutions: &Substitutions) -> String {
    let mut out = String::with_capacity(stub.len() + substitutions.insert_statements.len());
    let mut rest = stub;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let replaced = after.find("}}").and_then(|close| {
            substitutions
                .lookup(&after[..close])
                .map(|value| (value, close))
        });
        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Which side of the insert statements a hook runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Prerun,
    Postrun,
}

impl HookKind {
    /// Message of the exception thrown when the hook rejects the run.
    pub fn failure_message(self) -> &'static str {
        match self {
            HookKind::Prerun => "Prerun event failed, seed wasn't executed!",
            HookKind::Postrun => "Seed was executed but the postrun event failed!",
        }
    }
}

/// Code firing `event` and aborting the seeder when its listeners return
/// exactly `false`. Other results, including null, let the run continue.
/// No event yields an empty string.
pub fn hook_block(kind: HookKind, event: Option<&str>, style: &CodeStyle) -> String {
    let Some(event) = event.map(str::trim).filter(|e| !e.is_empty()) else {
        return String::new();
    };

    let nl = &style.newline;
    let two = style.indents(2);
    let three = style.indents(3);
    format!(
        "$response = Event::until(new {event}());{nl}\
         {two}if ($response === false) {{{nl}\
         {three}throw new Exception(\"{message}\");{nl}\
         {two}}}",
        message = kind.failure_message(),
    )
}
