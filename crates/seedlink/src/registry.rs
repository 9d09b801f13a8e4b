//! Seeder registry patching.
//!
//! The registry is a source file whose `run()` method calls every seeder.
//! seedlink owns the span between two sentinel comments (the managed
//! region) and adds `$this->call(<Class>::class);` statements there. When
//! the markers are missing the call is appended to the `run()` body.
//!
//! Callers go through [`RegistryPatcher`]; [`RegistryEditor`] holds the
//! text rules and [`FileRegistry`] persists them to disk.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use tracing::debug;

use crate::artifact::write_atomic;
use crate::config::{CodeStyle, Markers};
use crate::errors::GenerateError;

/// Result of adding a call to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The call was already present; nothing changed.
    AlreadyPresent,
    /// Inserted before the end marker.
    InsertedInRegion,
    /// Markers missing or out of order; appended to the `run()` body.
    AppendedToRun,
    /// Neither the markers nor a `run()` body were found.
    NoMatch,
}

impl PatchOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, PatchOutcome::NoMatch)
    }
}

/// The call statement registering `class`, without the trailing `;`.
pub fn call_statement(class: &str) -> String {
    format!("$this->call({class}::class)")
}

/// Text rules for the registry document.
#[derive(Debug, Clone)]
pub struct RegistryEditor {
    markers: Markers,
    style: CodeStyle,
    region: Regex,
    run_body: Regex,
}

impl RegistryEditor {
    pub fn new(markers: &Markers, style: &CodeStyle) -> Result<Self, GenerateError> {
        let region = Regex::new(&format!(
            r"(?s)({}.+?)({})",
            regex::escape(&markers.start),
            regex::escape(&markers.end)
        ))?;
        let run_body = Regex::new(r"(?s)(run\(\).+?)\}")?;
        Ok(Self {
            markers: markers.clone(),
            style: style.clone(),
            region,
            run_body,
        })
    }

    /// Adds a call to `class`, returning the outcome and the new text.
    /// The text is returned unchanged for every outcome but the two
    /// insertions.
    pub fn insert_call(&self, text: &str, class: &str) -> (PatchOutcome, String) {
        let call = call_statement(class);
        if text.contains(&call) {
            return (PatchOutcome::AlreadyPresent, text.to_string());
        }

        let nl = &self.style.newline;
        if self.markers_in_order(text) && self.region.is_match(text) {
            let patched = self.region.replacen(text, 1, |caps: &Captures| {
                format!(
                    "{}{call};{nl}{}{}",
                    &caps[1],
                    self.style.indents(2),
                    &caps[2]
                )
            });
            return (PatchOutcome::InsertedInRegion, patched.into_owned());
        }

        if self.run_body.is_match(text) {
            let indent = &self.style.indent;
            let patched = self.run_body.replacen(text, 1, |caps: &Captures| {
                format!("{}{indent}{call};{nl}{indent}}}", &caps[1])
            });
            return (PatchOutcome::AppendedToRun, patched.into_owned());
        }

        (PatchOutcome::NoMatch, text.to_string())
    }

    /// Empties every managed region, keeping the markers.
    pub fn clean(&self, text: &str) -> String {
        let empty = format!(
            "{}{}{}{}",
            self.markers.start,
            self.style.newline,
            self.style.indents(2),
            self.markers.end
        );
        self.region
            .replace_all(text, |_: &Captures| empty.clone())
            .into_owned()
    }

    /// Both markers present, first start before first end.
    fn markers_in_order(&self, text: &str) -> bool {
        match (text.find(&self.markers.start), text.find(&self.markers.end)) {
            (Some(start), Some(end)) => start < end,
            _ => false,
        }
    }
}

/// Storage for registered seeder calls.
pub trait RegistryPatcher {
    /// Registers `class`. A [`PatchOutcome::NoMatch`] is reported, not raised.
    fn insert_call(&mut self, class: &str) -> Result<PatchOutcome, GenerateError>;

    /// Removes every registered call from the managed region.
    fn clean(&mut self) -> Result<(), GenerateError>;
}

/// Registry kept in a source file, rewritten whole on every change.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
    editor: RegistryEditor,
}

impl FileRegistry {
    pub fn new(
        path: impl Into<PathBuf>,
        markers: &Markers,
        style: &CodeStyle,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            path: path.into(),
            editor: RegistryEditor::new(markers, style)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, GenerateError> {
        fs::read_to_string(&self.path).map_err(GenerateError::io(&self.path))
    }

    fn write(&self, text: &str) -> Result<(), GenerateError> {
        write_atomic(&self.path, text).map_err(GenerateError::io(&self.path))
    }
}

impl RegistryPatcher for FileRegistry {
    fn insert_call(&mut self, class: &str) -> Result<PatchOutcome, GenerateError> {
        let text = self.read()?;
        let (outcome, patched) = self.editor.insert_call(&text, class);
        if matches!(
            outcome,
            PatchOutcome::InsertedInRegion | PatchOutcome::AppendedToRun
        ) {
            self.write(&patched)?;
        }
        debug!("Registry {}: {class} {outcome:?}", self.path.display());
        Ok(outcome)
    }

    fn clean(&mut self) -> Result<(), GenerateError> {
        let text = self.read()?;
        let cleaned = self.editor.clean(&text);
        if cleaned != text {
            self.write(&cleaned)?;
        }
        Ok(())
    }
}

/// Registry held in memory, for previews and tests.
#[derive(Debug, Clone)]
pub struct MemoryRegistry {
    text: String,
    editor: RegistryEditor,
}

impl MemoryRegistry {
    pub fn new(
        text: impl Into<String>,
        markers: &Markers,
        style: &CodeStyle,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            text: text.into(),
            editor: RegistryEditor::new(markers, style)?,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl RegistryPatcher for MemoryRegistry {
    fn insert_call(&mut self, class: &str) -> Result<PatchOutcome, GenerateError> {
        let (outcome, patched) = self.editor.insert_call(&self.text, class);
        self.text = patched;
        Ok(outcome)
    }

    fn clean(&mut self) -> Result<(), GenerateError> {
        self.text = self.editor.clean(&self.text);
        Ok(())
    }
}
