//! Configuration types for seed generation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tables::DEFAULT_CHUNK_SIZE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Whitespace used in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStyle {
    /// One indentation unit.
    pub indent: String,
    pub newline: String,
}

impl CodeStyle {
    /// Returns `count` indentation units.
    pub fn indents(&self, count: usize) -> String {
        self.indent.repeat(count)
    }
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            newline: "\n".to_string(),
        }
    }
}

/// Sentinel comments delimiting the managed region of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "#iseed_start".to_string(),
            end: "#iseed_end".to_string(),
        }
    }
}

/// External command refreshing the project's class autoloader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoloadConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            program: "composer".to_string(),
            args: vec!["dump-autoload".to_string()],
        }
    }
}

/// Configuration for a generation run, usually read from `seedlink.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedLinkConfig {
    /// Root of the target project. Relative paths below resolve against it.
    pub project_root: PathBuf,

    /// Directory receiving generated seeder classes.
    pub seed_path: PathBuf,

    /// Registry file. Defaults to `DatabaseSeeder.php` inside `seed_path`.
    pub registry_file: Option<PathBuf>,

    /// Custom stub template. The bundled stub is used when unset.
    pub stub_path: Option<PathBuf>,

    /// Rows per generated insert statement.
    pub chunk_size: usize,

    /// Indentation unit for generated code.
    pub indent: String,

    pub newline: String,

    /// Nesting depth of the insert literal inside the stub's `run` body.
    pub literal_depth: usize,

    pub markers: Markers,

    /// Connection used when no `--database` is given.
    pub default_connection: String,

    /// Connection name to database URL.
    pub connections: BTreeMap<String, String>,

    pub autoload: AutoloadConfig,
}

impl Default for SeedLinkConfig {
    fn default() -> Self {
        let style = CodeStyle::default();
        Self {
            project_root: PathBuf::from("."),
            seed_path: PathBuf::from("database/seeds"),
            registry_file: None,
            stub_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            indent: style.indent,
            newline: style.newline,
            literal_depth: 3,
            markers: Markers::default(),
            default_connection: "default".to_string(),
            connections: BTreeMap::new(),
            autoload: AutoloadConfig::default(),
        }
    }
}

impl SeedLinkConfig {
    /// Loads a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Sets the project root, builder style.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub fn seed_dir(&self) -> PathBuf {
        self.project_root.join(&self.seed_path)
    }

    pub fn registry_path(&self) -> PathBuf {
        match &self.registry_file {
            Some(file) => self.project_root.join(file),
            None => self.seed_dir().join("DatabaseSeeder.php"),
        }
    }

    pub fn stub_file(&self) -> Option<PathBuf> {
        self.stub_path.as_ref().map(|p| self.project_root.join(p))
    }

    pub fn style(&self) -> CodeStyle {
        CodeStyle {
            indent: self.indent.clone(),
            newline: self.newline.clone(),
        }
    }
}
