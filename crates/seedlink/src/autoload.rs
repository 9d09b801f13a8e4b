//! Refreshing the target project's class autoloader after generation.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::config::AutoloadConfig;

#[derive(Debug, Error)]
pub enum AutoloadError {
    #[error("Could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Status { program: String, status: ExitStatus },
}

/// Makes newly written classes loadable by the target project.
pub trait AutoloadRefresher {
    fn refresh(&self) -> Result<(), AutoloadError>;
}

/// Runs an external command such as `composer dump-autoload`.
#[derive(Debug, Clone)]
pub struct CommandAutoload {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandAutoload {
    pub fn new(config: &AutoloadConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: working_dir.into(),
        }
    }
}

impl AutoloadRefresher for CommandAutoload {
    fn refresh(&self) -> Result<(), AutoloadError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| AutoloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(AutoloadError::Status {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAutoload;

impl AutoloadRefresher for NoAutoload {
    fn refresh(&self) -> Result<(), AutoloadError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_spawn_error() {
        let config = AutoloadConfig {
            program: "seedlink-no-such-program".to_string(),
            args: Vec::new(),
        };
        let err = CommandAutoload::new(&config, ".").refresh().unwrap_err();
        assert!(matches!(err, AutoloadError::Spawn { .. }));
    }
}
