//! Seeder generation for seedlink.
//!
//! Reads table rows through the `tables` crate and writes one seeder class
//! per table into the target project, then registers each class in the
//! project's seeder registry.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seedlink::prelude::*;
//!
//! let config = SeedLinkConfig::default().with_project_root("/srv/app");
//! let registry = FileRegistry::new(config.registry_path(), &config.markers, &config.style())?;
//! let mut generator = SeedGenerator::new(access, registry, config);
//! let outcomes = generator.run(&["users", "posts"], &GenerateOptions::default()).await?;
//! ```

pub mod artifact;
pub mod autoload;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod errors;
pub mod generator;
pub mod naming;
pub mod prompt;
pub mod registry;
pub mod template;

pub use artifact::SeedArtifact;
pub use autoload::{AutoloadError, AutoloadRefresher, CommandAutoload, NoAutoload};
pub use config::{CodeStyle, ConfigError, Markers, SeedLinkConfig};
pub use emitter::CodeEmitter;
pub use errors::GenerateError;
pub use generator::{GenerateOptions, SeedGenerator, TableOutcome, TableRequest};
pub use prompt::{Confirm, FixedAnswer, StdinConfirm};
pub use registry::{FileRegistry, MemoryRegistry, PatchOutcome, RegistryPatcher};
pub use template::Stub;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::{
        FileRegistry, GenerateOptions, MemoryRegistry, SeedGenerator, SeedLinkConfig, Stub,
        TableOutcome,
    };
    pub use tables::prelude::*;
}
