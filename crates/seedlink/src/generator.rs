//! The generation pipeline.
//!
//! For each requested table, in order: check the table exists, resolve the
//! class and file name, ask before overwriting, fetch rows, render the stub,
//! write the file, register the class and refresh the autoloader. A failure
//! ends that table's run only.

use std::collections::HashMap;
use std::path::PathBuf;

use tables::{DataAccess, TableInspector, TableSpec};
use tracing::{error, info, warn};

use crate::artifact::SeedArtifact;
use crate::autoload::{AutoloadRefresher, NoAutoload};
use crate::config::SeedLinkConfig;
use crate::emitter::CodeEmitter;
use crate::errors::GenerateError;
use crate::naming::{self, ARTIFACT_EXTENSION};
use crate::prompt::{Confirm, FixedAnswer};
use crate::registry::{PatchOutcome, RegistryPatcher};
use crate::template::{HookKind, Stub, Substitutions, hook_block};

/// Options shared by every table of one invocation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Empty the registry's managed region before generating.
    pub clean: bool,
    /// Overwrite existing seeders without asking.
    pub force: bool,
    /// Connection name; the configured default when `None`.
    pub connection: Option<String>,
    /// Row cap per table. Absent or non-positive reads everything.
    pub max: Option<i64>,
    pub exclude: Vec<String>,
    /// Prerun event names, matched to tables by position.
    pub prerun: Vec<String>,
    /// Postrun event names, matched to tables by position.
    pub postrun: Vec<String>,
    pub dump_autoload: bool,
    /// Keep positional keys on the outer row list.
    pub indexed: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            clean: false,
            force: false,
            connection: None,
            max: None,
            exclude: Vec::new(),
            prerun: Vec::new(),
            postrun: Vec::new(),
            dump_autoload: true,
            indexed: true,
        }
    }
}

impl GenerateOptions {
    /// Pairs each table with the hooks at the same position. Missing or
    /// blank hook entries mean no hook; blank table entries are skipped
    /// without shifting the positions of the others.
    pub fn requests<S: AsRef<str>>(&self, tables: &[S]) -> Vec<TableRequest> {
        tables
            .iter()
            .enumerate()
            .map(|(i, table)| TableRequest {
                table: table.as_ref().trim().to_string(),
                prerun: hook_at(&self.prerun, i),
                postrun: hook_at(&self.postrun, i),
            })
            .filter(|request| !request.table.is_empty())
            .collect()
    }
}

fn hook_at(hooks: &[String], index: usize) -> Option<String> {
    hooks
        .get(index)
        .map(|hook| hook.trim())
        .filter(|hook| !hook.is_empty())
        .map(str::to_string)
}

/// One table to generate a seeder for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    pub table: String,
    pub prerun: Option<String>,
    pub postrun: Option<String>,
}

impl TableRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            prerun: None,
            postrun: None,
        }
    }
}

/// What happened to one table.
#[derive(Debug)]
pub enum TableOutcome {
    Created {
        table: String,
        class_name: String,
        path: PathBuf,
        rows: usize,
        registry: PatchOutcome,
    },
    /// The seeder existed and the user chose to keep it.
    Declined { table: String, class_name: String },
    Failed { table: String, error: GenerateError },
}

impl TableOutcome {
    pub fn table(&self) -> &str {
        match self {
            TableOutcome::Created { table, .. }
            | TableOutcome::Declined { table, .. }
            | TableOutcome::Failed { table, .. } => table,
        }
    }

    /// Written and registered.
    pub fn is_success(&self) -> bool {
        matches!(self, TableOutcome::Created { registry, .. } if registry.is_success())
    }
}

/// Generates seeders from tables and registers them.
pub struct SeedGenerator<A, R> {
    inspector: TableInspector<A>,
    registry: R,
    config: SeedLinkConfig,
    stub: Stub,
    confirm: Box<dyn Confirm>,
    autoload: Box<dyn AutoloadRefresher>,
}

impl<A: DataAccess, R: RegistryPatcher> SeedGenerator<A, R> {
    /// Uses the bundled stub, declines every overwrite prompt and skips
    /// autoload refreshes until told otherwise.
    pub fn new(access: A, registry: R, config: SeedLinkConfig) -> Self {
        Self {
            inspector: TableInspector::new(access),
            registry,
            stub: Stub::bundled(&config.newline),
            config,
            confirm: Box::new(FixedAnswer(false)),
            autoload: Box::new(NoAutoload),
        }
    }

    pub fn with_stub(mut self, stub: Stub) -> Self {
        self.stub = stub;
        self
    }

    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn with_autoload(mut self, autoload: impl AutoloadRefresher + 'static) -> Self {
        self.autoload = Box::new(autoload);
        self
    }

    pub fn inspector(&self) -> &TableInspector<A> {
        &self.inspector
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn config(&self) -> &SeedLinkConfig {
        &self.config
    }

    /// Processes every table in order and reports each outcome. Only a
    /// failed registry clean aborts the run; table failures are recorded
    /// and the next table proceeds.
    pub async fn run<S: AsRef<str>>(
        &mut self,
        tables: &[S],
        options: &GenerateOptions,
    ) -> Result<Vec<TableOutcome>, GenerateError> {
        if options.clean {
            info!("Cleaning the seeder registry section");
            self.registry.clean()?;
        }

        let mut generated: HashMap<String, String> = HashMap::new();
        let mut outcomes = Vec::new();
        for request in options.requests(tables) {
            let outcome = match self.process(&request, options, &mut generated).await {
                Ok(outcome) => outcome,
                Err(error) => TableOutcome::Failed {
                    table: request.table.clone(),
                    error,
                },
            };
            report(&outcome);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    async fn process(
        &mut self,
        request: &TableRequest,
        options: &GenerateOptions,
        generated: &mut HashMap<String, String>,
    ) -> Result<TableOutcome, GenerateError> {
        let connection = self.connection(options);
        self.inspector
            .ensure_exists(&request.table, &connection)
            .await?;

        let class_name = naming::class_name(&request.table);
        if !naming::is_valid_identifier(&class_name) {
            return Err(GenerateError::InvalidClassName {
                table: request.table.clone(),
                class: class_name,
            });
        }
        if let Some(first) = generated.get(&class_name) {
            if first != &request.table {
                return Err(GenerateError::DuplicateClass {
                    class: class_name,
                    first: first.clone(),
                });
            }
        }

        let path = naming::artifact_path(&self.config.seed_dir(), &class_name);
        if path.exists() && !options.force {
            let question = format!(
                "File {class_name}.{ARTIFACT_EXTENSION} already exist. Do you wish to override it? [yes|no]"
            );
            if !self.confirm.confirm(&question) {
                return Ok(TableOutcome::Declined {
                    table: request.table.clone(),
                    class_name,
                });
            }
        }

        let artifact = self.build_artifact(request, options).await?;
        artifact.write()?;
        generated.insert(class_name.clone(), request.table.clone());

        let registry = self.registry.insert_call(&artifact.class_name)?;

        if options.dump_autoload {
            if let Err(e) = self.autoload.refresh() {
                warn!("Autoload refresh failed: {e}");
            }
        }

        Ok(TableOutcome::Created {
            table: request.table.clone(),
            class_name,
            path: artifact.path,
            rows: artifact.rows,
            registry,
        })
    }

    /// Renders the seeder for one table without writing anything.
    pub async fn build_artifact(
        &self,
        request: &TableRequest,
        options: &GenerateOptions,
    ) -> Result<SeedArtifact, GenerateError> {
        let spec = self.table_spec(&request.table, options);
        let rows = self.inspector.fetch_rows(&spec).await?;

        let style = self.config.style();
        let emitter = CodeEmitter::new(style.clone())
            .with_depth(self.config.literal_depth)
            .indexed(options.indexed);
        let class_name = naming::class_name(&spec.table);

        let substitutions = Substitutions {
            class: class_name.clone(),
            table: spec.table.clone(),
            insert_statements: emitter.insert_statements(&spec.table, &rows, spec.chunk_size),
            prerun_event: hook_block(HookKind::Prerun, request.prerun.as_deref(), &style),
            postrun_event: hook_block(HookKind::Postrun, request.postrun.as_deref(), &style),
        };

        Ok(SeedArtifact {
            path: naming::artifact_path(&self.config.seed_dir(), &class_name),
            source: self.stub.populate(&substitutions),
            class_name,
            rows: rows.len(),
        })
    }

    fn table_spec(&self, table: &str, options: &GenerateOptions) -> TableSpec {
        TableSpec::new(table, self.connection(options))
            .with_exclude(&options.exclude)
            .with_limit(options.max)
            .with_chunk_size(self.config.chunk_size)
    }

    fn connection(&self, options: &GenerateOptions) -> String {
        options
            .connection
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.config.default_connection)
            .to_string()
    }
}

fn report(outcome: &TableOutcome) {
    match outcome {
        TableOutcome::Created { table, rows, .. } if outcome.is_success() => {
            info!("Created a seed file from table {table} ({rows} rows)");
        }
        TableOutcome::Created {
            table, class_name, ..
        } => {
            error!("Could not create seed file from table {table}");
            error!("  {class_name} was written but the seeder registry has no place for it");
        }
        TableOutcome::Declined { table, class_name } => {
            info!("Kept existing {class_name} for table {table}");
        }
        TableOutcome::Failed { table, error } => {
            error!("Could not create seed file from table {table}: {error}");
        }
    }
}
