//! Command line interface of the `seedlink` binary.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::generator::GenerateOptions;

#[derive(Parser, Debug)]
#[command(name = "seedlink")]
#[command(about = "Generate seeder classes from database tables", long_about = None)]
pub struct Cli {
    /// Comma separated table names
    #[arg(value_name = "TABLES")]
    pub tables: String,

    /// Empty the registered seeder list before generating
    #[arg(long)]
    pub clean: bool,

    /// Overwrite existing seeders without asking
    #[arg(long)]
    pub force: bool,

    /// Connection name (default: the configured default connection)
    #[arg(long)]
    pub database: Option<String>,

    /// Maximum rows per table; zero or negative reads everything
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Comma separated columns left out of the seed
    #[arg(long)]
    pub exclude: Option<String>,

    /// Comma separated events fired before each table's inserts
    #[arg(long)]
    pub prerun: Option<String>,

    /// Comma separated events fired after each table's inserts
    #[arg(long)]
    pub postrun: Option<String>,

    /// Refresh the autoloader after each seeder
    #[arg(
        long,
        default_value = "true",
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set
    )]
    pub dumpauto: bool,

    /// Drop positional keys from the generated row arrays
    #[arg(long)]
    pub noindex: bool,

    /// TOML configuration file
    #[arg(long, env = "SEEDLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL of the default connection
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl Cli {
    pub fn table_names(&self) -> Vec<String> {
        split_list(&self.tables)
    }

    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            clean: self.clean,
            force: self.force,
            connection: self.database.clone(),
            max: self.max,
            exclude: self
                .exclude
                .as_deref()
                .map(split_list)
                .unwrap_or_default()
                .into_iter()
                .filter(|column| !column.is_empty())
                .collect(),
            prerun: self.prerun.as_deref().map(split_list).unwrap_or_default(),
            postrun: self.postrun.as_deref().map(split_list).unwrap_or_default(),
            dump_autoload: self.dumpauto,
            indexed: !self.noindex,
        }
    }
}

/// Splits a comma separated list, trimming each entry. Empty entries are
/// kept so positional lists stay aligned.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|item| item.trim().to_string()).collect()
}
