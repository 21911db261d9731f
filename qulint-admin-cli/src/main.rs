//! qulint-admin CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use qulint_admin::observability::{self, ObservabilityConfig};
use qulint_admin_cli_lib::commands::load_config;
use qulint_admin_cli_lib::{ArtifactArg, ColumnsCommand, ScaffoldCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qulint-admin")]
#[command(version)]
#[command(about = "Generate CRUD admin screen definitions from table schemas", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./qulint-admin.toml and the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate form, show and grid statements for a model
    Scaffold {
        /// Model identifier (e.g., `User`, `UserProfile`)
        model: String,
        /// Table to read instead of the declared one (`table` or `database.table`)
        #[arg(long)]
        table: Option<String>,
        /// Print only one artifact
        #[arg(long, value_enum, conflicts_with = "write")]
        only: Option<ArtifactArg>,
        /// Write a screen definition file into the configured output directory
        #[arg(long)]
        write: bool,
        /// Overwrite an existing file without asking
        #[arg(long, requires = "write")]
        force: bool,
    },
    /// Show how each column of a model will be scaffolded
    Columns {
        /// Model identifier
        model: String,
        /// Table to read instead of the declared one
        #[arg(long)]
        table: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        ObservabilityConfig::default().verbose()
    } else {
        ObservabilityConfig::default()
    };
    observability::init_with(&logging)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scaffold {
            model,
            table,
            only,
            write,
            force,
        } => {
            let cmd = ScaffoldCommand::new(model, table)
                .only(only.map(Into::into))
                .write(write, force);
            cmd.execute(&config).await?;
        }
        Commands::Columns { model, table } => {
            let cmd = ColumnsCommand::new(model, table);
            cmd.execute(&config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scaffold() {
        let cli = Cli::try_parse_from([
            "qulint-admin",
            "scaffold",
            "Post",
            "--table",
            "blog.posts",
            "--only",
            "grid",
        ])
        .unwrap();

        match cli.command {
            Commands::Scaffold {
                model, table, only, ..
            } => {
                assert_eq!(model, "Post");
                assert_eq!(table.as_deref(), Some("blog.posts"));
                assert_eq!(only, Some(ArtifactArg::Grid));
            }
            Commands::Columns { .. } => panic!("expected scaffold"),
        }
    }

    #[test]
    fn test_force_requires_write() {
        assert!(Cli::try_parse_from(["qulint-admin", "scaffold", "User", "--force"]).is_err());
        assert!(
            Cli::try_parse_from(["qulint-admin", "scaffold", "User", "--write", "--force"]).is_ok()
        );
    }

    #[test]
    fn test_only_conflicts_with_write() {
        assert!(
            Cli::try_parse_from(["qulint-admin", "scaffold", "User", "--only", "form", "--write"])
                .is_err()
        );
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["qulint-admin", "columns", "User", "--config", "admin.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("admin.toml")));
    }
}
