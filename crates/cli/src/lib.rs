mod cursor;
mod fragment;
mod locals;
mod symbols;
mod typing;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cursor::CursorArgs;
use rubyscope_api::FragmentSnapshot;
use rubyscope_core::RuntimeSamples;
use rubyscope_core::config::RubyscopeConfig;
use rubyscope_core::logging::{LogConfig, init_logging};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "rubyscope",
    version,
    about = "Cursor context and local type resolution for Ruby sources",
    long_about = "Rubyscope reads a Ruby file and answers what an editor needs at a cursor: \
                  the call chain before it, the word under it, the enclosing namespace, \
                  and the locals in view with their effective types."
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs under ~/.rubyscope/logs
    #[arg(long, global = true)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the cursor fragment at a position
    #[command(
        long_about = "Prints the signature, base, word, namespace, scope and region flags \
                      for the cursor as JSON. Without a position the end of the file is used."
    )]
    Fragment {
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// List local variables with their effective types
    Locals {
        #[command(flatten)]
        cursor: CursorArgs,

        /// Runtime samples JSON, overriding the configured table
        #[arg(long, value_name = "SAMPLES")]
        samples: Option<PathBuf>,

        /// List every local in the file, not only those visible at the cursor
        #[arg(long)]
        all: bool,
    },
    /// Print the effective type of one visible local variable
    Type {
        #[command(flatten)]
        cursor: CursorArgs,

        /// Local variable name
        #[arg(value_name = "NAME")]
        name: String,

        /// Runtime samples JSON, overriding the configured table
        #[arg(long, value_name = "SAMPLES")]
        samples: Option<PathBuf>,
    },
    /// List the namespaces, methods and non-local variables a file defines
    Symbols {
        /// Ruby source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the JSON schema of the `fragment` output
    Schema,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RubyscopeConfig::load(path)?,
        None => RubyscopeConfig::default(),
    };
    if cli.log_to_file && config.log.log_dir.is_none() {
        config.log = config.log.with_file_sink(LogConfig::default_log_dir());
    }
    let _guard = init_logging("cli", &config.log);

    let output = match cli.command {
        Commands::Fragment { cursor } => serde_json::to_value(fragment::run(&cursor)?)?,
        Commands::Locals {
            cursor,
            samples,
            all,
        } => {
            let samples = load_samples(&config, samples.as_deref())?;
            serde_json::to_value(locals::run(&cursor, &samples, all)?)?
        }
        Commands::Type {
            cursor,
            name,
            samples,
        } => {
            let samples = load_samples(&config, samples.as_deref())?;
            serde_json::to_value(typing::run(&cursor, &name, &samples)?)?
        }
        Commands::Symbols { file } => serde_json::to_value(symbols::run(&file)?)?,
        Commands::Schema => serde_json::to_value(schemars::schema_for!(FragmentSnapshot))?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_samples(config: &RubyscopeConfig, path: Option<&Path>) -> anyhow::Result<RuntimeSamples> {
    match path {
        Some(path) => RuntimeSamples::load(path)
            .with_context(|| format!("loading runtime samples from {}", path.display())),
        None => Ok(config.load_samples()?),
    }
}
