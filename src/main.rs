//! pfedit: rewrite named blocks of road/rail design profile files.
#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use pfedit::{batch, block::Block, config, encoding, formats, scanner, MutationTable};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pfedit", version)]
#[command(about = "Rewrite named blocks of profile (.pf) files", long_about = None)]
struct Cli {
    /// Load settings from this TOML file instead of ./pfedit.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite files in place
    Apply {
        /// Files or directories to rewrite
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Mirror a folder and rewrite every profile file in the copy
    Batch {
        /// Folder to copy from
        src: PathBuf,

        /// Folder to copy into and rewrite
        dest: PathBuf,

        /// Destination subdirectory to leave untouched
        #[arg(long, value_name = "DIR")]
        preserve: Option<String>,

        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print the blocks scanned from a file as JSON
    Blocks {
        /// Profile file to scan
        file: PathBuf,

        /// Text encoding of the file
        #[arg(long, value_name = "LABEL")]
        encoding: Option<String>,
    },
    /// Print the built-in mutation table as JSON
    Mutations,
}

#[derive(Args)]
struct RuleArgs {
    /// Load the mutation table from a JSON file instead of the built-in one
    #[arg(long, value_name = "FILE")]
    mutations: Option<PathBuf>,

    /// Do not write the file name into the model management block
    #[arg(long)]
    no_model_filename: bool,

    /// Add the fixed offset to the start design elevation
    #[arg(long)]
    start_elev_offset: bool,

    /// Text encoding of the files
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

impl RuleArgs {
    /// Override config with command line args.
    fn apply_to(&self, cfg: &mut config::Config) {
        if self.no_model_filename {
            cfg.model_filename = false;
        }
        if self.start_elev_offset {
            cfg.start_elev_offset = true;
        }
        if let Some(label) = &self.encoding {
            cfg.encoding.clone_from(label);
        }
        if !self.ext.is_empty() {
            cfg.file_extensions.clone_from(&self.ext);
        }
    }

    fn table(&self) -> pfedit::Result<MutationTable> {
        match &self.mutations {
            Some(path) => MutationTable::load(path),
            None => Ok(MutationTable::builtin()),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> pfedit::Result<()> {
    let mut cfg = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Apply { paths, rules } => {
            rules.apply_to(&mut cfg);
            let table = rules.table()?;
            let enc = encoding::lookup(&cfg.encoding)?;
            let documents = batch::find_documents(&paths, &cfg.file_extensions)?;

            if documents.is_empty() {
                eprintln!("No matching files found");
                return Ok(());
            }
            for doc in &documents {
                pfedit::rewrite_file(doc, &table, cfg.options(), enc)?;
            }
        }
        Command::Batch {
            src,
            dest,
            preserve,
            rules,
        } => {
            rules.apply_to(&mut cfg);
            if let Some(dir) = preserve {
                cfg.preserve_dir = dir;
            }
            let table = rules.table()?;
            let enc = encoding::lookup(&cfg.encoding)?;
            batch::run_batch(
                &src,
                &dest,
                &cfg.preserve_dir,
                &cfg.file_extensions,
                &table,
                cfg.options(),
                enc,
            )?;
        }
        Command::Blocks { file, encoding } => {
            let label = encoding.unwrap_or(cfg.encoding);
            let blocks = scan_file(&file, &label)?;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Command::Mutations => {
            let table = MutationTable::builtin();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}

fn scan_file(path: &Path, label: &str) -> pfedit::Result<Vec<Block>> {
    let enc = encoding::lookup(label)?;
    let raw = std::fs::read(path).map_err(|e| pfedit::Error::io(path, e))?;
    let decoded = encoding::decode(&raw, enc);
    let lines: Vec<&str> = decoded.text.split_inclusive('\n').collect();
    Ok(scanner::scan_blocks(
        &lines,
        &formats::profile::ProfileFormat,
    ))
}
