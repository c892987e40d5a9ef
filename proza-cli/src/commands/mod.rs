//! CLI command implementations

use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub mod chunk;
pub mod extract;
pub mod generate_config;
pub mod list;

/// Extract Dutch prose from TEI/HTML documents and count terms per chunk
#[derive(Debug, Parser)]
#[command(name = "proza", version, about, long_about = None)]
pub struct Cli {
    /// Options shared by all commands
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "PROZA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Worker threads (default: number of CPUs)
    #[arg(short, long, value_name = "N", global = true)]
    pub threads: Option<usize>,
}

impl GlobalArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }

    /// Size the global rayon pool
    pub fn init_threads(&self) -> Result<()> {
        let threads = match self.threads {
            Some(0) | None => num_cpus::get(),
            Some(n) => n,
        };
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize worker threads")?;
        log::debug!("using {threads} worker threads");
        Ok(())
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the Dutch prose text of markup documents
    Extract(extract::ExtractArgs),

    /// Chunk documents and emit term-frequency rows
    Chunk(chunk::ChunkArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Cli {
    /// Run the selected command
    pub fn run(&self) -> Result<()> {
        log::debug!("Arguments: {:?}", self);
        match &self.command {
            Commands::Extract(args) => args.execute(&self.global),
            Commands::Chunk(args) => args.execute(&self.global),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Run `task` over `files` on the rayon pool; results keep the input order
pub(crate) fn process_files<T, F>(
    files: &[PathBuf],
    reporter: &ProgressReporter,
    task: F,
) -> Vec<Result<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    files
        .par_iter()
        .map(|path| {
            let result = task(path);
            let name = path.display().to_string();
            match &result {
                Ok(_) => reporter.file_completed(&name),
                Err(_) => reporter.file_failed(&name),
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["proza", "list", "formats", "-q", "-vv", "-t", "2"]).unwrap();
        assert!(cli.global.quiet);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.threads, Some(2));
        assert!(matches!(
            cli.command,
            Commands::List {
                subcommand: list::ListCommands::Formats
            }
        ));
    }

    #[test]
    fn test_chunk_arguments() {
        let cli = Cli::try_parse_from([
            "proza",
            "-c",
            "proza.toml",
            "chunk",
            "-i",
            "a.xml",
            "-i",
            "b.xml.gz",
            "--chunk-size",
            "2000",
            "--skip-first",
            "100",
            "-f",
            "csv",
            "--no-header",
        ])
        .unwrap();
        assert_eq!(cli.global.config, Some(PathBuf::from("proza.toml")));
        let Commands::Chunk(args) = cli.command else {
            panic!("expected chunk command");
        };
        assert_eq!(args.input, vec!["a.xml", "b.xml.gz"]);
        assert_eq!(args.chunk_size, Some(2000));
        assert_eq!(args.skip_first, Some(100));
        assert_eq!(args.skip_last, None);
        assert_eq!(args.format, crate::output::OutputFormat::Csv);
        assert!(args.no_header);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["proza", "extract"]).is_err());
        assert!(Cli::try_parse_from(["proza", "chunk"]).is_err());
    }

    #[test]
    fn test_process_files_keeps_order() {
        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.xml"))).collect();
        let reporter = ProgressReporter::new(true);
        let results = process_files(&files, &reporter, |path| {
            if path == Path::new("3.xml") {
                anyhow::bail!("broken");
            }
            Ok(path.display().to_string())
        });

        assert_eq!(results.len(), 20);
        assert!(results[3].is_err());
        assert_eq!(results[7].as_ref().unwrap(), "7.xml");
        assert_eq!(results[19].as_ref().unwrap(), "19.xml");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
