//! Extract command implementation

use super::{process_files, GlobalArgs};
use crate::config::load_config;
use crate::error::CliError;
use crate::input::resolve_patterns;
use crate::output::open_output;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use proza_engine::{ChunkProcessor, Extraction, Input};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob, .gz is decompressed)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print paragraph counts per file to stderr
    #[arg(long)]
    pub stats: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let processor = ChunkProcessor::with_config(load_config(global.config.as_deref())?)?;
        log::info!("extracting Dutch prose from {} files", files.len());

        let mut reporter = ProgressReporter::new(global.quiet);
        reporter.init_files(files.len() as u64);
        let results = process_files(&files, &reporter, |path| {
            processor
                .extract_text(Input::from_file(path))
                .with_context(|| format!("Failed to extract {}", path.display()))
        });
        reporter.finish();

        let mut out = open_output(self.output.as_deref())?;
        let mut failed = 0;
        let mut first = true;
        for (path, result) in files.iter().zip(results) {
            match result {
                Ok(extraction) => {
                    if self.stats {
                        eprintln!("{}", stats_line(&path.display().to_string(), &extraction));
                    }
                    if !first {
                        writeln!(out)?;
                    }
                    writeln!(out, "{}", extraction.text)?;
                    first = false;
                }
                Err(e) => {
                    failed += 1;
                    log::error!("{e:#}");
                }
            }
        }
        out.flush()?;

        if failed > 0 {
            return Err(CliError::ProcessingFailed {
                failed,
                total: files.len(),
            }
            .into());
        }
        Ok(())
    }
}

fn stats_line(name: &str, extraction: &Extraction) -> String {
    let summary = &extraction.summary;
    format!(
        "{name}: {} paragraphs, {} prose, {} Dutch, {} Dutch prose",
        summary.paragraphs, summary.prose, summary.dutch, summary.dutch_prose
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proza_engine::ClassificationSummary;

    #[test]
    fn test_stats_line() {
        let extraction = Extraction {
            text: String::new(),
            summary: ClassificationSummary {
                paragraphs: 10,
                prose: 8,
                dutch: 9,
                dutch_prose: 7,
            },
        };
        assert_eq!(
            stats_line("a.xml", &extraction),
            "a.xml: 10 paragraphs, 8 prose, 9 Dutch, 7 Dutch prose"
        );
    }
}
