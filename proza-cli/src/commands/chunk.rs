//! Chunk command implementation

use super::{process_files, GlobalArgs};
use crate::config::{load_config, ChunkingOverrides};
use crate::error::CliError;
use crate::input::{resolve_patterns, InputKind};
use crate::output::{create_formatter, open_output, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use proza_engine::{document_id_from_path, parse_conllu, ChunkProcessor, Input, Output};
use std::path::{Path, PathBuf};

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input files or patterns (supports glob, .gz is decompressed)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// How input files are read
    #[arg(long, value_enum, default_value = "auto")]
    pub input_kind: InputKind,

    /// Close a chunk at the first sentence end after this many tokens
    #[arg(long, value_name = "TOKENS")]
    pub chunk_size: Option<usize>,

    /// Skip whole sentences within the first TOKENS tokens
    #[arg(long, value_name = "TOKENS")]
    pub skip_first: Option<usize>,

    /// Skip whole sentences within the last TOKENS tokens
    #[arg(long, value_name = "TOKENS")]
    pub skip_last: Option<usize>,

    /// Document id (single input only; default: file name without extensions)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Omit the header line of delimited formats
    #[arg(long)]
    pub no_header: bool,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        if self.id.is_some() && files.len() > 1 {
            return Err(CliError::ConfigError(format!(
                "--id needs exactly one input file, got {}",
                files.len()
            ))
            .into());
        }

        let config = self.overrides().apply(load_config(global.config.as_deref())?)?;
        let processor = ChunkProcessor::with_config(config)?;
        log::info!("chunking {} files", files.len());

        let mut reporter = ProgressReporter::new(global.quiet);
        reporter.init_files(files.len() as u64);
        let results = process_files(&files, &reporter, |path| self.process_file(&processor, path));
        reporter.finish();

        let mut formatter =
            create_formatter(self.format, open_output(self.output.as_deref())?, !self.no_header);
        let mut failed = 0;
        for result in results {
            match result {
                Ok(output) => {
                    for row in &output.rows {
                        formatter.write_row(row)?;
                    }
                }
                Err(e) => {
                    failed += 1;
                    log::error!("{e:#}");
                }
            }
        }
        formatter.finish()?;

        if failed > 0 {
            return Err(CliError::ProcessingFailed {
                failed,
                total: files.len(),
            }
            .into());
        }
        Ok(())
    }

    fn overrides(&self) -> ChunkingOverrides {
        ChunkingOverrides {
            chunk_size: self.chunk_size,
            skip_first: self.skip_first,
            skip_last: self.skip_last,
        }
    }

    fn document_id(&self, path: &Path) -> Result<String> {
        match &self.id {
            Some(id) => Ok(id.clone()),
            None => document_id_from_path(path)
                .ok_or_else(|| anyhow!("Cannot derive a document id from {}", path.display())),
        }
    }

    fn process_file(&self, processor: &ChunkProcessor, path: &Path) -> Result<Output> {
        let doc_id = self.document_id(path)?;
        let kind = self.input_kind.resolve(path);
        log::debug!("{}: reading as {}", path.display(), kind.as_str());

        let output = run(processor, kind, &doc_id, path)
            .with_context(|| format!("Failed to process {}", path.display()))?;
        log::info!(
            "{}: {} chunks, {} rows in {:.1} ms",
            path.display(),
            output.metadata.chunk_count,
            output.rows.len(),
            output.metadata.processing_time_ms
        );
        Ok(output)
    }
}

fn run(
    processor: &ChunkProcessor,
    kind: InputKind,
    doc_id: &str,
    path: &Path,
) -> proza_engine::Result<Output> {
    match kind {
        InputKind::Auto | InputKind::Markup => {
            processor.process_markup(doc_id, Input::from_file(path))
        }
        InputKind::Text => {
            let text = Input::from_file(path).read_text()?;
            processor.process_text(doc_id, &text)
        }
        InputKind::Conllu => {
            let text = Input::from_file(path).read_text()?;
            processor.process_annotated(doc_id, &parse_conllu(&text)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(id: Option<&str>, kind: InputKind) -> ChunkArgs {
        ChunkArgs {
            input: vec![],
            input_kind: kind,
            chunk_size: None,
            skip_first: None,
            skip_last: None,
            id: id.map(str::to_string),
            format: OutputFormat::Tsv,
            output: None,
            no_header: false,
        }
    }

    #[test]
    fn test_document_id_from_file_name() {
        let args = args(None, InputKind::Auto);
        assert_eq!(
            args.document_id(Path::new("corpus/_abc001boek01_01.xml.gz")).unwrap(),
            "_abc001boek01_01"
        );
        let args = ChunkArgs {
            id: Some("eigen".to_string()),
            ..args
        };
        assert_eq!(args.document_id(Path::new("x.xml")).unwrap(), "eigen");
    }

    #[test]
    fn test_process_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notitie.txt");
        fs::write(&path, "De molen draaide. De molen stond stil.").unwrap();

        let processor = ChunkProcessor::new().unwrap();
        let output = args(None, InputKind::Auto)
            .process_file(&processor, &path)
            .unwrap();
        assert_eq!(output.metadata.doc_id, "notitie");
        let molen = output.rows.iter().find(|r| r.term == "molen").unwrap();
        assert_eq!(molen.frequency, 2);
    }

    #[test]
    fn test_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kapot.conllu");
        fs::write(&path, "1\tDe\n").unwrap();

        let processor = ChunkProcessor::new().unwrap();
        let err = args(None, InputKind::Auto)
            .process_file(&processor, &path)
            .unwrap_err();
        assert!(format!("{err:#}").contains("kapot.conllu"));
    }
}
