//! End-to-end pipeline tests for proza-engine

use flate2::write::GzEncoder;
use flate2::Compression;
use proza_engine::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const DBNL_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI>
  <teiHeader><fileDesc><titleStmt><title>Proef</title></titleStmt></fileDesc></teiHeader>
  <text>
    <front>
      <div type="titlepage" ebook-type="titlepage"><p>Het dorp</p></div>
      <div wpg-type="colofon"><p>Uitgave 1905.</p></div>
    </front>
    <body>
      <div type="chapter" lang="nl">
        <head>I</head>
        <p>Het dorp lag stil. De molen draaide.</p>
        <p>Ik zag <hi rend="italic">de</hi> molen.</p>
        <p lang="la">Ora et labora.</p>
      </div>
      <div type="chapter" lang="de">
        <p>Das Dorf.</p>
      </div>
    </body>
  </text>
</TEI>"#;

fn write_gz(path: &std::path::Path, content: &str) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn test_extract_from_gzip_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("_dor001proe01_01.xml.gz");
    write_gz(&path, DBNL_SAMPLE);

    let input = Input::from_file(&path);
    assert_eq!(input.document_id().as_deref(), Some("_dor001proe01_01"));

    let processor = ChunkProcessor::new().unwrap();
    let extraction = processor.extract_text(input).unwrap();
    assert_eq!(
        extraction.text,
        "Het dorp lag stil. De molen draaide.\nIk zag\nde\nmolen."
    );
    assert_eq!(extraction.summary.paragraphs, 6);
}

#[test]
fn test_chunking_with_trimming() {
    let processor = ChunkProcessor::builder().chunk_size(2).skip(1, 0).build().unwrap();
    let output = processor
        .process_markup("dorp", Input::from_text(DBNL_SAMPLE))
        .unwrap();

    // The first sentence is trimmed; later sentences form chunks of > 2 tokens
    assert!(output.metadata.selected_sentence_count < output.metadata.sentence_count);
    assert!(output.rows.iter().all(|r| r.term != "dorp"));
    assert!(output.rows.iter().any(|r| r.term == "molen"));
    assert!(output.metadata.chunk_count >= 2);
    assert_eq!(output.rows[0].chunk_id, "dorp-chunk-001");
}

#[test]
fn test_conllu_pipeline() {
    let conllu = "1\tDe\tde\tDET\t_\t_\t_\t_\t_\t_\n\
2\tmolens\tmolen\tNOUN\t_\t_\t_\t_\t_\t_\n\
3\tdraaiden\tdraaien\tVERB\t_\t_\t_\t_\t_\t_\n\
4\t.\t.\tPUNCT\t_\t_\t_\t_\t_\t_\n\
\n\
1\tEen\teen\tDET\t_\t_\t_\t_\t_\t_\n\
2\tmolen\tmolen\tNOUN\t_\t_\t_\t_\t_\t_\n\
3\tstond\tstaan\tVERB\t_\t_\t_\t_\t_\t_\n\
4\t.\t.\tPUNCT\t_\t_\t_\t_\t_\t_\n";

    let doc = parse_conllu(conllu).unwrap();
    let processor = ChunkProcessor::builder().chunk_size(3).build().unwrap();
    let output = processor.process_annotated("ud", &doc).unwrap();

    let rows: Vec<_> = output
        .rows
        .iter()
        .map(|r| (r.chunk_id.as_str(), r.term.as_str(), r.frequency))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("ud-chunk-001", "de", 1),
            ("ud-chunk-001", "molen", 2),
            ("ud-chunk-001", "draaien", 1),
            ("ud-chunk-001", "een", 1),
            ("ud-chunk-001", "staan", 1),
        ]
    );
}

#[test]
fn test_config_file_drives_processor() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("proza.toml");
    fs::write(
        &config_path,
        "[classifier]\ntarget_language = \"de\"\n\n[chunking]\nchunk_size = 10\n",
    )
    .unwrap();

    let config = ProzaConfig::from_file(&config_path).unwrap();
    let processor = ChunkProcessor::with_config(config).unwrap();
    let extraction = processor.extract_text(Input::from_text(DBNL_SAMPLE)).unwrap();
    assert_eq!(extraction.text, "Das Dorf.");
}

#[test]
fn test_custom_lexicon() {
    let dir = TempDir::new().unwrap();
    let lexicon_path = dir.path().join("mini.toml");
    fs::write(
        &lexicon_path,
        "[metadata]\ncode = \"nl\"\nname = \"Mini\"\n\n[pos]\nNOUN = [\"molen\"]\n",
    )
    .unwrap();

    let mut config = ProzaConfig::default();
    config.annotation.lexicon = Some(lexicon_path);
    let processor = ChunkProcessor::with_config(config).unwrap();
    let output = processor.process_text("mini", "De molen.").unwrap();
    let tags: Vec<_> = output.rows.iter().map(|r| r.pos.as_str()).collect();
    assert_eq!(tags, vec!["X", "NOUN"]);
}

#[test]
fn test_malformed_markup_reports_error() {
    let processor = ChunkProcessor::new().unwrap();
    let err = processor
        .extract_text(Input::from_text("<TEI><p>open</p><hi rend=\"x"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Markup { .. }));
}
