//! Persona-driven ranking over a directory of PDF collections.
//!
//! A collection directory holds a `challenge1b_input.json` descriptor and a
//! `PDFs/` folder. [`process_collection`] loads every PDF, segments the text
//! into sections, ranks them globally against the persona's task and refines
//! the best ones into short excerpts.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::segment_documents;
use crate::error::{Error, Result};
use crate::model::Document;
use crate::options::RankOptions;
use crate::provider::{PageProvider, PdfProvider};
use crate::rank::{rank_sections, refine_text, Embedder, Query};

/// Descriptor file name inside a collection.
pub const INPUT_FILE: &str = "challenge1b_input.json";

/// Folder holding the collection's PDFs.
pub const PDF_DIR: &str = "PDFs";

/// Report file name.
pub const OUTPUT_FILE: &str = "challenge1b_output.json";

/// Timestamp format of `processing_timestamp` (UTC).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The persona the ranking is performed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Role description, e.g. "Travel Planner"
    pub role: String,
    /// Any other fields, echoed back unchanged
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The task the persona needs to accomplish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    pub task: String,
    /// Any other fields, echoed back unchanged
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Contents of `challenge1b_input.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInput {
    /// Persona
    pub persona: Persona,
    /// Job to be done
    pub job_to_be_done: JobToBeDone,
    /// Document list (informational; the `PDFs/` folder is authoritative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Value>>,
    /// Challenge metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<Value>,
}

impl CollectionInput {
    /// Read a descriptor file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File names of the discovered PDFs
    pub input_documents: Vec<String>,
    /// Persona, as given
    pub persona: Persona,
    /// Job, as given
    pub job_to_be_done: JobToBeDone,
    /// UTC processing time
    pub processing_timestamp: String,
}

/// One ranked section in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    pub importance_rank: usize,
}

/// Refined excerpt of a top-ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSectionAnalysis {
    pub document: String,
    pub section_title: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Contents of `challenge1b_output.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub sub_section_analysis: Vec<SubSectionAnalysis>,
}

/// Fold accented `é` to `e`.
pub fn clean_text(text: &str) -> String {
    text.replace('\u{00e9}', "e")
}

/// Sorted subdirectories of a root directory.
pub fn discover_collections(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::MissingInput(root.to_path_buf()));
    }
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// PDF files of a folder, sorted by file name.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Load documents, skipping the ones that fail.
fn load_documents(paths: &[PathBuf], parallel: bool) -> Vec<Document> {
    let load = |path: &PathBuf| match PdfProvider.load(path) {
        Ok(doc) => {
            log::info!("analyzed layout for {}", doc.name);
            Some(doc)
        }
        Err(e) => {
            log::warn!("could not read '{}', skipping: {}", path.display(), e);
            None
        }
    };

    if parallel {
        paths.par_iter().filter_map(load).collect()
    } else {
        paths.iter().filter_map(load).collect()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Rank already loaded documents for a persona and job.
///
/// Returns `Ok(None)` when no section could be extracted from any document.
pub fn rank_documents(
    input: &CollectionInput,
    input_documents: Vec<String>,
    documents: &[Document],
    embedder: &dyn Embedder,
    options: &RankOptions,
) -> Result<Option<CollectionReport>> {
    let sections = segment_documents(documents);
    if sections.is_empty() {
        log::warn!("no text could be extracted from any document in this collection");
        return Ok(None);
    }
    log::info!("segmented {} sections from {} documents", sections.len(), documents.len());

    let task = &input.job_to_be_done.task;
    let query = Query::from_persona(&input.persona.role, task);
    log::debug!("query: {}", query.text());
    let query_embedding = query.embed(embedder)?;

    let ranked = rank_sections(sections, &query_embedding, task, embedder, options)?;

    let extracted_sections = ranked
        .iter()
        .take(options.top_sections)
        .map(|r| ExtractedSection {
            document: clean_text(&r.section.document),
            page_number: r.section.page_number,
            section_title: clean_text(&r.section.section_title),
            importance_rank: r.importance_rank,
        })
        .collect();

    let sub_section_analysis = ranked
        .iter()
        .take(options.top_refined)
        .map(|r| {
            let refined = refine_text(
                &r.section.text,
                &query_embedding,
                embedder,
                options.sentences_per_excerpt,
            )?;
            Ok(SubSectionAnalysis {
                document: clean_text(&r.section.document),
                section_title: clean_text(&r.section.section_title),
                refined_text: clean_text(&refined),
                page_number: r.section.page_number,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(CollectionReport {
        metadata: ReportMetadata {
            input_documents,
            persona: input.persona.clone(),
            job_to_be_done: input.job_to_be_done.clone(),
            processing_timestamp: chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        },
        extracted_sections,
        sub_section_analysis,
    }))
}

/// Process one collection directory.
///
/// Fails with [`Error::MissingInput`] when the descriptor or the `PDFs/`
/// folder is absent. Unreadable PDFs are skipped with a warning.
pub fn process_collection(
    dir: &Path,
    embedder: &dyn Embedder,
    options: &RankOptions,
) -> Result<Option<CollectionReport>> {
    let input_path = dir.join(INPUT_FILE);
    if !input_path.is_file() {
        return Err(Error::MissingInput(input_path));
    }
    let pdf_dir = dir.join(PDF_DIR);
    if !pdf_dir.is_dir() {
        return Err(Error::MissingInput(pdf_dir));
    }

    let input = CollectionInput::from_file(&input_path)?;
    let pdfs = discover_pdfs(&pdf_dir)?;
    log::info!("found {} PDFs in {}", pdfs.len(), pdf_dir.display());

    let documents = load_documents(&pdfs, options.parallel);
    let names = pdfs.iter().map(|p| file_name(p)).collect();
    rank_documents(&input, names, &documents, embedder, options)
}

/// Serialize a report to JSON (pretty, two-space indent, non-ASCII kept).
pub fn report_to_json(report: &CollectionReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| Error::Render(e.to_string()))
}

/// Write a report, creating parent directories.
///
/// The JSON is produced before the file is created, so a serialization
/// failure never leaves a partial file behind.
pub fn write_report(report: &CollectionReport, path: &Path) -> Result<()> {
    let json = report_to_json(report)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Where a collection's report is written under an output root.
pub fn report_path(output: &Path, collection: &Path) -> PathBuf {
    output.join(file_name(collection)).join(OUTPUT_FILE)
}

/// Process one collection and write its report under `output`.
///
/// Returns the written path, or `None` when no text was extracted.
pub fn run_collection(
    dir: &Path,
    output: &Path,
    embedder: &dyn Embedder,
    options: &RankOptions,
) -> Result<Option<PathBuf>> {
    let Some(report) = process_collection(dir, embedder, options)? else {
        log::warn!("{}: no text extracted, no report written", dir.display());
        return Ok(None);
    };
    let path = report_path(output, dir);
    write_report(&report, &path)?;
    log::info!(
        "{}: {} sections written to {}",
        file_name(dir),
        report.extracted_sections.len(),
        path.display()
    );
    Ok(Some(path))
}

/// Outcome of a batch run over several collections.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Reports written
    pub written: Vec<PathBuf>,
    /// Collections without extractable text
    pub empty: Vec<PathBuf>,
    /// Collections that failed, with the error
    pub failed: Vec<(PathBuf, Error)>,
}

/// Run every collection under `root`. A failing collection is logged and
/// recorded; the remaining collections are still processed.
pub fn run_collections(
    root: &Path,
    output: &Path,
    embedder: &dyn Embedder,
    options: &RankOptions,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for dir in discover_collections(root)? {
        match run_collection(&dir, output, embedder, options) {
            Ok(Some(path)) => summary.written.push(path),
            Ok(None) => summary.empty.push(dir),
            Err(e) => {
                log::error!("{}: {}", dir.display(), e);
                summary.failed.push((dir, e));
            }
        }
    }
    Ok(summary)
}
