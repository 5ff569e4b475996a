use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::Result;
use crate::model::Outline;
use crate::outline::OutlineExtractor;
use crate::source::PdfSource;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub found: usize,
    pub succeeded: usize,
    /// Failed inputs with the error message for each.
    pub failed: Vec<(PathBuf, String)>,
}

/// `<dir>/<stem>_outline.json` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(format!("{}_outline.json", file_stem(input)))
}

/// Title used when nothing could be inferred from the first page.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Extracts one document and writes its outline to `output`.
pub fn process_document(
    extractor: &OutlineExtractor,
    input: &Path,
    output: &Path,
) -> Result<Outline> {
    let source = PdfSource::open(input)?;
    let outline = extractor.assemble_with_fallback(&source, &file_stem(input))?;
    write_outline(output, &outline)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        headings = outline.outline.len(),
        "processed document"
    );
    Ok(outline)
}

pub fn write_outline(path: &Path, outline: &Outline) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(outline)?;
    let mut file = File::create(path)?;
    file.write_all(&data)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// PDFs directly inside `dir`, sorted by name. The extension match ignores case.
pub fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Processes every PDF in `input_dir` into `<output_dir>/<stem>.json`.
///
/// A failing document is logged and recorded in the report; the remaining
/// documents are still processed.
pub fn run_batch(
    extractor: &OutlineExtractor,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;

    if !input_dir.is_dir() {
        warn!(input_dir = %input_dir.display(), "input directory does not exist");
        return Ok(BatchReport::default());
    }

    let pdfs = find_pdfs(input_dir)?;
    let mut report = BatchReport {
        found: pdfs.len(),
        ..BatchReport::default()
    };

    if pdfs.is_empty() {
        info!(input_dir = %input_dir.display(), "no PDF files found");
        return Ok(report);
    }
    info!(count = pdfs.len(), "found PDF files to process");

    for pdf in pdfs {
        let output = output_dir.join(format!("{}.json", file_stem(&pdf)));
        match process_document(extractor, &pdf, &output) {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                error!(input = %pdf.display(), error = %e, "failed to process document");
                report.failed.push((pdf, e.to_string()));
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        total = report.found,
        "processing complete"
    );
    Ok(report)
}
