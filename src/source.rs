use std::panic;
use std::path::Path;

use lopdf::{Document, ObjectId};
use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::error::{OutlineError, Result};
use crate::font_utils;
use crate::model::WordSpan;

// Pages are 1-based.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// `None` when the page has no extractable text.
    fn page_text(&self, page: usize) -> Result<Option<String>>;

    fn page_words(&self, page: usize) -> Result<Vec<WordSpan>>;
}

/// Page text comes from pdf-extract, falling back to lopdf page by page.
pub struct PdfSource {
    doc: Document,
    bytes: Vec<u8>,
    pages: Vec<(u32, ObjectId)>,
    extracted: OnceCell<Option<Vec<String>>>,
}

impl PdfSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OutlineError::InputNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let doc = Document::load_mem(&bytes)?;
        let pages = doc.get_pages().into_iter().collect();
        Ok(Self {
            doc,
            bytes,
            pages,
            extracted: OnceCell::new(),
        })
    }

    fn page_entry(&self, page: usize) -> Result<(u32, ObjectId)> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .copied()
            .ok_or_else(|| OutlineError::TextExtract {
                page,
                message: format!("page out of range (document has {})", self.pages.len()),
            })
    }

    fn extracted_pages(&self) -> Option<&Vec<String>> {
        self.extracted
            .get_or_init(|| extract_pages(&self.bytes, self.pages.len()))
            .as_ref()
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<Option<String>> {
        let (page_no, _) = self.page_entry(page)?;

        if let Some(pages) = self.extracted_pages() {
            return Ok(non_blank(pages[page - 1].clone()));
        }

        match self.doc.extract_text(&[page_no]) {
            Ok(text) => Ok(non_blank(text)),
            Err(e) => {
                warn!(page, error = %e, "could not extract text from page");
                Ok(None)
            }
        }
    }

    fn page_words(&self, page: usize) -> Result<Vec<WordSpan>> {
        let (_, page_id) = self.page_entry(page)?;
        match font_utils::extract_words(&self.doc, page_id) {
            Ok(words) => Ok(words),
            Err(e) => {
                warn!(page, error = %e, "could not decode page content for font sizes");
                Ok(Vec::new())
            }
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

// One text block per page from pdf-extract, or None when it fails or disagrees with lopdf's page count.
fn extract_pages(bytes: &[u8], expected_pages: usize) -> Option<Vec<String>> {
    // pdf-extract panics on some malformed inputs; treat that like any other failure.
    let pages = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            debug!(error = %e, "pdf-extract failed, using lopdf text");
            return None;
        }
        Err(_) => {
            warn!("pdf-extract panicked, using lopdf text");
            return None;
        }
    };

    if pages.len() == expected_pages {
        Some(pages)
    } else {
        debug!(
            pages = pages.len(),
            expected_pages, "pdf-extract page count mismatch, using lopdf text"
        );
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<MemoryPage>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    pub text: Option<String>,
    pub words: Vec<WordSpan>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, text: Option<&str>, words: Vec<WordSpan>) -> Self {
        self.pages.push(MemoryPage {
            text: text.map(str::to_string),
            words,
        });
        self
    }

    pub fn from_lines(pages: &[&[&str]]) -> Self {
        pages.iter().fold(Self::new(), |source, lines| {
            source.with_page(Some(lines.join("\n").as_str()), Vec::new())
        })
    }

    fn page(&self, page: usize) -> Result<&MemoryPage> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .ok_or_else(|| OutlineError::TextExtract {
                page,
                message: format!("page out of range (document has {})", self.pages.len()),
            })
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<Option<String>> {
        Ok(self.page(page)?.text.clone())
    }

    fn page_words(&self, page: usize) -> Result<Vec<WordSpan>> {
        Ok(self.page(page)?.words.clone())
    }
}
