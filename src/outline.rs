use tracing::debug;

use crate::clean::normalize_with;
use crate::config::OutlineConfig;
use crate::error::Result;
use crate::heading::HeadingClassifier;
use crate::model::{Heading, Outline};
use crate::source::PageSource;
use crate::title::infer_title;

#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    classifier: HeadingClassifier,
}

impl OutlineExtractor {
    pub fn new(config: OutlineConfig) -> Self {
        let classifier = HeadingClassifier::new(&config);
        Self { config, classifier }
    }

    // Any source error aborts the whole document.
    pub fn assemble<S: PageSource + ?Sized>(&self, source: &S) -> Result<Outline> {
        let title = if source.page_count() > 0 {
            infer_title(&source.page_words(1)?, self.config.title_font_tolerance)
        } else {
            String::new()
        };

        let mut outline = Vec::new();
        for page in 1..=source.page_count() {
            let Some(text) = source.page_text(page)? else {
                continue;
            };

            for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                let Some(rule) = self.classifier.classify_rule(line) else {
                    continue;
                };
                let text = normalize_with(line, self.config.strip_section_numbers);
                if text.is_empty() {
                    debug!(page, line, rule = rule.name, "heading empty after cleanup, skipped");
                    continue;
                }
                debug!(page, level = %rule.level, rule = rule.name, text = %text, "heading");
                outline.push(Heading {
                    level: rule.level,
                    text,
                    page,
                });
            }
        }

        Ok(Outline { title, outline })
    }

    /// [`assemble`](Self::assemble), substituting `fallback_title` when no
    /// title could be inferred.
    pub fn assemble_with_fallback<S: PageSource + ?Sized>(
        &self,
        source: &S,
        fallback_title: &str,
    ) -> Result<Outline> {
        let mut outline = self.assemble(source)?;
        if outline.title.is_empty() {
            outline.title = fallback_title.to_string();
        }
        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, WordSpan};
    use crate::source::MemorySource;

    #[test]
    fn single_page_with_metadata_line() {
        let source = MemorySource::from_lines(&[&[
            "1. Introduction",
            "",
            "some body text",
            "ISSN 0000-0000",
        ]]);

        let outline = OutlineExtractor::default().assemble(&source).unwrap();
        assert_eq!(outline.title, "");
        assert_eq!(
            outline.outline,
            vec![Heading {
                level: HeadingLevel::H1,
                text: "1. Introduction".to_string(),
                page: 1,
            }]
        );
    }

    #[test]
    fn section_numbers_can_be_stripped_from_text() {
        let config = OutlineConfig {
            strip_section_numbers: true,
            ..OutlineConfig::default()
        };
        let source = MemorySource::from_lines(&[&[
            "1. Introduction",
            "",
            "some body text",
            "ISSN 0000-0000",
        ]]);

        let outline = OutlineExtractor::new(config).assemble(&source).unwrap();
        assert_eq!(
            outline.outline,
            vec![Heading {
                level: HeadingLevel::H1,
                text: "Introduction".to_string(),
                page: 1,
            }]
        );
    }

    #[test]
    fn pages_without_text_are_skipped() {
        let source = MemorySource::new()
            .with_page(None, Vec::new())
            .with_page(Some("   \n"), Vec::new())
            .with_page(Some("## Methods ..... 7"), Vec::new());

        let outline = OutlineExtractor::default().assemble(&source).unwrap();
        assert_eq!(outline.outline.len(), 1);
        assert_eq!(outline.outline[0].text, "Methods");
        assert_eq!(outline.outline[0].level, HeadingLevel::H2);
        assert_eq!(outline.outline[0].page, 3);
    }

    #[test]
    fn headings_keep_page_then_line_order() {
        let source = MemorySource::from_lines(&[
            &["# Overview", "2.1 Scope", "text"],
            &["RESULTS AND DISCUSSION", "1.1.1 Detail ..... 9"],
        ]);

        let outline = OutlineExtractor::default().assemble(&source).unwrap();
        let got: Vec<_> = outline
            .outline
            .iter()
            .map(|h| (h.level, h.text.as_str(), h.page))
            .collect();
        assert_eq!(
            got,
            vec![
                (HeadingLevel::H1, "Overview", 1),
                (HeadingLevel::H2, "2.1 Scope", 1),
                (HeadingLevel::H3, "RESULTS AND DISCUSSION", 2),
                (HeadingLevel::H3, "1.1.1 Detail", 2),
            ]
        );
    }

    #[test]
    fn headings_that_clean_to_nothing_are_dropped() {
        let source = MemorySource::from_lines(&[&["# ... 5", "# Kept"]]);
        let outline = OutlineExtractor::default().assemble(&source).unwrap();
        assert_eq!(outline.outline.len(), 1);
        assert_eq!(outline.outline[0].text, "Kept");
    }

    #[test]
    fn title_comes_from_first_page_words() {
        let source = MemorySource::new()
            .with_page(
                Some("Deep Learning\nby J. Doe"),
                vec![
                    WordSpan::new("Deep", 24.0),
                    WordSpan::new("Learning", 24.0),
                    WordSpan::new("by", 10.0),
                    WordSpan::new("J. Doe", 10.0),
                ],
            )
            .with_page(Some("Big Words"), vec![WordSpan::new("Ignored", 40.0)]);

        let outline = OutlineExtractor::default()
            .assemble_with_fallback(&source, "file-stem")
            .unwrap();
        assert_eq!(outline.title, "Deep Learning");
    }

    #[test]
    fn fallback_title_used_when_inference_is_empty() {
        let source = MemorySource::from_lines(&[&["plain"]]);
        let outline = OutlineExtractor::default()
            .assemble_with_fallback(&source, "report")
            .unwrap();
        assert_eq!(outline.title, "report");
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn empty_document_is_not_an_error() {
        let outline = OutlineExtractor::default()
            .assemble(&MemorySource::new())
            .unwrap();
        assert_eq!(outline, Outline::default());
    }
}
