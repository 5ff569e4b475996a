//! End-to-end outline assembly over in-memory documents.

use pdf_outline::clean::normalize;
use pdf_outline::title::infer_title;
use pdf_outline::{
    DeepNumbering, Heading, HeadingClassifier, HeadingLevel, MemorySource, Outline,
    OutlineConfig, OutlineExtractor, WordSpan,
};

#[test]
fn test_single_page_document_without_title_words() {
    let source = MemorySource::from_lines(&[&[
        "1. Introduction",
        "",
        "some body text",
        "ISSN 0000-0000",
    ]]);

    let extractor = OutlineExtractor::default();
    let outline = extractor.assemble(&source).unwrap();

    assert_eq!(outline.title, "");
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    assert_eq!(outline.outline[0].page, 1);

    let with_name = extractor
        .assemble_with_fallback(&source, "paper")
        .unwrap();
    assert_eq!(with_name.title, "paper");
}

#[test]
fn test_multi_page_report() {
    let source = MemorySource::new()
        .with_page(
            Some("Annual Safety Report\nPrepared by the board\n# Summary\nbody"),
            vec![
                WordSpan::new("Annual", 22.0),
                WordSpan::new("Safety", 22.0),
                WordSpan::new("Report", 21.8),
                WordSpan::new("Prepared", 11.0),
                WordSpan::new("by", 11.0),
            ],
        )
        .with_page(
            Some("1. Background ..... 2\n1.1 Scope\nsee www.example.org\n1.1.1 Limits\n1.1.1.1 Too deep"),
            Vec::new(),
        )
        .with_page(None, Vec::new())
        .with_page(
            Some("KEY FINDINGS\nFigure 3 SHOWS TRENDS\n### Appendix"),
            Vec::new(),
        );

    let outline = OutlineExtractor::default()
        .assemble_with_fallback(&source, "ignored")
        .unwrap();

    assert_eq!(outline.title, "Annual Safety Report");
    assert_eq!(
        outline.outline,
        vec![
            heading(HeadingLevel::H1, "Summary", 1),
            heading(HeadingLevel::H1, "1. Background", 2),
            heading(HeadingLevel::H2, "1.1 Scope", 2),
            heading(HeadingLevel::H3, "1.1.1 Limits", 2),
            heading(HeadingLevel::H3, "KEY FINDINGS", 4),
            heading(HeadingLevel::H3, "Appendix", 4),
        ]
    );
}

#[test]
fn test_clamped_deep_numbering_end_to_end() {
    let config = OutlineConfig {
        deep_numbering: DeepNumbering::Clamp,
        ..OutlineConfig::default()
    };
    let source = MemorySource::from_lines(&[&["1.1.1.1 Too deep", "2. Next"]]);

    let outline = OutlineExtractor::new(config).assemble(&source).unwrap();
    assert_eq!(
        outline.outline,
        vec![
            heading(HeadingLevel::H3, "1.1.1.1 Too deep", 1),
            heading(HeadingLevel::H1, "2. Next", 1),
        ]
    );
}

#[test]
fn test_every_emitted_heading_is_clean_and_non_empty() {
    let lines = [
        "# ... 4",
        "## Background ..... 12",
        "###   Notes",
        "1.2 Overview .... 3",
        "CONTENTS AND SCOPE ..... 1",
        "#### Deep",
        "A VERY LONG ALL CAPS SENTENCE THAT HAS NINE WORDS TOTAL",
    ];
    let source = MemorySource::from_lines(&[&lines]);
    let outline = OutlineExtractor::default().assemble(&source).unwrap();

    let texts: Vec<_> = outline.outline.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Background", "Notes", "1.2 Overview", "CONTENTS AND SCOPE"]
    );
    for h in &outline.outline {
        assert!(!h.text.is_empty());
        assert_eq!(normalize(&h.text), h.text);
    }
}

#[test]
fn test_classifier_and_title_building_blocks() {
    let classifier = HeadingClassifier::default();
    assert_eq!(classifier.classify("ISSN 1234-5678"), None);
    assert_eq!(classifier.classify("METHODOLOGY OVERVIEW"), Some(HeadingLevel::H3));

    let words = vec![
        WordSpan::new("Deep", 24.0),
        WordSpan::new("Learning", 24.0),
        WordSpan::new("by", 10.0),
        WordSpan::new("J. Doe", 10.0),
    ];
    assert_eq!(infer_title(&words, 0.5), "Deep Learning");
}

#[test]
fn test_outline_json_shape() {
    let outline = Outline {
        title: "Doc".to_string(),
        outline: vec![heading(HeadingLevel::H3, "Detail", 7)],
    };
    let json = outline.to_json_pretty().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "title": "Doc",
            "outline": [{"level": "H3", "text": "Detail", "page": 7}]
        })
    );

    let back: Outline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outline);
}

fn heading(level: HeadingLevel, text: &str, page: usize) -> Heading {
    Heading {
        level,
        text: text.to_string(),
        page,
    }
}
