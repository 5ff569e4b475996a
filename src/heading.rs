use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use tracing::debug;

use crate::config::{DeepNumbering, FallbackThresholds, OutlineConfig};
use crate::model::HeadingLevel;

/// Bylines, citations, and boilerplate. Matched case-insensitively anywhere in the line.
const EXCLUSION_PATTERNS: &[&str] = &[
    r"email",
    r"@",
    r"http",
    r"https",
    r"doi\.org",
    r"figure",
    r"table",
    r"vol\.",
    r"pp\.",
    r"no\.",
    r"received|revised|accepted",
    r"issn",
    r"copyright",
    r"prepared by",
    r"date:",
    r"keywords:",
];

static EXCLUSIONS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(EXCLUSION_PATTERNS.iter().map(|p| format!("(?i){p}"))).unwrap()
});

static NUMBERED_DEEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){3,}\.?\s+").unwrap());
static NUMBERED_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\s+").unwrap());
static NUMBERED_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\s+").unwrap());
static NUMBERED_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static MARKDOWN_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").unwrap());
static MARKDOWN_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(.+)$").unwrap());
static MARKDOWN_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"^###\s+(.+)$").unwrap());

#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    patterns: RegexSet,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self {
            patterns: EXCLUSIONS.clone(),
        }
    }
}

impl ExclusionFilter {
    pub fn is_excluded(&self, line: &str) -> bool {
        self.patterns.is_match(line)
    }

    pub fn matching_patterns(&self, line: &str) -> Vec<&'static str> {
        self.patterns
            .matches(line)
            .into_iter()
            .map(|idx| EXCLUSION_PATTERNS[idx])
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    UppercaseShort(FallbackThresholds),
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub level: HeadingLevel,
    matcher: Matcher,
}

impl Rule {
    fn pattern(name: &'static str, level: HeadingLevel, regex: &Regex) -> Self {
        Self {
            name,
            level,
            matcher: Matcher::Pattern(regex.clone()),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(regex) => regex.is_match(line),
            Matcher::UppercaseShort(limits) => is_uppercase_short(line, limits),
        }
    }
}

fn is_uppercase_short(line: &str, limits: &FallbackThresholds) -> bool {
    let words = line.split_whitespace().count();
    is_upper_case(line)
        && (limits.min_words..=limits.max_words).contains(&words)
        && line.chars().count() < limits.max_chars
}

// At least one cased character and no lower-case one.
pub fn is_upper_case(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    exclusions: ExclusionFilter,
    rules: Vec<Rule>,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(&OutlineConfig::default())
    }
}

impl HeadingClassifier {
    pub fn new(config: &OutlineConfig) -> Self {
        let mut rules = Vec::with_capacity(8);

        // Numbered forms, most specific first: "1.2.3 x" would also satisfy the looser prefixes.
        if config.deep_numbering == DeepNumbering::Clamp {
            rules.push(Rule::pattern("numbered-deep", HeadingLevel::H3, &NUMBERED_DEEP));
        }
        rules.push(Rule::pattern("numbered-h3", HeadingLevel::H3, &NUMBERED_H3));
        rules.push(Rule::pattern("numbered-h2", HeadingLevel::H2, &NUMBERED_H2));
        rules.push(Rule::pattern("numbered-h1", HeadingLevel::H1, &NUMBERED_H1));

        rules.push(Rule::pattern("markdown-h1", HeadingLevel::H1, &MARKDOWN_H1));
        rules.push(Rule::pattern("markdown-h2", HeadingLevel::H2, &MARKDOWN_H2));
        rules.push(Rule::pattern("markdown-h3", HeadingLevel::H3, &MARKDOWN_H3));

        rules.push(Rule {
            name: "uppercase-short",
            level: HeadingLevel::H3,
            matcher: Matcher::UppercaseShort(config.fallback),
        });

        Self {
            exclusions: ExclusionFilter::default(),
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, line: &str) -> Option<HeadingLevel> {
        self.classify_rule(line).map(|rule| rule.level)
    }

    /// Rules are tried in order; the first match wins.
    pub fn classify_rule(&self, line: &str) -> Option<&Rule> {
        if self.exclusions.is_excluded(line) {
            debug!(line, patterns = ?self.exclusions.matching_patterns(line), "excluded");
            return None;
        }
        let line = line.trim();
        self.rules.iter().find(|rule| rule.matches(line))
    }
}
