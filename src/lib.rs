pub mod batch;
pub mod clean;
pub mod config;
pub mod error;
pub mod font_utils;
pub mod heading;
pub mod model;
pub mod outline;
pub mod source;
pub mod title;

pub use config::{DeepNumbering, FallbackThresholds, OutlineConfig};
pub use error::{OutlineError, Result};
pub use heading::{ExclusionFilter, HeadingClassifier, Rule};
pub use model::{Heading, HeadingLevel, Outline, WordSpan};
pub use outline::OutlineExtractor;
pub use source::{MemorySource, PageSource, PdfSource};
