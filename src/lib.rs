//! # usfm2json
//!
//! USFM scripture markup to structured records.
//!
//! ## Example
//!
//! ```no_run
//! use usfm2json::{DiscardMarkers, LeveledHandler, ParseOptions, UsfmParser};
//!
//! let parser = UsfmParser::new(ParseOptions::default())
//!     .with_handler(LeveledHandler::new("s"))
//!     .with_element_hook(DiscardMarkers::new(["f", "x"]));
//!
//! let document = parser.parse_file("01-GEN.usfm").unwrap();
//! for record in &document.records {
//!     println!("{} {:?}", record.tag, record.content);
//! }
//! ```

pub mod core;
pub mod error;
pub mod parser;
pub mod render;

pub use crate::core::ast::{Document, InlineElement, LineRecord, Node, Params, DEFAULT_PARAM};
pub use crate::core::diagnostic::{Diagnostic, DiagnosticKind};
pub use crate::core::level::{parse_leveled_tag, split_level};
pub use error::{Error, Result};
pub use parser::{
    ChapterHandler, Construction, DiscardMarkers, ElementHook, LeveledHandler, LineHandler,
    ParseContext, UsfmParser, VerseHandler, MAX_NESTING,
};
pub use render::{JsonRenderer, Renderer, UsfmRenderer};

/// Options for parsing USFM text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// What to do with a line that does not start with a backslash.
    pub missing_prefix: MissingPrefix,
    /// Whether diagnostics are also emitted through the `log` facade.
    pub log_diagnostics: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            missing_prefix: MissingPrefix::Keep,
            log_diagnostics: true,
        }
    }
}

/// Policy for lines that lack the leading marker backslash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPrefix {
    /// Use the leading token as the tag unchanged and raise a diagnostic.
    #[default]
    Keep,
    /// Drop the first character as if it were the backslash.
    Slice,
    /// Fail the parse with [`Error::MissingPrefix`].
    Reject,
}
