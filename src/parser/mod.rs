//! Line dispatcher for USFM text.

mod context;
mod handlers;
mod hooks;
mod inline;
mod params;

use crate::core::ast::{Document, LineRecord, Node};
use crate::core::diagnostic::Diagnostic;
use crate::{error::Error, MissingPrefix, ParseOptions, Result};
use std::path::Path;

pub use self::context::ParseContext;
pub use self::handlers::{ChapterHandler, LeveledHandler, LineHandler, VerseHandler};
pub(crate) use self::handlers::VERSE_TAG;
pub use self::hooks::{
    Construction, DefaultElementHook, DiscardMarkers, ElementHook, HookId, HookTable,
};
pub use self::inline::MAX_NESTING;
pub use self::params::parse_params;

const MARKER: char = '\\';

/// Main parser that routes each line to a handler and builds records.
pub struct UsfmParser {
    options: ParseOptions,
    handlers: Vec<Box<dyn LineHandler>>,
    hooks: HookTable,
}

impl UsfmParser {
    /// Creates a parser with the stock verse and chapter handlers.
    pub fn new(options: ParseOptions) -> Self {
        Self::bare(options)
            .with_handler(VerseHandler)
            .with_handler(ChapterHandler)
    }

    /// Creates a parser with default options.
    pub fn with_defaults() -> Self {
        Self::new(ParseOptions::default())
    }

    /// Creates a parser with no line handlers; every line goes to the fallback.
    pub fn bare(options: ParseOptions) -> Self {
        Self {
            options,
            handlers: Vec::new(),
            hooks: HookTable::new(),
        }
    }

    /// Registers a line handler after those already present.
    pub fn with_handler(mut self, handler: impl LineHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Registers an inline element hook ahead of the default one.
    pub fn with_element_hook(mut self, hook: impl ElementHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Parses USFM text into a document.
    ///
    /// # Arguments
    /// * `text` - Whole USFM text, lines separated by `\n` or `\r\n`
    ///
    /// # Returns
    /// The records in input order along with any diagnostics raised.
    pub fn parse(&self, text: &str) -> Result<Document> {
        let mut records = Vec::new();
        let diagnostics = self.parse_with(text, |record| records.push(record))?;
        Ok(Document {
            records,
            diagnostics,
        })
    }

    /// Parses USFM text, handing each record to `sink` as soon as it is built.
    pub fn parse_with<F>(&self, text: &str, mut sink: F) -> Result<Vec<Diagnostic>>
    where
        F: FnMut(LineRecord),
    {
        let mut context = ParseContext::new(&self.hooks, self.options.log_diagnostics);
        let mut count = 0usize;

        for (index, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            context.begin_line(index + 1);

            let tag_line = match self.strip_marker(line, &mut context)? {
                Some(rest) => rest,
                None => line,
            };
            let (lead_tag, contents) = tag_line.split_once(' ').unwrap_or((tag_line, ""));

            let record = self.dispatch(lead_tag, contents, &mut context);
            sink(record);
            count += 1;
        }

        let diagnostics = context.take_diagnostics();
        log::debug!(
            "parsed {} records with {} diagnostics",
            count,
            diagnostics.len()
        );
        Ok(diagnostics)
    }

    /// Reads and parses a USFM file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let text = std::fs::read_to_string(path)?;
        self.parse(&text)
    }

    /// Parses a single line's free text without line dispatch.
    pub fn parse_inline(&self, text: &str) -> (Vec<Node>, Vec<Diagnostic>) {
        let mut context = ParseContext::new(&self.hooks, self.options.log_diagnostics);
        context.begin_line(1);
        let nodes = context.parse_inline(text);
        (nodes, context.take_diagnostics())
    }

    /// Returns the line without its marker prefix, or `None` to use it as is.
    fn strip_marker<'l>(
        &self,
        line: &'l str,
        context: &mut ParseContext<'_>,
    ) -> Result<Option<&'l str>> {
        if let Some(rest) = line.strip_prefix(MARKER) {
            return Ok(Some(rest));
        }
        match self.options.missing_prefix {
            MissingPrefix::Keep => {
                context.report_missing_prefix();
                Ok(None)
            }
            MissingPrefix::Slice => {
                let mut chars = line.chars();
                chars.next();
                Ok(Some(chars.as_str()))
            }
            MissingPrefix::Reject => Err(Error::MissingPrefix {
                line: context.line_number(),
            }),
        }
    }

    fn dispatch(&self, tag: &str, contents: &str, context: &mut ParseContext<'_>) -> LineRecord {
        for handler in &self.handlers {
            if let Some(record) = handler.try_match(tag, contents, context) {
                log::trace!(
                    "line {}: '{}' handled by '{}'",
                    context.line_number(),
                    tag,
                    handler.key()
                );
                context.end_line(tag, handler.key());
                return record;
            }
        }

        let record = handlers::fallback_record(tag, contents, context);
        context.end_line(tag, tag);
        record
    }
}

impl Default for UsfmParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}
