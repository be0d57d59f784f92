//! Root-tag handlers - turn a line's lead tag and contents into a record.

use super::context::ParseContext;
use crate::core::ast::LineRecord;
use crate::core::level::{leading_number, parse_leveled_tag, split_level};

/// A line classifier tried in registration order by the dispatcher.
pub trait LineHandler: Send + Sync {
    /// Key recorded as the context's `last_handler` when this handler matches.
    fn key(&self) -> &str;

    /// Returns a record if this handler claims the line.
    fn try_match(
        &self,
        tag: &str,
        contents: &str,
        context: &mut ParseContext<'_>,
    ) -> Option<LineRecord>;
}

pub(crate) const VERSE_TAG: &str = "v";

/// `\v N text` - verse number plus inline content.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerseHandler;

impl LineHandler for VerseHandler {
    fn key(&self) -> &str {
        VERSE_TAG
    }

    fn try_match(
        &self,
        tag: &str,
        contents: &str,
        context: &mut ParseContext<'_>,
    ) -> Option<LineRecord> {
        if tag != VERSE_TAG {
            return None;
        }
        let (number, text) = contents.split_once(' ').unwrap_or((contents, ""));
        Some(LineRecord {
            number: leading_number(number),
            raw_content: Some(contents.to_string()),
            content: Some(context.parse_inline(text)),
            ..LineRecord::new(VERSE_TAG)
        })
    }
}

/// `\c N` - chapter number, no inline content.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChapterHandler;

impl LineHandler for ChapterHandler {
    fn key(&self) -> &str {
        "c"
    }

    fn try_match(
        &self,
        tag: &str,
        contents: &str,
        _context: &mut ParseContext<'_>,
    ) -> Option<LineRecord> {
        if tag != "c" {
            return None;
        }
        Some(LineRecord {
            number: leading_number(contents.trim()),
            raw_content: Some(contents.to_string()),
            ..LineRecord::new("c")
        })
    }
}

/// Tags like `s`, `s1`, `s2` that share a class and carry a level, 1 if unnumbered.
#[derive(Debug, Clone)]
pub struct LeveledHandler {
    key: String,
}

impl LeveledHandler {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl LineHandler for LeveledHandler {
    fn key(&self) -> &str {
        &self.key
    }

    fn try_match(
        &self,
        tag: &str,
        contents: &str,
        context: &mut ParseContext<'_>,
    ) -> Option<LineRecord> {
        let level = parse_leveled_tag(&self.key, tag)?;
        let mut record = LineRecord {
            tag: tag.to_string(),
            tag_class: self.key.clone(),
            level: Some(level),
            ..Default::default()
        };
        fill_content(&mut record, contents, context);
        Some(record)
    }
}

/// Record for a line no registered handler claimed.
pub(crate) fn fallback_record(
    tag: &str,
    contents: &str,
    context: &mut ParseContext<'_>,
) -> LineRecord {
    let (class, level) = split_level(tag);
    let mut record = LineRecord {
        tag: tag.to_string(),
        tag_class: class.to_string(),
        level,
        ..Default::default()
    };
    fill_content(&mut record, contents, context);
    record
}

fn fill_content(record: &mut LineRecord, contents: &str, context: &mut ParseContext<'_>) {
    if contents.is_empty() {
        return;
    }
    record.raw_content = Some(contents.to_string());
    record.content = Some(context.parse_inline(contents));
}
