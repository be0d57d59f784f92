//! Inline marker parser - turns one line of free text into a node tree.
//!
//! A single left-to-right scan with an explicit frame stack. Openers push a
//! frame, closers pop back down to the frame they close:
//!
//! - `\name*` closes the innermost open `\name`, abandoning anything above it
//! - `\*` closes the innermost open frame whatever its name
//! - a closer with nothing to close is reported and left in the text
//! - an opener past [`MAX_NESTING`] open frames is reported once per line
//!   and left in the text
//!
//! Text between markers is flushed lazily so an element's trailing
//! `|key="value"` tail can be split off as parameters when its closer arrives.

use super::hooks::{Construction, HookId, HookTable};
use super::params::parse_params;
use crate::core::ast::{InlineElement, Node};
use crate::core::diagnostic::{Diagnostic, DiagnosticKind};
use crate::core::level::is_marker_char;

const MARKER: u8 = b'\\';
const CLOSER: u8 = b'*';

/// Most inline frames open at once on a line, not counting the root.
pub const MAX_NESTING: usize = 64;

enum Slot {
    Root(Vec<Node>),
    Element { element: InlineElement, hook: HookId },
    Discarded,
}

impl Slot {
    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Slot::Root(children) => Some(children),
            Slot::Element { element, .. } => Some(&mut element.children),
            Slot::Discarded => None,
        }
    }
}

struct Frame<'t> {
    name: &'t str,
    slot: Slot,
    /// First byte of the frame's content, just past its opener.
    content_start: usize,
}

struct InlineParser<'t, 'h> {
    text: &'t str,
    line: usize,
    hooks: &'h HookTable,
    stack: Vec<Frame<'t>>,
    /// First byte not yet emitted as a text run.
    handled: usize,
    nesting_reported: bool,
    diagnostics: Vec<Diagnostic>,
}

/// Parses a line's content into nodes. Structural problems are appended to
/// `diagnostics`; parsing never fails.
pub fn parse(
    text: &str,
    line: usize,
    hooks: &HookTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Node> {
    let mut parser = InlineParser::new(text.trim(), line, hooks);
    let nodes = parser.run();
    diagnostics.append(&mut parser.diagnostics);
    nodes
}

impl<'t, 'h> InlineParser<'t, 'h> {
    fn new(text: &'t str, line: usize, hooks: &'h HookTable) -> Self {
        Self {
            text,
            line,
            hooks,
            stack: vec![Frame {
                name: "",
                slot: Slot::Root(Vec::new()),
                content_start: 0,
            }],
            handled: 0,
            nesting_reported: false,
            diagnostics: Vec::new(),
        }
    }

    fn run(&mut self) -> Vec<Node> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != MARKER {
                i += 1;
                continue;
            }

            let start = i;
            let end = self.marker_end(start);
            let raw = &text[start + 1..end];
            match raw.strip_suffix('*') {
                Some(name) => self.close(name, start, end),
                None => self.open(raw, start, end),
            }
            i = end;
        }

        let top = self.stack.len() - 1;
        self.flush(text.len(), top);
        self.unwind_to(0);

        match self.stack.pop().map(|frame| frame.slot) {
            Some(Slot::Root(children)) => children,
            _ => Vec::new(),
        }
    }

    /// Returns the end of the marker starting at `start`: the name run, plus
    /// the closing asterisk if one stops it.
    fn marker_end(&self, start: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut end = start + 1;
        while end < bytes.len() {
            if bytes[end] == CLOSER {
                return end + 1;
            }
            if !is_marker_char(bytes[end]) {
                break;
            }
            end += 1;
        }
        end
    }

    fn open(&mut self, name: &'t str, start: usize, end: usize) {
        let top = self.stack.len() - 1;
        if top >= MAX_NESTING {
            if !self.nesting_reported {
                self.nesting_reported = true;
                self.diagnostics.push(Diagnostic::new(
                    self.line,
                    start,
                    DiagnosticKind::NestingTooDeep {
                        marker: name.to_string(),
                        limit: MAX_NESTING,
                    },
                ));
            }
            return;
        }
        self.flush(start, top);

        let (construction, hook) = self.hooks.construct(name);
        let slot = match construction {
            Construction::Element(element) => {
                let bytes = self.text.as_bytes();
                self.handled = end;
                while self.handled < bytes.len() && bytes[self.handled] == b' ' {
                    self.handled += 1;
                }
                Slot::Element { element, hook }
            }
            Construction::Discard => Slot::Discarded,
        };

        self.stack.push(Frame {
            name,
            slot,
            content_start: end,
        });
    }

    fn close(&mut self, name: &str, start: usize, end: usize) {
        let matched = if name.is_empty() {
            (self.stack.len() > 1).then(|| self.stack.len() - 1)
        } else {
            self.stack
                .iter()
                .rposition(|frame| frame.name == name)
                .filter(|&index| index > 0)
        };

        let Some(matched) = matched else {
            let open = self
                .stack
                .last()
                .filter(|_| self.stack.len() > 1)
                .map(|frame| frame.name.to_string());
            let diagnostic = Diagnostic::new(
                self.line,
                start,
                DiagnosticKind::UnmatchedCloser {
                    marker: name.to_string(),
                    open,
                },
            );
            self.diagnostics.push(diagnostic);
            return;
        };

        self.unwind_to(matched);

        let text = self.text;
        let content_start = self.stack[matched].content_start;
        let content = &text[content_start..start];
        let search_from = self.handled.saturating_sub(content_start);
        let split = content
            .get(search_from..)
            .and_then(|rest| rest.find('|'))
            .map(|offset| content_start + search_from + offset);

        let (display_end, param_text) = match split {
            Some(pipe) => (pipe, &text[pipe + 1..start]),
            None => (start, ""),
        };

        self.flush(display_end, matched);
        self.handled = end;

        let params = parse_params(param_text);
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if let Slot::Element { mut element, hook } = frame.slot {
            self.hooks.finalize(hook, &mut element, params);
            self.attach(Node::Element(element));
        }
    }

    /// Emits pending text up to `end` into the frame at `target`, or drops it
    /// if that frame was vetoed.
    fn flush(&mut self, end: usize, target: usize) {
        if self.handled >= end {
            return;
        }
        let source = self.text;
        let text = &source[self.handled..end];
        if let Some(children) = self.stack[target].slot.children_mut() {
            children.push(Node::Text(text.to_string()));
        }
        self.handled = end;
    }

    /// Pops every frame above `index`, attaching each abandoned element to
    /// the frame below it.
    fn unwind_to(&mut self, index: usize) {
        while self.stack.len() > index + 1 {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            if let Slot::Element { element, .. } = frame.slot {
                self.attach(Node::Element(element));
            }
        }
    }

    /// Appends `node` to the current top frame.
    fn attach(&mut self, node: Node) {
        if let Some(children) = self
            .stack
            .last_mut()
            .and_then(|frame| frame.slot.children_mut())
        {
            children.push(node);
        }
    }
}
