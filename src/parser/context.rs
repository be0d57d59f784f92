use super::hooks::HookTable;
use super::inline;
use crate::core::ast::Node;
use crate::core::diagnostic::{Diagnostic, DiagnosticKind};

/// State threaded through line handlers for one parse.
pub struct ParseContext<'p> {
    hooks: &'p HookTable,
    log_diagnostics: bool,
    line_number: usize,
    last_tag: Option<String>,
    last_handler: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'p> ParseContext<'p> {
    pub fn new(hooks: &'p HookTable, log_diagnostics: bool) -> Self {
        Self {
            hooks,
            log_diagnostics,
            line_number: 0,
            last_tag: None,
            last_handler: None,
            diagnostics: Vec::new(),
        }
    }

    /// Parses inline markers in `text`, recording diagnostics against the
    /// current line.
    pub fn parse_inline(&mut self, text: &str) -> Vec<Node> {
        let mut raised = Vec::new();
        let nodes = inline::parse(text, self.line_number, self.hooks, &mut raised);
        for diagnostic in raised {
            self.report(diagnostic);
        }
        nodes
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Lead tag of the previous non-blank line.
    pub fn last_tag(&self) -> Option<&str> {
        self.last_tag.as_deref()
    }

    /// Key of the handler that matched the previous line.
    pub fn last_handler(&self) -> Option<&str> {
        self.last_handler.as_deref()
    }

    pub(crate) fn begin_line(&mut self, line_number: usize) {
        self.line_number = line_number;
    }

    pub(crate) fn end_line(&mut self, tag: &str, handler: &str) {
        self.last_tag = Some(tag.to_string());
        self.last_handler = Some(handler.to_string());
    }

    pub(crate) fn report_missing_prefix(&mut self) {
        self.report(Diagnostic::new(
            self.line_number,
            0,
            DiagnosticKind::MissingPrefix,
        ));
    }

    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if self.log_diagnostics {
            log::warn!("{diagnostic}");
        }
        self.diagnostics.push(diagnostic);
    }
}
