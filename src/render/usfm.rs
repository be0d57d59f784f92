use crate::core::ast::{Document, InlineElement, LineRecord, Node, Params, DEFAULT_PARAM};
use crate::core::level::leading_number;
use crate::parser::VERSE_TAG;
use crate::render::Renderer;
use crate::Result;

/// Writes records back out in canonical marker form, one line per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsfmRenderer;

impl Renderer for UsfmRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let mut out = String::new();
        for record in &document.records {
            out.push_str(&render_record(record));
            out.push('\n');
        }
        Ok(out)
    }
}

/// Renders one record as a marker line, without the line terminator.
///
/// Inline content wins over raw content; raw content is only written for
/// records that carry neither a number token nor parsed content.
pub fn render_record(record: &LineRecord) -> String {
    let mut line = format!("\\{}", record.tag);

    let token = number_token(record);
    if let Some(token) = &token {
        line.push(' ');
        line.push_str(token);
    }

    match (&record.content, &record.raw_content) {
        (Some(nodes), _) => {
            let inline = render_nodes(nodes);
            if !inline.is_empty() {
                line.push(' ');
                line.push_str(&inline);
            }
        }
        (None, Some(raw)) if token.is_none() && !raw.is_empty() => {
            line.push(' ');
            line.push_str(raw);
        }
        _ => {}
    }

    line
}

/// The token written after the tag. A verse keeps its raw number token
/// (`1-2`, `a`) while it still reads back as `number`.
fn number_token(record: &LineRecord) -> Option<String> {
    if record.tag == VERSE_TAG {
        let token = record
            .raw_content
            .as_deref()
            .map(|raw| raw.split_once(' ').map_or(raw, |(token, _)| token))
            .filter(|token| !token.is_empty() && leading_number(token) == record.number);
        if let Some(token) = token {
            return Some(token.to_string());
        }
    }
    record.number.map(|number| number.to_string())
}

enum Step<'a> {
    Open(&'a Node),
    Close(&'a InlineElement),
}

pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut steps = nodes.iter().rev().map(Step::Open).collect::<Vec<_>>();
    while let Some(step) = steps.pop() {
        match step {
            Step::Open(Node::Text(text)) => out.push_str(text),
            Step::Open(Node::Element(element)) => {
                out.push('\\');
                out.push_str(&element.name);
                out.push(' ');
                steps.push(Step::Close(element));
                steps.extend(element.children.iter().rev().map(Step::Open));
            }
            Step::Close(element) => {
                render_params(&element.params, &mut out);
                out.push('\\');
                out.push_str(&element.name);
                out.push('*');
            }
        }
    }
    out
}

fn render_params(params: &Params, out: &mut String) {
    if params.is_empty() {
        return;
    }
    out.push('|');
    if params.len() == 1 {
        if let Some(value) = params.get(DEFAULT_PARAM) {
            out.push_str(value);
            return;
        }
    }
    let pairs = params
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>();
    out.push_str(&pairs.join(" "));
}
