mod json;
mod usfm;

use crate::core::ast::Document;
use crate::Result;

pub use json::JsonRenderer;
pub use usfm::{render_nodes, render_record, UsfmRenderer};

pub trait Renderer {
    fn render(&self, document: &Document) -> Result<String>;
}
