use crate::core::ast::Document;
use crate::render::Renderer;
use crate::Result;

/// Serializes the records as a JSON array.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&document.records)?
        } else {
            serde_json::to_string(&document.records)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UsfmParser;

    #[test]
    fn test_compact_json() {
        let doc = UsfmParser::with_defaults()
            .parse("\\c 1\n\\v 1 \\w In|x\\w* the")
            .expect("parse should work");
        let json = JsonRenderer { pretty: false }
            .render(&doc)
            .expect("render should work");
        assert_eq!(
            json,
            r#"[{"tag":"c","tagClass":"c","num":1,"contentRaw":"1"},{"tag":"v","tagClass":"v","num":1,"contentRaw":"1 \\w In|x\\w* the","content":[{"tag":"w","params":{"_default":"x"},"content":["In"]}," the"]}]"#
        );
    }

    #[test]
    fn test_pretty_json_is_parseable() {
        let doc = UsfmParser::with_defaults()
            .parse("\\p text")
            .expect("parse should work");
        let json = JsonRenderer::default().render(&doc).expect("render should work");
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["content"][0], "text");
    }
}
