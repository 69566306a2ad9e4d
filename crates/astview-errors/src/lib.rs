use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A syntax error found in a parsed document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_points_at_the_range() {
        let text = "const x = ;\n";
        let diagnostic =
            Diagnostic::error("unexpected syntax", TextRange::new(10.into(), 11.into()));

        let rendered = diagnostic.render(&Renderer::plain(), "main.ts", text).to_string();

        assert!(rendered.starts_with("error: unexpected syntax"), "{rendered}");
        assert!(rendered.contains("main.ts:1:11"), "{rendered}");
        assert!(rendered.contains("const x = ;"), "{rendered}");
        assert!(rendered.contains("^ here"), "{rendered}");
    }
}
