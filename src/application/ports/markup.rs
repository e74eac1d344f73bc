// src/application/ports/markup.rs

/// Turns stored Markdown into HTML that is safe to embed in a page.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}
