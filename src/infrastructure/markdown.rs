// src/infrastructure/markdown.rs
use crate::application::ports::markup::MarkdownRenderer;
use pulldown_cmark::{Parser, html};
use std::collections::{HashMap, HashSet};

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "b", "i", "strong", "em", "tt", "p", "br", "span", "div",
    "blockquote", "code", "hr", "ul", "ol", "li", "dd", "dt", "img", "a",
];

const ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("img", &["src", "alt", "title"]),
    ("a", &["href", "alt", "title"]),
];

/// CommonMark rendering followed by an allow-list clean. Tags outside the
/// list are dropped but their text is kept.
pub struct SanitizedMarkdown {
    cleaner: ammonia::Builder<'static>,
}

impl SanitizedMarkdown {
    pub fn new() -> Self {
        let tags: HashSet<&'static str> = ALLOWED_TAGS.iter().copied().collect();
        let attributes: HashMap<&'static str, HashSet<&'static str>> = ALLOWED_ATTRIBUTES
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut cleaner = ammonia::Builder::default();
        cleaner
            .tags(tags)
            .tag_attributes(attributes)
            .generic_attributes(HashSet::new())
            .link_rel(None)
            .strip_comments(true);
        Self { cleaner }
    }
}

impl Default for SanitizedMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for SanitizedMarkdown {
    fn render(&self, source: &str) -> String {
        let mut rendered = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut rendered, Parser::new(source));
        self.cleaner.clean(&rendered).to_string()
    }
}
