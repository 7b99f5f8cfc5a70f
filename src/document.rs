//! Read-only adapter over a parsed HTML document.
//!
//! Wraps `scraper::Html` behind the handful of lookups the fact extractor
//! needs: section-by-id, CSS selection (document-wide or scoped to a node),
//! and trimmed text content. Every lookup fails softly - a selector that is
//! invalid or matches nothing yields an empty result, never an error.

use scraper::{ElementRef, Html, Selector};

/// A parsed company page, held for the duration of one analysis.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw HTML into a queryable document.
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// Find the `<section>` with the given id, if present.
    pub fn find_section(&self, id: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&format!("section#{}", id)).ok()?;
        self.html.select(&selector).next()
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// All descendants of `node` matching a CSS selector, in document order.
pub fn select_in<'a>(node: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => node.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Text content of a node, trimmed and with inner whitespace collapsed.
pub fn text_of(node: ElementRef<'_>) -> String {
    node.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================
