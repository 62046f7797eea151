//! Queryable document tree.
//!
//! Extraction code talks to [`Document`] and [`Node`] only, never to the HTML
//! parser directly, so the backing library can be replaced in one place.
//! Documents are not `Send`; parse, query and drop them inside synchronous code.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    el: ElementRef<'a>,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching a CSS selector, in document order.
    /// An invalid selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Node<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|el| Node { el }).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// First element matching a CSS selector.
    pub fn first(&self, selector: &str) -> Option<Node<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.html.select(&sel).next().map(|el| Node { el })
    }

    /// Text of `<body>` (or the whole document) as trimmed, non-empty lines.
    ///
    /// Each text node becomes its own line so block boundaries survive.
    /// Script and style contents are skipped.
    pub fn text_lines(&self) -> Vec<String> {
        let root = self
            .first("body")
            .map(|n| n.el)
            .unwrap_or_else(|| self.html.root_element());
        let mut lines = Vec::new();
        for node in root.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let inside_code = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name().to_string()))
                .map(|name| name == "script" || name == "style" || name == "noscript")
                .unwrap_or(false);
            if inside_code {
                continue;
            }
            for line in text.lines() {
                let line = collapse_whitespace(line);
                if !line.is_empty() {
                    lines.push(line);
                }
            }
        }
        lines
    }
}

impl<'a> Node<'a> {
    /// Descendants matching a CSS selector.
    pub fn select(&self, selector: &str) -> Vec<Node<'a>> {
        match Selector::parse(selector) {
            Ok(sel) => self.el.select(&sel).map(|el| Node { el }).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Visible text with whitespace collapsed.
    pub fn text(&self) -> String {
        let joined = self.el.text().collect::<Vec<_>>().join(" ");
        collapse_whitespace(&joined)
    }

    /// Identity of this element within its document.
    pub fn id(&self) -> impl std::hash::Hash + Eq + Copy {
        self.el.id()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    /// Raw inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.el.inner_html()
    }
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_text() {
        let doc = Document::parse(
            r#"<html><body><div class="bio"><h3> Jane
               Doe </h3><a href="mailto:jane@x.com">Email</a></div></body></html>"#,
        );
        let nodes = doc.select(".bio");
        assert_eq!(nodes.len(), 1);
        let name = nodes[0].select("h3");
        assert_eq!(name[0].text(), "Jane Doe");
        let link = nodes[0].select("a")[0];
        assert_eq!(link.attr("href"), Some("mailto:jane@x.com"));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse("<p>hi</p>");
        assert!(doc.select("p[[").is_empty());
    }

    #[test]
    fn test_text_lines_skip_scripts() {
        let doc = Document::parse(
            "<body><p>Jane Doe</p><script>var x = 'a@b.com';</script><p>Editor</p></body>",
        );
        assert_eq!(doc.text_lines(), vec!["Jane Doe", "Editor"]);
    }
}
