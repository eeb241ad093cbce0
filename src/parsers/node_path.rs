//! A tiny structural query language over `scraper` element trees.
//!
//! Paths are relative to a context element and evaluated step by step, each step
//! mapping the current node set to a new one in document order. Only the axes the
//! history page actually needs are supported.

use scraper::ElementRef;

/// Matches an element by tag name and, optionally, a substring of its `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMatch {
    pub tag: &'static str,
    pub class_contains: Option<&'static str>,
}

impl ElementMatch {
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            class_contains: None,
        }
    }

    pub const fn with_class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class_contains: Some(class),
        }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if !value.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }
        match self.class_contains {
            None => true,
            Some(needle) => value
                .attr("class")
                .is_some_and(|class| class.contains(needle)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// The enclosing element.
    Parent,
    /// Direct child elements that match.
    Child(ElementMatch),
    /// Later siblings that match, nearest first.
    FollowingSibling(ElementMatch),
}

/// Runs `path` from `context` and returns every matched element in document order.
pub fn select_path<'a>(context: ElementRef<'a>, path: &[PathStep]) -> Vec<ElementRef<'a>> {
    let mut current = vec![context];
    for step in path {
        let mut next: Vec<ElementRef<'a>> = Vec::new();
        let mut seen = Vec::new();
        for node in &current {
            for candidate in apply_step(*node, step) {
                if !seen.contains(&candidate.id()) {
                    seen.push(candidate.id());
                    next.push(candidate);
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

/// First element matched by `path`, if any.
pub fn select_first<'a>(context: ElementRef<'a>, path: &[PathStep]) -> Option<ElementRef<'a>> {
    select_path(context, path).into_iter().next()
}

fn apply_step<'a>(node: ElementRef<'a>, step: &PathStep) -> Vec<ElementRef<'a>> {
    match step {
        PathStep::Parent => node
            .parent()
            .and_then(ElementRef::wrap)
            .into_iter()
            .collect(),
        PathStep::Child(matcher) => node
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| matcher.matches(child))
            .collect(),
        PathStep::FollowingSibling(matcher) => node
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| matcher.matches(sibling))
            .collect(),
    }
}

/// Concatenated text of the element and all its descendants, trimmed.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whether one of the element's own text nodes (not its descendants') equals `text`.
pub fn has_direct_text(element: ElementRef<'_>, text: &str) -> bool {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .any(|node| node.trim() == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const ROW: &str = r#"<table><tr>
        <td class="indent"><span>Label</span></td>
        <td><span class="nobr"><span class="b">42</span>&nbsp;°F</span></td>
        <td><b>7</b></td>
    </tr></table>"#;

    fn label_cell(document: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("td.indent").unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_parent_then_children() {
        let document = Html::parse_document(ROW);
        let path = [
            PathStep::Parent,
            PathStep::Child(ElementMatch::tag("td")),
            PathStep::Child(ElementMatch::with_class("span", "nobr")),
            PathStep::Child(ElementMatch::with_class("span", "b")),
        ];

        let found = select_path(label_cell(&document), &path);
        assert_eq!(found.len(), 1);
        assert_eq!(trimmed_text(found[0]), "42");
    }

    #[test]
    fn test_following_sibling_is_nearest_first() {
        let document = Html::parse_document(ROW);
        let path = [PathStep::FollowingSibling(ElementMatch::tag("td"))];

        let found = select_path(label_cell(&document), &path);
        assert_eq!(found.len(), 2);
        assert_eq!(trimmed_text(found[0]), "42\u{a0}°F");
    }

    #[test]
    fn test_missing_step_yields_nothing() {
        let document = Html::parse_document(ROW);
        let path = [
            PathStep::FollowingSibling(ElementMatch::tag("td")),
            PathStep::Child(ElementMatch::tag("em")),
        ];

        assert!(select_first(label_cell(&document), &path).is_none());
    }

    #[test]
    fn test_direct_text_ignores_descendants() {
        let document = Html::parse_document(ROW);
        let cell = label_cell(&document);
        let span = cell.children().filter_map(ElementRef::wrap).next().unwrap();

        assert!(has_direct_text(span, "Label"));
        assert!(!has_direct_text(cell, "Label"));
    }
}
