//! Markup-block classification.
//!
//! An element can project as a Ruby block (`name { ... }`) instead of a bare
//! statement, which preserves nesting for analyzer rules that reason about
//! block scope. The rewritten opening must fit inside the original open
//! tag's byte width, so short tags fall back to statement form.

use std::collections::BTreeSet;

use erb_overlay_syntax::SyntaxNode;

use crate::tree::{self, NodeKind};

/// Space a block opening needs beyond the element name: `" { "`.
const BLOCK_OPEN_EXTRA: usize = 3;

/// Open-tag start offsets of elements selected for block rendering.
///
/// Built once per conversion by [`classify`]; read-only afterwards.
#[derive(Debug, Default)]
pub struct BlockSet {
    set: BTreeSet<usize>,
}

impl BlockSet {
    pub fn contains(&self, element: &SyntaxNode) -> bool {
        self.set.contains(&tree::span(element).start)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Walk the tree once and select every element qualifying for block
/// rendering: both open and close tags present, at least one embedded-code
/// node in its span, and an open tag wide enough to hold `name + " { "`.
pub fn classify(root: &SyntaxNode) -> BlockSet {
    let mut set = BTreeSet::new();
    for node in root.descendants() {
        if tree::kind(&node) == NodeKind::Element && qualifies(&node) {
            set.insert(tree::span(&node).start);
        }
    }
    BlockSet { set }
}

fn qualifies(element: &SyntaxNode) -> bool {
    if tree::close_tag(element).is_none() {
        return false;
    }
    if !tree::contains_erb(element) {
        return false;
    }
    let Some(open) = tree::open_tag(element) else {
        return false;
    };
    let Some(name) = tree::tag_name(element) else {
        return false;
    };
    name.len() + BLOCK_OPEN_EXTRA <= tree::span(&open).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use erb_overlay_syntax::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify_src(input: &str) -> BlockSet {
        let result = parse(input).unwrap();
        classify(&result.root)
    }

    #[rstest]
    // wide enough open tag, close tag, embedded code
    #[case("<div class=\"a\"><%= x %></div>", 1)]
    // open tag too short for `div { `
    #[case("<div><%= x %></div>", 0)]
    // no embedded code
    #[case("<div class=\"a\">text</div>", 0)]
    // unclosed
    #[case("<div class=\"a\"><%= x %>", 0)]
    // void elements never qualify
    #[case("<input value=\"<%= x %>\">", 0)]
    fn qualification(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(classify_src(input).len(), expected);
    }

    #[test]
    fn nested_elements_classified_independently() {
        let input = "<ul data-x=\"1\"><li><%= a %></li></ul>";
        let set = classify_src(input);
        // ul qualifies (wide tag, erb in span); li's tag is too short
        assert_eq!(set.len(), 1);
        assert!(set.set.contains(&0));
    }

    #[test]
    fn erb_in_attribute_counts_as_embedded_code() {
        let input = "<span id=\"<%= dom_id %>\">x</span>";
        let set = classify_src(input);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn classification_is_deterministic() {
        let input = "<div class=\"a\"><%= x %></div><div class=\"b\"><%= y %></div>";
        let result = parse(input).unwrap();
        let first = classify(&result.root);
        let second = classify(&result.root);
        assert_eq!(first.set, second.set);
    }
}
