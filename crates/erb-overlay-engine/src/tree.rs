//! Uniform view over the template syntax tree.
//!
//! The projection passes never match on raw [`SyntaxKind`]s. This adapter
//! collapses the grammar's per-construct shapes into one closed [`NodeKind`]
//! variant plus a uniform child enumeration: a compound construct exposes its
//! own statements, then its successor in the chain (`elsif`, `when`,
//! `rescue`, ...), then its `end` terminator. Everything here is stateless
//! and read-only.

use erb_overlay_syntax::{Span, SyntaxKind, SyntaxNode, tags};

/// Closed classification of template nodes as the engine sees them.
///
/// Kinds the engine has no emission rule for map to [`NodeKind::Opaque`]
/// and degrade locally: their span stays blanked but their children are
/// still visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `<% code %>` with no structural keyword.
    Content,
    /// `<%= code %>`.
    Output,
    /// `<%# text %>`.
    Comment,
    /// `if` / `unless` opener.
    Branch,
    /// `elsif` / `else` chain member.
    Else,
    /// `case` opener.
    Case,
    /// `when` / `in` arm.
    CaseArm,
    /// `for` / `while` / `until` opener.
    Loop,
    /// Tag whose code ends in `do` or `do |...|`.
    IteratorBlock,
    /// `begin` opener.
    Exception,
    Rescue,
    Ensure,
    /// `end` terminator.
    End,
    Yield,
    /// An HTML element with open tag, body, and optional close tag.
    Element,
    /// A run of markup text.
    Text,
    /// Anything the engine has no rule for.
    Opaque,
}

impl NodeKind {
    /// True for ERB nodes whose code is copied into the projection.
    pub fn is_code(self) -> bool {
        !matches!(
            self,
            NodeKind::Comment | NodeKind::Element | NodeKind::Text | NodeKind::Opaque
        )
    }

    /// True for constructs that nest statements (and possibly a chain).
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            NodeKind::Branch
                | NodeKind::Else
                | NodeKind::Case
                | NodeKind::CaseArm
                | NodeKind::Loop
                | NodeKind::IteratorBlock
                | NodeKind::Exception
                | NodeKind::Rescue
                | NodeKind::Ensure
        )
    }

    /// True when the construct's statement list yields the construct's
    /// value. Loop and iterator-block bodies are evaluated for effect only.
    pub fn is_value_returning(self) -> bool {
        matches!(
            self,
            NodeKind::Branch
                | NodeKind::Else
                | NodeKind::CaseArm
                | NodeKind::Exception
                | NodeKind::Rescue
                | NodeKind::Ensure
        )
    }
}

/// Classify a node.
pub fn kind(node: &SyntaxNode) -> NodeKind {
    match node.kind() {
        SyntaxKind::ERB_CONTENT => NodeKind::Content,
        SyntaxKind::ERB_OUTPUT => NodeKind::Output,
        SyntaxKind::ERB_COMMENT => NodeKind::Comment,
        SyntaxKind::ERB_IF => NodeKind::Branch,
        SyntaxKind::ERB_ELSE => NodeKind::Else,
        SyntaxKind::ERB_CASE => NodeKind::Case,
        SyntaxKind::ERB_WHEN => NodeKind::CaseArm,
        SyntaxKind::ERB_LOOP => NodeKind::Loop,
        SyntaxKind::ERB_BLOCK => NodeKind::IteratorBlock,
        SyntaxKind::ERB_BEGIN => NodeKind::Exception,
        SyntaxKind::ERB_RESCUE => NodeKind::Rescue,
        SyntaxKind::ERB_ENSURE => NodeKind::Ensure,
        SyntaxKind::ERB_END => NodeKind::End,
        SyntaxKind::ERB_YIELD => NodeKind::Yield,
        SyntaxKind::HTML_ELEMENT => NodeKind::Element,
        SyntaxKind::HTML_TEXT => NodeKind::Text,
        _ => NodeKind::Opaque,
    }
}

/// Full byte span of a node.
pub fn span(node: &SyntaxNode) -> Span {
    Span::of(node.text_range())
}

/// Delimiter and code spans of an ERB node's tag token.
#[derive(Debug, Clone, Copy)]
pub struct TagGeometry {
    /// The whole `<% ... %>` tag.
    pub tag: Span,
    /// The code between the delimiters, whitespace included.
    pub code: Span,
}

/// Geometry of the node's own tag token. For compound constructs this is
/// the opening tag; chain members and terminators carry their own.
pub fn tag_geometry(node: &SyntaxNode) -> Option<TagGeometry> {
    let token = node
        .children_with_tokens()
        .filter_map(|el| el.into_token())
        .find(|t| t.kind() == SyntaxKind::ERB_TAG)?;
    let tag = Span::of(token.text_range());
    let code = tags::code_range(token.text());
    Some(TagGeometry {
        tag,
        code: Span::new(tag.start + code.start, tag.start + code.end),
    })
}

/// A construct's own statements: every child node that is not a chain
/// member or terminator.
pub fn statements(node: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> + '_ {
    node.children().filter(|c| !c.kind().is_erb_chain())
}

/// The construct's successor in its chain, if any.
pub fn successor(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children()
        .find(|c| c.kind().is_erb_chain() && c.kind() != SyntaxKind::ERB_END)
}

/// The construct's `end` terminator, if the chain reaches one.
pub fn terminator(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind() == SyntaxKind::ERB_END)
}

/// The element's open tag node.
pub fn open_tag(element: &SyntaxNode) -> Option<SyntaxNode> {
    element
        .children()
        .find(|c| c.kind() == SyntaxKind::HTML_OPEN_TAG)
}

/// The element's close tag node, absent for void/unclosed elements.
pub fn close_tag(element: &SyntaxNode) -> Option<SyntaxNode> {
    element
        .children()
        .find(|c| c.kind() == SyntaxKind::HTML_CLOSE_TAG)
}

/// The element's name, taken from its open tag.
pub fn tag_name(element: &SyntaxNode) -> Option<String> {
    let open = open_tag(element)?;
    open.children_with_tokens()
        .filter_map(|el| el.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
        .map(|t| t.text().to_string())
}

/// The element's body: child nodes between the open and close tags.
pub fn body(element: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> + '_ {
    element.children().filter(|c| {
        !matches!(
            c.kind(),
            SyntaxKind::HTML_OPEN_TAG | SyntaxKind::HTML_CLOSE_TAG
        )
    })
}

/// True when any descendant (attribute positions included) is an ERB node.
pub fn contains_erb(node: &SyntaxNode) -> bool {
    node.descendants().skip(1).any(|d| d.kind().is_erb())
}
