//! SyntaxKind enum for all tokens and nodes in the HTML+ERB CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the template CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser
/// output). The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content without markup significance
    TEXT,
    /// A name-shaped run (tag names, attribute names, bare words)
    IDENT,
    /// A complete ERB tag, `<%` through `%>`
    ERB_TAG,
    /// An HTML comment, `<!--` through `-->`
    HTML_COMMENT,
    /// A markup declaration such as `<!DOCTYPE html>`
    DOCTYPE,
    /// `</` opening a close tag
    LT_SLASH,
    /// `<` opening an open tag
    LT,
    /// `>` ending a tag
    GT,
    /// `/>` ending a self-closing tag
    SLASH_GT,
    /// `=` between attribute name and value
    EQ,
    /// `"` delimiting an attribute value
    DQUOTE,
    /// `'` delimiting an attribute value
    SQUOTE,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Plain execution tag, `<% code %>`
    ERB_CONTENT,
    /// Output tag, `<%= expr %>`
    ERB_OUTPUT,
    /// Comment tag, `<%# text %>`
    ERB_COMMENT,
    /// Yield tag, `<% yield %>`
    ERB_YIELD,
    /// `if`/`unless` construct spanning through its terminator
    ERB_IF,
    /// `elsif`/`else` chain member
    ERB_ELSE,
    /// `case` construct
    ERB_CASE,
    /// `when`/`in` chain member
    ERB_WHEN,
    /// `for`/`while`/`until` construct
    ERB_LOOP,
    /// Iterator block construct (code ending in `do` or `do |…|`)
    ERB_BLOCK,
    /// `begin` construct
    ERB_BEGIN,
    /// `rescue` chain member
    ERB_RESCUE,
    /// `ensure` chain member
    ERB_ENSURE,
    /// `end` terminator
    ERB_END,
    /// An HTML element (open tag, body, optional close tag)
    HTML_ELEMENT,
    /// The open tag of an element, `<` through `>`/`/>`
    HTML_OPEN_TAG,
    /// A close tag, `</` through `>`
    HTML_CLOSE_TAG,
    /// A run of markup text between tags
    HTML_TEXT,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true if this kind is an ERB node (any embedded-code construct).
    pub fn is_erb(self) -> bool {
        (self as u16) >= (Self::ERB_CONTENT as u16) && (self as u16) <= (Self::ERB_END as u16)
    }

    /// Returns true if this kind is an ERB chain member or terminator node.
    pub fn is_erb_chain(self) -> bool {
        matches!(
            self,
            Self::ERB_ELSE | Self::ERB_WHEN | Self::ERB_RESCUE | Self::ERB_ENSURE | Self::ERB_END
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateLang {}

impl rowan::Language for TemplateLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<TemplateLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<TemplateLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<TemplateLang>;
