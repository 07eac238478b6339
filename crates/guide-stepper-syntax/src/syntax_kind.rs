//! SyntaxKind enum for all tokens and nodes in the MDX CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the MDX CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
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
    /// Plain text content
    TEXT,
    /// `<` opening a tag
    LT,
    /// `>` closing a tag
    GT,
    /// `/` in close tags and self-closing tags
    SLASH,
    /// `=` between attribute name and value
    EQ,
    /// `{` opening an expression
    LBRACE,
    /// `}` closing an expression
    RBRACE,
    /// `"` string delimiter
    DQUOTE,
    /// `'` string delimiter
    SQUOTE,
    /// Single backtick for code spans and fences
    BACKTICK,
    /// `~` for fenced code
    TILDE,
    /// `\` escape inside expressions
    BACKSLASH,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Fenced code block (raw zone)
    FENCED_CODE,
    /// Inline code span (raw zone)
    CODE_SPAN,
    /// `{...}` expression, in flow content or as an attribute value
    EXPRESSION,
    /// JSX element: open tag, optional content, optional close tag
    ELEMENT,
    /// `<Name attr="value">` or `<Name />` or `<>`
    OPEN_TAG,
    /// `</Name>` or `</>`
    CLOSE_TAG,
    /// Element name inside an open or close tag
    TAG_NAME,
    /// A single attribute (`name`, `name="value"`, `name={expr}`, `{...spread}`)
    ATTRIBUTE,
    /// Attribute name
    ATTR_NAME,
    /// Quoted attribute value
    STRING_LITERAL,
    /// Children of an element, between open and close tag
    CONTENT,

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

    /// Returns true if no tags or expressions are recognized inside this node.
    pub fn is_raw_zone(self) -> bool {
        matches!(self, Self::FENCED_CODE | Self::CODE_SPAN)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MdxLang {}

impl rowan::Language for MdxLang {
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
pub type SyntaxNode = rowan::SyntaxNode<MdxLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MdxLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MdxLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::LBRACE.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::ELEMENT.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn raw_zones() {
        assert!(SyntaxKind::FENCED_CODE.is_raw_zone());
        assert!(SyntaxKind::CODE_SPAN.is_raw_zone());
        assert!(!SyntaxKind::ELEMENT.is_raw_zone());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::OPEN_TAG;
        let raw: rowan::SyntaxKind = kind.into();
        let back = MdxLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
