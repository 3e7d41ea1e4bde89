/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the last character.
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for stylesheet source.
///
/// Data-carrying variants hold the raw source text of the token, so a run of
/// tokens can always be stitched back into the text it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Text (carry raw source)
    Word(String),
    AtWord(String),
    String(String),
    Space(String),
    Comment(String),
    /// A whole `( ... )` span the scanner grouped in one token.
    Brackets(String),

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Semicolon,

    // End of input
    Eof,
}

impl TokenKind {
    /// Raw source text of the token.
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Word(s)
            | TokenKind::AtWord(s)
            | TokenKind::String(s)
            | TokenKind::Space(s)
            | TokenKind::Comment(s)
            | TokenKind::Brackets(s) => s,
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "",
        }
    }

    /// Whitespace and comments carry no meaning between statements.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Space(_) | TokenKind::Comment(_))
    }
}

/// A token produced by the stylesheet lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn text(&self) -> &str {
        self.kind.text()
    }
}

/// Join the raw text of a token run.
pub fn join_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
