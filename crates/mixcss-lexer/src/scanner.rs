use crate::token::{Span, Token, TokenKind};
use crate::LexerError;

/// Characters that force a `(` to stay a bare token instead of being grouped.
const UNGROUPABLE: &[char] = &['\\', '/', '(', '"', '\'', '\n'];

/// Stylesheet source scanner.
///
/// Tokenizes stylesheet source into a flat stream of tokens. Every token keeps
/// its raw text, so selectors, declaration values and mixin arguments can be
/// reassembled from token runs by the parser.
///
/// - `Vec<char>` source for index-based navigation
/// - Whitespace and comments are kept as tokens
/// - Simple parenthesized spans collapse into one `Brackets` token
/// - Position tracking on every token
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    /// Byte offset of `chars[pos]` in the source.
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.emit(TokenKind::Eof);
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let ch = self.peek();

        match ch {
            c if c.is_whitespace() => {
                self.scan_space();
                Ok(())
            }

            '/' if self.peek_next() == '*' => self.scan_comment(),

            '"' | '\'' => self.scan_string(),

            '(' => {
                self.scan_paren();
                Ok(())
            }

            '@' => {
                self.scan_word(true);
                Ok(())
            }

            ')' => self.punct(TokenKind::RParen),
            '[' => self.punct(TokenKind::LBracket),
            ']' => self.punct(TokenKind::RBracket),
            '{' => self.punct(TokenKind::LBrace),
            '}' => self.punct(TokenKind::RBrace),
            ':' => self.punct(TokenKind::Colon),
            ';' => self.punct(TokenKind::Semicolon),
            ',' => self.punct(TokenKind::Comma),

            _ => {
                self.scan_word(false);
                Ok(())
            }
        }
    }

    // --- Scanners ---

    fn scan_space(&mut self) {
        let (start_pos, line, column) = (self.offset, self.line, self.column);
        let mut text = String::new();

        while !self.is_at_end() && self.peek().is_whitespace() {
            text.push(self.peek());
            self.advance();
        }

        self.push(TokenKind::Space(text), start_pos, line, column);
    }

    /// Scan a `/* ... */` comment, keeping the delimiters in the raw text.
    fn scan_comment(&mut self) -> Result<(), LexerError> {
        let (start_pos, line, column) = (self.offset, self.line, self.column);
        let mut text = String::from("/*");
        self.advance();
        self.advance();

        loop {
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unclosed comment".into(),
                    line,
                    column,
                });
            }
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                text.push_str("*/");
                break;
            }
            text.push(self.peek());
            self.advance();
        }

        self.push(TokenKind::Comment(text), start_pos, line, column);
        Ok(())
    }

    /// Scan a string literal. The raw text keeps its quotes and escapes.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let quote = self.peek();
        let (start_pos, line, column) = (self.offset, self.line, self.column);
        let mut text = String::new();
        text.push(quote);
        self.advance(); // consume opening quote

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\\' {
                text.push('\\');
                self.advance();
                if self.is_at_end() {
                    break;
                }
            }
            text.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unclosed string".into(),
                line,
                column,
            });
        }

        text.push(quote);
        self.advance(); // consume closing quote

        self.push(TokenKind::String(text), start_pos, line, column);
        Ok(())
    }

    /// Scan `(`: either a grouped `Brackets` span or a bare `LParen`.
    ///
    /// `url(` with an unquoted argument is always grouped up to the closing
    /// paren; otherwise the span is grouped only when it holds no quotes,
    /// slashes, backslashes, nested parens or newlines.
    fn scan_paren(&mut self) {
        let after_url = self
            .tokens
            .last()
            .is_some_and(|t| matches!(&t.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case("url")));
        let close = self.chars[self.pos..]
            .iter()
            .position(|&c| c == ')')
            .map(|offset| self.pos + offset);

        let grouped = match close {
            Some(close) if after_url => {
                let first = self.chars[self.pos + 1..close]
                    .iter()
                    .find(|c| !c.is_whitespace());
                !matches!(first, Some('"') | Some('\''))
            }
            Some(close) => !self.chars[self.pos + 1..close]
                .iter()
                .any(|c| UNGROUPABLE.contains(c)),
            None => false,
        };

        match close {
            Some(close) if grouped => {
                let (start_pos, line, column) = (self.offset, self.line, self.column);
                let text: String = self.chars[self.pos..=close].iter().collect();
                while self.pos <= close {
                    self.advance();
                }
                self.push(TokenKind::Brackets(text), start_pos, line, column);
            }
            _ => {
                self.single(TokenKind::LParen);
            }
        }
    }

    /// Scan a word (or an `@word` when `at` is set) up to the next delimiter.
    fn scan_word(&mut self, at: bool) {
        let (start_pos, line, column) = (self.offset, self.line, self.column);
        let mut text = String::new();
        text.push(self.peek());
        self.advance();

        while !self.is_at_end() && !self.at_word_end() {
            text.push(self.peek());
            self.advance();
        }

        let kind = if at {
            TokenKind::AtWord(text)
        } else {
            TokenKind::Word(text)
        };
        self.push(kind, start_pos, line, column);
    }

    fn at_word_end(&self) -> bool {
        match self.peek() {
            c if c.is_whitespace() => true,
            '(' | ')' | '[' | ']' | '{' | '}' | ':' | ';' | ',' | '"' | '\'' => true,
            '/' => self.peek_next() == '*',
            _ => false,
        }
    }

    // --- Helpers ---

    fn punct(&mut self, kind: TokenKind) -> Result<(), LexerError> {
        self.single(kind);
        Ok(())
    }

    /// Emit a token for the one character at the current position.
    fn single(&mut self, kind: TokenKind) {
        let (start, line, column) = (self.offset, self.line, self.column);
        self.advance();
        self.push(kind, start, line, column);
    }

    /// Emit a zero-width token at the current position.
    fn emit(&mut self, kind: TokenKind) {
        let span = Span::new(self.offset, self.offset, self.line, self.column);
        self.tokens.push(Token::new(kind, span));
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) {
        let span = Span::new(start, self.offset, line, column);
        self.tokens.push(Token::new(kind, span));
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            let ch = self.chars[self.pos];
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.offset += ch.len_utf8();
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
