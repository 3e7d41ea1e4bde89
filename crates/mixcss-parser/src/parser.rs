//! Stylesheet parser for mixcss.
//!
//! Parses a stream of source-level tokens (from `mixcss-lexer`) into a
//! `Stylesheet` AST. Besides plain CSS statements it recognizes mixin calls:
//! a statement that reaches its `;` with a bracket group and no top-level
//! colon. Argument tokens are handed to `arguments::parse_arguments`.
//!
//! Uses recursive descent over blocks and a flat scan within a statement.

use crate::arguments::parse_arguments;
use crate::ast::{
    AtRule, Comment, Declaration, MixinCall, MixinRaws, Node, Position, Rule, Source, Stylesheet,
};
use crate::ParseError;
use mixcss_lexer::{join_text, Token, TokenKind};

/// mixcss stylesheet parser.
///
/// Converts a flat token stream from the lexer into a hierarchical
/// `Stylesheet` AST.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Whitespace seen since the last statement.
    spaces: String,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            spaces: String::new(),
        }
    }

    /// Parse source code into a stylesheet AST.
    pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
        let tokens = mixcss_lexer::Scanner::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        })?;

        let mut parser = Parser::new(tokens);
        parser.parse_stylesheet()
    }

    /// Parse a full stylesheet.
    fn parse_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        let nodes = self.parse_nodes(false)?;
        if self.peek().kind == TokenKind::RBrace {
            return Err(self.error("Unexpected }".into()));
        }
        Ok(Stylesheet { nodes })
    }

    /// Parse statements until a `}` (left unconsumed) or end of input.
    fn parse_nodes(&mut self, nested: bool) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Space(text) => {
                    let text = text.clone();
                    self.spaces.push_str(&text);
                    self.advance();
                }
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Comment(raw) => {
                    let node = Node::Comment(Comment {
                        text: comment_text(raw),
                        source: self.source_of(self.pos, self.pos),
                    });
                    self.spaces.clear();
                    self.advance();
                    nodes.push(node);
                }
                TokenKind::RBrace => {
                    if nested {
                        break;
                    }
                    return Err(self.error("Unexpected }".into()));
                }
                TokenKind::AtWord(_) => {
                    nodes.push(self.parse_at_rule()?);
                }
                _ => {
                    nodes.push(self.parse_statement()?);
                }
            }
        }

        Ok(nodes)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Scan one statement and dispatch on how it ends:
    /// - `;` after a top-level `:` is a declaration
    /// - `;` after a bracket group (and no colon) is a mixin call
    /// - `{` opens a rule
    /// - `}` or end of input closes a final declaration without `;`
    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let mut colon = false;
        let mut has_bracket = false;
        let mut closers: Vec<TokenKind> = Vec::new();
        let mut first_bracket: Option<usize> = None;

        while !self.is_at_end() {
            let kind = self.peek().kind.clone();
            match &kind {
                TokenKind::LParen | TokenKind::LBracket => {
                    if closers.is_empty() {
                        first_bracket = Some(self.pos);
                    }
                    let closer = if kind == TokenKind::LParen {
                        TokenKind::RParen
                    } else {
                        TokenKind::RBracket
                    };
                    closers.push(closer);
                    has_bracket = true;
                }
                TokenKind::Brackets(_) => has_bracket = true,
                other if !closers.is_empty() => {
                    if closers.last() == Some(other) {
                        closers.pop();
                        if closers.is_empty() {
                            first_bracket = None;
                        }
                    }
                }
                TokenKind::Semicolon => {
                    if colon {
                        let node = self.declaration(start, self.pos)?;
                        self.advance(); // consume ;
                        return Ok(node);
                    }
                    if has_bracket {
                        return self.mixin(start, self.pos);
                    }
                    return Err(self.error_at(start, "Unknown word".into()));
                }
                TokenKind::LBrace => return self.rule(start, self.pos),
                TokenKind::RBrace => break,
                TokenKind::Colon => colon = true,
                _ => {}
            }
            self.advance();
        }

        if let Some(open) = first_bracket {
            return Err(self.error_at(open, "Unclosed bracket".into()));
        }

        // Drop trailing whitespace/comments; they belong to the enclosing block.
        let mut end = self.pos;
        while end > start && self.tokens[end - 1].kind.is_trivia() {
            end -= 1;
        }

        if colon {
            return self.declaration(start, end);
        }
        if has_bracket {
            return Err(self.error_at(end - 1, "Missing semicolon".into()));
        }
        Err(self.error_at(start, "Unknown word".into()))
    }

    /// Build a declaration from `tokens[start..end]` (no terminating `;`).
    fn declaration(&mut self, start: usize, end: usize) -> Result<Node, ParseError> {
        let run = &self.tokens[start..end];
        let colon = run
            .iter()
            .position(|t| t.kind == TokenKind::Colon)
            .ok_or_else(|| self.error_at(start, "Unknown word".into()))?;

        let prop = join_text(&run[..colon]).trim().to_string();
        if prop.is_empty() {
            return Err(self.error_at(start, "Unknown word".into()));
        }
        let value = join_text(&run[colon + 1..]).trim().to_string();

        self.spaces.clear();
        Ok(Node::Declaration(Declaration {
            prop,
            value,
            source: self.source_of(start, end.saturating_sub(1).max(start)),
        }))
    }

    /// Build a mixin call from `tokens[start..semicolon]` and consume the `;`.
    fn mixin(&mut self, start: usize, semicolon: usize) -> Result<Node, ParseError> {
        let mut before = std::mem::take(&mut self.spaces);

        let mut name_index = start;
        while name_index < semicolon && !matches!(self.tokens[name_index].kind, TokenKind::Word(_)) {
            before.push_str(self.tokens[name_index].text());
            name_index += 1;
        }
        if name_index == semicolon {
            return Err(self.error_at(start, "Unknown word".into()));
        }

        let name = self.tokens[name_index].text().to_string();
        let argument_tokens = &self.tokens[name_index + 1..semicolon];
        let arguments = parse_arguments(argument_tokens);
        let raws = MixinRaws {
            before,
            arguments: join_text(argument_tokens),
        };
        let source = self.source_of(name_index, semicolon);

        self.pos = semicolon;
        self.advance(); // consume ;

        Ok(Node::Mixin(MixinCall {
            name,
            arguments,
            raws,
            source,
        }))
    }

    /// Parse `selector { ... }` with `tokens[brace]` being the `{`.
    fn rule(&mut self, start: usize, brace: usize) -> Result<Node, ParseError> {
        let selector = join_text(&self.tokens[start..brace]).trim().to_string();
        self.spaces.clear();
        self.advance(); // consume {

        let nodes = self.parse_nodes(true)?;
        let end = self.expect_block_end(brace)?;

        Ok(Node::Rule(Rule {
            selector,
            nodes,
            source: self.source_of(start, end),
        }))
    }

    /// Parse `@name params;` or `@name params { ... }`.
    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let name = self.peek().text().trim_start_matches('@').to_string();
        self.spaces.clear();
        self.advance(); // consume @name

        let params_start = self.pos;
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace if depth == 0 => {
                    break
                }
                _ => {}
            }
            self.advance();
        }
        let params = join_text(&self.tokens[params_start..self.pos])
            .trim()
            .to_string();

        match self.peek().kind {
            TokenKind::LBrace => {
                let brace = self.pos;
                self.advance(); // consume {
                let nodes = self.parse_nodes(true)?;
                let end = self.expect_block_end(brace)?;
                Ok(Node::AtRule(AtRule {
                    name,
                    params,
                    nodes: Some(nodes),
                    source: self.source_of(start, end),
                }))
            }
            _ => {
                let end = self.pos.saturating_sub(1).max(start);
                if self.peek().kind == TokenKind::Semicolon {
                    self.advance();
                }
                Ok(Node::AtRule(AtRule {
                    name,
                    params,
                    nodes: None,
                    source: self.source_of(start, end),
                }))
            }
        }
    }

    /// Consume the `}` closing the block opened at `tokens[brace]`.
    fn expect_block_end(&mut self, brace: usize) -> Result<usize, ParseError> {
        if self.peek().kind != TokenKind::RBrace {
            return Err(self.error_at(brace, "Unclosed block".into()));
        }
        let end = self.pos;
        self.spaces.clear();
        self.advance();
        Ok(end)
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> &Token {
        static EOF: std::sync::LazyLock<Token> = std::sync::LazyLock::new(|| {
            Token::new(TokenKind::Eof, mixcss_lexer::Span::new(0, 0, 0, 0))
        });
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || matches!(self.peek().kind, TokenKind::Eof)
    }

    fn position(&self, index: usize) -> Position {
        let span = self.tokens[index.min(self.tokens.len() - 1)].span;
        Position::new(span.line, span.column)
    }

    fn source_of(&self, start: usize, end: usize) -> Source {
        Source {
            start: self.position(start),
            end: self.position(end),
        }
    }

    fn error(&self, message: String) -> ParseError {
        let token = self.peek();
        ParseError {
            message,
            line: token.span.line,
            column: token.span.column,
        }
    }

    fn error_at(&self, index: usize, message: String) -> ParseError {
        let position = self.position(index);
        ParseError {
            message,
            line: position.line,
            column: position.column,
        }
    }
}

/// Comment body without delimiters or surrounding whitespace.
fn comment_text(raw: &str) -> String {
    let inner = raw.strip_prefix("/*").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    inner.trim().to_string()
}
