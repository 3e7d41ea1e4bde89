//! Mixin argument parsing.
//!
//! Turns the token run that follows a mixin name into an ordered argument
//! list. The scan is a single left-to-right pass over a flat token stream:
//! nested CSS function calls, quoted strings, list literals and comma-less
//! font stacks are all reassembled from raw token text.
//!
//! Any `key: value` syntax in a call folds the whole list into one
//! `Argument::Map`.

use crate::ast::Argument;
use indexmap::IndexMap;
use mixcss_lexer::{Token, TokenKind};

/// One scanned argument, or a `key: value` pair from a grouped call.
#[derive(Debug)]
enum Piece {
    Single(Argument),
    Pair(String, Argument),
}

impl Piece {
    fn key_text(&self) -> String {
        match self {
            Piece::Single(arg) => arg.to_string(),
            Piece::Pair(key, _) => key.clone(),
        }
    }
}

/// Parse the tokens between a mixin name and its `;`.
pub fn parse_arguments(tokens: &[Token]) -> Vec<Argument> {
    let tokens = trim_trivia(tokens);
    let Some(first) = tokens.first() else {
        return Vec::new();
    };

    let (pieces, keyed) = match &first.kind {
        TokenKind::Brackets(raw) if tokens.len() == 1 => parse_grouped(raw),
        TokenKind::LParen => {
            let end = if matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::RParen))
                && tokens.len() > 1
            {
                tokens.len() - 1
            } else {
                tokens.len()
            };
            scan(&tokens[1..end])
        }
        _ => scan(tokens),
    };

    if keyed {
        vec![fold_keyed(pieces)]
    } else {
        pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Single(arg) => arg,
                Piece::Pair(key, value) => {
                    let mut map = IndexMap::new();
                    map.insert(key, value);
                    Argument::Map(map)
                }
            })
            .collect()
    }
}

/// Fold a flat `[key, value, key, value, ...]` run (and explicit pairs) into
/// a single map argument. A trailing key without a value maps to `""`.
fn fold_keyed(pieces: Vec<Piece>) -> Argument {
    let mut map = IndexMap::new();
    let mut previous: Option<String> = None;

    for (i, piece) in pieces.into_iter().enumerate() {
        let key_text = piece.key_text();
        match piece {
            Piece::Pair(key, value) => {
                map.insert(key, value);
            }
            Piece::Single(arg) if i % 2 == 0 => {
                map.insert(arg.to_string(), Argument::text(""));
            }
            Piece::Single(arg) => {
                let key = previous.clone().unwrap_or_default();
                map.insert(key, arg);
            }
        }
        previous = Some(key_text);
    }

    Argument::Map(map)
}

// =========================================================================
// Grouped form: a single `( ... )` token
// =========================================================================

/// Parse a call whose whole argument span was scanned as one `Brackets`
/// token: strip the parens and split on top-level commas.
fn parse_grouped(raw: &str) -> (Vec<Piece>, bool) {
    let inner = strip_wrapping(raw, '(', ')');
    if inner.trim().is_empty() {
        return (Vec::new(), false);
    }

    let mut keyed = false;
    let pieces = split_top_level(inner)
        .into_iter()
        .map(|part| {
            let part = part.trim();
            match split_pair(part) {
                Some((key, value)) => {
                    keyed = true;
                    Piece::Pair(key.trim().to_string(), parse_literal(value.trim()))
                }
                None => Piece::Single(parse_literal(part)),
            }
        })
        .collect();

    (pieces, keyed)
}

/// A `[a, b]` literal becomes a list; anything else is kept as text.
fn parse_literal(text: &str) -> Argument {
    if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
        let inner = strip_wrapping(text, '[', ']');
        if inner.trim().is_empty() {
            return Argument::List(Vec::new());
        }
        let items = split_top_level(inner)
            .into_iter()
            .map(|item| parse_literal(item.trim()))
            .collect();
        return Argument::List(items);
    }
    Argument::text(text)
}

fn strip_wrapping(text: &str, open: char, close: char) -> &str {
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}

/// Split on commas that are not nested in parens, brackets or quotes.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split `key: value` at the first top-level `": "`.
fn split_pair(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                ':' if depth == 0 && text[i + 1..].starts_with(' ') => {
                    return Some((&text[..i], &text[i + 2..]));
                }
                _ => {}
            },
        }
    }
    None
}

// =========================================================================
// Token scan: calls the lexer could not group
// =========================================================================

/// Scan a token run into arguments. Returns the pieces and whether any
/// top-level `:` was seen.
///
/// Commas here are only separators, so an empty slot (`'a', , 'b'`) yields
/// no argument. `parse_grouped` keeps empty slots as empty text instead.
fn scan(tokens: &[Token]) -> (Vec<Piece>, bool) {
    let mut args: Vec<Argument> = Vec::new();
    let mut keyed = false;
    // Depth of an explicit `(` belonging to a function call inside an argument.
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let kind = &tokens[i].kind;

        if depth > 0 {
            append(&mut args, kind.text());
            match kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }

        match kind {
            TokenKind::Space(_) | TokenKind::Comment(_) | TokenKind::Comma => {}

            TokenKind::Colon => keyed = true,

            TokenKind::Word(text) | TokenKind::String(text) | TokenKind::AtWord(text) => {
                if continues_stack(tokens, i, &args) {
                    append(&mut args, &format!(", {text}"));
                } else {
                    args.push(Argument::text(text.as_str()));
                }
            }

            TokenKind::LParen => {
                append(&mut args, "(");
                depth = 1;
            }

            TokenKind::RParen => append(&mut args, ")"),

            TokenKind::Brackets(text) => {
                let after_word = i > 0 && matches!(tokens[i - 1].kind, TokenKind::Word(_));
                if after_word {
                    append(&mut args, text);
                } else {
                    args.push(Argument::text(text.as_str()));
                }
            }

            TokenKind::LBracket => {
                let close = matching_bracket(tokens, i);
                let (items, _) = scan(&tokens[i + 1..close]);
                args.push(Argument::List(
                    items
                        .into_iter()
                        .filter_map(|piece| match piece {
                            Piece::Single(arg) => Some(arg),
                            Piece::Pair(..) => None,
                        })
                        .collect(),
                ));
                i = close;
            }

            TokenKind::RBracket
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::Semicolon
            | TokenKind::Eof => {}
        }

        i += 1;
    }

    (args.into_iter().map(Piece::Single).collect(), keyed)
}

/// A word or string separated from the previous argument by a bare space
/// (no comma, no colon) continues that argument as a comma-joined stack,
/// e.g. `'Open Sans' Arial sans-serif`.
fn continues_stack(tokens: &[Token], i: usize, args: &[Argument]) -> bool {
    if i < 2 || !matches!(args.last(), Some(Argument::Text(_))) {
        return false;
    }
    matches!(tokens[i - 1].kind, TokenKind::Space(_))
        && !matches!(tokens[i - 2].kind, TokenKind::Colon | TokenKind::Comma)
        && !tokens[i - 2].text().ends_with(',')
}

/// Append raw text to the current argument, starting one if there is none.
fn append(args: &mut Vec<Argument>, text: &str) {
    match args.last_mut() {
        Some(Argument::Text(current)) => current.push_str(text),
        _ => args.push(Argument::text(text)),
    }
}

/// Index of the `]` closing the `[` at `open`, or the end of the run.
fn matching_bracket(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token.kind {
            TokenKind::LBracket => depth += 1,
            TokenKind::RBracket => {
                depth -= 1;
                if depth == 0 {
                    return open + offset;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

fn trim_trivia(tokens: &[Token]) -> &[Token] {
    let start = tokens
        .iter()
        .position(|t| !t.kind.is_trivia())
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| !t.kind.is_trivia())
        .map_or(start, |i| i + 1);
    &tokens[start..end]
}
