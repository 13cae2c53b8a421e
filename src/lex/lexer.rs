//! N3 lexer implementation using winnow.
//!
//! Tokenizes N3 input into a stream of tokens with source spans.
//! Fails fast on the first lexical error with a classified, positioned error.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, peek, preceded};
use winnow::error::ContextError;
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::diag::{DiagCode, Diagnostic};
use crate::span::SourceSpan;

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// A lexical error: the first invalid token in the input.
///
/// Carries a stable [`DiagCode`] so callers can react programmatically,
/// plus the span of the offending character.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    /// Stable code classifying the failure
    pub code: DiagCode,
    /// Span of the offending character
    pub span: SourceSpan,
    /// Human-readable description
    pub message: String,
}

impl LexError {
    /// Convert into a [`Diagnostic`] for `ParseOutput` consumers.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.code, self.message, self.span)
    }
}

/// Lexer for N3 documents.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input.
    ///
    /// Returns an error immediately on the first invalid token. The token
    /// vector always ends with a single [`TokenKind::Eof`].
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            // Skip whitespace and comments
            skip_ws_and_comments(&mut input);

            if input.is_empty() {
                let pos = input.current_token_start();
                tokens.push(Token::from_range(TokenKind::Eof, pos, pos));
                break;
            }

            let start = input.current_token_start();

            match next_token(&mut input) {
                Ok(kind) => {
                    let end = input.current_token_start();
                    tokens.push(Token::from_range(kind, start, end));
                }
                Err(_) => {
                    // Fail fast with a classified error
                    return Err(self.make_error(start));
                }
            }
        }

        Ok(tokens)
    }

    /// Build a classified error for the token starting at `start`.
    ///
    /// The winnow branches above only report "no alternative matched", so
    /// the failed region is re-examined here to produce a useful message.
    fn make_error(&self, start: usize) -> LexError {
        let remaining = &self.input[start..];
        let bad_char = remaining.chars().next().unwrap_or('?');

        let is_number_start = bad_char.is_ascii_digit()
            || ((bad_char == '+' || bad_char == '-')
                && remaining[1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit() || c == '.'));

        let (code, message) = if bad_char == '"' || bad_char == '\'' {
            string_error(remaining)
        } else if bad_char == '<' {
            iri_error(remaining)
        } else if is_number_start {
            number_error(remaining)
        } else if bad_char == '@' {
            (
                DiagCode::InvalidToken,
                "expected 'prefix', 'base', or a language tag after '@'".to_string(),
            )
        } else if bad_char == '?' {
            (
                DiagCode::InvalidToken,
                "expected a variable name after '?'".to_string(),
            )
        } else if bad_char == '_' {
            let message = if remaining.starts_with("_:") {
                "invalid blank node label (expected a name after '_:')".to_string()
            } else {
                "unexpected character '_' (expected a blank node label '_:name')".to_string()
            };
            (DiagCode::InvalidToken, message)
        } else if is_pn_chars_base(bad_char) {
            let word: String = remaining
                .chars()
                .take_while(|&c| is_pn_chars(c) || c == '.')
                .collect();
            (
                DiagCode::InvalidToken,
                format!("unrecognized bare word '{}'", word),
            )
        } else if !bad_char.is_ascii() {
            (
                DiagCode::InvalidToken,
                format!(
                    "unexpected character '{}' (U+{:04X})",
                    bad_char, bad_char as u32
                ),
            )
        } else {
            (
                DiagCode::InvalidToken,
                format!("unexpected character '{}'", bad_char),
            )
        };

        LexError {
            code,
            span: SourceSpan::new(start, start + bad_char.len_utf8()),
            message,
        }
    }
}

/// Classify a failed string literal: bad escape vs. unterminated.
fn string_error(remaining: &str) -> (DiagCode, String) {
    let quote = remaining.chars().next().unwrap_or('"');
    let long = remaining.starts_with("\"\"\"") || remaining.starts_with("'''");
    let closer = if quote == '"' { "\"\"\"" } else { "'''" };
    let mut rest = &remaining[if long { 3 } else { 1 }..];

    loop {
        let Some(c) = rest.chars().next() else {
            return (
                DiagCode::UnterminatedString,
                "unterminated string literal".to_string(),
            );
        };

        if c == '\\' {
            match rest[1..].chars().next() {
                None => {
                    return (
                        DiagCode::UnterminatedString,
                        "unterminated string literal".to_string(),
                    )
                }
                Some(e @ ('u' | 'U')) => {
                    let n = if e == 'u' { 4 } else { 8 };
                    match check_unicode_escape(&rest[2..], n) {
                        Ok(()) => {}
                        Err(err) => return (DiagCode::InvalidEscape, err),
                    }
                    rest = &rest[2 + n..];
                    continue;
                }
                Some(e) if matches!(e, 't' | 'b' | 'n' | 'r' | 'f' | '"' | '\'' | '\\') => {
                    rest = &rest[2..];
                    continue;
                }
                Some(e) => {
                    return (
                        DiagCode::InvalidEscape,
                        format!("invalid escape sequence '\\{}' in string literal", e),
                    )
                }
            }
        }

        if !long && (c == '\n' || c == '\r') {
            return (
                DiagCode::UnterminatedString,
                "unterminated string literal (line break before closing quote)".to_string(),
            );
        }

        if c == quote && (!long || rest.starts_with(closer)) {
            // Closed cleanly with valid escapes; nothing sharper to report.
            return (
                DiagCode::UnterminatedString,
                "malformed string literal".to_string(),
            );
        }

        rest = &rest[c.len_utf8()..];
    }
}

/// Classify a failed IRI reference.
fn iri_error(remaining: &str) -> (DiagCode, String) {
    let mut rest = &remaining[1..];

    loop {
        let Some(c) = rest.chars().next() else {
            return (
                DiagCode::InvalidIri,
                "unterminated IRI reference".to_string(),
            );
        };

        match c {
            '>' => {
                return (DiagCode::InvalidIri, "malformed IRI reference".to_string());
            }
            '\\' => match rest[1..].chars().next() {
                Some(e @ ('u' | 'U')) => {
                    let n = if e == 'u' { 4 } else { 8 };
                    match check_unicode_escape(&rest[2..], n) {
                        Ok(()) => {}
                        Err(err) => return (DiagCode::InvalidEscape, err),
                    }
                    rest = &rest[2 + n..];
                }
                _ => {
                    return (
                        DiagCode::InvalidEscape,
                        "only \\uXXXX and \\UXXXXXXXX escapes are allowed in IRIs".to_string(),
                    );
                }
            },
            c if is_iri_char(c) => rest = &rest[c.len_utf8()..],
            c if c.is_ascii_whitespace() => {
                return (
                    DiagCode::InvalidIri,
                    "unterminated IRI reference (whitespace before '>')".to_string(),
                );
            }
            c => {
                return (
                    DiagCode::InvalidIri,
                    format!(
                        "character '{}' is not allowed in an IRI reference",
                        c.escape_debug()
                    ),
                );
            }
        }
    }
}

/// Check `n` hex digits naming a valid scalar value.
fn check_unicode_escape(hex: &str, n: usize) -> Result<(), String> {
    if hex.len() < n || !hex.as_bytes()[..n].iter().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected {} hex digits in unicode escape", n));
    }
    match u32::from_str_radix(&hex[..n], 16) {
        Ok(code) if char::from_u32(code).is_some() => Ok(()),
        _ => Err("unicode escape names an invalid code point".to_string()),
    }
}

/// Classify a failed numeric literal.
fn number_error(remaining: &str) -> (DiagCode, String) {
    let end = remaining
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .unwrap_or(remaining.len());
    let lexeme = &remaining[..end];

    let digits = lexeme.strip_prefix(['+', '-']).unwrap_or(lexeme);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if lexeme.parse::<i64>().is_err() {
            return (
                DiagCode::InvalidNumericLiteral,
                format!("integer literal '{}' is out of range for i64", lexeme),
            );
        }
    } else if matches!(lexeme.parse::<f64>(), Ok(v) if !v.is_finite()) {
        return (
            DiagCode::InvalidNumericLiteral,
            format!("double literal '{}' is out of range for f64", lexeme),
        );
    }

    (
        DiagCode::InvalidNumericLiteral,
        format!("malformed numeric literal '{}'", lexeme),
    )
}

/// Skip whitespace and comments.
fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
            let _: ModalResult<Option<char>, ContextError> =
                opt(one_of(['\n', '\r'])).parse_next(input);
        } else {
            break;
        }
    }
}

/// Parse the next token.
fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        // Multi-char operators (must come before single-char)
        parse_double_caret,
        parse_implies,
        // IRIs, and the arrows that also open with '<'
        parse_iri_or_arrow,
        // Quick variables
        parse_quick_var,
        // Blank node labels (must come before prefixed names)
        parse_blank_node_label,
        // Directives (@prefix, @base) and language tags
        parse_at_directive,
        // Default prefix (:name or just :)
        parse_default_prefix,
        // Prefixed names and bare keywords (a, true, has, PREFIX, ...)
        parse_prefixed_name_or_keyword,
        // String literals
        parse_string_literal,
        // Numbers (before punctuation: `.5` is a decimal)
        parse_number,
        // Single-char punctuation
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRI Parsing
// =============================================================================

/// Parse `<...>` IRIs and the `<=` / `<-` arrows.
///
/// A well-formed IRI wins by longest match, so `<=foo>` is the IRI `=foo`
/// while `<= ` is the reverse-implication verb.
fn parse_iri_or_arrow(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_iri_ref,
        "<=".map(|_| TokenKind::ImpliedBy),
        "<-".map(|_| TokenKind::BackArrow),
    ))
    .parse_next(input)
}

/// Parse an IRI reference: `<...>`
fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', parse_iri_content, '>')
        .map(|s: String| TokenKind::Iri(Arc::from(s)))
        .parse_next(input)
}

/// Parse the content inside an IRI (validates characters and handles escapes).
fn parse_iri_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('>') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            if input.starts_with('u') || input.starts_with('U') {
                if let Some(c) = parse_unicode_escape(input)? {
                    result.push(c);
                } else {
                    return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
                }
            } else {
                return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
            }
        } else {
            return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
        }
    }

    // Allow empty IRIs (relative reference to base)
    Ok(result)
}

/// Parse a Unicode escape sequence (\uXXXX or \UXXXXXXXX).
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<Option<char>> {
    if input.starts_with('u') {
        'u'.parse_next(input)?;
        let hex: &str = take_while(4..=4, AsChar::is_hex_digit).parse_next(input)?;
        let code = u32::from_str_radix(hex, 16).unwrap_or(0xFFFD);
        Ok(char::from_u32(code))
    } else if input.starts_with('U') {
        'U'.parse_next(input)?;
        let hex: &str = take_while(8..=8, AsChar::is_hex_digit).parse_next(input)?;
        let code = u32::from_str_radix(hex, 16).unwrap_or(0xFFFD);
        Ok(char::from_u32(code))
    } else {
        Ok(None)
    }
}

// =============================================================================
// Variables
// =============================================================================

/// Parse a quick variable: `?name` (the name follows the `?` immediately).
fn parse_quick_var(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '?'.parse_next(input)?;
    let name = parse_pn_local(input)?;
    Ok(TokenKind::Var(Arc::from(name.as_str())))
}

// =============================================================================
// Directives (@prefix, @base, language tags)
// =============================================================================

/// Parse `@` directives and language tags.
///
/// The directive words are exact: `@BASE` is a language tag, not a
/// directive. Longest match applies, so `@prefix-x` is also a tag.
fn parse_at_directive(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;

    let mut tag = String::new();
    let primary: &str =
        take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    tag.push_str(primary);

    loop {
        if input.starts_with('-') {
            let rest = &input.as_ref()[1..];
            if rest.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
                '-'.parse_next(input)?;
                let subtag: &str =
                    take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)?;
                tag.push('-');
                tag.push_str(subtag);
                continue;
            }
        }
        break;
    }

    match tag.as_str() {
        "prefix" => Ok(TokenKind::KwPrefix),
        "base" => Ok(TokenKind::KwBase),
        _ => Ok(TokenKind::LangTag(Arc::from(tag.as_str()))),
    }
}

// =============================================================================
// Prefixed Names and Keywords
// =============================================================================

/// Parse a default prefix name (`:local`) or default prefix namespace (`:`).
fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ':'.parse_next(input)?;

    let local = opt(parse_pn_local).parse_next(input)?;

    match local {
        Some(local) => Ok(TokenKind::PrefixedName {
            prefix: Arc::from(""),
            local: Arc::from(local.as_str()),
        }),
        None => Ok(TokenKind::PrefixedNameNs(Arc::from(""))),
    }
}

/// Parse a prefixed name or a bare keyword.
///
/// `a true false has is of id` match exactly; `PREFIX`/`BASE` match in any
/// case. A trailing `:` always wins: `true:x` is a prefixed name.
fn parse_prefixed_name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let start = input.checkpoint();

    let first_char = input
        .chars()
        .next()
        .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))?;

    let is_valid_prefix_start = is_pn_prefix_start(first_char);

    let mut word = String::new();
    let c: char = any.parse_next(input)?;
    word.push(c);

    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        word.push_str(chunk);

        // Dots are interior only: consume a run of dots when a name
        // character follows, otherwise leave them to the next token.
        if input.starts_with('.') {
            let rest = input.as_ref();
            let dots = rest.chars().take_while(|&c| c == '.').count();
            if rest[dots..].chars().next().is_some_and(is_pn_chars) {
                for _ in 0..dots {
                    '.'.parse_next(input)?;
                    word.push('.');
                }
                continue;
            }
        }
        break;
    }

    // Check if followed by a colon (prefixed name)
    if peek(opt(':')).parse_next(input)?.is_some() {
        if !is_valid_prefix_start {
            input.reset(&start);
            return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
        }

        ':'.parse_next(input)?;

        let local = opt(parse_pn_local).parse_next(input)?;

        match local {
            Some(local) => Ok(TokenKind::PrefixedName {
                prefix: Arc::from(word.as_str()),
                local: Arc::from(local.as_str()),
            }),
            None => Ok(TokenKind::PrefixedNameNs(Arc::from(word.as_str()))),
        }
    } else {
        // Check if it's a keyword
        match word.as_str() {
            "a" => Ok(TokenKind::KwA),
            "true" => Ok(TokenKind::KwTrue),
            "false" => Ok(TokenKind::KwFalse),
            "has" => Ok(TokenKind::KwHas),
            "is" => Ok(TokenKind::KwIs),
            "of" => Ok(TokenKind::KwOf),
            "id" => Ok(TokenKind::KwId),
            w if w.eq_ignore_ascii_case("prefix") => Ok(TokenKind::KwSparqlPrefix),
            w if w.eq_ignore_ascii_case("base") => Ok(TokenKind::KwSparqlBase),
            _ => {
                input.reset(&start);
                Err(winnow::error::ErrMode::Backtrack(ContextError::new()))
            }
        }
    }
}

/// Parse a local name (after the colon in a prefixed name, or after `?`).
///
/// `%HH` sequences are kept verbatim; `\`-escaped punctuation is decoded.
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let first_char = input
        .chars()
        .next()
        .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))?;

    if !is_pn_local_start(first_char) && first_char != '%' && first_char != '\\' {
        return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
    }

    let mut result = String::new();

    loop {
        let chunk: &str =
            take_while(0.., |c: char| is_pn_chars(c) || c == ':').parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() {
            break;
        }

        if input.starts_with('.') {
            let rest = input.as_ref();
            let dots = rest.chars().take_while(|&c| c == '.').count();
            let follows = rest[dots..]
                .chars()
                .next()
                .is_some_and(|c| is_pn_chars(c) || c == ':' || c == '%' || c == '\\');
            if follows {
                for _ in 0..dots {
                    '.'.parse_next(input)?;
                    result.push('.');
                }
                continue;
            }
            break;
        }

        if input.starts_with('%') {
            '%'.parse_next(input)?;
            let hex: &str = take_while(2..=2, AsChar::is_hex_digit).parse_next(input)?;
            result.push('%');
            result.push_str(hex);
        } else if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped: char = any.parse_next(input)?;
            if is_pn_local_esc(escaped) {
                result.push(escaped);
            } else {
                return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
            }
        } else {
            break;
        }
    }

    if result.is_empty() {
        return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
    }

    Ok(result)
}

// =============================================================================
// Blank Nodes
// =============================================================================

/// Parse a blank node label: `_:name`
fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "_:".parse_next(input)?;
    let name = parse_blank_node_name(input)?;
    Ok(TokenKind::BlankNodeLabel(Arc::from(name.as_str())))
}

/// Parse a blank node name (after `_:`).
///
/// Interior dots are allowed; a trailing dot is left as the statement
/// terminator, so `_:b1.` is the label `b1` followed by `.`.
fn parse_blank_node_name(input: &mut Input<'_>) -> ModalResult<String> {
    let first_char = input
        .chars()
        .next()
        .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))?;
    if !is_pn_chars_u(first_char) && !first_char.is_ascii_digit() {
        return Err(winnow::error::ErrMode::Backtrack(ContextError::new()));
    }

    let mut name = String::new();
    let c: char = any.parse_next(input)?;
    name.push(c);

    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        name.push_str(chunk);

        if input.starts_with('.') {
            let rest = input.as_ref();
            let dots = rest.chars().take_while(|&c| c == '.').count();
            if rest[dots..].chars().next().is_some_and(is_pn_chars) {
                for _ in 0..dots {
                    '.'.parse_next(input)?;
                    name.push('.');
                }
                continue;
            }
        }
        break;
    }

    Ok(name)
}

// =============================================================================
// String Literals
// =============================================================================

/// Parse a string literal (single or double quotes, short or long).
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_string_long_double,
        parse_string_long_single,
        parse_string_short_double,
        parse_string_short_single,
    ))
    .parse_next(input)
}

fn parse_string_short_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('"', parse_string_content_double, '"')
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_string_short_single(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('\'', parse_string_content_single, '\'')
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_string_long_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited("\"\"\"", parse_long_string_content_double, "\"\"\"")
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_string_long_single(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited("'''", parse_long_string_content_single, "'''")
        .map(|s| TokenKind::String(Arc::from(s)))
        .parse_next(input)
}

fn parse_string_content_double(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '"' && c != '\\' && c != '\n' && c != '\r')
            .parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('"') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else {
            break;
        }
    }

    Ok(result)
}

fn parse_string_content_single(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '\'' && c != '\\' && c != '\n' && c != '\r')
            .parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('\'') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else {
            break;
        }
    }

    Ok(result)
}

fn parse_long_string_content_double(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '"' && c != '\\').parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() {
            break;
        }

        if input.starts_with("\"\"\"") {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else if input.starts_with('"') {
            // One or two quotes not followed by a third are content
            let c: char = any.parse_next(input)?;
            result.push(c);
        } else {
            break;
        }
    }

    Ok(result)
}

fn parse_long_string_content_single(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '\'' && c != '\\').parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() {
            break;
        }

        if input.starts_with("'''") {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else if input.starts_with('\'') {
            let c: char = any.parse_next(input)?;
            result.push(c);
        } else {
            break;
        }
    }

    Ok(result)
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    let c: char = any.parse_next(input)?;
    match c {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => {
            let hex: &str = take_while(4..=4, AsChar::is_hex_digit).parse_next(input)?;
            let code = u32::from_str_radix(hex, 16)
                .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))?;
            char::from_u32(code)
                .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))
        }
        'U' => {
            let hex: &str = take_while(8..=8, AsChar::is_hex_digit).parse_next(input)?;
            let code = u32::from_str_radix(hex, 16)
                .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))?;
            char::from_u32(code)
                .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))
        }
        _ => Err(winnow::error::ErrMode::Backtrack(ContextError::new())),
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// Longest match first: `3.14e0` is a double, `3.14` a decimal, `3` an
/// integer, and `5.` an integer followed by `.`.
fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let sign = opt(one_of(['+', '-'])).parse_next(input)?;
    let digits: &str = digit1.parse_next(input)?;

    let mut num_str = String::new();
    if let Some(s) = sign {
        num_str.push(s);
    }
    num_str.push_str(digits);

    // Out-of-range literals are lexical errors, never clamped
    let value = num_str
        .parse::<i64>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(ContextError::new()))?;
    Ok(TokenKind::Integer(value))
}

fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let sign = opt(one_of(['+', '-'])).parse_next(input)?;

    let (whole, frac) = alt((
        (digit1, preceded('.', digit1)).map(|(w, f): (&str, &str)| (Some(w), f)),
        preceded('.', digit1).map(|f: &str| (None, f)),
    ))
    .parse_next(input)?;

    let mut num_str = String::new();
    if let Some(s) = sign {
        num_str.push(s);
    }
    if let Some(w) = whole {
        num_str.push_str(w);
    }
    num_str.push('.');
    num_str.push_str(frac);

    Ok(TokenKind::Decimal(Arc::from(num_str)))
}

fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let sign = opt(one_of(['+', '-'])).parse_next(input)?;

    let mantissa = alt((
        (digit1, '.', opt(digit1)).take(),
        ('.', digit1).take(),
        digit1,
    ))
    .parse_next(input)?;

    one_of(['e', 'E']).parse_next(input)?;
    let exp_sign = opt(one_of(['+', '-'])).parse_next(input)?;
    let exp_digits: &str = digit1.parse_next(input)?;

    let mut num_str = String::new();
    if let Some(s) = sign {
        num_str.push(s);
    }
    num_str.push_str(mantissa);
    num_str.push('e');
    if let Some(s) = exp_sign {
        num_str.push(s);
    }
    num_str.push_str(exp_digits);

    // Exponents past f64 range are lexical errors, not infinities.
    // Cut, not backtrack: the lexeme is structurally a double, and a
    // backtrack would let the integer parser claim its mantissa.
    let value = num_str
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| winnow::error::ErrMode::Cut(ContextError::new()))?;
    Ok(TokenKind::Double(value))
}

// =============================================================================
// Operators and Punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "^^".map(|_| TokenKind::DoubleCaret).parse_next(input)
}

fn parse_implies(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "=>".map(|_| TokenKind::Implies).parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        '!' => Some(TokenKind::Bang),
        '^' => Some(TokenKind::Caret),
        '=' => Some(TokenKind::Eq),
        _ => None,
    })
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    fn err(input: &str) -> LexError {
        Lexer::new(input).tokenize().unwrap_err()
    }

    #[test]
    fn test_iri() {
        assert_eq!(
            tok("<http://example.org/>"),
            vec![TokenKind::Iri(Arc::from("http://example.org/"))]
        );
    }

    #[test]
    fn test_empty_iri() {
        // Empty IRI (relative reference to base)
        assert_eq!(tok("<>"), vec![TokenKind::Iri(Arc::from(""))]);
    }

    #[test]
    fn test_iri_unicode_escape() {
        assert_eq!(
            tok("<http://example.org/caf\\u00E9>"),
            vec![TokenKind::Iri(Arc::from("http://example.org/café"))]
        );
    }

    #[test]
    fn test_iri_beats_arrows() {
        // A complete <...> wins by longest match
        assert_eq!(tok("<=foo>"), vec![TokenKind::Iri(Arc::from("=foo"))]);
        assert_eq!(tok("<-foo>"), vec![TokenKind::Iri(Arc::from("-foo"))]);
        // With no closing '>', the arrows match instead
        assert_eq!(
            tok("<= <-"),
            vec![TokenKind::ImpliedBy, TokenKind::BackArrow]
        );
    }

    #[test]
    fn test_rule_arrows() {
        assert_eq!(
            tok("= => <="),
            vec![TokenKind::Eq, TokenKind::Implies, TokenKind::ImpliedBy]
        );
    }

    #[test]
    fn test_quick_var() {
        assert_eq!(tok("?x"), vec![TokenKind::Var(Arc::from("x"))]);
        assert_eq!(
            tok("?who ?what"),
            vec![
                TokenKind::Var(Arc::from("who")),
                TokenKind::Var(Arc::from("what")),
            ]
        );
        // Variable names follow the local-name rules, dots included
        assert_eq!(tok("?x.y"), vec![TokenKind::Var(Arc::from("x.y"))]);
    }

    #[test]
    fn test_var_requires_name() {
        let e = err("? x");
        assert_eq!(e.code, DiagCode::InvalidToken);
        assert!(e.message.contains("variable"));
    }

    #[test]
    fn test_prefixed_name() {
        assert_eq!(
            tok("ex:name"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex"),
                local: Arc::from("name"),
            }]
        );

        assert_eq!(tok("ex:"), vec![TokenKind::PrefixedNameNs(Arc::from("ex"))]);
    }

    #[test]
    fn test_default_prefix() {
        assert_eq!(
            tok(":name"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from(""),
                local: Arc::from("name"),
            }]
        );

        assert_eq!(tok(":"), vec![TokenKind::PrefixedNameNs(Arc::from(""))]);
    }

    #[test]
    fn test_dotted_names() {
        // Dots are interior: a trailing dot is the statement terminator
        assert_eq!(
            tok("ex.a:b.c"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex.a"),
                local: Arc::from("b.c"),
            }]
        );
        assert_eq!(
            tok(":obj."),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("obj"),
                },
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_local_name_escapes() {
        // Reserved punctuation is escaped in source, decoded in the token
        assert_eq!(
            tok(":a\\!b"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from(""),
                local: Arc::from("a!b"),
            }]
        );
        // Percent-encoded sequences stay verbatim
        assert_eq!(
            tok(":a%4Ab"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from(""),
                local: Arc::from("a%4Ab"),
            }]
        );
    }

    #[test]
    fn test_blank_node_label() {
        assert_eq!(tok("_:b1"), vec![TokenKind::BlankNodeLabel(Arc::from("b1"))]);
        assert_eq!(tok("_:0x"), vec![TokenKind::BlankNodeLabel(Arc::from("0x"))]);
        // Trailing dot stays out of the label
        assert_eq!(
            tok("_:b1."),
            vec![TokenKind::BlankNodeLabel(Arc::from("b1")), TokenKind::Dot]
        );
        // Interior dot runs are part of the label
        assert_eq!(
            tok("_:b..c"),
            vec![TokenKind::BlankNodeLabel(Arc::from("b..c"))]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tok("a"), vec![TokenKind::KwA]);
        assert_eq!(tok("true"), vec![TokenKind::KwTrue]);
        assert_eq!(tok("false"), vec![TokenKind::KwFalse]);
        assert_eq!(tok("has"), vec![TokenKind::KwHas]);
        assert_eq!(tok("is"), vec![TokenKind::KwIs]);
        assert_eq!(tok("of"), vec![TokenKind::KwOf]);
        assert_eq!(tok("id"), vec![TokenKind::KwId]);
        assert_eq!(tok("@prefix"), vec![TokenKind::KwPrefix]);
        assert_eq!(tok("@base"), vec![TokenKind::KwBase]);
    }

    #[test]
    fn test_sparql_directives_case_insensitive() {
        assert_eq!(tok("PREFIX"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("prefix"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("BaSe"), vec![TokenKind::KwSparqlBase]);
        assert_eq!(tok("base"), vec![TokenKind::KwSparqlBase]);
    }

    #[test]
    fn test_at_directives_exact_case() {
        // Only the exact lowercase forms are directives
        assert_eq!(tok("@BASE"), vec![TokenKind::LangTag(Arc::from("BASE"))]);
        assert_eq!(tok("@Prefix"), vec![TokenKind::LangTag(Arc::from("Prefix"))]);
    }

    #[test]
    fn test_keyword_vs_prefix() {
        // A following colon always makes a prefixed name
        assert_eq!(
            tok("true:x"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("true"),
                local: Arc::from("x"),
            }]
        );
        assert_eq!(
            tok("has:x"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("has"),
                local: Arc::from("x"),
            }]
        );
    }

    #[test]
    fn test_lang_tag() {
        assert_eq!(tok("@en"), vec![TokenKind::LangTag(Arc::from("en"))]);
        assert_eq!(tok("@en-US"), vec![TokenKind::LangTag(Arc::from("en-US"))]);
        assert_eq!(
            tok("@fr-CA-1994"),
            vec![TokenKind::LangTag(Arc::from("fr-CA-1994"))]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(tok("\"hello\""), vec![TokenKind::String(Arc::from("hello"))]);
        assert_eq!(tok("'hello'"), vec![TokenKind::String(Arc::from("hello"))]);
        assert_eq!(
            tok("\"hello\\nworld\""),
            vec![TokenKind::String(Arc::from("hello\nworld"))]
        );
        assert_eq!(
            tok("\"\\u20AC\""),
            vec![TokenKind::String(Arc::from("€"))]
        );
    }

    #[test]
    fn test_long_string() {
        assert_eq!(
            tok("\"\"\"hello\nworld\"\"\""),
            vec![TokenKind::String(Arc::from("hello\nworld"))]
        );
        assert_eq!(
            tok("'''it's fine'''"),
            vec![TokenKind::String(Arc::from("it's fine"))]
        );
    }

    #[test]
    fn test_long_string_embedded_quotes() {
        // One or two quote chars are content; only three terminate
        assert_eq!(
            tok("\"\"\"a\"b\"\"c\"\"\""),
            vec![TokenKind::String(Arc::from("a\"b\"\"c"))]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tok("42"), vec![TokenKind::Integer(42)]);
        assert_eq!(tok("-42"), vec![TokenKind::Integer(-42)]);
        assert_eq!(tok("+3"), vec![TokenKind::Integer(3)]);
        assert_eq!(tok("3.14"), vec![TokenKind::Decimal(Arc::from("3.14"))]);
        assert_eq!(tok(".5"), vec![TokenKind::Decimal(Arc::from(".5"))]);
        assert_eq!(tok("1e10"), vec![TokenKind::Double(1e10)]);
        assert_eq!(tok("-2.5E-3"), vec![TokenKind::Double(-2.5e-3)]);
        assert_eq!(tok(".5e3"), vec![TokenKind::Double(0.5e3)]);
        assert_eq!(tok("1.e5"), vec![TokenKind::Double(1e5)]);
    }

    #[test]
    fn test_integer_then_dot() {
        // `5.` is not a decimal: the dot terminates the statement
        assert_eq!(tok("5."), vec![TokenKind::Integer(5), TokenKind::Dot]);
    }

    #[test]
    fn test_number_out_of_range() {
        let e = err("99999999999999999999");
        assert_eq!(e.code, DiagCode::InvalidNumericLiteral);
        assert!(e.message.contains("out of range"));

        let e = err("1e999");
        assert_eq!(e.code, DiagCode::InvalidNumericLiteral);
        assert!(e.message.contains("out of range"));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tok(".;,"),
            vec![TokenKind::Dot, TokenKind::Semicolon, TokenKind::Comma]
        );
        assert_eq!(tok("^^"), vec![TokenKind::DoubleCaret]);
        assert_eq!(
            tok("{ } ! ^"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Bang,
                TokenKind::Caret,
            ]
        );
    }

    #[test]
    fn test_path_operators_bind_tight() {
        assert_eq!(
            tok(":a!:b^:c"),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("a"),
                },
                TokenKind::Bang,
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("b"),
                },
                TokenKind::Caret,
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("c"),
                },
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tok("ex:name # this is a comment\nex:value"),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("name"),
                },
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("value"),
                },
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new(":a :b .").tokenize().unwrap();
        let spans: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
        assert_eq!(spans, vec![(0, 2), (3, 5), (6, 7), (7, 7)]);
        assert!(tokens.last().is_some_and(Token::is_eof));
    }

    #[test]
    fn test_simple_statement() {
        let tokens = tok("<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\" .");
        assert_eq!(tokens.len(), 4);
        assert!(matches!(&tokens[0], TokenKind::Iri(_)));
        assert!(matches!(&tokens[1], TokenKind::Iri(_)));
        assert!(matches!(&tokens[2], TokenKind::String(_)));
        assert!(matches!(&tokens[3], TokenKind::Dot));
    }

    #[test]
    fn test_formula_tokens() {
        assert_eq!(
            tok("{ ?x a :Person } => { ?x a :Agent } ."),
            vec![
                TokenKind::LBrace,
                TokenKind::Var(Arc::from("x")),
                TokenKind::KwA,
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("Person"),
                },
                TokenKind::RBrace,
                TokenKind::Implies,
                TokenKind::LBrace,
                TokenKind::Var(Arc::from("x")),
                TokenKind::KwA,
                TokenKind::PrefixedName {
                    prefix: Arc::from(""),
                    local: Arc::from("Agent"),
                },
                TokenKind::RBrace,
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_unicode_prefixed_name() {
        assert_eq!(
            tok("éx:nom"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("éx"),
                local: Arc::from("nom"),
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        let tokens = Lexer::new("").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].span, SourceSpan::new(0, 0));
    }

    #[test]
    fn test_error_unexpected_char() {
        let e = err(":a $ :b");
        assert_eq!(e.code, DiagCode::InvalidToken);
        assert!(e.message.contains('$'));
        assert_eq!(e.span.start, 3);
    }

    #[test]
    fn test_error_bare_word() {
        let e = err("foo");
        assert_eq!(e.code, DiagCode::InvalidToken);
        assert!(e.message.contains("foo"));
    }

    #[test]
    fn test_error_unterminated_string() {
        let e = err("\"abc");
        assert_eq!(e.code, DiagCode::UnterminatedString);

        let e = err("'abc\ndef'");
        assert_eq!(e.code, DiagCode::UnterminatedString);
        assert!(e.message.contains("line break"));
    }

    #[test]
    fn test_error_bad_escape() {
        let e = err("\"a\\qb\"");
        assert_eq!(e.code, DiagCode::InvalidEscape);
        assert!(e.message.contains("\\q"));

        let e = err("\"\\uZZZZ\"");
        assert_eq!(e.code, DiagCode::InvalidEscape);

        // Surrogates are not scalar values
        let e = err("\"\\uD800\"");
        assert_eq!(e.code, DiagCode::InvalidEscape);
    }

    #[test]
    fn test_error_iri() {
        let e = err("<a b>");
        assert_eq!(e.code, DiagCode::InvalidIri);

        let e = err("<abc");
        assert_eq!(e.code, DiagCode::InvalidIri);
        assert!(e.message.contains("unterminated"));

        let e = err("<a{b}>");
        assert_eq!(e.code, DiagCode::InvalidIri);

        let e = err("<a\\nb>");
        assert_eq!(e.code, DiagCode::InvalidEscape);
    }
}
