//! Static version lookup in a metadata module.
//!
//! The module is never executed: its module-scope assignments to the version
//! attribute are read as text, and the last one wins.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, VercheckError};

/// The right-hand side of a version assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A complete string literal and its value
    Text(String),
    /// Anything that is not a plain string literal (numbers, names, calls)
    Other,
    /// A string literal that never closes on its line
    Unterminated,
    /// An expression that continues on following lines, e.g. an open `(`
    Continued,
}

/// Reads the version assigned to `attribute` at module scope.
pub fn read_module_version(path: &Path, attribute: &str) -> Result<String> {
    let source = fs::read_to_string(path)
        .map_err(|e| VercheckError::module_load(path, e.to_string()))?;

    match scan_assignment(&source, attribute)? {
        Some((line_no, Literal::Text(version))) => {
            debug!(path = %path.display(), line = line_no, "found version assignment");
            Ok(version)
        }
        Some((_, Literal::Other)) => Err(VercheckError::NotText {
            path: path.to_path_buf(),
        }),
        Some((line_no, Literal::Unterminated)) => Err(VercheckError::module_load(
            path,
            format!("unterminated string literal (line {})", line_no),
        )),
        Some((line_no, Literal::Continued)) => Err(VercheckError::module_load(
            path,
            format!(
                "cannot evaluate statically, use --execute (line {})",
                line_no
            ),
        )),
        None => Err(VercheckError::MissingAttribute {
            path: path.to_path_buf(),
            attribute: attribute.to_string(),
        }),
    }
}

/// Finds the last module-scope assignment to `attribute`.
///
/// Returns the 1-based line number and the assigned literal. Indented lines
/// belong to a nested block and are skipped. An unterminated literal stops the
/// scan, as the module would not load.
pub fn scan_assignment(source: &str, attribute: &str) -> Result<Option<(usize, Literal)>> {
    let pattern = format!(
        r"^{}\s*(?::[^=]*)?=(?P<value>.*)$",
        regex::escape(attribute)
    );
    let assignment = Regex::new(&pattern)
        .map_err(|e| VercheckError::config(format!("invalid attribute name: {}", e)))?;

    // Modules saved with a byte order mark
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut found = None;
    for (index, line) in source.lines().enumerate() {
        let Some(caps) = assignment.captures(line) else {
            continue;
        };
        let value = &caps["value"];
        // `==` is a comparison, not an assignment
        if value.starts_with('=') {
            continue;
        }
        let literal = parse_literal(value);
        let stop = literal == Literal::Unterminated;
        found = Some((index + 1, literal));
        if stop {
            break;
        }
    }
    Ok(found)
}

/// Parses a single-line string literal, e.g. `"1.0"`, `'1.0'`, `r"1.0"`,
/// `f"1.0"`, `("1.0")` or `"""1.0"""`, optionally followed by a comment.
pub fn parse_literal(value: &str) -> Literal {
    let value = value.trim();
    if value.ends_with('\\') {
        return Literal::Continued;
    }

    let (inner, parenthesized) = match value.strip_prefix('(') {
        Some(inner) => (inner.trim_start(), true),
        None => (value, false),
    };
    if parenthesized && is_line_end(inner) {
        return Literal::Continued;
    }

    let (text, rest, formatted) = match string_token(inner) {
        Token::NotString => {
            let open = value.matches('(').count() > value.matches(')').count();
            return if open {
                Literal::Continued
            } else {
                Literal::Other
            };
        }
        Token::Unterminated => return Literal::Unterminated,
        Token::String {
            text,
            rest,
            formatted,
        } => (text, rest.trim_start(), formatted),
    };

    let rest = if parenthesized {
        match rest.strip_prefix(')') {
            Some(after) => after.trim_start(),
            None if is_line_end(rest) => return Literal::Continued,
            None => return Literal::Other,
        }
    } else {
        rest
    };

    // Concatenations, method calls and f-string substitutions cannot be
    // evaluated without running the module
    if !(is_line_end(rest) || rest.starts_with(';')) || (formatted && text.contains('{')) {
        return Literal::Other;
    }
    Literal::Text(text)
}

fn is_line_end(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with('#')
}

/// A string literal at the start of a value.
enum Token<'a> {
    NotString,
    Unterminated,
    String {
        text: String,
        rest: &'a str,
        formatted: bool,
    },
}

fn string_token(value: &str) -> Token<'_> {
    let prefix_len = value
        .chars()
        .take(2)
        .take_while(|c| "rRuUfFbB".contains(*c))
        .count();
    let (prefix, body) = value.split_at(prefix_len);
    if prefix.contains(&['b', 'B'][..]) {
        return Token::NotString;
    }

    let quote = if body.starts_with("\"\"\"") {
        "\"\"\""
    } else if body.starts_with("'''") {
        "'''"
    } else if body.starts_with('"') {
        "\""
    } else if body.starts_with('\'') {
        "'"
    } else {
        return Token::NotString;
    };

    let raw = prefix.contains(&['r', 'R'][..]);
    match split_string_body(&body[quote.len()..], quote, raw) {
        Some((text, rest)) => Token::String {
            text,
            rest,
            formatted: prefix.contains(&['f', 'F'][..]),
        },
        None => Token::Unterminated,
    }
}

/// Splits `body` at the closing `quote`, returning the decoded text and what follows.
fn split_string_body<'a>(body: &'a str, quote: &str, raw: bool) -> Option<(String, &'a str)> {
    let mut text = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        if body[i..].starts_with(quote) {
            return Some((text, &body[i + quote.len()..]));
        }
        if c == '\\' {
            let (_, escaped) = chars.next()?;
            match escaped {
                '\\' | '\'' | '"' if !raw => text.push(escaped),
                _ => {
                    text.push('\\');
                    text.push(escaped);
                }
            }
            continue;
        }
        text.push(c);
    }
    None
}
