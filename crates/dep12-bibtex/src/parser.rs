//! BibTeX reader built on nom
//!
//! Handles:
//! - `@string` macros (case-insensitive) and the predefined month macros
//! - `@comment` and `@preamble` blocks, which are skipped
//! - `{...}` and `(...)` entry delimiters
//! - braced, quoted, numeric and macro values joined with `#`
//! - nested braces inside values
//!
//! A malformed block is recorded with its line number and the reader resumes
//! at the next `@`.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    error::{Error as NomError, ErrorKind},
    IResult,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::entry::BibEntry;

/// Errors for BibTeX based construction
#[derive(Error, Debug)]
pub enum BibtexError {
    #[error("Invalid BibTeX syntax at line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("No BibTeX entries found")]
    NoEntries,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A block that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibParseError {
    pub line: usize,
    pub message: String,
}

/// Everything read from a BibTeX source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    pub entries: Vec<BibEntry>,
    /// `@string` macros, keyed by lower-cased name
    pub strings: HashMap<String, String>,
    pub errors: Vec<BibParseError>,
}

enum Block {
    Entry(BibEntry),
    Macro(String, String),
    Skipped,
}

const MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Read all blocks from BibTeX source text
pub fn parse_bibliography(input: &str) -> Bibliography {
    let mut bibliography = Bibliography::default();
    let mut rest = input;

    // Text between blocks is a comment in BibTeX
    while let Some(at) = rest.find('@') {
        let block_start = &rest[at..];
        match parse_block(block_start, &bibliography.strings) {
            Ok((after, block)) => {
                match block {
                    Block::Entry(entry) => bibliography.entries.push(entry),
                    Block::Macro(name, value) => {
                        bibliography.strings.insert(name, value);
                    }
                    Block::Skipped => {}
                }
                rest = after;
            }
            Err(_) => {
                let line = line_of(input, block_start);
                debug!(line, "skipping malformed BibTeX block");
                bibliography.errors.push(BibParseError {
                    line,
                    message: "malformed entry".to_string(),
                });
                rest = &block_start[1..];
            }
        }
    }

    bibliography
}

fn line_of(input: &str, position: &str) -> usize {
    let offset = input.len() - position.len();
    input[..offset].matches('\n').count() + 1
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:.+/".contains(c))(input)
}

fn parse_block<'a>(input: &'a str, strings: &HashMap<String, String>) -> IResult<&'a str, Block> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, kind) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;
    let (rest, _) = multispace0(rest)?;

    let kind = kind.to_ascii_lowercase();
    if kind == "comment" {
        let (rest, _) = comment_body(rest)?;
        return Ok((rest, Block::Skipped));
    }

    let (rest, open) = alt((char('{'), char('(')))(rest)?;
    let close = if open == '{' { '}' } else { ')' };
    let (rest, _) = multispace0(rest)?;

    let (rest, block) = match kind.as_str() {
        "string" => {
            let (rest, (name, value)) = assignment(rest, strings)?;
            (rest, Block::Macro(name.to_ascii_lowercase(), value))
        }
        "preamble" => {
            let (rest, _) = field_value(rest, strings)?;
            (rest, Block::Skipped)
        }
        _ => {
            let (rest, entry) = entry_body(rest, &kind, close, strings)?;
            (rest, Block::Entry(entry))
        }
    };

    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(close)(rest)?;
    Ok((rest, block))
}

fn comment_body(input: &str) -> IResult<&str, ()> {
    if input.starts_with('{') {
        let (rest, _) = braced(input)?;
        return Ok((rest, ()));
    }
    let end = input.find('\n').unwrap_or(input.len());
    Ok((&input[end..], ()))
}

fn entry_body<'a>(
    input: &'a str,
    kind: &str,
    close: char,
    strings: &HashMap<String, String>,
) -> IResult<&'a str, BibEntry> {
    let (rest, cite_key) = take_while1(|c: char| c != ',' && c != close && !c.is_whitespace())(input)?;
    let mut entry = BibEntry::new(cite_key, kind);

    let (mut rest, _) = multispace0(rest)?;
    if let Some(after_comma) = rest.strip_prefix(',') {
        rest = after_comma;
    }

    loop {
        let (after_ws, _) = multispace0(rest)?;
        if after_ws.starts_with(close) {
            return Ok((after_ws, entry));
        }

        let (after_field, (key, value)) = assignment(after_ws, strings)?;
        entry.add_field(key.to_ascii_lowercase(), value);

        let (after_field, _) = multispace0(after_field)?;
        let (after_comma, _) = opt(char(','))(after_field)?;
        rest = after_comma;
    }
}

/// `name = value`
fn assignment<'a>(
    input: &'a str,
    strings: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, name) = identifier(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = field_value(rest, strings)?;
    Ok((rest, (name.to_string(), value)))
}

/// One or more value pieces joined with `#`, whitespace collapsed
fn field_value<'a>(input: &'a str, strings: &HashMap<String, String>) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut rest = input;

    loop {
        let (after_ws, _) = multispace0(rest)?;
        let (after_piece, piece) = alt((
            map(braced, |content: &str| content[1..content.len() - 1].to_string()),
            quoted,
            map(take_while1(|c: char| c.is_ascii_digit()), str::to_string),
            map(identifier, |name: &str| expand_macro(name, strings)),
        ))(after_ws)?;
        value.push_str(&piece);

        let (after_ws, _) = multispace0(after_piece)?;
        match after_ws.strip_prefix('#') {
            Some(next) => rest = next,
            None => return Ok((after_ws, collapse_whitespace(&value))),
        }
    }
}

fn expand_macro(name: &str, strings: &HashMap<String, String>) -> String {
    let lower = name.to_ascii_lowercase();
    if let Some(value) = strings.get(&lower) {
        return value.clone();
    }
    MONTHS
        .iter()
        .find(|(abbrev, _)| *abbrev == lower)
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| name.to_string())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `{...}` including the outer braces, nested braces balanced
fn braced(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)));
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (pos, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[..pos + 1]));
                }
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}

/// `"..."` without the quotes; quotes inside braces do not terminate
fn quoted(input: &str) -> IResult<&str, String> {
    let Some(body) = input.strip_prefix('"') else {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)));
    };

    let mut depth = 0usize;
    let mut escaped = false;
    for (pos, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => return Ok((&body[pos + 1..], body[..pos].to_string())),
            _ => {}
        }
    }

    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}
