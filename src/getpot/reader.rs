//! GetPot parsing of a single top-level section

use crate::error::TreeError;
use crate::model::{Block, Parameter};
use tracing::debug;

/// Marker that opens a nested section
pub const NESTED_OPEN: &str = "[./";

/// Marker that closes a nested section
pub const NESTED_CLOSE: &str = "[../]";

/// Parsed first line of a section
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionHeader {
    name: String,
    comment: String,
    commented: bool,
}

impl Block {
    /// Parse a section from its lines. Line 0 is the section's opening line;
    /// the closing line may be included or left off.
    ///
    /// Every parsed block is marked active, even when its header line is
    /// commented out: a file on disk is read as the live configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A nested section has no matching close line
    pub fn from_text<S: AsRef<str>>(lines: &[S]) -> Result<Self, TreeError> {
        let trimmed: Vec<&str> = lines.iter().map(|l| l.as_ref().trim()).collect();
        parse_section(&trimmed, 0)
    }
}

fn parse_section(lines: &[&str], offset: usize) -> Result<Block, TreeError> {
    let Some(first) = lines.first() else {
        return Ok(Block::new(""));
    };

    let header = parse_header(first);
    if header.commented {
        debug!(
            "Section '{}' at line {} is commented out; reading it as active",
            header.name,
            offset + 1
        );
    }

    let mut block = Block::new(header.name);
    block.comment = header.comment;

    let mut i = 1;
    while i < lines.len() {
        let line = lines[i];
        if !is_section_marker(line) && line.contains('=') {
            let (parameter, consumed) = parse_parameter(lines, i);
            block.parameters.push(parameter);
            i += consumed;
        } else if opens_nested(line) {
            let end = find_section_end(lines, i).ok_or_else(|| {
                TreeError::unbalanced_section(parse_header(line).name, offset + i + 1)
            })?;
            block
                .subblocks
                .push(parse_section(&lines[i..end], offset + i)?);
            i = end + 1;
        } else {
            i += 1;
        }
    }

    Ok(block)
}

/// Index of the line closing the nested section opened at `start`. Depth
/// counting decides the boundary, not names.
fn find_section_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth: i64 = 1;
    for (index, line) in lines.iter().enumerate().skip(start + 1) {
        if opens_nested(line) {
            depth += 1;
        } else if closes_nested(line) {
            depth -= 1;
        }
        if depth == 0 {
            return Some(index);
        }
    }
    None
}

/// Name a section line declares, without delimiters or comments
pub(crate) fn section_name(line: &str) -> String {
    parse_header(line).name
}

fn parse_header(line: &str) -> SectionHeader {
    let line = line.trim();
    let mut raw = line;
    let mut comment = "";
    let mut commented = false;

    if let (Some(first), Some(last)) = (line.find('#'), line.rfind('#')) {
        if first == 0 && first == last {
            raw = &line[1..];
            commented = true;
        } else if first == 0 {
            raw = &line[1..last];
            comment = &line[last + 1..];
            commented = true;
        } else {
            raw = &line[..first];
            comment = &line[first + 1..];
        }
    }

    SectionHeader {
        name: strip_section_delimiters(raw.trim()).to_owned(),
        comment: comment.trim().to_owned(),
        commented,
    }
}

fn strip_section_delimiters(raw: &str) -> &str {
    let inner = raw.strip_suffix(']').unwrap_or(raw);
    inner
        .strip_prefix(NESTED_OPEN)
        .or_else(|| inner.strip_prefix('['))
        .unwrap_or(inner)
        .trim()
}

/// The `[...]` marker of a section line, commented out or not, without its
/// trailing comment. `None` for any other line.
pub(crate) fn section_marker(line: &str) -> Option<&str> {
    let line = line.trim();
    let body = line.strip_prefix('#').map_or(line, str::trim_start);
    if !body.starts_with('[') {
        return None;
    }
    Some(body.split_once('#').map_or(body, |(marker, _)| marker).trim_end())
}

fn is_section_marker(line: &str) -> bool {
    section_marker(line).is_some()
}

pub(crate) fn opens_nested(line: &str) -> bool {
    section_marker(line).is_some_and(|m| m.starts_with(NESTED_OPEN))
}

pub(crate) fn closes_nested(line: &str) -> bool {
    section_marker(line).is_some_and(|m| m.starts_with(NESTED_CLOSE))
}

/// Parse the parameter starting at `lines[start]`. Returns the parameter and
/// the number of lines it spans.
fn parse_parameter(lines: &[&str], start: usize) -> (Parameter, usize) {
    let line = lines[start];
    let (raw_key, raw_value) = line.split_once('=').unwrap_or((line, ""));

    let mut key = raw_key.trim();
    let mut enabled = true;
    if let Some(rest) = key.strip_prefix('#') {
        key = rest.trim();
        enabled = false;
    }

    // Split at the last '#' so '=' and '#' earlier in a quoted value survive
    let (value, comment) = match raw_value.rfind('#') {
        Some(index) => (&raw_value[..index], raw_value[index + 1..].trim()),
        None => (raw_value, ""),
    };

    let mut pieces = vec![value.trim()];
    let mut consumed = 1;
    while let Some(next) = lines.get(start + consumed) {
        if next.contains('=') || is_section_marker(next) {
            break;
        }
        pieces.push(next);
        consumed += 1;
    }

    let value = pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let parameter = Parameter::new(key, value)
        .with_comment(comment)
        .with_enabled(enabled);
    (parameter, consumed)
}
