//! Whole-file GetPot reading and writing

use crate::config::Config;
use crate::error::TreeError;
use crate::getpot::reader::{NESTED_CLOSE, NESTED_OPEN, section_marker, section_name};
use crate::getpot::writer::SectionPrefix;
use crate::model::{Block, TreeNode};
use crate::operations::variables::bind_variable_options;
use crate::system::System;
use std::path::Path;
use tracing::{debug, info};

/// Line closing a top-level section
pub const TOP_LEVEL_CLOSE: &str = "[]";

/// A cleaned line with its 1-based number in the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Split on `\n`, `\r\n` or `\r`
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find(['\n', '\r']) {
        lines.push(&rest[..index]);
        let skip = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + skip..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Drop blank lines and prose comments, trim what is left
#[must_use]
pub fn clean_lines<'a>(lines: &[&'a str]) -> Vec<SourceLine<'a>> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let text = line.trim();
            if text.is_empty() || is_prose_comment(text) {
                return None;
            }
            Some(SourceLine {
                number: index + 1,
                text,
            })
        })
        .collect()
}

/// A `#` line that is neither a commented-out parameter nor a commented-out
/// section marker
fn is_prose_comment(line: &str) -> bool {
    let Some(body) = line.strip_prefix('#') else {
        return false;
    };
    if let Some((key, _)) = body.split_once('=') {
        // "# the value = 3 here" is prose, "# value = 3" is a parameter
        let key = key.trim();
        return key.is_empty() || key.contains(char::is_whitespace);
    }
    !body.contains('[') && !body.contains(']')
}

fn opens_top_level(line: &str) -> bool {
    section_marker(line).is_some_and(|m| {
        m.ends_with(']')
            && m != TOP_LEVEL_CLOSE
            && !m.starts_with(NESTED_OPEN)
            && !m.starts_with(NESTED_CLOSE)
    })
}

fn closes_top_level(line: &str) -> bool {
    section_marker(line) == Some(TOP_LEVEL_CLOSE)
}

/// Parse a complete GetPot file into its top-level blocks
///
/// # Errors
///
/// Returns an error if:
/// - A top-level section has no `[]` line
/// - A nested section has no matching `[../]` line
pub fn parse_document(text: &str) -> Result<Vec<Block>, TreeError> {
    let raw = split_lines(text);
    let lines = clean_lines(&raw);
    let texts: Vec<&str> = lines.iter().map(|l| l.text).collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < texts.len() {
        let line = texts[i];
        if !opens_top_level(line) {
            debug!("Skipping line {} outside any section: {line}", lines[i].number);
            i += 1;
            continue;
        }

        let end = (i + 1..texts.len())
            .find(|&k| closes_top_level(texts[k]))
            .ok_or_else(|| TreeError::unbalanced_section(section_name(line), lines[i].number))?;

        let mut block = Block::from_text(&texts[i..=end]).map_err(|err| match err {
            TreeError::UnbalancedSection { section, line } => {
                let number = lines.get(i + line - 1).map_or(line, |l| l.number);
                TreeError::unbalanced_section(section, number)
            }
            other => other,
        })?;
        block.active = true;
        blocks.push(block);
        i = end + 1;
    }

    Ok(blocks)
}

/// Read a GetPot file into instance tree nodes
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (`TreeError::Io`)
/// - The file contents are malformed
pub fn read_document(
    system: &dyn System,
    path: &Path,
    config: &Config,
) -> Result<Vec<TreeNode>, TreeError> {
    let text = system
        .read_to_string(path)
        .map_err(|e| TreeError::io(path.display().to_string(), e))?;

    let blocks = parse_document(&text)?;
    if config.verbosity.is_debug() {
        info!("Read {} sections from {}", blocks.len(), path.display());
        for block in &blocks {
            info!("{}", block.to_text(SectionPrefix::TopLevel, true));
        }
    }

    let mut nodes: Vec<TreeNode> = blocks.iter().map(Block::to_tree_node).collect();
    if config.bind_variables {
        bind_variable_options(&mut nodes);
    }
    Ok(nodes)
}

/// Serialize instance tree nodes. Blocks named in `priority_blocks` come
/// first, everything else keeps document order.
#[must_use]
pub fn write_document(nodes: &[TreeNode], config: &Config) -> String {
    let blocks: Vec<Block> = nodes.iter().map(Block::from_tree_node).collect();
    let (priority, rest): (Vec<&Block>, Vec<&Block>) = blocks
        .iter()
        .partition(|b| config.priority_blocks.iter().any(|name| *name == b.name));

    priority
        .into_iter()
        .chain(rest)
        .map(|block| block.to_text(SectionPrefix::TopLevel, config.write_inactive))
        .collect()
}

/// Serialize instance tree nodes and write them with a single call
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be written (`TreeError::Io`)
pub fn write_file(
    system: &dyn System,
    path: &Path,
    nodes: &[TreeNode],
    config: &Config,
) -> Result<(), TreeError> {
    let text = write_document(nodes, config);
    system
        .write(path, text.as_bytes())
        .map_err(|e| TreeError::io(path.display().to_string(), e))
}
