//! Action syntax files: the list of hard paths declared by an application

use crate::system::System;
use std::path::Path;
use tracing::{debug, warn};

/// Hard paths in file order. Wildcard paths (ending in `*`) and blank lines
/// are dropped, consecutive duplicates collapse to one, and every path is
/// given a leading `/`.
#[must_use]
pub fn parse_action_syntax(text: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r').trim();
        if line.is_empty() || line.ends_with('*') {
            continue;
        }
        let path = normalize_path(line);
        if paths.last() != Some(&path) {
            paths.push(path);
        }
    }
    paths
}

/// `/`-rooted path without a trailing separator
#[must_use]
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

/// Read the action syntax file at `path`. A file that is missing or cannot
/// be read yields no hard paths.
#[must_use]
pub fn load_action_syntax(system: &dyn System, path: &Path) -> Vec<String> {
    match system.read_to_string(path) {
        Ok(text) => {
            let paths = parse_action_syntax(&text);
            debug!("Read {} hard paths from {}", paths.len(), path.display());
            paths
        }
        Err(err) => {
            warn!(
                "No action syntax read from {}: {err}. Type variants will not be resolved",
                path.display()
            );
            Vec::new()
        }
    }
}
