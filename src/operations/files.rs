//! Project file options for file-name parameters

use crate::error::TreeError;
use crate::model::TreeNode;
use crate::system::System;
use std::path::Path;
use tracing::debug;

/// Marker in a parameter's type hint that the value names a file
pub const FILE_NAME_HINT: &str = "FileName";

/// Offer the regular, non-hidden files of `project_dir` as the options of
/// every file-name parameter in `node` and its exemplars.
///
/// Returns the number of parameters updated.
///
/// # Errors
///
/// Returns an error if the project directory cannot be listed
pub fn apply_file_options(
    node: &mut TreeNode,
    system: &dyn System,
    project_dir: &Path,
) -> Result<usize, TreeError> {
    let files = project_files(system, project_dir)?;
    if files.is_empty() {
        return Ok(0);
    }
    let options = files.join(" ");
    Ok(apply_options(node, &options))
}

fn apply_options(node: &mut TreeNode, options: &str) -> usize {
    let mut updated = 0;
    for data in &mut node.data_nodes {
        for parameter in data.parameters_mut() {
            if parameter.type_hint.contains(FILE_NAME_HINT) {
                options.clone_into(&mut parameter.options);
                updated += 1;
            }
        }
    }
    for exemplar in node.exemplars_mut() {
        updated += apply_options(exemplar, options);
    }
    for child in &mut node.children {
        updated += apply_options(child, options);
    }
    updated
}

/// Names of the regular, non-hidden files directly inside `dir`
///
/// # Errors
///
/// Returns an error if the directory cannot be listed
pub fn project_files(system: &dyn System, dir: &Path) -> Result<Vec<String>, TreeError> {
    let entries = system
        .read_dir(dir)
        .map_err(|e| TreeError::io(dir.display().to_string(), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if system
            .is_file(&entry)
            .map_err(|e| TreeError::io(entry.display().to_string(), e))?
        {
            names.push(name.to_owned());
        }
    }
    names.sort();
    debug!("Found {} project files in {}", names.len(), dir.display());
    Ok(names)
}
