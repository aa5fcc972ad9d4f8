//! Parameter search over instance trees

use crate::model::{Parameter, TreeNode};
use regex::Regex;
use std::collections::VecDeque;

/// Parameters whose file-name meaning comes from the block they sit in
const FILE_PARAMETERS: [&str; 2] = ["file", "data_file"];

/// Breadth-first search for parameters whose `name = value` line fully
/// matches `pattern`. Inactive nodes are skipped, but their children are
/// still visited; disabled parameters and empty values never match.
///
/// Matches named `file` or `data_file` are renamed after their block so that
/// results from different blocks can be told apart.
#[must_use]
pub fn find_parameters(roots: &[TreeNode], pattern: &Regex) -> Vec<Parameter> {
    let mut found = Vec::new();
    let mut queue: VecDeque<&TreeNode> = roots.iter().collect();

    while let Some(node) = queue.pop_front() {
        queue.extend(node.children.iter());
        if !node.active {
            continue;
        }
        let Some(data) = node.data() else {
            continue;
        };

        for parameter in data.parameters() {
            if !parameter.enabled || parameter.value.is_empty() {
                continue;
            }
            if !is_full_match(pattern, &parameter.to_getpot_fragment()) {
                continue;
            }
            let mut hit = parameter.clone();
            if FILE_PARAMETERS
                .iter()
                .any(|name| hit.name.eq_ignore_ascii_case(name))
            {
                hit.name.clone_from(&node.name);
            }
            found.push(hit);
        }
    }

    found
}

fn is_full_match(pattern: &Regex, text: &str) -> bool {
    pattern
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}
