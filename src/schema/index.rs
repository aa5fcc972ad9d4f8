//! Absolute-path index over a schema forest

use crate::model::TreeNode;
use std::collections::HashMap;

/// Position of a node: index of its root, then exemplar indices downward
pub type Location = Vec<usize>;

/// Maps `/`-joined absolute paths to node locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    entries: HashMap<String, Location>,
}

impl PathIndex {
    /// Index every node of `forest`, exemplars included. Traversal is an
    /// iterative depth-first walk with an explicit stack. When two nodes
    /// share a path the first one in pre-order is kept.
    #[must_use]
    pub fn build(forest: &[TreeNode]) -> Self {
        let mut entries = HashMap::new();
        let mut stack: Vec<(Location, String)> = forest
            .iter()
            .enumerate()
            .rev()
            .map(|(index, root)| (vec![index], format!("/{}", root.name)))
            .collect();

        while let Some((location, path)) = stack.pop() {
            let Some(node) = resolve(forest, &location) else {
                continue;
            };
            for (index, exemplar) in node.exemplars().iter().enumerate().rev() {
                let mut child = location.clone();
                child.push(index);
                stack.push((child, format!("{path}/{}", exemplar.name)));
            }
            entries.entry(path).or_insert(location);
        }

        Self { entries }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[usize]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed paths in sorted order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Node at `location`, following exemplar children below the root
#[must_use]
pub fn resolve<'a>(forest: &'a [TreeNode], location: &[usize]) -> Option<&'a TreeNode> {
    let (root, rest) = location.split_first()?;
    let mut node = forest.get(*root)?;
    for &index in rest {
        node = node.exemplars().get(index)?;
    }
    Some(node)
}

pub fn resolve_mut<'a>(forest: &'a mut [TreeNode], location: &[usize]) -> Option<&'a mut TreeNode> {
    let (root, rest) = location.split_first()?;
    let mut node = forest.get_mut(*root)?;
    for &index in rest {
        node = node.exemplars_mut().get_mut(index)?;
    }
    Some(node)
}
