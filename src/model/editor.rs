//! Editing facade over an instance tree
//!
//! The UI layer mutates the tree only through `TreeEditor` and learns about
//! mutations through the listeners it subscribes.

use crate::config::Config;
use crate::error::TreeError;
use crate::getpot::write_document;
use crate::model::{Parameter, TreeNode};
use core::fmt;
use tracing::debug;

/// Address of a concrete node: a root index followed by child indices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub root: usize,
    pub children: Vec<usize>,
}

impl NodePath {
    #[must_use]
    #[inline]
    pub const fn root(index: usize) -> Self {
        Self {
            root: index,
            children: Vec::new(),
        }
    }

    #[must_use]
    #[inline]
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.children.push(index);
        path
    }

    /// Path of the parent node, `None` for a root
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.children.split_last()?;
        Some(Self {
            root: self.root,
            children: rest.to_vec(),
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for index in &self.children {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// A mutation that has been applied to the tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeChange {
    ActiveChanged { path: NodePath, active: bool },
    ParameterValueChanged { path: NodePath, name: String },
    ParameterEnabledChanged { path: NodePath, name: String, enabled: bool },
    ParameterAdded { path: NodePath, name: String },
    ParameterRemoved { path: NodePath, name: String },
    ChildAdded { path: NodePath },
    ChildRemoved { parent: NodePath, name: String },
    VariantSelected { path: NodePath, variant: String },
}

type Listener = Box<dyn Fn(&TreeChange) + Send + Sync>;

/// Owns the instance roots and the change listeners
pub struct TreeEditor {
    roots: Vec<TreeNode>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for TreeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeEditor")
            .field("roots", &self.roots)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TreeEditor {
    #[must_use]
    pub const fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots,
            listeners: Vec::new(),
        }
    }

    /// Register a listener called after every successful mutation
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&TreeChange) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    #[must_use]
    pub fn into_roots(self) -> Vec<TreeNode> {
        self.roots
    }

    /// Node at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if any index along the path is out of range
    pub fn node(&self, path: &NodePath) -> Result<&TreeNode, TreeError> {
        let mut node = self.roots.get(path.root).ok_or_else(|| missing(path))?;
        for &index in &path.children {
            node = node.children.get(index).ok_or_else(|| missing(path))?;
        }
        Ok(node)
    }

    fn node_mut(&mut self, path: &NodePath) -> Result<&mut TreeNode, TreeError> {
        let mut node = self.roots.get_mut(path.root).ok_or_else(|| missing(path))?;
        for &index in &path.children {
            node = node.children.get_mut(index).ok_or_else(|| missing(path))?;
        }
        Ok(node)
    }

    fn notify(&self, change: &TreeChange) {
        debug!("Tree change: {change:?}");
        for listener in &self.listeners {
            listener(change);
        }
    }

    /// # Errors
    ///
    /// Returns an error if the path does not name a node
    pub fn set_active(&mut self, path: &NodePath, active: bool) -> Result<(), TreeError> {
        self.node_mut(path)?.active = active;
        self.notify(&TreeChange::ActiveChanged {
            path: path.clone(),
            active,
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the node or the parameter does not exist
    pub fn set_parameter_value<S: Into<String>>(
        &mut self,
        path: &NodePath,
        name: &str,
        value: S,
    ) -> Result<(), TreeError> {
        let node = self.node_mut(path)?;
        let parameter = parameter_of(node, name)?;
        parameter.value = value.into();
        self.notify(&TreeChange::ParameterValueChanged {
            path: path.clone(),
            name: name.to_owned(),
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the node or the parameter does not exist
    pub fn set_parameter_enabled(
        &mut self,
        path: &NodePath,
        name: &str,
        enabled: bool,
    ) -> Result<(), TreeError> {
        let node = self.node_mut(path)?;
        parameter_of(node, name)?.enabled = enabled;
        self.notify(&TreeChange::ParameterEnabledChanged {
            path: path.clone(),
            name: name.to_owned(),
            enabled,
        });
        Ok(())
    }

    /// Add a parameter to the node's own parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not exist or already has a
    /// parameter of that name
    pub fn add_parameter(&mut self, path: &NodePath, parameter: Parameter) -> Result<(), TreeError> {
        let name = parameter.name.clone();
        let node = self.node_mut(path)?;
        if !node.data_mut().insert_if_absent(parameter) {
            return Err(TreeError::edit(format!(
                "Node '{}' already has a parameter '{name}'",
                node.name
            )));
        }
        self.notify(&TreeChange::ParameterAdded {
            path: path.clone(),
            name,
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the node or the parameter does not exist
    pub fn remove_parameter(&mut self, path: &NodePath, name: &str) -> Result<Parameter, TreeError> {
        let node = self.node_mut(path)?;
        let removed = node
            .data_nodes
            .first_mut()
            .and_then(|d| d.remove(name))
            .ok_or_else(|| unknown_parameter(&node.name, name))?;
        self.notify(&TreeChange::ParameterRemoved {
            path: path.clone(),
            name: name.to_owned(),
        });
        Ok(removed)
    }

    /// Instantiate a schema exemplar as the last child of `parent`. The new
    /// child keeps the exemplar's parameters and, for an adaptive exemplar,
    /// its type variants; `name` overrides the exemplar's name.
    ///
    /// Returns the path of the new child.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent does not exist
    pub fn add_child_from_exemplar(
        &mut self,
        parent: &NodePath,
        exemplar: &TreeNode,
        name: Option<&str>,
    ) -> Result<NodePath, TreeError> {
        let mut child = exemplar.clone();
        child.children.clear();
        child.active = true;
        if let Some(name) = name {
            name.clone_into(&mut child.name);
        }

        let node = self.node_mut(parent)?;
        node.children.push(child);
        let path = parent.child(node.children.len() - 1);
        self.notify(&TreeChange::ChildAdded { path: path.clone() });
        Ok(path)
    }

    /// Remove the node at `path`. Roots cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is a root or does not name a node
    pub fn remove_child(&mut self, path: &NodePath) -> Result<TreeNode, TreeError> {
        let parent = path
            .parent()
            .ok_or_else(|| TreeError::edit(format!("Cannot remove top-level node {path}")))?;
        let index = path.children.last().copied().unwrap_or_default();

        let node = self.node_mut(&parent)?;
        if index >= node.children.len() {
            return Err(missing(path));
        }
        let removed = node.children.remove(index);
        self.notify(&TreeChange::ChildRemoved {
            parent,
            name: removed.name.clone(),
        });
        Ok(removed)
    }

    /// Switch an adaptive node to the variant called `variant`
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing, not adaptive, or has no
    /// variant of that name
    pub fn select_variant(&mut self, path: &NodePath, variant: &str) -> Result<(), TreeError> {
        let node = self.node_mut(path)?;
        let index = node
            .adaptive()
            .ok_or_else(|| TreeError::edit(format!("Node '{}' has no type variants", node.name)))?
            .variant_index(variant)
            .ok_or_else(|| {
                TreeError::edit(format!("Node '{}' has no variant '{variant}'", node.name))
            })?;
        node.select_variant(index)?;
        self.notify(&TreeChange::VariantSelected {
            path: path.clone(),
            variant: variant.to_owned(),
        });
        Ok(())
    }

    /// Serialize the current tree
    #[must_use]
    pub fn to_getpot(&self, config: &Config) -> String {
        write_document(&self.roots, config)
    }
}

fn missing(path: &NodePath) -> TreeError {
    TreeError::edit(format!("No node at path {path}"))
}

fn unknown_parameter(node: &str, name: &str) -> TreeError {
    TreeError::edit(format!("Node '{node}' has no parameter '{name}'"))
}

fn parameter_of<'a>(node: &'a mut TreeNode, name: &str) -> Result<&'a mut Parameter, TreeError> {
    let node_name = node.name.clone();
    node.parameter_mut(name)
        .ok_or_else(|| unknown_parameter(&node_name, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use std::sync::{Arc, Mutex};

    fn editor() -> TreeEditor {
        let kernels = Block::new("Kernels")
            .with_subblock(Block::new("diff").with_parameter(Parameter::new("variable", "u")));
        TreeEditor::new(vec![kernels.to_tree_node()])
    }

    fn recording(editor: &mut TreeEditor) -> Arc<Mutex<Vec<TreeChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        editor.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
        seen
    }

    #[test]
    fn mutations_notify_listeners_after_applying() {
        let mut editor = editor();
        let seen = recording(&mut editor);
        let diff = NodePath::root(0).child(0);

        editor.set_parameter_value(&diff, "variable", "v").unwrap();
        editor.set_active(&diff, false).unwrap();

        assert_eq!(editor.node(&diff).unwrap().parameter("variable").unwrap().value, "v");
        assert!(!editor.node(&diff).unwrap().active);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[1],
            TreeChange::ActiveChanged {
                path: diff,
                active: false
            }
        );
    }

    #[test]
    fn failed_edits_do_not_notify() {
        let mut editor = editor();
        let seen = recording(&mut editor);

        assert!(editor.set_parameter_value(&NodePath::root(0).child(5), "x", "1").is_err());
        assert!(editor.remove_parameter(&NodePath::root(0), "missing").is_err());
        assert!(editor.remove_child(&NodePath::root(0)).is_err());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn add_parameter_rejects_duplicates() {
        let mut editor = editor();
        let diff = NodePath::root(0).child(0);
        let err = editor
            .add_parameter(&diff, Parameter::new("variable", "w"))
            .unwrap_err();
        assert!(err.to_string().contains("already has"));

        editor.add_parameter(&diff, Parameter::new("block", "0")).unwrap();
        let removed = editor.remove_parameter(&diff, "block").unwrap();
        assert_eq!(removed.value, "0");
    }

    #[test]
    fn children_from_exemplars_can_switch_type() {
        let mut exemplar = TreeNode::new("<type>");
        let mut diffusion = TreeNode::new("Diffusion");
        diffusion.data_mut().insert(Parameter::new("variable", ""));
        let mut reaction = TreeNode::new("Reaction");
        reaction.data_mut().insert(Parameter::new("rate", "1"));
        exemplar.make_adaptive(vec![diffusion, reaction]);

        let mut editor = editor();
        let seen = recording(&mut editor);
        let path = editor
            .add_child_from_exemplar(&NodePath::root(0), &exemplar, Some("rx"))
            .unwrap();
        assert_eq!(path, NodePath::root(0).child(1));

        editor.select_variant(&path, "Reaction").unwrap();
        let node = editor.node(&path).unwrap();
        assert_eq!(node.name, "rx");
        assert_eq!(node.block_type, "Reaction");
        assert!(node.parameter("rate").is_some());
        assert!(editor.select_variant(&path, "Missing").is_err());

        let removed = editor.remove_child(&path).unwrap();
        assert_eq!(removed.name, "rx");
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn to_getpot_writes_the_current_tree() {
        let mut editor = editor();
        let diff = NodePath::root(0).child(0);
        editor.set_parameter_enabled(&diff, "variable", false).unwrap();

        let text = editor.to_getpot(&Config::default());
        assert!(text.contains("[./diff]"));
        assert!(text.contains("# variable = u"));
    }
}
