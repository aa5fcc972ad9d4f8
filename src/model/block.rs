//! Named, typed configuration section
//!
//! `Block` is the intermediate form between tree nodes and text. It is built
//! from the YAML schema map, from GetPot text, or from an instance tree, and
//! converts back to tree nodes in two ways: schema nodes keep subblocks as
//! exemplars, instance nodes keep them as concrete children.

use crate::model::tree::{DataNode, TreeNode};
use crate::model::Parameter;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    /// Schema "type" tag
    pub block_type: String,
    pub description: String,
    /// Written after the section header as an inline `# comment`
    pub comment: String,
    /// Inactive blocks are skipped or written commented out
    pub active: bool,
    pub parameters: Vec<Parameter>,
    pub subblocks: Vec<Block>,
}

impl Block {
    /// Create an active block with no parameters or subblocks
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            active: true,
            ..Self::default()
        }
    }

    #[must_use]
    #[inline]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    #[inline]
    pub fn with_subblock(mut self, block: Self) -> Self {
        self.subblocks.push(block);
        self
    }

    #[must_use]
    #[inline]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Convert to an instance node; subblocks become concrete children
    #[must_use]
    pub fn to_tree_node(&self) -> TreeNode {
        let mut node = self.node_shell();
        node.children = self.subblocks.iter().map(Self::to_tree_node).collect();
        node
    }

    /// Convert to a schema node; subblocks become exemplar children
    #[must_use]
    pub fn to_schema_node(&self) -> TreeNode {
        let mut node = self.node_shell();
        *node.exemplars_mut() = self.subblocks.iter().map(Self::to_schema_node).collect();
        node
    }

    fn node_shell(&self) -> TreeNode {
        let mut data = DataNode::new(format!("{} Parameters", self.name));
        for parameter in &self.parameters {
            if data.insert(parameter.clone()).is_some() {
                debug!(
                    "Duplicate parameter '{}' in block '{}', keeping the last one",
                    parameter.name,
                    self.name
                );
            }
        }

        TreeNode {
            name: self.name.clone(),
            description: self.description.clone(),
            comment: self.comment.clone(),
            block_type: self.block_type.clone(),
            active: self.active,
            data_nodes: vec![data],
            ..TreeNode::default()
        }
    }

    /// Build a block from an instance node. Only the first data node and the
    /// concrete children are read; exemplars are schema data and are ignored.
    #[must_use]
    pub fn from_tree_node(node: &TreeNode) -> Self {
        Self {
            name: node.name.clone(),
            block_type: node.block_type.clone(),
            description: node.description.clone(),
            comment: node.comment.clone(),
            active: node.active,
            parameters: node
                .data()
                .map(|d| d.parameters().to_vec())
                .unwrap_or_default(),
            subblocks: node.children.iter().map(Self::from_tree_node).collect(),
        }
    }
}
