//! Generic schema/instance tree
//!
//! A `TreeNode` is either a plain node, whose exemplar children are the
//! templates a user may instantiate, or an adaptive node, whose exemplar
//! children are a closed set of mutually exclusive type variants.

use crate::error::TreeError;
use crate::model::Parameter;
use serde::Serialize;
use tracing::warn;

/// Name of the exemplar that marks a polymorphic slot in a schema
pub const TYPE_PLACEHOLDER: &str = "<type>";

/// Ordered, name-unique parameter set belonging to one node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataNode {
    pub name: String,
    parameters: Vec<Parameter>,
}

impl DataNode {
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Insert a parameter, replacing one of the same name in place.
    /// Returns the replaced parameter.
    #[inline]
    pub fn insert(&mut self, parameter: Parameter) -> Option<Parameter> {
        if let Some(existing) = self.get_mut(&parameter.name) {
            return Some(core::mem::replace(existing, parameter));
        }
        self.parameters.push(parameter);
        None
    }

    /// Append a parameter only if no parameter of that name exists
    #[inline]
    pub fn insert_if_absent(&mut self, parameter: Parameter) -> bool {
        if self.contains(&parameter.name) {
            return false;
        }
        self.parameters.push(parameter);
        true
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self.parameters.iter().position(|p| p.name == name)?;
        Some(self.parameters.remove(index))
    }

    #[must_use]
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    #[inline]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[inline]
    pub fn parameters_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        self.parameters.iter_mut()
    }

    #[must_use]
    #[inline]
    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl FromIterator<Parameter> for DataNode {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut node = Self::default();
        for parameter in iter {
            node.insert(parameter);
        }
        node
    }
}

/// A resolved polymorphic node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdaptiveBlock {
    variants: Vec<TreeNode>,
    selected: usize,
}

impl AdaptiveBlock {
    #[must_use]
    #[inline]
    pub const fn new(variants: Vec<TreeNode>) -> Self {
        Self {
            variants,
            selected: 0,
        }
    }

    #[must_use]
    #[inline]
    pub fn variants(&self) -> &[TreeNode] {
        &self.variants
    }

    #[must_use]
    #[inline]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    #[inline]
    pub fn selected(&self) -> Option<&TreeNode> {
        self.variants.get(self.selected)
    }

    #[must_use]
    #[inline]
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    #[must_use]
    #[inline]
    pub fn into_variants(self) -> Vec<TreeNode> {
        self.variants
    }
}

/// Node flavour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    Plain { exemplars: Vec<TreeNode> },
    Adaptive(AdaptiveBlock),
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Plain {
            exemplars: Vec::new(),
        }
    }
}

/// N-ary tree node shared by schema trees and instance trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub description: String,
    pub comment: String,
    pub block_type: String,
    pub active: bool,
    pub data_nodes: Vec<DataNode>,
    pub children: Vec<TreeNode>,
    pub kind: NodeKind,
}

impl TreeNode {
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Exemplar children: templates for a plain node, variants for an
    /// adaptive one.
    #[must_use]
    #[inline]
    pub fn exemplars(&self) -> &[TreeNode] {
        match self.kind {
            NodeKind::Plain { ref exemplars } => exemplars,
            NodeKind::Adaptive(ref adaptive) => adaptive.variants(),
        }
    }

    /// Consume the node, keeping only its exemplar children
    #[must_use]
    #[inline]
    pub fn into_exemplars(self) -> Vec<TreeNode> {
        match self.kind {
            NodeKind::Plain { exemplars } => exemplars,
            NodeKind::Adaptive(adaptive) => adaptive.into_variants(),
        }
    }

    #[inline]
    pub fn exemplars_mut(&mut self) -> &mut Vec<TreeNode> {
        match self.kind {
            NodeKind::Plain { ref mut exemplars } => exemplars,
            NodeKind::Adaptive(ref mut adaptive) => &mut adaptive.variants,
        }
    }

    #[must_use]
    #[inline]
    pub fn find_exemplar(&self, name: &str) -> Option<&TreeNode> {
        self.exemplars().iter().find(|e| e.name == name)
    }

    #[must_use]
    #[inline]
    pub fn find_child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    #[must_use]
    #[inline]
    pub const fn is_adaptive(&self) -> bool {
        matches!(self.kind, NodeKind::Adaptive(_))
    }

    #[must_use]
    #[inline]
    pub const fn adaptive(&self) -> Option<&AdaptiveBlock> {
        match self.kind {
            NodeKind::Adaptive(ref adaptive) => Some(adaptive),
            NodeKind::Plain { .. } => None,
        }
    }

    /// The first data node holds the node's own parameters
    #[must_use]
    #[inline]
    pub fn data(&self) -> Option<&DataNode> {
        self.data_nodes.first()
    }

    /// First data node, created if the node has none
    #[inline]
    pub fn data_mut(&mut self) -> &mut DataNode {
        if self.data_nodes.is_empty() {
            self.data_nodes
                .push(DataNode::new(format!("{} Parameters", self.name)));
        }
        &mut self.data_nodes[0]
    }

    #[must_use]
    #[inline]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.data().and_then(|d| d.get(name))
    }

    #[inline]
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.data_nodes.first_mut().and_then(|d| d.get_mut(name))
    }

    /// Turn this node into an adaptive node over `variants` and select the
    /// first one
    #[inline]
    pub fn make_adaptive(&mut self, variants: Vec<TreeNode>) {
        self.kind = NodeKind::Adaptive(AdaptiveBlock::new(variants));
        if self.exemplars().is_empty() {
            return;
        }
        // Non-empty variant list, index 0 is always valid
        if let Err(err) = self.select_variant(0) {
            warn!("Could not select initial variant of '{}': {err}", self.name);
        }
    }

    /// Switch an adaptive node to another variant. The node takes over the
    /// variant's parameters and its name becomes the node's type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The node is not adaptive
    /// - The index is out of range
    #[inline]
    pub fn select_variant(&mut self, index: usize) -> Result<(), TreeError> {
        let NodeKind::Adaptive(ref mut adaptive) = self.kind else {
            return Err(TreeError::edit(format!(
                "Node '{}' has no type variants",
                self.name
            )));
        };
        let variant = adaptive.variants.get(index).ok_or_else(|| {
            TreeError::edit(format!(
                "Variant index {index} out of range for '{}' ({} variants)",
                self.name,
                adaptive.variants.len()
            ))
        })?;
        self.data_nodes.clone_from(&variant.data_nodes);
        self.block_type.clone_from(&variant.name);
        adaptive.selected = index;
        Ok(())
    }

    /// Pre-order walk over this node and its concrete descendants
    #[inline]
    pub fn walk(&self, visit: &mut dyn FnMut(&TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
