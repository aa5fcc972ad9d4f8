//! Block tree data model
//!
//! Parameters, blocks, and the generic schema/instance tree, plus the editing
//! facade the UI layer drives.

pub mod block;
pub mod editor;
pub mod parameter;
pub mod tree;

pub use block::Block;
pub use editor::{NodePath, TreeChange, TreeEditor};
pub use parameter::Parameter;
pub use tree::{AdaptiveBlock, DataNode, NodeKind, TYPE_PLACEHOLDER, TreeNode};
