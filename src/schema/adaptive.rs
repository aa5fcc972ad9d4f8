//! Resolution of polymorphic `<type>` slots into adaptive nodes

use crate::model::{TYPE_PLACEHOLDER, TreeNode};
use crate::schema::index::{PathIndex, resolve_mut};
use tracing::debug;

/// Turn every hard-path node that holds a `<type>` exemplar into an
/// adaptive node over that exemplar's children. Each variant receives the
/// node's own parameters unless it already defines one of the same name.
///
/// The node is replaced where it sits, so its parent keeps the same slot.
/// Hard paths that are not in the forest, and nodes without a `<type>`
/// exemplar, are left alone.
///
/// Returns the hard paths that were resolved.
pub fn resolve_adaptive_types(forest: &mut [TreeNode], hard_paths: &[String]) -> Vec<String> {
    let mut resolved = Vec::new();
    let mut index = PathIndex::build(forest);

    for path in hard_paths {
        let Some(location) = index.get(path).map(<[usize]>::to_vec) else {
            debug!("Hard path {path} is not in the schema, skipping");
            continue;
        };
        let Some(node) = resolve_mut(forest, &location) else {
            continue;
        };
        if !resolve_node(node) {
            continue;
        }
        debug!("Resolved type variants of {path}");
        resolved.push(path.clone());
        // Variant paths lose their `<type>` segment
        index = PathIndex::build(forest);
    }

    resolved
}

/// Resolve a single node in place. Returns false when the node has no
/// `<type>` exemplar or the exemplar has no variants.
fn resolve_node(node: &mut TreeNode) -> bool {
    let Some(position) = node
        .exemplars()
        .iter()
        .position(|e| e.name == TYPE_PLACEHOLDER)
    else {
        return false;
    };
    if node.exemplars()[position].exemplars().is_empty() {
        debug!("'{}' has an empty {TYPE_PLACEHOLDER} exemplar", node.name);
        return false;
    }

    let placeholder = node.exemplars_mut().remove(position);
    let discarded = node.exemplars().len();
    if discarded > 0 {
        debug!(
            "Dropping {discarded} non-variant exemplars of adaptive node '{}'",
            node.name
        );
    }

    let shared = node.data().map(|d| d.parameters().to_vec()).unwrap_or_default();
    let variants = placeholder
        .into_exemplars()
        .into_iter()
        .map(|mut variant| {
            let data = variant.data_mut();
            for parameter in &shared {
                data.insert_if_absent(parameter.clone());
            }
            variant
        })
        .collect();

    node.make_adaptive(variants);
    true
}
