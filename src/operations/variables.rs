//! Binding of `variable` parameters to the declared variables

use crate::model::TreeNode;
use tracing::debug;

/// Block that declares the primary variables
pub const VARIABLES_BLOCK: &str = "Variables";

/// Block that declares the auxiliary variables
pub const AUX_VARIABLES_BLOCK: &str = "AuxVariables";

/// Block whose `variable` parameters refer to auxiliary variables
pub const AUX_KERNELS_BLOCK: &str = "AuxKernels";

const VARIABLE_PARAMETER: &str = "variable";

const AUX_PREFIX: &str = "Aux";

/// Set the options of every `variable` parameter to the names of the
/// declared variables. The parent's name decides which set applies: under
/// an `AuxKernels` parent the auxiliary variables, under any other `Aux*`
/// parent nothing, and everywhere else (top-level blocks included) the
/// primary variables. Values are never changed.
///
/// Returns the number of parameters whose options were set.
pub fn bind_variable_options(roots: &mut [TreeNode]) -> usize {
    let declared = Declared {
        variables: declared_names(roots, VARIABLES_BLOCK),
        aux_variables: declared_names(roots, AUX_VARIABLES_BLOCK),
    };

    let bound: usize = roots
        .iter_mut()
        .map(|root| bind_node(root, "", &declared))
        .sum();
    if bound > 0 {
        debug!("Bound variable options on {bound} parameters");
    }
    bound
}

struct Declared {
    variables: Option<String>,
    aux_variables: Option<String>,
}

impl Declared {
    fn for_parent(&self, parent: &str) -> Option<&str> {
        if parent.contains(AUX_KERNELS_BLOCK) {
            self.aux_variables.as_deref()
        } else if parent.contains(AUX_PREFIX) {
            None
        } else {
            self.variables.as_deref()
        }
    }
}

fn bind_node(node: &mut TreeNode, parent: &str, declared: &Declared) -> usize {
    let mut bound = 0;
    if let Some(names) = declared.for_parent(parent) {
        if let Some(parameter) = node.parameter_mut(VARIABLE_PARAMETER) {
            names.clone_into(&mut parameter.options);
            bound += 1;
        }
    }

    let name = node.name.clone();
    for child in &mut node.children {
        bound += bind_node(child, &name, declared);
    }
    bound
}

/// Space-separated names of the children of the top-level block `block`
fn declared_names(roots: &[TreeNode], block: &str) -> Option<String> {
    let node = roots.iter().find(|r| r.name == block)?;
    Some(
        node.children
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}
