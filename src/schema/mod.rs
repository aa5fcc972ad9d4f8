//! Schema loading
//!
//! YAML schema document to blocks, blocks to schema nodes (subblocks become
//! exemplars), then resolution of the `<type>` slots named by the companion
//! action syntax file.

pub mod adaptive;
pub mod index;
pub mod syntax;
pub mod yaml;

pub use adaptive::resolve_adaptive_types;
pub use index::{Location, PathIndex};
pub use syntax::{load_action_syntax, parse_action_syntax};
pub use yaml::parse_schema_document;

use crate::config::Config;
use crate::error::TreeError;
use crate::getpot::SectionPrefix;
use crate::model::{Block, TreeNode};
use crate::operations::apply_file_options;
use crate::system::System;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// A loaded schema forest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub roots: Vec<TreeNode>,
    /// Hard paths that were turned into adaptive nodes
    pub resolved_paths: Vec<String>,
}

impl Schema {
    #[must_use]
    pub fn index(&self) -> PathIndex {
        PathIndex::build(&self.roots)
    }

    /// Node at an absolute `/`-joined path
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let paths = self.index();
        paths
            .get(&syntax::normalize_path(path))
            .and_then(|location| index::resolve(&self.roots, location))
    }

    /// Indented outline of the schema: one line per node, adaptive nodes
    /// list their variants
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            outline_node(&mut out, root, 0);
        }
        out
    }
}

fn outline_node(out: &mut String, node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let parameters = node.data().map_or(0, |d| d.len());
    let line = match node.adaptive() {
        Some(adaptive) => format!(
            "{indent}{} <{} variants, selected {}> ({parameters} parameters)",
            node.name,
            adaptive.variants().len(),
            node.block_type
        ),
        None => format!("{indent}{} ({parameters} parameters)", node.name),
    };
    out.push_str(&line);
    out.push('\n');
    for exemplar in node.exemplars() {
        outline_node(out, exemplar, depth + 1);
    }
}

/// Loads schema documents through a `System`
pub struct SchemaLoader<'a> {
    system: &'a dyn System,
    config: &'a Config,
}

impl<'a> SchemaLoader<'a> {
    #[must_use]
    pub const fn new(system: &'a dyn System, config: &'a Config) -> Self {
        Self { system, config }
    }

    /// Load the schema at `path` together with its action syntax file, the
    /// same path with the configured syntax extension. A missing syntax
    /// file leaves every `<type>` slot unresolved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The YAML file cannot be read (`TreeError::Io`)
    /// - The YAML document cannot be decoded
    pub fn load(&self, path: &Path) -> Result<Schema, TreeError> {
        let syntax_path = path.with_extension(&self.config.syntax_extension);
        self.load_with_syntax(path, &syntax_path)
    }

    /// Load the schema at `path` using an explicit action syntax file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The YAML file cannot be read (`TreeError::Io`)
    /// - The YAML document cannot be decoded
    pub fn load_with_syntax(&self, path: &Path, syntax_path: &Path) -> Result<Schema, TreeError> {
        let yaml = self
            .system
            .read_to_string(path)
            .map_err(|e| TreeError::io(path.display().to_string(), e))?;
        let hard_paths = load_action_syntax(self.system, syntax_path);

        let mut schema = self.build(&yaml, &hard_paths)?;

        if self.config.project_file_options
            && let Some(parent) = path.parent().and_then(Path::parent)
        {
            let project_dir = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            for root in &mut schema.roots {
                if let Err(err) = apply_file_options(root, self.system, project_dir) {
                    warn!("Project file options not applied to '{}': {err}", root.name);
                    break;
                }
            }
        }

        Ok(schema)
    }

    /// Build a schema from YAML text and optional action syntax text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML document cannot be decoded
    pub fn load_from_str(&self, yaml: &str, syntax: Option<&str>) -> Result<Schema, TreeError> {
        let hard_paths = syntax.map(parse_action_syntax).unwrap_or_default();
        self.build(yaml, &hard_paths)
    }

    fn build(&self, yaml: &str, hard_paths: &[String]) -> Result<Schema, TreeError> {
        let blocks = parse_schema_document(yaml)?;
        if self.config.verbosity.is_debug() {
            for block in &blocks {
                info!("{}", block.to_text(SectionPrefix::TopLevel, true));
            }
        }

        let mut roots: Vec<TreeNode> = blocks.iter().map(Block::to_schema_node).collect();
        let resolved_paths = resolve_adaptive_types(&mut roots, hard_paths);

        if self.config.verbosity.is_debug() {
            info!(
                "Resolved {} of {} hard paths",
                resolved_paths.len(),
                hard_paths.len()
            );
            for path in &resolved_paths {
                info!("  {path}");
            }
        }

        Ok(Schema {
            roots,
            resolved_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::getpot::{NEWLINE, write_document};
    use crate::system::MockSystem;

    const MESH_YAML: &str = r#"
- name: Mesh
  parameters:
    - name: type
      required: true
      default: generated
"#;

    #[test]
    fn mesh_schema_writes_expected_instance() {
        let config = Config::default();
        let system = MockSystem::new();
        let schema = SchemaLoader::new(&system, &config)
            .load_from_str(MESH_YAML, None)
            .unwrap();

        assert_eq!(schema.roots.len(), 1);
        let mesh = &schema.roots[0];
        assert_eq!(mesh.name, "Mesh");
        assert!(mesh.exemplars().is_empty());
        assert_eq!(mesh.parameter("type").unwrap().value, "generated");

        let text = write_document(std::slice::from_ref(mesh), &config);
        assert_eq!(text, format!("[Mesh]{NEWLINE}  type = generated{NEWLINE}[]{NEWLINE}"));
    }

    #[test]
    fn block_description_is_written_as_header_comment() {
        let yaml = r#"
- name: Mesh
  description: Mesh generation
  parameters:
    - name: dim
      description: spatial dim
      required: true
      default: 2
"#;
        let config = Config::default();
        let system = MockSystem::new();
        let schema = SchemaLoader::new(&system, &config)
            .load_from_str(yaml, None)
            .unwrap();

        let mesh = &schema.roots[0];
        assert_eq!(mesh.description, "Mesh generation");
        let text = write_document(std::slice::from_ref(mesh), &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("[Mesh]{}# Mesh generation", " ".repeat(24)),
                format!("  dim = 2{}# spatial dim", " ".repeat(21)),
                "[]".to_owned(),
            ]
        );
    }

    #[test]
    fn load_reads_companion_syntax_file() {
        let yaml = r#"
- name: BCs
  parameters:
    - name: boundary
  subblocks:
    - name: <type>
      subblocks:
        - name: DirichletBC
          parameters:
            - name: value
"#;
        let system = MockSystem::new()
            .with_file("/project/schema/app.yaml", yaml.as_bytes())
            .unwrap()
            .with_file("/project/schema/app.syntax", b"BCs\nBCs/*\n")
            .unwrap();
        let config = Config::default();

        let schema = SchemaLoader::new(&system, &config)
            .load(Path::new("/project/schema/app.yaml"))
            .unwrap();
        assert_eq!(schema.resolved_paths, vec!["/BCs"]);

        let variant = schema.find("BCs/DirichletBC").unwrap();
        assert!(variant.parameter("boundary").is_some());
        assert!(variant.parameter("value").is_some());
        assert!(schema.outline().starts_with("BCs <1 variants, selected DirichletBC>"));
    }

    #[test]
    fn missing_syntax_file_leaves_type_slots() {
        let yaml = "- name: A\n  subblocks:\n    - name: <type>\n      subblocks:\n        - name: B\n";
        let system = MockSystem::new()
            .with_file("/p/s/app.yaml", yaml.as_bytes())
            .unwrap();
        let config = Config::default();

        let schema = SchemaLoader::new(&system, &config)
            .load(Path::new("/p/s/app.yaml"))
            .unwrap();
        assert!(schema.resolved_paths.is_empty());
        assert!(schema.find("/A/<type>/B").is_some());
    }

    #[test]
    fn project_files_become_file_name_options() {
        let yaml = "- name: Mesh\n  parameters:\n    - name: file\n      cpp_type: MeshFileName\n";
        let system = MockSystem::new()
            .with_file("/p/s/app.yaml", yaml.as_bytes())
            .unwrap()
            .with_file("/p/square.e", b"")
            .unwrap();
        let config = Config::default();

        let schema = SchemaLoader::new(&system, &config)
            .load(Path::new("/p/s/app.yaml"))
            .unwrap();
        assert_eq!(schema.roots[0].parameter("file").unwrap().options, "square.e");
    }

    #[test]
    fn missing_yaml_is_io_error() {
        let system = MockSystem::new();
        let config = Config::default();
        let err = SchemaLoader::new(&system, &config)
            .load(Path::new("/nowhere/app.yaml"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
