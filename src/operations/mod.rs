//! Operations module
//!
//! Whole-tree passes run after a tree is loaded: variable binding, project
//! file options, and parameter search

pub mod files;
pub mod find;
pub mod variables;

pub use files::apply_file_options;
pub use find::find_parameters;
pub use variables::bind_variable_options;
