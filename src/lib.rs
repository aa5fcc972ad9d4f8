//! `getpot-tree` - schema-driven configuration trees for GetPot input files
//!
//! This library loads YAML input schemas into exemplar trees, resolves
//! polymorphic `<type>` slots into adaptive nodes, and reads and writes the
//! bracketed GetPot text format that simulation executables consume.

pub mod cli;
pub mod config;
pub mod error;
pub mod getpot;
pub mod model;
pub mod operations;
pub mod schema;
pub mod system;

use anyhow::{Context as _, Result};
use cli::{Args, Command, DEFAULT_CONFIG_PATH, OutputFormat};
use config::Config;
use getpot::{read_document, write_document};
use operations::find_parameters;
use regex::Regex;
use schema::SchemaLoader;
use std::path::Path;
use system::{RealSystem, System};
use tracing::info;

/// Main entry point for the getpot library
///
/// # Errors
///
/// Returns an error if the configuration or the command fails
pub fn run(args: Args) -> Result<()> {
    let system = RealSystem::new();
    let mut config = load_config(&system, args.config.as_deref())?;
    if args.verbose {
        config.verbosity = config::Verbosity::Debug;
    }

    match args.command {
        Command::Schema {
            path,
            syntax,
            format,
        } => run_schema(&system, &config, &path, syntax.as_deref(), &format),
        Command::Normalize {
            input,
            output,
            write_inactive,
        } => {
            config.write_inactive |= write_inactive;
            run_normalize(&system, &config, &input, output.as_deref())
        }
        Command::Find { input, pattern } => run_find(&system, &config, &input, &pattern),
    }
}

/// Load the named configuration file, or `./getpot.yaml` when it exists,
/// or the defaults
///
/// # Errors
///
/// Returns an error if a named file is missing or any file is invalid
pub fn load_config(system: &dyn System, path: Option<&str>) -> Result<Config> {
    if let Some(path) = path {
        return Ok(Config::load_from_file(system, path)?);
    }
    if system.exists(Path::new(DEFAULT_CONFIG_PATH))? {
        return Ok(Config::load_from_file(system, DEFAULT_CONFIG_PATH)?);
    }
    Ok(Config::default())
}

/// Run the schema command
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or printed
pub fn run_schema(
    system: &dyn System,
    config: &Config,
    path: &str,
    syntax: Option<&str>,
    format: &str,
) -> Result<()> {
    let format = format
        .parse::<OutputFormat>()
        .map_err(error::TreeError::configuration)?;

    let loader = SchemaLoader::new(system, config);
    let schema = match syntax {
        Some(syntax) => loader.load_with_syntax(Path::new(path), Path::new(syntax)),
        None => loader.load(Path::new(path)),
    }
    .with_context(|| format!("Failed to load schema {path}"))?;

    if !config.verbosity.is_quiet() {
        info!(
            "Loaded {} top-level blocks, {} type slots resolved",
            schema.roots.len(),
            schema.resolved_paths.len()
        );
    }

    // Output to stdout (not using logging)
    match format {
        OutputFormat::Text => print!("{}", schema.outline()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?
        ),
    }
    Ok(())
}

/// Run the normalize command
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output written
pub fn run_normalize(
    system: &dyn System,
    config: &Config,
    input: &str,
    output: Option<&str>,
) -> Result<()> {
    let nodes = read_document(system, Path::new(input), config)
        .with_context(|| format!("Failed to read {input}"))?;

    match output {
        Some(output) => {
            if let Some(parent) = Path::new(output).parent()
                && !parent.as_os_str().is_empty()
            {
                system
                    .create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            getpot::write_file(system, Path::new(output), &nodes, config)
                .with_context(|| format!("Failed to write {output}"))?;
            if !config.verbosity.is_quiet() {
                info!("Wrote {} blocks to {output}", nodes.len());
            }
        }
        None => print!("{}", write_document(&nodes, config)),
    }
    Ok(())
}

/// Run the find command
///
/// # Errors
///
/// Returns an error if the pattern is invalid or the input cannot be read
pub fn run_find(system: &dyn System, config: &Config, input: &str, pattern: &str) -> Result<()> {
    let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        error::TreeError::configuration(format!("Invalid pattern '{pattern}': {e}"))
    })?;

    let nodes = read_document(system, Path::new(input), config)
        .with_context(|| format!("Failed to read {input}"))?;

    let found = find_parameters(&nodes, &regex);
    if !config.verbosity.is_quiet() {
        info!("{} parameters matched", found.len());
    }
    for parameter in found {
        println!("{}", parameter.to_getpot_fragment());
    }
    Ok(())
}
