use clap::{Parser, Subcommand};
use core::str::FromStr;

/// Configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./getpot.yaml";

/// Command-line arguments for getpot
#[derive(Parser, Debug, Clone)]
#[command(name = "getpot")]
#[command(about = "Load YAML input schemas and read, normalize and search GetPot input files")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Configuration file path (defaults to ./getpot.yaml when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a YAML schema and print its node tree
    Schema {
        /// YAML schema file
        #[arg(value_name = "YAML")]
        path: String,

        /// Action syntax file (defaults to the schema path with the syntax extension)
        #[arg(long, value_name = "PATH")]
        syntax: Option<String>,

        /// Output format: text or json
        #[arg(long, value_name = "FORMAT", default_value = "text")]
        format: String,
    },

    /// Read a GetPot file and write it back in canonical form
    Normalize {
        /// GetPot input file
        #[arg(value_name = "INPUT")]
        input: String,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,

        /// Keep inactive blocks, commented out
        #[arg(long)]
        write_inactive: bool,
    },

    /// List enabled parameters of active blocks whose `name = value` line matches
    Find {
        /// GetPot input file
        #[arg(value_name = "INPUT")]
        input: String,

        /// Regular expression matched against the whole `name = value` line
        #[arg(value_name = "REGEX")]
        pattern: String,
    },
}

/// Output format of the `schema` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented outline
    Text,
    /// Full tree as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'text' or 'json'")),
        }
    }
}
