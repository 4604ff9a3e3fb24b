//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relmatch - Package provenance matching for release uploads
///
/// Reports which packages of a release upload already have a stored
/// source or compiled artifact, so the client can skip sending them.
#[derive(Parser, Debug)]
#[command(name = "relmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Records document to match against (overrides [store] in config)
    #[arg(short, long, global = true, env = "RELMATCH_STORE")]
    pub store: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match source package fingerprints against stored artifacts
    Match(MatchArgs),

    /// Match compiled packages by target image and dependency closure
    MatchCompiled(MatchArgs),

    /// Print the dependency key computed for one compiled package entry
    DependencyKey(DependencyKeyArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the match commands
#[derive(Parser, Debug)]
pub struct MatchArgs {
    /// Match request manifest (YAML or JSON)
    pub manifest: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for the dependency-key command
#[derive(Parser, Debug)]
pub struct DependencyKeyArgs {
    /// Compiled match request manifest (YAML or JSON)
    pub manifest: PathBuf,

    /// Package name within the manifest
    pub package: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for match results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of fingerprints
    Json,
    /// One fingerprint per line
    Plain,
}
