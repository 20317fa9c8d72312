use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kpatch",
    about = "Compute JSON Patch documents from declared mapping state",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the patch that turns OLD into NEW
    Diff(DiffArgs),
    /// Escape keys into JSON Pointer segments
    Escape(EscapeArgs),
    /// Apply a patch to a mapping and print the result
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// JSON file holding the previously observed mapping
    pub old: PathBuf,
    /// JSON file holding the desired mapping
    pub new: PathBuf,
    /// Pointer prefix of the mapping inside the resource
    #[arg(short, long, default_value = "")]
    pub prefix: String,
    /// Reject malformed prefixes instead of normalizing them
    #[arg(long)]
    pub strict_prefix: bool,
    /// Add keys one by one even when OLD is empty
    #[arg(long)]
    pub per_key_add: bool,
    /// TOML file with diff options
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct EscapeArgs {
    #[arg(required = true)]
    pub segments: Vec<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// JSON file holding the mapping to patch
    pub mapping: PathBuf,
    /// JSON file holding the patch array
    pub patch: PathBuf,
    #[arg(short, long, default_value = "")]
    pub prefix: String,
}
