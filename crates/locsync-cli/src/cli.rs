use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "locsync",
    about = "Keep localization files and translation projects in step",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the phrases that are new or changed in HEAD
    Diff(DiffArgs),
    /// Print the branch-scoped slug of a resource
    Slug(SlugArgs),
    /// Encode or decode category metadata
    Categories(CategoriesArgs),
    /// Validate a sync config and list its resources
    CheckConfig(CheckConfigArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Current version of the file
    pub head: PathBuf,
    /// Reference version to diff against
    pub base: PathBuf,
    /// Document format; guessed from the HEAD file extension when omitted
    #[arg(long)]
    pub format: Option<FormatArg>,
}

#[derive(Args)]
pub struct SlugArgs {
    pub resource: String,
    pub branch: String,
    /// Qualify bare branch names with `heads/`
    #[arg(long)]
    pub absolute: bool,
}

#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Encode `key=value` pairs into a category string
    Encode { pairs: Vec<String> },
    /// Decode a category string into `key=value` lines
    Decode { encoded: String },
}

#[derive(Args)]
pub struct CheckConfigArgs {
    /// Path of the sync config (TOML)
    pub path: PathBuf,
}
