use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stowage::ValueKind;

#[derive(Parser)]
#[command(
    name = "stow",
    about = "Stowage — typed key-value preferences on disk",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file; flags below override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the store
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// File name of the store
    #[arg(long = "file", global = true)]
    pub file_name: Option<String>,

    /// Replace the file via temp file and rename
    #[arg(long, global = true)]
    pub atomic: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Text,
    Int,
    Float,
}

impl From<KindArg> for ValueKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => ValueKind::Text,
            KindArg::Int => ValueKind::Integer,
            KindArg::Float => ValueKind::Float,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the value stored under a key
    Get(GetArgs),
    /// Store a value under a key
    Set(SetArgs),
    /// Remove a key
    Delete(DeleteArgs),
    /// List every key and its stored string
    List,
    /// Print the resolved store location
    Where,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
pub struct GetArgs {
    pub key: String,
    /// Value printed when the key is absent
    #[arg(long)]
    pub default: Option<String>,
    #[arg(long, value_enum, default_value = "text")]
    pub kind: KindArg,
}

#[derive(Args)]
pub struct SetArgs {
    pub key: String,
    pub value: String,
    #[arg(long, value_enum, default_value = "text")]
    pub kind: KindArg,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub key: String,
}
