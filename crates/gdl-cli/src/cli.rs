use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use gdl_loader::DatasetName;

#[derive(Parser)]
#[command(name = "gdl", about = "Game definition loader", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file overriding the default data locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every dataset and report what was published
    Load(LoadArgs),
    /// Load, then print a single record
    Lookup(LookupArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct LoadArgs {}

#[derive(Args)]
#[command(group(ArgGroup::new("key").required(true).args(["id", "name"])))]
pub struct LookupArgs {
    pub dataset: DatasetArg,
    /// Short identifier (`0x0a00`, `16`, or a server name)
    #[arg(long)]
    pub id: Option<String>,
    /// Record name; the first match in file order wins
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetArg {
    Items,
    Tiles,
    Objects,
    Packets,
    Servers,
}

impl From<DatasetArg> for DatasetName {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Items => DatasetName::Items,
            DatasetArg::Tiles => DatasetName::Tiles,
            DatasetArg::Objects => DatasetName::Objects,
            DatasetArg::Packets => DatasetName::Packets,
            DatasetArg::Servers => DatasetName::Servers,
        }
    }
}
