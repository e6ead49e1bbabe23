use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Embed text files through an embedding API and compare them with a saved reference.
#[derive(Parser, Debug)]
#[command(name = "embedcmp", version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (TOML). Defaults to <config_dir>/embedcmp/config.toml when present.
    #[arg(long, global = true, env = "EMBEDCMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where the reference embedding is stored.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Embedding model.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Requested output dimensions.
    #[arg(long, global = true)]
    pub dimensions: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed a text file and print its vector.
    Embed {
        /// Text file to embed.
        file: PathBuf,

        /// Save the result as the reference embedding.
        #[arg(long)]
        save: bool,

        /// Compare the result with the stored reference before saving.
        #[arg(long)]
        compare: bool,

        /// Write the result to <DIR>/embedding-<label>.json.
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Print every vector component.
        #[arg(long)]
        full: bool,
    },

    /// Embed a text file and compare it with the stored reference.
    Compare {
        /// Text file to embed.
        file: PathBuf,
    },

    /// Manage the stored reference embedding.
    Reference {
        #[command(subcommand)]
        action: ReferenceCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReferenceCommand {
    /// Print the stored reference.
    Show {
        /// Print every vector component.
        #[arg(long)]
        full: bool,
    },

    /// Remove the stored reference.
    Clear,

    /// Write the stored reference to <DIR>/embedding-<label>.json.
    Export {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}
