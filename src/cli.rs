use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// stackdev - watch, synth, diff and deploy infrastructure while you code
#[derive(Parser, Debug)]
#[command(name = "stackdev")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of console lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows per-file change lines)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dev loop: build, deploy, then redeploy on every relevant change
    Start {
        /// NDJSON runtime event stream to log (`-` for stdin)
        #[arg(long, value_name = "FILE")]
        runtime_events: Option<PathBuf>,
    },

    /// Synthesize once and print the fingerprint; never deploys
    Build,

    /// Synthesize once and deploy the result
    Deploy,

    /// Fingerprint an existing build output directory
    Fingerprint {
        /// Directory containing manifest.json
        dir: PathBuf,
    },
}
