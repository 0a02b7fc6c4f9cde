//! stackdev CLI - local development loop for infrastructure-as-code projects
//!
//! Usage: stackdev [OPTIONS] <COMMAND>
//!
//! Commands:
//!   start        Build, deploy, then redeploy on every relevant change
//!   build        Synthesize once and print the fingerprint
//!   deploy       Synthesize once and deploy the result
//!   fingerprint  Fingerprint an existing build output directory

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::Project;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let load = || Project::load(cli.project.as_deref(), cli.json, cli.verbose, cli.color);

    match &cli.command {
        Commands::Start { runtime_events } => {
            commands::start::cmd_start(&load()?, runtime_events.as_deref())
        }
        Commands::Build => commands::build::cmd_build(&load()?),
        Commands::Deploy => commands::deploy::cmd_deploy(&load()?),
        Commands::Fingerprint { dir } => commands::fingerprint::cmd_fingerprint(dir, cli.json),
    }
}
