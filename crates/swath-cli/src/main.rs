//! swath - coverage flight planning from the command line
//!
//! Usage:
//!   swath plan request.json                 Plan and print the JSON response
//!   swath plan request.yaml -f svg -o a.svg Render a preview
//!   swath plan - < request.json             Read the request from stdin
//!   swath missions                          List mission types

mod cli;

use clap::{Parser, Subcommand};

use cli::{cmd_missions, cmd_plan, PlanArgs};

#[derive(Parser)]
#[command(name = "swath")]
#[command(about = "Coverage-path planning for polygonal survey areas")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a mission from a request file
    Plan(PlanArgs),

    /// List available mission types
    Missions,
}

/// Route `swath` records to stderr at the requested level.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "swath=warn",
        1 => "swath=info",
        _ => "swath=debug",
    };

    if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    } else {
        env_logger::init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Plan(args) => cmd_plan(args),
        Commands::Missions => {
            cmd_missions();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
