//! kra - inspect Krita documents and pull out their merged preview.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kra")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detected format of each file.
    Detect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print format, preview dimensions and colour space without decoding pixels.
    Info { file: PathBuf },

    /// Save the merged preview of a Krita document.
    Extract {
        file: PathBuf,

        /// Defaults to the input path with a `.png` extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut stdout = std::io::stdout().lock();
    match args.command {
        Command::Detect { files } => commands::detect(&files, &mut stdout),
        Command::Info { file } => commands::info(&file, &mut stdout),
        Command::Extract { file, output } => {
            commands::extract(&file, output.as_deref(), &mut stdout)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
