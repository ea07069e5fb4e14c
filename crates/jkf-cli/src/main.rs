use anyhow::Context;
use clap::{Parser, Subcommand};
use jkf_cli::commands;
use jkf_cli::config::JkfConfig;
use jkf_notation::Format;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jkf")]
#[command(about = "Shogi game record converter for KIF, KI2, CSA and JKF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a record to another format
    Convert {
        /// Record file to read
        input: PathBuf,
        /// Target format: kif, csa or jkf
        #[arg(short, long)]
        to: Option<Format>,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Detect the input format from its content instead of its extension
        #[arg(long)]
        sniff: bool,
    },
    /// Print the format detected from a file's content
    Detect {
        /// Record file to inspect
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = JkfConfig::load()?;

    match cli.command {
        Commands::Convert {
            input,
            to,
            output,
            sniff,
        } => {
            let to = match to {
                Some(format) => format,
                None => config.target_format()?,
            };
            let text = commands::convert(&input, to, sniff, config.pretty_json)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} output to {}", to, path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Detect { input } => {
            let format = commands::detect(&input)?;
            println!("{}", format);
        }
    }

    Ok(())
}
