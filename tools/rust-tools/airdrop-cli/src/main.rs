use airdrop_cli::commands::build_tree::CommandBuildTree;
use airdrop_cli::commands::proof::CommandProof;
use airdrop_cli::commands::verify::CommandVerify;
use airdrop_cli::commands::Command;
use airdrop_cli::load_and_apply_env_file;
use airdrop_cli::logging::{logging, LogOutput};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "airdrop-cli")]
#[command(about = "Builds merkle commitments for token airdrops and checks claims against them")]
struct CliArgs {
    /// Path to .env file with environment variables
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[arg(long, env, global = true, value_enum, default_value_t = LogOutput::Console)]
    log_format: LogOutput,

    /// Default log level, used when RUST_LOG is unset
    #[arg(long, env, global = true, default_value_t = Level::INFO)]
    log_level: Level,

    /// Also append logs to this file
    #[arg(long, env, global = true)]
    write_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a recipient CSV and write the root, proofs and recipients to a bundle
    BuildTree(CommandBuildTree),
    /// Check whether an address can claim against a root
    Verify(CommandVerify),
    /// Print the published proof for an address
    Proof(CommandProof),
    // Prints the help, optionally as markdown. Used for docs generation.
    #[clap(hide = true)]
    PrintAllHelp {
        #[arg(long, required = true)]
        markdown: bool,
    },
}

/// Finds `--env-file` before clap runs, so env-backed flags can come from it
fn env_file_from_args() -> Option<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--env-file" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.to_str().and_then(|arg| arg.strip_prefix("--env-file=")) {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn main() -> Result<()> {
    if let Some(path) = env_file_from_args() {
        load_and_apply_env_file(&path)?;
    }
    let args = CliArgs::parse();

    logging()
        .with_output(args.log_format)
        .with_level(args.log_level)
        .with_log_file(args.write_log)
        .init()?;
    if let Some(path) = &args.env_file {
        info!(path = %path.display(), "Applied env file");
    }

    let mut stdout = std::io::stdout().lock();
    match args.command {
        Commands::BuildTree(command) => command.execute(&mut stdout),
        Commands::Verify(command) => command.execute(&mut stdout),
        Commands::Proof(command) => command.execute(&mut stdout),
        Commands::PrintAllHelp { markdown } => {
            assert!(markdown);
            clap_markdown::print_help_markdown::<CliArgs>();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_flag() {
        let parse = |args: &[&str]| {
            CliArgs::try_parse_from(
                ["airdrop-cli", "proof", "--bundle", "bundle.json", "--address", "0x01"]
                    .iter()
                    .chain(args),
            )
        };

        assert_eq!(parse(&[]).unwrap().log_level, Level::INFO);
        assert_eq!(
            parse(&["--log-level", "debug"]).unwrap().log_level,
            Level::DEBUG
        );
        assert!(parse(&["--log-level", "loud"]).is_err());
    }
}
