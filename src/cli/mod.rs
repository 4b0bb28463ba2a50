//! CLI module for Lifeware
//!
//! Argument parsing for the `lifeware-server` binary (clap) and the
//! subcommands that don't start the server. Output is colored with
//! owo-colors unless `--no-color` is given.

pub mod commands;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lifeware Collective server
///
/// Serves the donor directory API, the health assistant proxy and the
/// built web UI.
#[derive(Parser, Debug)]
#[command(
    name = "lifeware-server",
    version,
    about = "Lifeware Collective - blood donor directory and Thalassemia health assistant",
    long_about = "Serves the donor directory API, the Lifela AI health assistant proxy\n\
                  and the built web UI.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a\n\
                  configuration. Without Supabase credentials the server runs on demo data.",
    after_help = "EXAMPLES:\n    \
                  lifeware-server init                # Write lifeware.toml and .env.example\n    \
                  lifeware-server                     # Start the server\n    \
                  lifeware-server config --validate   # Check lifeware.toml and the environment\n    \
                  lifeware-server donors list -b O+   # Query the directory from the terminal"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "lifeware.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold lifeware.toml, .env.example and .gitignore
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Chat provider to configure (openai or groq)
        #[arg(long, default_value = "openai")]
        provider: String,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Print the full resolved configuration as TOML
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file and environment
        #[arg(long)]
        validate: bool,
    },

    /// Query the donor directory
    #[command(subcommand)]
    Donors(DonorCommands),
}

/// Donor directory subcommands
#[derive(Subcommand, Debug)]
pub enum DonorCommands {
    /// List donors, optionally filtered
    List {
        /// Text matched against name and location
        #[arg(short, long)]
        query: Option<String>,

        /// Exact blood group, e.g. O+
        #[arg(short, long)]
        blood_group: Option<String>,

        /// Location substring
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Print the number of registered donors
    Count,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_starts_server() {
        let cli = Cli::try_parse_from(["lifeware-server"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("lifeware.toml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lifeware-server",
            "config",
            "--validate",
            "--config",
            "other.toml",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.no_color);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                validate: true,
                full: false
            })
        ));
    }

    #[test]
    fn test_donors_list_filters() {
        let cli =
            Cli::try_parse_from(["lifeware-server", "donors", "list", "-b", "AB-", "-q", "kim"])
                .unwrap();

        match cli.command {
            Some(Commands::Donors(DonorCommands::List {
                query,
                blood_group,
                location,
            })) => {
                assert_eq!(query.as_deref(), Some("kim"));
                assert_eq!(blood_group.as_deref(), Some("AB-"));
                assert!(location.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["lifeware-server", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init {
                path,
                force,
                provider,
                port,
                ..
            }) => {
                assert_eq!(path, PathBuf::from("."));
                assert!(!force);
                assert_eq!(provider, "openai");
                assert_eq!(port, 3000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
