use clap::{Parser, Subcommand};
use relay_core::crypto::github_signature;
use std::path::{Path, PathBuf};

/// Review Relay - AI pull-request reviews from GitHub webhooks
#[derive(Parser, Debug)]
#[command(name = "relayd")]
#[command(version = relay_core::VERSION)]
#[command(about = "Webhook relay that posts AI reviews on pull requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the server in the foreground (default if no command given)
    Run {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Print the X-Hub-Signature-256 value GitHub would send for a payload file
    Sign {
        /// Webhook secret
        #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Payload file; the exact bytes are signed
        file: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            host: None,
            port: None,
        }
    }
}

/// Signs the exact bytes of `file` the way GitHub signs a delivery.
pub fn sign_file(secret: &str, file: &Path) -> std::io::Result<String> {
    let body = std::fs::read(file)?;
    Ok(github_signature(secret, &body))
}
