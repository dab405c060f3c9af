pub mod content;
pub mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "renungan")]
#[command(about = "Operator commands for the devotional site.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage admin and contributor accounts
    #[command(subcommand)]
    User(UserCommand),
    /// Seed or replace site content
    #[command(subcommand)]
    Content(ContentCommand),
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// `admin` or `contributor`
        #[arg(long, default_value = "admin")]
        role: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete the account with this email
    Delete { email: String },
    /// Delete every account
    DeleteAll {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
    /// Set a new password and sign the user out everywhere
    ResetPassword { email: String, password: String },
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Create the default admin and sample sections if missing
    Seed,
    /// Replace all sections and set page copy from an export file
    Import { file: PathBuf },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
