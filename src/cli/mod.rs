//! CLI module for token-gate
//!
//! - `serve`: run the HTTP service
//! - `issue`: sign a token with the configured secret
//! - `verify`: check a token against a user id

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// token-gate - signed session tokens and a request filter that enforces them
#[derive(Parser)]
#[command(name = "token-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve,

    /// Print a token for a user
    Issue(token::IssueArgs),

    /// Check a token against the user it should belong to
    Verify(token::VerifyArgs),
}
