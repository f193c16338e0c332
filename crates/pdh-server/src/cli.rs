use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `pdh` binary.
#[derive(Debug, Parser)]
#[command(name = "pdh", version, about = "Product Discovery Hub API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Apply the database schema.
    Migrate,
    /// Report whether every required table exists.
    CheckDb,
    /// Create the persona photo bucket if it is missing.
    EnsureBucket,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Bind address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}
