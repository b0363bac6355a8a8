//! CLI module for prover-registry
//!
//! Provides the server entry point and a one-shot probe command.

pub mod probe;
pub mod serve;

use clap::{Parser, Subcommand};

/// Prover registry - admits prover endpoints and serves the currently healthy set
#[derive(Parser, Debug)]
#[command(name = "prover-registry")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PROVER_REGISTRY_HOST                       Bind address (default: 0.0.0.0)
    PROVER_REGISTRY_PORT                       Listen port (default: 8090)
    PROVER_REGISTRY_DATABASE_URL               Database URL (default: sqlite:~/.prover-registry/registry.db)
    PROVER_REGISTRY_REGISTRATION_SCHEMA        Accepted /status schema: sgx-tier, legacy, any (default: sgx-tier)
    PROVER_REGISTRY_REGISTRATION_TIMEOUT_SECS  Registration probe timeout (default: 120)
    PROVER_REGISTRY_PROBE_TIMEOUT_SECS         Aggregation probe timeout (default: 4)
    PROVER_REGISTRY_LIST_LIMIT                 Max endpoints probed per read (default: 100)
    PROVER_REGISTRY_CACHE_MAX_AGE_SECS         Result cache max age, 0 disables (default: 0)
    PROVER_REGISTRY_LOG_LEVEL                  Log level (default: info)
    PROVER_REGISTRY_LOG_DIR                    Daily rolling log file directory (optional)
"#)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the registry server
    Serve(serve::ServeArgs),
    /// Probe a prover endpoint once and report the verdict
    Probe(probe::ProbeArgs),
}
