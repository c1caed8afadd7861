//! Command Line Interface (CLI) arguments.

use clap::Parser;
use std::path::PathBuf;

/// Floodcast command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "FLOODCAST_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 5000, env = "FLOODCAST_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "FLOODCAST_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/floodcast/certs/cert.pem",
        env = "FLOODCAST_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/floodcast/certs/key.pem",
        env = "FLOODCAST_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for operations to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "FLOODCAST_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Path to the historical rainfall CSV file
    #[arg(
        long,
        default_value = "data/rainfall in india 1901-2015.csv",
        env = "FLOODCAST_HISTORICAL_CSV"
    )]
    pub historical_csv: PathBuf,
    /// Path to the district-wise rainfall normals CSV file
    #[arg(
        long,
        default_value = "data/district wise rainfall normal.csv",
        env = "FLOODCAST_NORMALS_CSV"
    )]
    pub normals_csv: PathBuf,
    /// Path to the pre-computed risk analysis results JSON file
    #[arg(
        long,
        default_value = "data/processedData.json",
        env = "FLOODCAST_PROCESSED_RESULTS"
    )]
    pub processed_results: PathBuf,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
