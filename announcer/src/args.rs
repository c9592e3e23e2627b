use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Emotion announcer
#[derive(Debug, Parser)]
#[command(name = "announcer", about = "Detects the primary facial emotion in an image and speaks it aloud")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "announcer.toml", env = "ANNOUNCER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ANNOUNCER_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directives, e.g. `info` or `announcer_server=debug`
    #[arg(long, default_value = "info", env = "ANNOUNCER_LOG")]
    pub log_filter: String,
}
