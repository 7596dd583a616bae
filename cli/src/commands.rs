pub mod discover;
pub mod interfaces;
pub mod serve;

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use camscout_common::config::{Config, HTTP_PORT};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "camscout")]
#[command(version, about = "Finds IP cameras on the local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Scan from this interface instead of the first usable one
    #[arg(short, long, global = true, value_name = "NAME")]
    pub interface: Option<String>,

    /// Do not sweep the subnet when no camera answers the probe
    #[arg(long, global = true)]
    pub no_sweep: bool,

    /// How long to listen for probe replies
    #[arg(long, global = true, value_name = "MS")]
    pub probe_window: Option<u64>,

    /// Maximum number of TCP connects in flight during a sweep
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-host TCP connect timeout during a sweep
    #[arg(long, global = true, value_name = "MS")]
    pub connect_timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look for cameras on the local network
    #[command(alias = "d")]
    Discover,
    /// List the interfaces a scan can run from
    #[command(alias = "i")]
    Interfaces,
    /// Serve scans over HTTP
    #[command(alias = "s")]
    Serve {
        /// Address to listen on
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
        /// Port to listen on
        #[arg(short, long, default_value_t = HTTP_PORT)]
        port: u16,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Flags layered over the built-in defaults.
    pub fn config(&self) -> Config {
        let mut cfg = Config {
            quiet: self.quiet,
            interface: self.interface.clone(),
            no_sweep: self.no_sweep,
            ..Config::default()
        };

        if let Some(ms) = self.probe_window {
            cfg.probe.window = Duration::from_millis(ms);
        }
        if let Some(n) = self.concurrency {
            cfg.sweep.concurrency = n;
        }
        if let Some(ms) = self.connect_timeout {
            cfg.sweep.connect_timeout = Duration::from_millis(ms);
        }
        cfg
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
