//! # CLI
//!
//! This module defines the command-line interface of `xrexec` using `clap`.
//!
//! Selectors are kept as plain strings: deciding what an encoding or an RPC kind means is the
//! job of `xrexec_core::dispatch`, which also reports the values it does not recognize.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "xrexec", version, about = "Run commands on IOS-XR devices over gRPC")]
pub struct Cli {
    /// Encoding of the show command output: 'json' or 'text'
    #[arg(long, default_value = "json")]
    pub enc: String,

    /// Show command to execute
    #[arg(long, default_value = "show grpc status")]
    pub cli: String,

    /// Device connection file (JSON)
    #[arg(long, default_value = "config.json")]
    pub cfg: PathBuf,

    /// YANG paths file, sent as is by 'get-config'
    #[arg(long, default_value = "yangpaths.json")]
    pub ypath: PathBuf,

    /// RPC to call instead of a show command (e.g. 'get-config')
    #[arg(long, default_value = "")]
    pub rpc: String,

    /// Log the session and RPC details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
