//! # Xrexec CLI Entry Point
//!
//! The main executable for the Xrexec tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Connection**: Loads the device target and opens a session via `xrexec_core`.
//! 3. **Execution**: Resolves the requested command and dispatches it as a single RPC.
//! 4. **Presentation**: Prints the command output to stdout and diagnostics to stderr.
//!
//! Failing to load the target or to connect ends the run with exit code 1. Once connected the
//! run always exits with 0: RPC failures are reported, and whatever output exists is printed.
mod cli;
mod formatter;

use clap::Parser;
use cli::Cli;
use formatter::FormattedString;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use xrexec_core::{
    config::{ConnectionTarget, read_yang_paths},
    dispatch::{CommandSpec, RequestId},
    grpc::client::EmsClient,
    session::{Session, open_session},
    tonic::transport::Channel,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let request_id = RequestId::random();
    tracing::debug!(%request_id, rpc = %args.rpc, enc = %args.enc, "starting run");

    let target = load_target_or_exit(&args.cfg);
    let session = connect_or_exit(&target).await;

    let spec = CommandSpec::resolve(&args.rpc, &args.enc, args.cli, || {
        yang_paths_or_empty(&args.ypath)
    });

    let completion = session.run(spec, request_id).await;

    if let Some(err) = completion.error {
        eprintln!("{}", FormattedString::from(err));
    }

    if let Some(output) = completion.output
        && let Err(err) = emit(&mut std::io::stdout(), &output)
    {
        tracing::warn!(%err, "failed to write the command output");
    }

    // Config retrieval is a one-shot path, it ends the run whether or not it succeeded.
    if completion.ends_run {
        process::exit(0);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_target_or_exit(path: &Path) -> ConnectionTarget {
    match ConnectionTarget::from_file(path) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

async fn connect_or_exit(target: &ConnectionTarget) -> Session<EmsClient<Channel>> {
    match open_session(target).await {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

// A missing YANG paths file is reported but does not stop the call, the device gets an
// empty payload and answers for itself.
fn yang_paths_or_empty(path: &Path) -> String {
    match read_yang_paths(path) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            String::new()
        }
    }
}

fn emit(out: &mut impl Write, output: &str) -> io::Result<()> {
    out.write_all(output.as_bytes())?;
    out.flush()
}
