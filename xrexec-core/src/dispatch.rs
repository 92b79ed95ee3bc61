//! # Command Dispatch
//!
//! This module maps what the operator asked for onto exactly one EMS call.
//!
//! 1. **Resolution**: [`CommandSpec::resolve`] turns the raw RPC-kind and encoding selectors into
//!    a [`CommandSpec`]. The `get-config` selector wins over everything else; only when it is
//!    absent is the encoding looked at, and an unknown encoding is rejected before any call.
//! 2. **Dispatch**: [`Session::dispatch`] consumes the session, issues the single RPC that the
//!    spec variant names and releases the session on return, whatever the outcome.
//!
//! Request identifiers are never drawn here. The caller passes a [`RequestId`] in, which keeps
//! dispatch deterministic.
use crate::grpc::client::RpcError;
use crate::session::{EmsTransport, Session};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Value of the RPC-kind selector that switches to configuration retrieval.
pub const GET_CONFIG_SELECTOR: &str = "get-config";

/// Upper bound (exclusive) of randomly drawn request ids.
pub const REQUEST_ID_RANGE: i64 = 1000;

/// Correlates a request with its replies. Not unique, not a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(i64);

impl RequestId {
    /// Returns `None` for negative ids.
    pub fn new(id: i64) -> Option<Self> {
        (id >= 0).then_some(Self(id))
    }

    /// Draws an id in `0..REQUEST_ID_RANGE` from the thread local generator.
    pub fn random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Draws an id in `0..REQUEST_ID_RANGE` from `rng`.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(0..REQUEST_ID_RANGE))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output format requested for a show command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Text,
    Json,
}

impl FromStr for Encoding {
    type Err = DispatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Encoding::Text),
            "json" => Ok(Encoding::Json),
            other => Err(DispatchError::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// The one command a run sends to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Show { command: String, encoding: Encoding },
    GetConfig { yang_paths: String },
}

impl CommandSpec {
    /// Builds the command from the raw selectors.
    ///
    /// `yang_paths` is only invoked for `get-config`, in which case `encoding` and `command`
    /// are ignored.
    pub fn resolve(
        rpc: &str,
        encoding: &str,
        command: impl Into<String>,
        yang_paths: impl FnOnce() -> String,
    ) -> Result<Self, DispatchError> {
        if rpc == GET_CONFIG_SELECTOR {
            return Ok(CommandSpec::GetConfig {
                yang_paths: yang_paths(),
            });
        }

        Ok(CommandSpec::Show {
            command: command.into(),
            encoding: encoding.parse()?,
        })
    }

    /// Which RPC this command maps to.
    pub fn rpc(&self) -> Rpc {
        match self {
            CommandSpec::Show {
                encoding: Encoding::Text,
                ..
            } => Rpc::ShowCmdTextOutput,
            CommandSpec::Show {
                encoding: Encoding::Json,
                ..
            } => Rpc::ShowCmdJsonOutput,
            CommandSpec::GetConfig { .. } => Rpc::GetConfig,
        }
    }

    /// Whether the run ends right after this command, whatever its outcome.
    pub fn ends_run(&self) -> bool {
        matches!(self, CommandSpec::GetConfig { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rpc {
    ShowCmdTextOutput,
    ShowCmdJsonOutput,
    GetConfig,
}

impl fmt::Display for Rpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rpc::ShowCmdTextOutput => "ShowCmdTextOutput",
            Rpc::ShowCmdJsonOutput => "ShowCmdJSONOutput",
            Rpc::GetConfig => "GetConfig",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Don't recognize encoding: '{0}'")]
    UnsupportedEncoding(String),
    #[error("{rpc} failed: {source}")]
    Rpc {
        rpc: Rpc,
        #[source]
        source: RpcError,
    },
}

/// Decoded output of the command, or why there is none.
pub type CommandResult = Result<String, DispatchError>;

/// Outcome of a run, as seen by the caller printing it.
#[derive(Debug)]
pub struct Completion {
    /// Text for stdout, `None` when no RPC was sent.
    pub output: Option<String>,
    /// Failure to report.
    pub error: Option<DispatchError>,
    /// The process stops right away, whatever the outcome.
    pub ends_run: bool,
}

impl<T: EmsTransport> Session<T> {
    /// Issues `spec` as a single RPC tagged with `id`.
    ///
    /// The session is consumed and closed before this returns.
    pub async fn dispatch(mut self, spec: CommandSpec, id: RequestId) -> CommandResult {
        let rpc = spec.rpc();
        tracing::info!(%rpc, request_id = %id, "dispatching");

        let transport = self.transport();
        let result = match &spec {
            CommandSpec::GetConfig { yang_paths } => transport.get_config(yang_paths, id).await,
            CommandSpec::Show {
                command,
                encoding: Encoding::Text,
            } => transport.show_cmd_text_output(command, id).await,
            CommandSpec::Show {
                command,
                encoding: Encoding::Json,
            } => transport.show_cmd_json_output(command, id).await,
        };

        self.close();

        result.map_err(|source| DispatchError::Rpc { rpc, source })
    }

    /// Runs a resolved command and decides what the caller does next.
    ///
    /// A command that failed to resolve is not sent, the session is closed and there is
    /// nothing to print. Otherwise the output is always printed, empty when the call failed.
    pub async fn run(
        self,
        spec: Result<CommandSpec, DispatchError>,
        id: RequestId,
    ) -> Completion {
        let spec = match spec {
            Ok(spec) => spec,
            Err(error) => {
                self.close();
                return Completion {
                    output: None,
                    error: Some(error),
                    ends_run: false,
                };
            }
        };

        let ends_run = spec.ends_run();

        match self.dispatch(spec, id).await {
            Ok(output) => Completion {
                output: Some(output),
                error: None,
                ends_run,
            },
            Err(error) => Completion {
                output: Some(String::new()),
                error: Some(error),
                ends_run,
            },
        }
    }
}
