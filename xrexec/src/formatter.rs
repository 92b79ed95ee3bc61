use colored::*;
use xrexec_core::{
    config::{ConfigError, InputError},
    dispatch::{DispatchError, Rpc},
    session::SessionError,
};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!(
            "{}\n\n{}",
            "Could not read the config:".red().bold(),
            err
        ))
    }
}

impl From<SessionError> for FormattedString {
    fn from(err: SessionError) -> Self {
        FormattedString(format!(
            "{}\n\n{}",
            "Could not setup a client connection to the target:".red().bold(),
            err
        ))
    }
}

impl From<InputError> for FormattedString {
    fn from(err: InputError) -> Self {
        FormattedString(format!(
            "{}\n\n{}\n\n{}",
            "Failed to read YANG paths:".yellow().bold(),
            err,
            "Continuing with an empty payload.".yellow()
        ))
    }
}

impl From<DispatchError> for FormattedString {
    fn from(err: DispatchError) -> Self {
        let heading = match &err {
            DispatchError::UnsupportedEncoding(_) => "Unsupported encoding:",
            DispatchError::Rpc {
                rpc: Rpc::GetConfig,
                ..
            } => "Couldn't get the config:",
            DispatchError::Rpc { .. } => "Couldn't get the cli output:",
        };

        FormattedString(format!("{}\n\n{}", heading.red().bold(), err))
    }
}
