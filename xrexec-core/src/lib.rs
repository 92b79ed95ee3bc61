//! # Xrexec Core
//!
//! `xrexec-core` is the library behind the `xrexec` CLI. It opens a gRPC session against an
//! IOS-XR device and sends it exactly one command through the EMS services.
//!
//! ## Key Components
//!
//! * **[`ConnectionTarget`](config::ConnectionTarget):** The device address, credentials and TLS
//!   settings, loaded from a JSON file.
//! * **[`open_session`](session::open_session) & [`Session`](session::Session):** A single-use
//!   connection, released exactly once whatever happens to the command.
//! * **[`CommandSpec`](dispatch::CommandSpec):** The command to run. Either a show command in
//!   text or JSON encoding, or a configuration retrieval driven by YANG paths.
//! * **[`Session::dispatch`](session::Session::dispatch):** Sends the command as one RPC and
//!   returns its decoded output.
//!
//! ## Transport
//!
//! [`EmsClient`](grpc::client::EmsClient) is a thin wrapper over `tonic::client::Grpc` using the
//! prost bindings found in [`ems`]. It is generic over the underlying service, which lets tests
//! run it against an in-process server.
//!
//! ## Feature Flags (Internal use only)
//!
//! * `gen-proto`: Enables the binary regenerating the EMS bindings from `proto/ems_grpc.proto`.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that consumers use compatible versions of
//! these underlying dependencies.
pub mod config;
pub mod dispatch;
pub mod ems;
pub mod grpc;
pub mod session;

// Re-exports
pub use prost;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
