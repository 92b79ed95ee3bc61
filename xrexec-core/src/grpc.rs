//! # gRPC Transport
//!
//! This module contains the client used to talk to the device. It knows the EMS RPC paths and
//! message types but nothing about how commands are selected, which is left to
//! [`crate::dispatch`].
pub mod client;
