//! # IOS-XR EMS Protocol
//!
//! Message types and RPC paths of the IOS-XR "Extensible Manageability Service".
//!
//! The bindings under `generated` are produced from `proto/ems_grpc.proto` by the
//! `generate-ems-bindings` binary (`gen-proto` feature) and checked in, so building the
//! crate does not require `protoc`.
//!
//! Every RPC used here is server streaming: the device splits large outputs over several
//! reply messages, each one carrying a chunk of the payload and an optional error string.
mod generated;

pub use generated::iosxr_ems::{
    ConfigGetArgs, ConfigGetReply, ShowCmdArgs, ShowCmdJsonReply, ShowCmdTextReply,
};

pub const SHOW_CMD_TEXT_OUTPUT: &str =
    "/IOSXRExtensibleManagabilityService.gRPCExec/ShowCmdTextOutput";
pub const SHOW_CMD_JSON_OUTPUT: &str =
    "/IOSXRExtensibleManagabilityService.gRPCExec/ShowCmdJSONOutput";
pub const GET_CONFIG: &str = "/IOSXRExtensibleManagabilityService.gRPCConfigOper/GetConfig";

/// A single message of an EMS reply stream.
pub trait ReplyChunk: prost::Message + Default + Send + Sync + 'static {
    /// Request id echoed back by the device.
    fn res_req_id(&self) -> i64;
    /// Error reported by the device for this chunk, empty when there is none.
    fn errors(&self) -> &str;
    /// Consumes the chunk, returning its payload.
    fn into_payload(self) -> String;
}

impl ReplyChunk for ShowCmdTextReply {
    fn res_req_id(&self) -> i64 {
        self.res_req_id
    }

    fn errors(&self) -> &str {
        &self.errors
    }

    fn into_payload(self) -> String {
        self.output
    }
}

impl ReplyChunk for ShowCmdJsonReply {
    fn res_req_id(&self) -> i64 {
        self.res_req_id
    }

    fn errors(&self) -> &str {
        &self.errors
    }

    fn into_payload(self) -> String {
        self.jsonoutput
    }
}

impl ReplyChunk for ConfigGetReply {
    fn res_req_id(&self) -> i64 {
        self.res_req_id
    }

    fn errors(&self) -> &str {
        &self.errors
    }

    fn into_payload(self) -> String {
        self.yangjson
    }
}
