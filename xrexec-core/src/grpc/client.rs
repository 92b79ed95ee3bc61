//! # EMS gRPC Client
//!
//! This module wraps a standard `tonic` client to issue the IOS-XR EMS calls.
//!
//! ## How it works
//!
//! The [`EmsClient`] is generic over any `GrpcService`, so it runs on a real `Channel` as well as
//! on an in-process server in tests. Every call:
//!
//! * Waits for the underlying service to be ready.
//! * Attaches the `username` / `password` call credentials as request metadata.
//! * Opens the server stream at the fixed EMS path and concatenates the payload of every chunk.
//!
//! A chunk carrying a non-empty `errors` field aborts the call: the device reports failures
//! in-band rather than through the gRPC status.
use crate::BoxError;
use crate::dispatch::RequestId;
use crate::ems::{self, ConfigGetArgs, ReplyChunk, ShowCmdArgs, ShowCmdJsonReply, ShowCmdTextReply};
use http_body::Body as HttpBody;
use std::str::FromStr;
use tonic::{
    client::GrpcService,
    metadata::{AsciiMetadataValue, MetadataMap, errors::InvalidMetadataValue},
    transport::Channel,
};
use tonic_prost::ProstCodec;

#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
    #[error("gRPC call failed: code={:?} message={:?}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),
    #[error("error triggered by remote host: {0}")]
    Device(String),
}

/// Invalid characters in a call credential.
#[derive(thiserror::Error, Debug)]
#[error("Invalid '{field}' credential: '{source}'")]
pub struct InvalidCredentials {
    pub field: &'static str,
    pub source: InvalidMetadataValue,
}

/// Client for the `gRPCExec` and `gRPCConfigOper` EMS services.
#[derive(Debug, Clone)]
pub struct EmsClient<S = Channel> {
    client: tonic::client::Grpc<S>,
    credentials: MetadataMap,
}

impl<S> EmsClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        let client = tonic::client::Grpc::new(service);
        Self {
            client,
            credentials: MetadataMap::new(),
        }
    }

    /// Sends `user` and `password` as `username` / `password` metadata on every call.
    pub fn with_credentials(mut self, user: &str, password: &str) -> Result<Self, InvalidCredentials> {
        let user = AsciiMetadataValue::from_str(user).map_err(|source| InvalidCredentials {
            field: "username",
            source,
        })?;
        let password =
            AsciiMetadataValue::from_str(password).map_err(|source| InvalidCredentials {
                field: "password",
                source,
            })?;

        self.credentials.insert("username", user);
        self.credentials.insert("password", password);
        Ok(self)
    }

    /// Runs a CLI show command and returns its plain text output.
    pub async fn show_cmd_text_output(
        &mut self,
        cli: &str,
        id: RequestId,
    ) -> Result<String, RpcError> {
        let args = ShowCmdArgs {
            req_id: id.get(),
            cli: cli.to_string(),
        };
        self.server_streaming::<_, ShowCmdTextReply>(args, ems::SHOW_CMD_TEXT_OUTPUT, id)
            .await
    }

    /// Runs a CLI show command and returns its JSON encoded output.
    pub async fn show_cmd_json_output(
        &mut self,
        cli: &str,
        id: RequestId,
    ) -> Result<String, RpcError> {
        let args = ShowCmdArgs {
            req_id: id.get(),
            cli: cli.to_string(),
        };
        self.server_streaming::<_, ShowCmdJsonReply>(args, ems::SHOW_CMD_JSON_OUTPUT, id)
            .await
    }

    /// Retrieves the configuration selected by a YANG paths JSON document.
    pub async fn get_config(&mut self, yang_paths: &str, id: RequestId) -> Result<String, RpcError> {
        let args = ConfigGetArgs {
            req_id: id.get(),
            yangpathjson: yang_paths.to_string(),
        };
        self.server_streaming::<_, ems::ConfigGetReply>(args, ems::GET_CONFIG, id)
            .await
    }

    async fn server_streaming<Req, Rep>(
        &mut self,
        args: Req,
        path: &'static str,
        id: RequestId,
    ) -> Result<String, RpcError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Rep: ReplyChunk,
    {
        self.client
            .ready()
            .await
            .map_err(|e| RpcError::ClientNotReady(e.into()))?;

        let codec = ProstCodec::<Req, Rep>::default();
        let mut request = tonic::Request::new(args);
        *request.metadata_mut() = self.credentials.clone();

        let mut stream = self
            .client
            .server_streaming(request, http::uri::PathAndQuery::from_static(path), codec)
            .await?
            .into_inner();

        let mut output = String::new();
        let mut chunks = 0usize;

        while let Some(chunk) = stream.message().await? {
            chunks += 1;

            if chunk.res_req_id() != id.get() {
                tracing::warn!(
                    expected = id.get(),
                    received = chunk.res_req_id(),
                    path,
                    "reply carries a different request id"
                );
            }

            if !chunk.errors().is_empty() {
                return Err(RpcError::Device(chunk.errors().to_string()));
            }

            output.push_str(&chunk.into_payload());
        }

        tracing::debug!(path, chunks, bytes = output.len(), "reply stream complete");
        Ok(output)
    }
}
