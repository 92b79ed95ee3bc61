//! # Session
//!
//! A [`Session`] is the single connection a run holds against a device.
//!
//! It owns a transport implementing [`EmsTransport`] and releases it exactly once: either
//! explicitly through [`Session::close`], or when the session is dropped on any other exit
//! path. Dispatching a command consumes the session, see [`Session::dispatch`].

use crate::{
    BoxError,
    config::ConnectionTarget,
    dispatch::RequestId,
    grpc::client::{EmsClient, InvalidCredentials, RpcError},
};
use http_body::Body as HttpBody;
use std::path::PathBuf;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

/// Errors that can occur when opening a session against a device.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid target address '{0}': {1}")]
    InvalidEndpoint(String, #[source] tonic::transport::Error),
    #[error("Failed to read CA certificate '{path}': '{source}'")]
    Certificate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TLS configuration: {0}")]
    Tls(#[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
    #[error(transparent)]
    InvalidCredentials(#[from] InvalidCredentials),
}

/// The RPC verbs a device session offers.
#[allow(async_fn_in_trait)]
pub trait EmsTransport {
    async fn show_cmd_text_output(&mut self, cli: &str, id: RequestId) -> Result<String, RpcError>;

    async fn show_cmd_json_output(&mut self, cli: &str, id: RequestId) -> Result<String, RpcError>;

    async fn get_config(&mut self, yang_paths: &str, id: RequestId) -> Result<String, RpcError>;

    /// Releases the underlying connection.
    fn close(self);
}

impl<S> EmsTransport for EmsClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    async fn show_cmd_text_output(&mut self, cli: &str, id: RequestId) -> Result<String, RpcError> {
        EmsClient::show_cmd_text_output(self, cli, id).await
    }

    async fn show_cmd_json_output(&mut self, cli: &str, id: RequestId) -> Result<String, RpcError> {
        EmsClient::show_cmd_json_output(self, cli, id).await
    }

    async fn get_config(&mut self, yang_paths: &str, id: RequestId) -> Result<String, RpcError> {
        EmsClient::get_config(self, yang_paths, id).await
    }

    fn close(self) {
        // Dropping the client drops its channel, which shuts the connection down.
        drop(self);
    }
}

/// A single-use connection to one device.
pub struct Session<T: EmsTransport> {
    // Only `None` once released.
    transport: Option<T>,
}

impl<T: EmsTransport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Releases the session. Dropping it has the same effect.
    pub fn close(mut self) {
        self.release();
    }

    // `release` is the only place the transport is taken, and it only runs from `close(self)`
    // or `drop`, so a live `Session` always holds one.
    pub(crate) fn transport(&mut self) -> &mut T {
        self.transport
            .as_mut()
            .expect("transport is only taken when the session is released")
    }

    fn release(&mut self) {
        if let Some(transport) = self.transport.take() {
            tracing::debug!("closing session");
            transport.close();
        }
    }
}

impl<T: EmsTransport> Drop for Session<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Opens a session against `target`.
///
/// A single connection attempt is made, failures are returned as they are without any retry.
/// The session uses TLS when the target names a CA certificate.
pub async fn open_session(
    target: &ConnectionTarget,
) -> Result<Session<EmsClient<Channel>>, SessionError> {
    let channel = connect(target).await?;
    let client = EmsClient::new(channel).with_credentials(&target.user, &target.password)?;

    tracing::info!(host = %target.host, tls = target.cert.is_some(), "session established");

    Ok(Session::new(client))
}

async fn connect(target: &ConnectionTarget) -> Result<Channel, SessionError> {
    let addr = target_uri(target);

    let mut endpoint = Endpoint::new(addr.clone())
        .map_err(|e| SessionError::InvalidEndpoint(addr.clone(), e))?
        .connect_timeout(target.timeout())
        .timeout(target.timeout());

    if let Some(path) = &target.cert {
        let pem = std::fs::read(path).map_err(|source| SessionError::Certificate {
            path: path.clone(),
            source,
        })?;

        let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem));
        if let Some(domain) = &target.domain {
            tls = tls.domain_name(domain.clone());
        }

        endpoint = endpoint.tls_config(tls).map_err(SessionError::Tls)?;
    }

    tracing::debug!(%addr, "connecting");

    endpoint
        .connect()
        .await
        .map_err(|e| SessionError::ConnectionFailed(addr, e))
}

fn target_uri(target: &ConnectionTarget) -> String {
    if target.host.contains("://") {
        return target.host.clone();
    }

    let scheme = if target.cert.is_some() { "https" } else { "http" };
    format!("{scheme}://{}", target.host)
}
