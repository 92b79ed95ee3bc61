// An in-process stand-in for the EMS services of an IOS-XR router.
// It records every call it receives and answers with a scripted reply stream.
use std::convert::Infallible;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError, http};
use tonic::server::{Grpc, ServerStreamingService};
use tonic::{Request, Response, Status};
use tonic_prost::ProstCodec;
use xrexec_core::ems::{
    self, ConfigGetArgs, ConfigGetReply, ShowCmdArgs, ShowCmdJsonReply, ShowCmdTextReply,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCall {
    pub path: &'static str,
    pub req_id: i64,
    pub payload: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub payload: String,
    pub errors: String,
    /// Echoes the request id when unset.
    pub res_req_id: Option<i64>,
}

impl Chunk {
    pub fn output(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            ..Default::default()
        }
    }

    pub fn error(errors: &str) -> Self {
        Self {
            errors: errors.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RouterState {
    chunks: Vec<Result<Chunk, Status>>,
    reject: Option<Status>,
    calls: Vec<ReceivedCall>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeRouter {
    state: Arc<Mutex<RouterState>>,
}

impl FakeRouter {
    pub fn replying(chunks: Vec<Result<Chunk, Status>>) -> Self {
        let router = Self::default();
        router.state.lock().unwrap().chunks = chunks;
        router
    }

    pub fn rejecting(status: Status) -> Self {
        let router = Self::default();
        router.state.lock().unwrap().reject = Some(status);
        router
    }

    pub fn calls(&self) -> Vec<ReceivedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

trait FakeArgs: prost::Message + Default + Send + Sync + 'static {
    fn req_id(&self) -> i64;
    fn payload(&self) -> String;
}

impl FakeArgs for ShowCmdArgs {
    fn req_id(&self) -> i64 {
        self.req_id
    }

    fn payload(&self) -> String {
        self.cli.clone()
    }
}

impl FakeArgs for ConfigGetArgs {
    fn req_id(&self) -> i64 {
        self.req_id
    }

    fn payload(&self) -> String {
        self.yangpathjson.clone()
    }
}

trait FakeReply: prost::Message + Default + Send + Sync + 'static {
    fn build(res_req_id: i64, payload: String, errors: String) -> Self;
}

impl FakeReply for ShowCmdTextReply {
    fn build(res_req_id: i64, output: String, errors: String) -> Self {
        Self {
            res_req_id,
            output,
            errors,
        }
    }
}

impl FakeReply for ShowCmdJsonReply {
    fn build(res_req_id: i64, jsonoutput: String, errors: String) -> Self {
        Self {
            res_req_id,
            jsonoutput,
            errors,
        }
    }
}

impl FakeReply for ConfigGetReply {
    fn build(res_req_id: i64, yangjson: String, errors: String) -> Self {
        Self {
            res_req_id,
            yangjson,
            errors,
        }
    }
}

struct Handler<Req, Rep> {
    path: &'static str,
    state: Arc<Mutex<RouterState>>,
    _messages: PhantomData<fn(Req) -> Rep>,
}

impl<Req: FakeArgs, Rep: FakeReply> ServerStreamingService<Req> for Handler<Req, Rep> {
    type Response = Rep;
    type ResponseStream = tokio_stream::Iter<std::vec::IntoIter<Result<Rep, Status>>>;
    type Future = BoxFuture<Response<Self::ResponseStream>, Status>;

    fn call(&mut self, request: Request<Req>) -> Self::Future {
        let metadata_str = |key: &str| {
            request
                .metadata()
                .get(key)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let username = metadata_str("username");
        let password = metadata_str("password");
        let args = request.into_inner();
        let req_id = args.req_id();

        let (chunks, reject) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ReceivedCall {
                path: self.path,
                req_id,
                payload: args.payload(),
                username,
                password,
            });
            (state.chunks.clone(), state.reject.clone())
        };

        Box::pin(async move {
            if let Some(status) = reject {
                return Err(status);
            }

            let replies: Vec<_> = chunks
                .into_iter()
                .map(|chunk| {
                    chunk.map(|c| Rep::build(c.res_req_id.unwrap_or(req_id), c.payload, c.errors))
                })
                .collect();

            Ok(Response::new(tokio_stream::iter(replies)))
        })
    }
}

fn serve<Req, Rep, B>(
    path: &'static str,
    state: Arc<Mutex<RouterState>>,
    req: http::Request<B>,
) -> BoxFuture<http::Response<tonic::body::Body>, Infallible>
where
    Req: FakeArgs,
    Rep: FakeReply,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    Box::pin(async move {
        let handler = Handler::<Req, Rep> {
            path,
            state,
            _messages: PhantomData,
        };
        let mut grpc = Grpc::new(ProstCodec::<Rep, Req>::default());
        Ok(grpc.server_streaming(handler, req).await)
    })
}

impl<B> Service<http::Request<B>> for FakeRouter
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let state = self.state.clone();

        match req.uri().path() {
            ems::SHOW_CMD_TEXT_OUTPUT => {
                serve::<ShowCmdArgs, ShowCmdTextReply, B>(ems::SHOW_CMD_TEXT_OUTPUT, state, req)
            }
            ems::SHOW_CMD_JSON_OUTPUT => {
                serve::<ShowCmdArgs, ShowCmdJsonReply, B>(ems::SHOW_CMD_JSON_OUTPUT, state, req)
            }
            ems::GET_CONFIG => serve::<ConfigGetArgs, ConfigGetReply, B>(ems::GET_CONFIG, state, req),
            _ => Box::pin(async move { Ok(Status::unimplemented("unknown EMS method").into_http()) }),
        }
    }
}
