//! Tower middleware that runs [`Cors`] in front of a downstream service.
//!
//! Preflights are answered here with `200 OK` and an empty body; the inner
//! service is never called for them. Every other request is forwarded exactly
//! once and the computed headers are added to whatever the inner service
//! returns. Denial only ever means missing headers.

use crate::constants::header;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::headers::Headers;
use crate::logger::CorsLogger;
use crate::options::CorsOptions;
use http::{HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode};
use pin_project::pin_project;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Applies a shared [`Cors`] policy to every wrapped service.
#[derive(Clone, Debug)]
pub struct CorsLayer {
    cors: Arc<Cors>,
}

impl CorsLayer {
    pub fn new(options: CorsOptions) -> Self {
        Self::from_shared(Arc::new(Cors::new(options)))
    }

    pub fn from_shared(cors: Arc<Cors>) -> Self {
        Self { cors }
    }

    pub fn policy(&self) -> &Arc<Cors> {
        &self.cors
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            cors: Arc::clone(&self.cors),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CorsService<S> {
    inner: S,
    cors: Arc<Cors>,
}

impl<S> CorsService<S> {
    pub fn new(inner: S, cors: Arc<Cors>) -> Self {
        Self { inner, cors }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let decision = self.cors.check(&request_context(&request));
        let logger = self.cors.logger();

        if decision.is_preflight() {
            let mut response = Response::new(ResBody::default());
            *response.status_mut() = StatusCode::OK;
            apply_headers(response.headers_mut(), decision.headers(), logger.as_ref());
            return ResponseFuture {
                kind: Kind::Preflight {
                    response: ready(response),
                },
            };
        }

        ResponseFuture {
            kind: Kind::Forward {
                future: self.inner.call(request),
                headers: decision.into_headers(),
                logger,
            },
        }
    }
}

/// Response future for [`CorsService`].
#[pin_project]
pub struct ResponseFuture<F, B> {
    #[pin]
    kind: Kind<F, B>,
}

#[pin_project(project = KindProj)]
enum Kind<F, B> {
    Preflight {
        #[pin]
        response: Ready<Response<B>>,
    },
    Forward {
        #[pin]
        future: F,
        headers: Headers,
        logger: Arc<dyn CorsLogger>,
    },
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().kind.project() {
            KindProj::Preflight { response } => response.poll(cx).map(Ok),
            KindProj::Forward {
                future,
                headers,
                logger,
            } => {
                let mut response = std::task::ready!(future.poll(cx))?;
                apply_headers(response.headers_mut(), headers, &**logger);
                Poll::Ready(Ok(response))
            }
        }
    }
}

fn request_context<B>(request: &Request<B>) -> RequestContext<'_> {
    let headers = request.headers();
    RequestContext {
        method: request.method().as_str(),
        origin: header_str(headers, header::ORIGIN),
        access_control_request_method: header_str(headers, header::ACCESS_CONTROL_REQUEST_METHOD),
        access_control_request_headers: header_str(
            headers,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ),
    }
}

/// Values that are not visible ASCII are treated as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers, logger: &dyn CorsLogger) {
    for (name, value) in headers {
        if name.eq_ignore_ascii_case(header::VARY) {
            append_vary(map, value, logger);
            continue;
        }

        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                map.insert(header_name, header_value);
            }
            _ => logger.error(format_args!(
                "Could not set response header '{name}: {value}'."
            )),
        }
    }
}

/// Adds the entries of `value` missing from any existing `Vary` line.
fn append_vary(map: &mut HeaderMap, value: &str, logger: &dyn CorsLogger) {
    let present: Vec<String> = map
        .get_all(http::header::VARY)
        .iter()
        .filter_map(|existing| existing.to_str().ok())
        .flat_map(|existing| existing.split(','))
        .map(|entry| entry.trim().to_ascii_lowercase())
        .collect();

    let missing = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| !present.iter().any(|existing| existing.eq_ignore_ascii_case(entry)))
        .collect::<Vec<_>>();
    if missing.is_empty() {
        return;
    }

    match HeaderValue::from_str(&missing.join(", ")) {
        Ok(vary) => {
            map.append(http::header::VARY, vary);
        }
        Err(_) => logger.error(format_args!("Could not append Vary value '{value}'.")),
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;
