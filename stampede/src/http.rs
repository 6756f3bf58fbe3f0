//! HTTP sessions backed by `reqwest`
use crate::hook::record_request;
use crate::session::{Method, Request, Response, Session, TransportError};
use reqwest::Client;
use stampede_core::HTTP_LABELS;
use url::Url;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Keep-alive HTTP client bound to a single virtual user.
///
/// Request paths are resolved against the base URL given at construction, so tasks only ever
/// name paths (`"/"`, `"/items?page=2"`) and the target host stays part of the run configuration.
///
/// By default a request completes once the whole response body has been read. With
/// [`HttpSession::drain_body`] set to `false` it completes as soon as the headers arrive.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    base: Url,
    drain_body: bool,
}

impl HttpSession {
    /// Session with its own connection to `base`. Fails if the HTTP client cannot be built
    /// (e.g. the TLS backend does not initialize).
    pub fn new(base: &Url) -> Result<Self, TransportError> {
        Ok(Self::with_client(build_client()?, base))
    }

    /// Use a preconfigured client (timeouts, headers, TLS settings, ...).
    pub fn with_client(client: Client, base: &Url) -> Self {
        Self {
            client,
            base: base.clone(),
            drain_body: true,
        }
    }

    /// Whether a request waits for the full response body. Defaults to `true`.
    pub fn drain_body(mut self, drain_body: bool) -> Self {
        self.drain_body = drain_body;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|source| TransportError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.resolve(&request.path)?;
        trace!("{} {url}", request.method);

        let mut builder = self.client.request(method(request.method), url);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let status = res.status().as_u16();
        if self.drain_body {
            // Drain the body so the connection can be reused.
            res.bytes().await?;
        }

        Ok(Response::new(status))
    }
}

impl Session for HttpSession {
    async fn request(&self, request: Request) -> Result<Response, TransportError> {
        record_request(HTTP_LABELS, self.send(request)).await
    }
}

/// One idle connection per host: each virtual user keeps to its own connection.
fn build_client() -> Result<Client, TransportError> {
    let client = Client::builder()
        .pool_max_idle_per_host(1)
        .tcp_nodelay(true)
        .build()?;
    Ok(client)
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(base: &str) -> HttpSession {
        HttpSession::new(&Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn builds_with_drained_bodies() {
        let s = session("http://127.0.0.1:8080");
        assert!(s.drain_body);
        assert_eq!(s.base().as_str(), "http://127.0.0.1:8080/");

        let s = s.drain_body(false);
        assert!(!s.drain_body);
    }

    #[test]
    fn resolves_paths() {
        let s = session("http://127.0.0.1:8080");
        assert_eq!(s.resolve("/").unwrap().as_str(), "http://127.0.0.1:8080/");
        assert_eq!(
            s.resolve("/?dynamic=true").unwrap().as_str(),
            "http://127.0.0.1:8080/?dynamic=true"
        );

        let s = session("http://localhost:3002/api/");
        assert_eq!(
            s.resolve("items").unwrap().as_str(),
            "http://localhost:3002/api/items"
        );
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let s = session("http://127.0.0.1:9");
        let res = s.get("/").await;
        assert!(matches!(res, Err(TransportError::Http(_))));
    }
}
