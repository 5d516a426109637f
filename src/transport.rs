//! Pluggable HTTP round trip.
//!
//! The client never talks to the network directly. It hands every built
//! request to a [`Transport`], which by default is a `reqwest::Client`.
//! Supplying another implementation lets callers add auth headers, route
//! through a proxy, or substitute a test double.

use crate::{Error, Result};
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;

/// Performs a single HTTP round trip.
///
/// Implementations must not retry; the client calls `execute` exactly once
/// per operation.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use restuser::Transport;
///
/// /// Answers every request with an empty user list.
/// struct EmptyList;
///
/// #[async_trait]
/// impl Transport for EmptyList {
///     async fn execute(&self, _request: reqwest::Request) -> restuser::Result<reqwest::Response> {
///         let response = http::Response::builder().status(200).body("[]").unwrap();
///         Ok(reqwest::Response::from(response))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        Ok(reqwest::Client::execute(self, request).await?)
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        (**self).execute(request).await
    }
}

/// Decorator that adds a fixed set of headers to every request before
/// delegating to the wrapped transport.
///
/// Existing headers with the same name are replaced.
///
/// ```
/// use restuser::HeaderTransport;
///
/// # fn main() -> restuser::Result<()> {
/// let transport = HeaderTransport::new(reqwest::Client::new())
///     .header("authorization", "Bearer foo")?;
/// # Ok(())
/// # }
/// ```
pub struct HeaderTransport {
    inner: Arc<dyn Transport>,
    headers: HeaderMap,
}

impl HeaderTransport {
    pub fn new(inner: impl Transport + 'static) -> Self {
        Self::wrap(Arc::new(inner))
    }

    pub fn wrap(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds every header in `headers`.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

#[async_trait]
impl Transport for HeaderTransport {
    async fn execute(&self, mut request: reqwest::Request) -> Result<reqwest::Response> {
        for (name, value) in &self.headers {
            request.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(request).await
    }
}

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::try_from(name)
        .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the headers of the last request and answers 204.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Option<HeaderMap>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
            *self.seen.lock().unwrap() = Some(request.headers().clone());
            let response = http::Response::builder().status(204).body("").unwrap();
            Ok(reqwest::Response::from(response))
        }
    }

    #[tokio::test]
    async fn header_transport_injects_headers() {
        let recorder = Arc::new(Recorder::default());
        let transport = HeaderTransport::wrap(recorder.clone())
            .header("authorization", "Bearer foo")
            .unwrap();

        let request = reqwest::Request::new(
            reqwest::Method::DELETE,
            "http://localhost/v1/users/1".parse().unwrap(),
        );
        let response = transport.execute(request).await.unwrap();
        assert_eq!(response.status().as_u16(), 204);

        let seen = recorder.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.get("authorization").unwrap(), "Bearer foo");
    }

    #[test]
    fn invalid_header_is_a_configuration_error() {
        let result = HeaderTransport::new(reqwest::Client::new()).header("bad header", "x");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
