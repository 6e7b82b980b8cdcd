//! The seam between request building and network I/O.
//!
//! Anything that can turn an `HttpRequest` into an `HttpResponse` is a
//! `Transport`: the bundled blocking `UreqTransport`, a host application's
//! own HTTP stack, or an in-memory double in tests. Every HTTP status comes
//! back as data. Only failures to get a response at all are errors.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use tracing::debug;

    use super::Transport;
    use crate::config::ClientConfig;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// The agent has `http_status_as_error` disabled so 4xx/5xx responses
    /// are returned as data rather than `Err`.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new(config: &ClientConfig) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(config.timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new(&ClientConfig::default())
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut call = match request.method {
                HttpMethod::Get => self.agent.get(&request.path),
            };
            for (name, value) in &request.headers {
                call = call.header(name.as_str(), value.as_str());
            }

            let mut response = call
                .call()
                .map_err(|e| TransportError::new(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::new(format!("reading body: {e}")))?;

            debug!(status, url = %request.path, "response received");

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
