//! Blocking execution of `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the pure build/parse core and the
//! network. `VehicleManager` is generic over it so tests can substitute a
//! canned transport. `UreqTransport` disables ureq's status-as-error
//! behavior: 4xx/5xx responses come back as data and `VehicleClient` decides
//! what they mean.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip. Only failures that prevent a response from
/// being read are errors here.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by a blocking `ureq` agent with default timeouts.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let HttpRequest {
                method,
                path,
                headers,
                body,
            } = request;

            let result = match method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(&path);
                    for (key, value) in &headers {
                        builder = builder.header(key, value);
                    }
                    builder.call()
                }
                HttpMethod::Delete => {
                    let mut builder = self.agent.delete(&path);
                    for (key, value) in &headers {
                        builder = builder.header(key, value);
                    }
                    builder.call()
                }
                HttpMethod::Post | HttpMethod::Put => {
                    let mut builder = if method == HttpMethod::Post {
                        self.agent.post(&path)
                    } else {
                        self.agent.put(&path)
                    };
                    for (key, value) in &headers {
                        builder = builder.header(key, value);
                    }
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };

            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
