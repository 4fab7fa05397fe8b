//! Live adapter for the `LinkProbe` port using HEAD requests.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::PROBE_USER_AGENT;
use crate::ports::{LinkProbe, PortError, PortFuture};

/// Redirect hops followed before a probe gives up.
const MAX_REDIRECTS: usize = 10;

/// Probes external links with a bounded HEAD request.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Creates a probe whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(PROBE_USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

impl LinkProbe for HttpProbe {
    fn head<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let response = self.client.head(url).send().await.map_err(|e| -> PortError {
                e.to_string().into()
            })?;
            Ok(response.status().as_u16())
        })
    }
}
