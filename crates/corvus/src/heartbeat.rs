//! Heartbeat — pings to a healthchecks-style monitoring endpoint.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeartbeatError {
    #[error("Heartbeat request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Heartbeat endpoint returned {status}")]
    Status { status: reqwest::StatusCode },
}

/// Lifecycle signal attached to a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Start,
    Success,
    Fail,
}

/// Client for one monitoring check.
///
/// Success pings hit the bare check URL; start and failure pings append
/// `/start` and `/fail` (the healthchecks.io convention).
pub struct Heartbeat {
    base: String,
    client: reqwest::Client,
}

impl Heartbeat {
    pub fn new(check_url: &str) -> Self {
        Self {
            base: check_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// The endpoint a given signal is delivered to.
    pub fn url_for(&self, signal: Signal) -> String {
        match signal {
            Signal::Success => self.base.clone(),
            Signal::Start => format!("{}/start", self.base),
            Signal::Fail => format!("{}/fail", self.base),
        }
    }

    /// Deliver a signal.  Non-2xx responses are errors.
    pub async fn ping(&self, signal: Signal) -> Result<(), HeartbeatError> {
        let url = self.url_for(signal);
        tracing::debug!(%url, ?signal, "Sending heartbeat");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(HeartbeatError::Status {
                status: response.status(),
            });
        }

        Ok(())
    }

    /// Deliver a signal with a text body — the monitoring service attaches
    /// it to the check event (a failure reason, a summary line, …).
    pub async fn ping_with_message(
        &self,
        signal: Signal,
        message: &str,
    ) -> Result<(), HeartbeatError> {
        let url = self.url_for(signal);
        tracing::debug!(%url, ?signal, "Sending heartbeat with message");

        let response = self
            .client
            .post(&url)
            .body(message.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(HeartbeatError::Status {
                status: response.status(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_each_signal() {
        let hb = Heartbeat::new("https://hc.example/ping/abc123");
        assert_eq!(hb.url_for(Signal::Success), "https://hc.example/ping/abc123");
        assert_eq!(
            hb.url_for(Signal::Start),
            "https://hc.example/ping/abc123/start"
        );
        assert_eq!(
            hb.url_for(Signal::Fail),
            "https://hc.example/ping/abc123/fail"
        );
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let hb = Heartbeat::new("https://hc.example/ping/abc123/");
        assert_eq!(
            hb.url_for(Signal::Start),
            "https://hc.example/ping/abc123/start"
        );
    }
}
