//! Pacing between consecutive provider calls.

use async_trait::async_trait;
use std::time::Duration;

/// Pause between two FreeDNS tokens, to go easy on the shared service.
pub const TOKEN_PAUSE: Duration = Duration::from_secs(1);

/// Something that can wait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tracing::debug!("Pausing {:?} before next update", duration);
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_tokio_pause_waits() {
        let started = Instant::now();
        TokioPause.pause(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
