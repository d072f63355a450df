use std::time::Duration;
use tokio::time::sleep;
use rand::Rng;
use crate::series::registry::SourceType;

pub struct RateLimiter;

impl RateLimiter {
    /// Pause before a request according to the source's limits.
    pub async fn wait(source: SourceType) {
        if let Some(delay) = Self::delay_for(source) {
            tracing::debug!(?source, delay_ms = delay.as_millis() as u64, "Throttling");
            sleep(delay).await;
        }
    }

    fn delay_for(source: SourceType) -> Option<Duration> {
        match source {
            SourceType::Fred => {
                // FRED's WAF blocks bursts; jitter keeps sequential calls irregular
                let millis = rand::thread_rng().gen_range(1500..3000);
                Some(Duration::from_millis(millis))
            }
            SourceType::Local => None,
        }
    }
}
