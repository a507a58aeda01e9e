//! Scan producer contract.
//!
//! A scan producer yields decoded barcode/QR strings. The UI opens a scan
//! session, awaits at most one detection, and closes the scan surface when
//! it arrives; repeated scanning means repeated sessions.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Source of decoded scan strings, one per scan session.
#[async_trait]
pub trait ScanProducer: Send + Sync {
    /// Await the next detection. `None` means the producer is exhausted
    /// or the hardware is unavailable.
    async fn next_scan(&self) -> Option<String>;
}

/// A scripted producer replaying queued codes, for demos and tests.
pub struct ScriptedScanner {
    codes: Mutex<VecDeque<String>>,
    delay: Duration,
}

impl ScriptedScanner {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
            delay: Duration::ZERO,
        }
    }

    /// Simulate the camera taking a moment to find a code.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ScanProducer for ScriptedScanner {
    async fn next_scan(&self) -> Option<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.codes.lock().await.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_scanner_replays_in_order() {
        let scanner = ScriptedScanner::new(["111", "222"]);
        assert_eq!(scanner.next_scan().await.as_deref(), Some("111"));
        assert_eq!(scanner.next_scan().await.as_deref(), Some("222"));
        assert_eq!(scanner.next_scan().await, None);
    }
}
