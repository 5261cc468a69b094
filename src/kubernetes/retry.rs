// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry of read-modify-write updates that lose an optimistic concurrency race

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Exponential backoff parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    /// Maximum number of attempts
    pub steps: u32,
    /// Delay before the second attempt
    pub duration: Duration,
    /// Multiplier applied to the delay after every retry
    pub factor: f64,
    /// Each delay is stretched by a random fraction up to this value
    pub jitter: f64,
}

impl Default for Backoff {
    /// Four attempts starting at 10ms, growing fivefold, with 10% jitter
    fn default() -> Self {
        Backoff {
            steps: 4,
            duration: Duration::from_millis(10),
            factor: 5.0,
            jitter: 0.1,
        }
    }
}

impl Backoff {
    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter <= 0.0 {
            return delay;
        }
        delay + delay.mul_f64(rand::random::<f64>() * self.jitter)
    }
}

/// Run `op` until it succeeds, fails with a non-conflict error, or the backoff
/// runs out of steps. The last conflict is returned once steps are exhausted.
pub async fn retry_on_conflict<T, F, Fut>(backoff: &Backoff, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let steps = backoff.steps.max(1);
    let mut delay = backoff.duration;
    let mut attempt = 1;

    loop {
        match op().await {
            Err(e) if e.is_conflict() && attempt < steps => {
                let wait = backoff.jittered(delay);
                debug!(
                    "Conflict on attempt {}/{}, retrying in {:?}",
                    attempt, steps, wait
                );
                sleep(wait).await;
                delay = delay.mul_f64(backoff.factor);
                attempt += 1;
            }
            result => return result,
        }
    }
}
