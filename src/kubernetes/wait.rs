// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval condition polling bounded by a deadline

use crate::error::{OlmError, Result};
use kube::{runtime::wait::Condition, Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::debug;

/// Drive `fut` to completion unless `deadline` passes first.
///
/// An in-flight request is dropped at the deadline and [`OlmError::Timeout`]
/// naming `what` is returned in its place.
pub async fn with_deadline<T, Fut>(what: &str, deadline: Instant, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    timeout_at(deadline, fut)
        .await
        .map_err(|_| OlmError::Timeout {
            what: what.to_string(),
            elapsed: start.elapsed(),
        })?
}

/// Run `check` immediately and then every `interval` until it yields a value.
///
/// Errors from `check` abort the poll. Reaching `deadline` without a value,
/// including while a check is still in flight, yields [`OlmError::Timeout`]
/// naming `what`.
pub async fn poll_immediate_until<T, F, Fut>(
    what: &str,
    interval: Duration,
    deadline: Instant,
    mut check: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();

    loop {
        let checked = timeout_at(deadline, check())
            .await
            .map_err(|_| OlmError::Timeout {
                what: what.to_string(),
                elapsed: start.elapsed(),
            })??;
        if let Some(value) = checked {
            return Ok(value);
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(OlmError::Timeout {
                what: what.to_string(),
                elapsed: now - start,
            });
        }

        debug!("Still waiting for {}", what);
        sleep(interval.min(deadline - now)).await;
    }
}

/// Poll a named object until `condition` matches, returning the matching object
pub async fn wait_for_condition<K, C>(
    api: &Api<K>,
    name: &str,
    what: &str,
    interval: Duration,
    deadline: Instant,
    condition: C,
) -> Result<K>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    C: Condition<K>,
{
    let condition = &condition;
    poll_immediate_until(what, interval, deadline, move || async move {
        let obj = api.get(name).await?;
        Ok::<_, OlmError>(condition.matches_object(Some(&obj)).then_some(obj))
    })
    .await
}

/// Conditions over OLM resources, in the style of `kube::runtime::wait::conditions`
pub mod conditions {
    use crate::types::{CatalogSource, Subscription};
    use kube::runtime::wait::Condition;

    /// The catalog source's registry connection reports READY
    pub fn is_catalog_source_ready() -> impl Condition<CatalogSource> {
        |obj: Option<&CatalogSource>| obj.is_some_and(CatalogSource::is_ready)
    }

    /// OLM has resolved the subscription and linked an install plan
    pub fn has_install_plan_ref() -> impl Condition<Subscription> {
        |obj: Option<&Subscription>| obj.is_some_and(|sub| sub.install_plan_ref().is_some())
    }
}
