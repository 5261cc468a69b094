// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, condition polling, and conflict retries.

pub mod client;
pub mod retry;
pub mod wait;

pub use client::create_client;
pub use retry::{retry_on_conflict, Backoff};
pub use wait::{poll_immediate_until, wait_for_condition, with_deadline};
