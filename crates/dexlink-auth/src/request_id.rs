// SPDX-FileCopyrightText: 2026 Dexlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monotonic anti-replay token generation.
//!
//! The exchange rejects requests whose `request_id` is not newer than the
//! last one it saw for the key, within its replay window. A bare
//! millisecond timestamp can repeat under rapid successive calls, so the
//! source bumps past the last issued value: each token is
//! `max(now_ms, last + 1)`.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Strictly monotonic, timestamp-based request-id source.
///
/// Lock-free and safe to share across call sites; every call returns a
/// value strictly greater than all previously issued ones. Ids stay close
/// to wall-clock milliseconds, which is what the exchange's replay window
/// is calibrated against.
#[derive(Debug, Default)]
pub struct RequestIdSource {
    last: AtomicU64,
}

impl RequestIdSource {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Issue the next request id.
    pub fn next(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
