// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Classification statistics.
//!
//! One packet/byte record per [`Verdict`], laid out like a per-action
//! stats map, plus a count of fallbacks per [`WalkError`] kind. All
//! counters are relaxed atomics: any number of classifiers may record
//! into the same [`VerdictStats`] at once, and a snapshot taken while
//! they do so is not guaranteed to be internally consistent.

use super::classify::Outcome;
use super::error::WalkError;
use crate::api::DataRec;
use crate::api::FallbackCounts;
use crate::api::StatsSnapshot;
use crate::api::Verdict;
use core::sync::atomic::AtomicU64;
use core::sync::atomic::Ordering::Relaxed;

#[derive(Debug)]
struct AtomicRec {
    packets: AtomicU64,
    bytes: AtomicU64,
}

impl AtomicRec {
    const fn new() -> Self {
        Self { packets: AtomicU64::new(0), bytes: AtomicU64::new(0) }
    }

    fn hit(&self, len: usize) {
        self.packets.fetch_add(1, Relaxed);
        self.bytes.fetch_add(len as u64, Relaxed);
    }

    fn load(&self) -> DataRec {
        DataRec {
            rx_packets: self.packets.load(Relaxed),
            rx_bytes: self.bytes.load(Relaxed),
        }
    }

    fn reset(&self) {
        self.packets.store(0, Relaxed);
        self.bytes.store(0, Relaxed);
    }
}

#[derive(Debug)]
struct FallbackStats {
    bounds_violation: AtomicU64,
    unsupported_protocol: AtomicU64,
    depth_exceeded: AtomicU64,
    malformed: AtomicU64,
}

impl FallbackStats {
    const fn new() -> Self {
        Self {
            bounds_violation: AtomicU64::new(0),
            unsupported_protocol: AtomicU64::new(0),
            depth_exceeded: AtomicU64::new(0),
            malformed: AtomicU64::new(0),
        }
    }

    fn counter(&self, err: &WalkError) -> &AtomicU64 {
        match err {
            WalkError::BoundsViolation(_) => &self.bounds_violation,
            WalkError::UnsupportedProtocol(_) => &self.unsupported_protocol,
            WalkError::DepthExceeded { .. } => &self.depth_exceeded,
            WalkError::Malformed(_) => &self.malformed,
        }
    }

    fn all(&self) -> [&AtomicU64; 4] {
        [
            &self.bounds_violation,
            &self.unsupported_protocol,
            &self.depth_exceeded,
            &self.malformed,
        ]
    }
}

/// Counters shared by every invocation of a classifier.
#[derive(Debug)]
pub struct VerdictStats {
    records: [AtomicRec; Verdict::COUNT],
    fallback: FallbackStats,
}

impl Default for VerdictStats {
    fn default() -> Self {
        Self::new()
    }
}

impl VerdictStats {
    pub const fn new() -> Self {
        Self {
            records: [const { AtomicRec::new() }; Verdict::COUNT],
            fallback: FallbackStats::new(),
        }
    }

    /// Count one frame of `len` bytes against `verdict`.
    #[inline]
    pub fn hit(&self, verdict: Verdict, len: usize) {
        self.records[verdict.index()].hit(len);
    }

    /// Count a classified frame. Fallbacks are counted both against the
    /// fallback verdict and against the reason the walk stopped.
    pub fn record(&self, outcome: &Outcome, len: usize) {
        self.hit(outcome.verdict(), len);
        if let Outcome::Fallback(err) = outcome {
            self.fallback.counter(err).fetch_add(1, Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let mut snap = StatsSnapshot::default();
        for (out, rec) in snap.records.iter_mut().zip(self.records.iter()) {
            *out = rec.load();
        }

        snap.fallback = FallbackCounts {
            bounds_violation: self.fallback.bounds_violation.load(Relaxed),
            unsupported_protocol: self
                .fallback
                .unsupported_protocol
                .load(Relaxed),
            depth_exceeded: self.fallback.depth_exceeded.load(Relaxed),
            malformed: self.fallback.malformed.load(Relaxed),
        };

        snap
    }

    pub fn reset(&self) {
        self.records.iter().for_each(AtomicRec::reset);
        self.fallback.all().iter().for_each(|c| c.store(0, Relaxed));
    }
}
