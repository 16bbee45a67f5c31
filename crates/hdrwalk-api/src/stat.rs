// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Types for reading classification stats out of the engine.

use crate::Verdict;
use serde::Deserialize;
use serde::Serialize;

/// Packet and byte counts for a single verdict.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct DataRec {
    pub rx_packets: u64,
    pub rx_bytes: u64,
}

/// Counts of frames which received the fallback verdict, broken down
/// by the reason the header walk stopped.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct FallbackCounts {
    pub bounds_violation: u64,
    pub unsupported_protocol: u64,
    pub depth_exceeded: u64,
    pub malformed: u64,
}

impl FallbackCounts {
    pub fn total(&self) -> u64 {
        self.bounds_violation
            + self.unsupported_protocol
            + self.depth_exceeded
            + self.malformed
    }
}

/// A point-in-time copy of all classification counters.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct StatsSnapshot {
    /// One record per [`Verdict`], indexed by [`Verdict::index`].
    pub records: [DataRec; Verdict::COUNT],
    /// Frames which were never fully parsed. These are also counted in
    /// the record of the fallback verdict.
    pub fallback: FallbackCounts,
}

impl StatsSnapshot {
    pub fn record(&self, verdict: Verdict) -> &DataRec {
        &self.records[verdict.index()]
    }

    /// Total frames seen, across all verdicts.
    pub fn total_packets(&self) -> u64 {
        self.records.iter().map(|r| r.rx_packets).sum()
    }
}
