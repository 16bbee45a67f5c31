// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

#![no_std]
#![deny(unreachable_patterns)]
#![deny(unused_must_use)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
extern crate alloc;

use alloc::string::String;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;

pub mod mac;
pub mod stat;

pub use mac::*;
pub use stat::*;

/// The overall version of the API. Anytime a type in this crate is
/// added, removed, or modified, this number should increment. Tools
/// reading a serialized [`StatsSnapshot`] use it to verify they were
/// built against the same layout as the engine that produced it.
pub const API_VERSION: u64 = 1;

/// Major version of the hdrwalk package.
pub const MAJOR_VERSION: u64 = 0;

/// The terminal action assigned to a single frame.
///
/// The discriminants match the XDP action codes so that a verdict can
/// be handed straight to a kernel hook or used to index a per-action
/// stats array. The classification core itself only ever produces
/// [`Verdict::Pass`] and [`Verdict::Drop`]; the remaining variants
/// belong to collaborators which rewrite or forward frames.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u32)]
pub enum Verdict {
    Aborted = 0,
    Drop = 1,
    #[default]
    Pass = 2,
    Tx = 3,
    Redirect = 4,
}

impl Verdict {
    /// The number of distinct verdicts.
    pub const COUNT: usize = 5;

    /// All verdicts, in discriminant order.
    pub const ALL: [Verdict; Self::COUNT] = [
        Verdict::Aborted,
        Verdict::Drop,
        Verdict::Pass,
        Verdict::Tx,
        Verdict::Redirect,
    ];

    /// The slot of this verdict in a per-action table.
    #[inline]
    pub const fn index(self) -> usize {
        self as u32 as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::Aborted => "ABORTED",
            Verdict::Drop => "DROP",
            Verdict::Pass => "PASS",
            Verdict::Tx => "TX",
            Verdict::Redirect => "REDIRECT",
        }
    }
}

impl From<Verdict> for u32 {
    fn from(v: Verdict) -> Self {
        v as u32
    }
}

impl TryFrom<u32> for Verdict {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Verdict::ALL
            .get(raw as usize)
            .copied()
            .ok_or_else(|| format!("invalid verdict code: {raw}"))
    }
}

impl core::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aborted" => Ok(Verdict::Aborted),
            "drop" => Ok(Verdict::Drop),
            "pass" => Ok(Verdict::Pass),
            "tx" => Ok(Verdict::Tx),
            "redirect" => Ok(Verdict::Redirect),
            _ => Err(format!("invalid verdict: {s}")),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Out-of-band information delivered alongside a received frame.
///
/// The classifier does not need either field to reach a verdict; they
/// are carried for logging.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub struct IngressMeta {
    /// The interface index the frame arrived on.
    pub ifindex: u32,
    /// The receive queue the frame was pulled from.
    pub rx_queue: u32,
}

impl Display for IngressMeta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "if{}/rxq{}", self.ifindex, self.rx_queue)
    }
}
