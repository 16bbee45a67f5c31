// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Reasons a header walk stops short of a verdict.

use super::headers::Layer;
use crate::d_error::DError;
use core::fmt;
use core::fmt::Display;

/// A header would extend past the end of the frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BoundsViolation {
    /// The header which did not fit.
    pub layer: Layer,
    /// The offset one past the last byte the header needs.
    pub need: usize,
    /// The offset one past the last byte of the frame.
    pub have: usize,
}

impl DError for BoundsViolation {
    fn discriminant(&self) -> &'static str {
        self.layer.as_str()
    }

    fn child(&self) -> Option<&dyn DError> {
        None
    }

    fn leaf_data(&self, data: &mut [u64]) {
        if let Some(v) = data.get_mut(0) {
            *v = self.need as u64;
        }
        if let Some(v) = data.get_mut(1) {
            *v = self.have as u64;
        }
    }
}

impl Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} header needs {} bytes, frame has {}",
            self.layer, self.need, self.have
        )
    }
}

/// A next-protocol value with no parser behind it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Unsupported {
    /// The header whose next-protocol field was not recognised.
    pub layer: Layer,
    /// The raw (host order) ethertype or IP protocol number.
    pub value: u16,
}

impl DError for Unsupported {
    fn discriminant(&self) -> &'static str {
        self.layer.as_str()
    }

    fn child(&self) -> Option<&dyn DError> {
        None
    }

    fn leaf_data(&self, data: &mut [u64]) {
        if let Some(v) = data.get_mut(0) {
            *v = u64::from(self.value);
        }
    }
}

impl Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} carries unsupported protocol 0x{:04X}", self.layer, self.value)
    }
}

/// A header whose own length field is impossible.
#[derive(Clone, Copy, Debug, DError, Eq, PartialEq)]
#[derror(leaf_data = Malformed::data)]
pub enum Malformed {
    /// The IPv4 IHL describes a header shorter than the 20 byte minimum.
    Ipv4HeaderLen { ihl: u8 },
}

impl Malformed {
    fn data(&self, data: &mut [u64]) {
        match self {
            Malformed::Ipv4HeaderLen { ihl } => {
                if let Some(v) = data.get_mut(0) {
                    *v = u64::from(*ihl);
                }
            }
        }
    }
}

impl Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::Ipv4HeaderLen { ihl } => {
                write!(f, "IPv4 IHL of {ihl} is below the minimum of 5")
            }
        }
    }
}

/// Every way a walk can end without reaching the innermost header.
///
/// All variants are handled identically by the classifier: the walk
/// stops at once and the frame gets the fallback verdict. They are
/// kept distinct so that stats and logs can tell them apart.
#[derive(Clone, Copy, Debug, DError, Eq, PartialEq)]
#[derror(leaf_data = WalkError::data)]
pub enum WalkError {
    BoundsViolation(BoundsViolation),
    UnsupportedProtocol(Unsupported),
    DepthExceeded { depth: usize },
    Malformed(Malformed),
}

impl WalkError {
    fn data(&self, data: &mut [u64]) {
        if let WalkError::DepthExceeded { depth } = self {
            if let Some(v) = data.get_mut(0) {
                *v = *depth as u64;
            }
        }
    }
}

impl From<BoundsViolation> for WalkError {
    fn from(value: BoundsViolation) -> Self {
        Self::BoundsViolation(value)
    }
}

impl From<Unsupported> for WalkError {
    fn from(value: Unsupported) -> Self {
        Self::UnsupportedProtocol(value)
    }
}

impl From<Malformed> for WalkError {
    fn from(value: Malformed) -> Self {
        Self::Malformed(value)
    }
}

impl Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::BoundsViolation(e) => write!(f, "bounds violation: {e}"),
            WalkError::UnsupportedProtocol(e) => {
                write!(f, "unsupported protocol: {e}")
            }
            WalkError::DepthExceeded { depth } => {
                write!(f, "VLAN depth exceeded: tag {depth} is past the cap")
            }
            WalkError::Malformed(e) => write!(f, "malformed header: {e}"),
        }
    }
}
