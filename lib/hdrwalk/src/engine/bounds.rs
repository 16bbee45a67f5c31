// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The bounds oracle.
//!
//! [`fits()`] is the only primitive which may justify a read from the
//! frame. Parsers never call it directly; they ask the cursor for a
//! [`Span`], which can only be produced by a successful check.

use super::error::BoundsViolation;
use super::headers::Layer;

/// Does a header ending at `hdr_end` lie wholly within a frame ending at
/// `data_end`?
///
/// Both values are offsets one past the last byte, so a header may end
/// exactly at the end of the frame.
#[inline(always)]
pub const fn fits(data_end: usize, hdr_end: usize) -> bool {
    hdr_end <= data_end
}

/// A range of the frame proven to be in bounds.
///
/// Spans are consumed by [`super::cursor::HdrCursor::advance()`] and
/// cannot be copied, so each proof moves the cursor at most once.
#[derive(Debug, Eq, PartialEq)]
#[must_use]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Prove that `len` bytes starting at `start` lie within a frame of
    /// `data_end` bytes.
    #[inline]
    pub(crate) fn prove(
        layer: Layer,
        start: usize,
        len: usize,
        data_end: usize,
    ) -> Result<Self, BoundsViolation> {
        let Some(hdr_end) = start.checked_add(len) else {
            return Err(BoundsViolation { layer, need: usize::MAX, have: data_end });
        };

        if !fits(data_end, hdr_end) {
            return Err(BoundsViolation { layer, need: hdr_end, have: data_end });
        }

        Ok(Self { start, end: hdr_end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fits_is_inclusive_of_the_end() {
        assert!(fits(14, 14));
        assert!(fits(15, 14));
        assert!(!fits(13, 14));
        assert!(fits(0, 0));
        assert!(!fits(0, 1));
    }

    #[test]
    fn prove_reports_need_and_have() {
        let span = Span::prove(Layer::Ethernet, 0, 14, 14).unwrap();
        assert_eq!((span.start(), span.end(), span.len()), (0, 14, 14));

        let err = Span::prove(Layer::Vlan, 14, 4, 17).unwrap_err();
        assert_eq!(
            err,
            BoundsViolation { layer: Layer::Vlan, need: 18, have: 17 }
        );
    }

    #[test]
    fn prove_rejects_overflow() {
        let err = Span::prove(Layer::Ipv4Options, usize::MAX, 2, 64);
        assert_eq!(
            err,
            Err(BoundsViolation {
                layer: Layer::Ipv4Options,
                need: usize::MAX,
                have: 64,
            })
        );
    }
}
