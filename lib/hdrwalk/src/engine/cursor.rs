// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The header cursor: a single forward-only position in a frame.

use super::bounds::Span;
use super::error::BoundsViolation;
use super::headers::HeaderView;
use super::headers::Layer;

/// A header view together with the proof it was built from.
///
/// The view borrows the cursor, so it must be dropped before the cursor
/// can advance past it.
pub struct Peeked<'c, H> {
    pub hdr: &'c H,
    pub span: Span,
}

/// A position in a frame, advanced as headers are consumed.
///
/// There is exactly one cursor per walk. It never moves backwards and
/// only moves forward by a [`Span`] it has itself proven.
#[derive(Debug)]
pub struct HdrCursor<'a> {
    frame: &'a [u8],
    pos: usize,
}

impl<'a> HdrCursor<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame, pos: 0 }
    }

    /// The offset of the next unconsumed byte.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The offset one past the last byte of the frame.
    #[inline]
    pub fn data_end(&self) -> usize {
        self.frame.len()
    }

    /// Prove that `len` bytes starting at the cursor are in the frame.
    #[inline]
    pub fn check(
        &self,
        layer: Layer,
        len: usize,
    ) -> Result<Span, BoundsViolation> {
        Span::prove(layer, self.pos, len, self.data_end())
    }

    /// Check that a full `H` fits at the cursor and project a view of it.
    ///
    /// The cursor does not move.
    #[inline]
    pub fn peek<H: HeaderView>(
        &self,
    ) -> Result<Peeked<'_, H>, BoundsViolation> {
        let span = self.check(H::LAYER, H::SIZE)?;
        let violation = BoundsViolation {
            layer: H::LAYER,
            need: span.end(),
            have: self.data_end(),
        };

        // The span is in bounds and exactly `H::SIZE` long, so neither
        // of these can fail; they are mapped rather than unwrapped.
        let bytes = self.frame.get(span.start()..span.end()).ok_or(violation)?;
        let hdr = H::ref_from_bytes(bytes).map_err(|_| violation)?;

        Ok(Peeked { hdr, span })
    }

    /// Move past a proven span.
    #[inline]
    pub fn advance(&mut self, span: Span) {
        debug_assert_eq!(span.start(), self.pos, "stale span");
        debug_assert!(span.end() <= self.data_end());
        // Forward only, even for a span which somehow went stale.
        self.pos = self.pos.max(span.end());
    }
}
