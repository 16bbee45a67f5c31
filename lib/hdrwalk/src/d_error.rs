// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Utility for converting nested enum errors into a short trail of
//! static names, so that a rejected frame can be logged or counted
//! without paying the `fmt` tax on the fast path.

use core::fmt;
pub use derror_macro::DError;

/// A trait used for walking chains of errors which store useful data in
/// a leaf node.
pub trait DError {
    /// Provide the name of an error's discriminant.
    fn discriminant(&self) -> &'static str;

    /// Provide a reference to the next error in the chain.
    fn child(&self) -> Option<&dyn DError>;

    /// Store data from a leaf error alongside the trail.
    fn leaf_data(&self, _data: &mut [u64]) {}
}

/// The names of every `enum` discriminant encountered when resolving
/// an error, outermost first, plus the data held by the leaf.
#[derive(Clone, Copy, Debug)]
pub struct ErrorTrail<const L: usize> {
    len: usize,
    more: bool,
    data: [u64; 2],
    entries: [&'static str; L],
}

/// Signals that an [`ErrorTrail`] could not contain a new entry.
#[derive(Clone, Copy, Debug)]
pub struct ErrorTrailFull;

impl<const L: usize> Default for ErrorTrail<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const L: usize> ErrorTrail<L> {
    /// Create storage to hold at most `L` names.
    pub const fn new() -> Self {
        Self { len: 0, more: false, data: [0; 2], entries: [""; L] }
    }

    /// Flatten a nested error into a trail.
    ///
    /// If `err` is deeper than `L` the truncated trail is returned as
    /// the error value.
    pub fn from_err(err: &dyn DError) -> Result<Self, Self> {
        let mut out = Self::new();

        if out.append(err).is_err() { Err(out) } else { Ok(out) }
    }

    /// Push all layers (and leaf data) of an error onto the trail.
    pub fn append(&mut self, err: &dyn DError) -> Result<(), ErrorTrailFull> {
        let mut top: Option<&dyn DError> = Some(err);
        while let Some(el) = top {
            self.append_name(el.discriminant())?;
            top = el.child();

            if top.is_none() {
                el.leaf_data(&mut self.data[..]);
            }
        }
        Ok(())
    }

    /// Append a single name.
    pub fn append_name(
        &mut self,
        name: &'static str,
    ) -> Result<(), ErrorTrailFull> {
        let Some(slot) = self.entries.get_mut(self.len) else {
            self.more = true;
            return Err(ErrorTrailFull);
        };

        *slot = name;
        self.len += 1;

        Ok(())
    }

    /// Return the number of stored names.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether this trail contains no names.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Were names dropped because the trail was full?
    pub fn is_truncated(&self) -> bool {
        self.more
    }

    /// All stored names, outermost first.
    pub fn entries(&self) -> &[&'static str] {
        &self.entries[..self.len]
    }

    /// Data stored by the leaf error.
    pub fn data(&self) -> &[u64] {
        &self.data[..]
    }
}

/// Names are joined with `.`, with a trailing `..` when truncated.
impl<const L: usize> fmt::Display for ErrorTrail<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name)?;
        }

        if self.more {
            f.write_str("..")?;
        }

        Ok(())
    }
}
