// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! A bounds-checked, cursor-driven header walker which classifies
//! received frames.
//!
//! Each frame is walked from its Ethernet header, through at most
//! [`engine::walk::VLAN_MAX_DEPTH`] VLAN tags, an IPv4 or IPv6 header,
//! and finally an ICMP or ICMPv6 header. Every read is preceded by an
//! explicit proof that the header lies within the frame. The echo
//! sequence number found at the end of the walk decides the frame's
//! [`api::Verdict`].

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::len_without_is_empty)]
#![deny(unreachable_patterns)]
#![deny(unused_must_use)]

#[cfg(feature = "engine")]
pub use ingot;

#[cfg(feature = "api")]
pub mod api {
    pub use hdrwalk_api::*;
}
#[cfg(feature = "engine")]
pub mod d_error;
#[cfg(feature = "engine")]
pub mod engine;
#[cfg(all(feature = "engine", feature = "std"))]
pub mod print;
