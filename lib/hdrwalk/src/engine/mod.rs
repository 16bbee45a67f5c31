// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The classification engine.
//!
//! All code under this namespace is guarded by the `engine` feature flag.
//!
//! A frame flows through the engine as follows:
//!
//! ```text
//! frame -> ether -> vlan{0..=VLAN_MAX_DEPTH} -> ip::{v4,v6} -> icmp::{v4,v6}
//!       -> verdict
//! ```
//!
//! Every parser reads through a single [`cursor::HdrCursor`], and every
//! header view handed out by the cursor is backed by a
//! [`bounds::Span`] proven by the bounds oracle.
pub mod bounds;
pub mod classify;
pub mod cursor;
pub mod error;
pub mod ether;
pub mod headers;
pub mod icmp;
pub mod ip;
pub mod stat;
pub mod verdict;
pub mod vlan;
pub mod walk;

pub use classify::Classifier;
pub use classify::Outcome;
pub use classify::classify;
pub use error::WalkError;
pub use walk::VLAN_MAX_DEPTH;
pub use walk::Walked;
pub use walk::walk;
