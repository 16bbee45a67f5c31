// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! ICMPv6 headers.

use super::IcmpEchoHdr;
use super::IcmpMeta;
use crate::engine::cursor::HdrCursor;
use crate::engine::cursor::Peeked;
use crate::engine::error::WalkError;
use crate::engine::headers::HeaderView;
use crate::engine::headers::Layer;

pub const ICMPV6_ECHO_REQUEST: u8 = 128;
pub const ICMPV6_ECHO_REPLY: u8 = 129;
pub const ICMPV6_NEIGHBOR_SOLICIT: u8 = 135;

#[derive(
    Clone,
    Copy,
    Debug,
    zerocopy::FromBytes,
    zerocopy::Immutable,
    zerocopy::IntoBytes,
    zerocopy::KnownLayout,
    zerocopy::Unaligned,
)]
#[repr(transparent)]
pub struct Icmpv6Hdr(pub IcmpEchoHdr);

impl HeaderView for Icmpv6Hdr {
    const LAYER: Layer = Layer::Icmpv6;
}

/// Read the ICMPv6 header at the cursor and step past it.
pub fn parse(cur: &mut HdrCursor<'_>) -> Result<IcmpMeta, WalkError> {
    let Peeked { hdr, span } = cur.peek::<Icmpv6Hdr>()?;
    let meta =
        IcmpMeta::from_hdr(&hdr.0, ICMPV6_ECHO_REQUEST, ICMPV6_ECHO_REPLY);
    cur.advance(span);

    Ok(meta)
}
