// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! IPv6 headers.

use crate::engine::cursor::HdrCursor;
use crate::engine::cursor::Peeked;
use crate::engine::error::WalkError;
use crate::engine::headers::HeaderView;
use crate::engine::headers::IpNext;
use crate::engine::headers::Layer;
use core::net::Ipv6Addr;
use ingot::ip::IpProtocol;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;
use zerocopy::byteorder::network_endian::U16;
use zerocopy::byteorder::network_endian::U32;

pub const IPV6_HDR_SZ: usize = 40;

#[derive(
    Clone, Copy, Debug, FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct Ipv6Hdr {
    /// Version, traffic class and flow label.
    pub vtc_flow: U32,
    pub payload_len: U16,
    pub next_hdr: u8,
    pub hop_limit: u8,
    pub src: [u8; 16],
    pub dst: [u8; 16],
}

impl HeaderView for Ipv6Hdr {
    const LAYER: Layer = Layer::Ipv6;
}

impl Ipv6Hdr {
    #[inline]
    pub fn version(&self) -> u8 {
        (self.vtc_flow.get() >> 28) as u8
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ipv6Meta {
    pub src: Ipv6Addr,
    pub dst: Ipv6Addr,
    pub next_header: IpProtocol,
    pub hop_limit: u8,
    pub payload_len: u16,
}

impl From<&Ipv6Hdr> for Ipv6Meta {
    fn from(hdr: &Ipv6Hdr) -> Self {
        Self {
            src: Ipv6Addr::from(hdr.src),
            dst: Ipv6Addr::from(hdr.dst),
            next_header: IpProtocol(hdr.next_hdr),
            hop_limit: hdr.hop_limit,
            payload_len: hdr.payload_len.get(),
        }
    }
}

/// Read the fixed IPv6 header at the cursor and step past it.
pub fn parse(
    cur: &mut HdrCursor<'_>,
) -> Result<(Ipv6Meta, IpNext), WalkError> {
    let Peeked { hdr, span } = cur.peek::<Ipv6Hdr>()?;
    let meta = Ipv6Meta::from(hdr);
    cur.advance(span);

    Ok((meta, IpNext::from_ipv6_next_header(meta.next_header)))
}
