// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The dispatch loop.
//!
//! A walk moves through the following states, each driven by the
//! next-protocol token returned by the previous parser:
//!
//! ```text
//! AtEthernet --Vlan--> AtVlan(0) --Vlan--> ... --Vlan--> AtVlan(MAX)
//!     |                   |                                  |
//!     +--Ipv4/Ipv6--------+--Ipv4/Ipv6-----------------------+--> AtIp
//!                                                                  |
//!                                      AtTransport <--Icmp/Icmpv6--+
//!                                          |
//!                                          +--> Done
//! ```
//!
//! Any failed bounds check or unrecognised token ends the walk with a
//! [`WalkError`]. A VLAN tag found once `MAX` tags have been read is
//! [`WalkError::DepthExceeded`], and is rejected without being read.
//!
//! The VLAN state is a `for` loop over a compile-time range, so the
//! number of steps in a walk is bounded by the number of parsers plus
//! the VLAN cap.

use super::cursor::HdrCursor;
use super::error::WalkError;
use super::ether;
use super::ether::EtherMeta;
use super::headers::EtherNext;
use super::headers::IpNext;
use super::icmp;
use super::icmp::UlpMeta;
use super::ip;
use super::ip::L3Meta;
use super::vlan;
use super::vlan::VlanMeta;
use heapless::Vec;

/// The most VLAN tags a frame may carry: one 802.1Q tag inside one
/// 802.1AD (QinQ) tag.
pub const VLAN_MAX_DEPTH: usize = 2;

/// Every header of a fully walked frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Walked<const MAX_VLAN: usize = { VLAN_MAX_DEPTH }> {
    pub ether: EtherMeta,
    /// VLAN tags, outermost first.
    pub vlans: Vec<VlanMeta, MAX_VLAN>,
    pub l3: L3Meta,
    pub ulp: UlpMeta,
    /// The offset of the first byte after the innermost header.
    pub hdr_len: usize,
}

impl<const MAX_VLAN: usize> Walked<MAX_VLAN> {
    pub fn vlan_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.vlans.iter().map(|v| v.vid)
    }

    /// The sequence number which decides the verdict, if the innermost
    /// header is an echo request.
    pub fn echo_request_seq(&self) -> Option<u16> {
        self.ulp.echo_request_seq()
    }
}

/// Walk a frame with the default VLAN cap.
pub fn walk(frame: &[u8]) -> Result<Walked, WalkError> {
    walk_with_depth::<VLAN_MAX_DEPTH>(frame)
}

/// Walk a frame, accepting at most `MAX_VLAN` VLAN tags.
pub fn walk_with_depth<const MAX_VLAN: usize>(
    frame: &[u8],
) -> Result<Walked<MAX_VLAN>, WalkError> {
    let mut cur = HdrCursor::new(frame);

    // AtEthernet
    let (ether, mut next) = ether::parse(&mut cur)?;

    // AtVlan(depth)
    let mut vlans = Vec::<VlanMeta, MAX_VLAN>::new();
    for depth in 0..=MAX_VLAN {
        let EtherNext::Vlan(kind) = next else {
            break;
        };

        if depth == MAX_VLAN {
            return Err(WalkError::DepthExceeded { depth: depth + 1 });
        }

        let (tag, inner) = vlan::parse(&mut cur, kind)?;
        vlans
            .push(tag)
            .map_err(|_| WalkError::DepthExceeded { depth: depth + 1 })?;
        next = inner;
    }

    // AtIp
    let (l3, next) = match next {
        EtherNext::Ipv4 => {
            let (meta, next) = ip::v4::parse(&mut cur)?;
            (L3Meta::Ipv4(meta), next)
        }

        EtherNext::Ipv6 => {
            let (meta, next) = ip::v6::parse(&mut cur)?;
            (L3Meta::Ipv6(meta), next)
        }

        EtherNext::Unsupported(u) => return Err(u.into()),

        // The loop above either consumed every tag or returned.
        EtherNext::Vlan(_) => {
            return Err(WalkError::DepthExceeded { depth: MAX_VLAN + 1 });
        }
    };

    // AtTransport
    let ulp = match next {
        IpNext::Icmp => UlpMeta::Icmp(icmp::v4::parse(&mut cur)?),
        IpNext::Icmpv6 => UlpMeta::Icmpv6(icmp::v6::parse(&mut cur)?),
        IpNext::Unsupported(u) => return Err(u.into()),
    };

    // Done
    Ok(Walked { ether, vlans, l3, ulp, hdr_len: cur.pos() })
}
