// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! IPv4 headers.
//!
//! An IPv4 header is the one header whose size is not known up front:
//! the IHL field gives the length in 32-bit words. It is therefore
//! checked twice, first for the fixed 20 bytes which hold the IHL, and
//! then for the full length the IHL describes.

use crate::engine::cursor::HdrCursor;
use crate::engine::cursor::Peeked;
use crate::engine::error::Malformed;
use crate::engine::error::WalkError;
use crate::engine::headers::HeaderView;
use crate::engine::headers::IpNext;
use crate::engine::headers::Layer;
use core::net::Ipv4Addr;
use ingot::ip::IpProtocol;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;
use zerocopy::byteorder::network_endian::U16;

/// The size of an IPv4 header without options.
pub const IPV4_HDR_SZ: usize = 20;
/// The largest header an IHL of 15 can describe.
pub const IPV4_HDR_MAX_SZ: usize = 60;

const IPV4_IHL_MIN: u8 = 5;

/// The fixed part of an IPv4 header.
#[derive(
    Clone, Copy, Debug, FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct Ipv4Hdr {
    pub ver_ihl: u8,
    pub dscp_ecn: u8,
    pub total_len: U16,
    pub ident: U16,
    pub frag_and_flags: U16,
    pub ttl: u8,
    pub proto: u8,
    pub csum: [u8; 2],
    pub src: [u8; 4],
    pub dst: [u8; 4],
}

impl HeaderView for Ipv4Hdr {
    const LAYER: Layer = Layer::Ipv4;
}

impl Ipv4Hdr {
    #[inline]
    pub fn version(&self) -> u8 {
        self.ver_ihl >> 4
    }

    #[inline]
    pub fn ihl(&self) -> u8 {
        self.ver_ihl & 0x0F
    }

    /// The header length in bytes, as declared by the IHL field.
    #[inline]
    pub fn hdr_len(&self) -> usize {
        usize::from(self.ihl()) * 4
    }
}

/// The fields of an IPv4 header, in host order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ipv4Meta {
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub protocol: IpProtocol,
    pub ttl: u8,
    pub total_len: u16,
    /// The full header length including options.
    pub hdr_len: usize,
}

impl From<&Ipv4Hdr> for Ipv4Meta {
    fn from(hdr: &Ipv4Hdr) -> Self {
        Self {
            src: Ipv4Addr::from(hdr.src),
            dst: Ipv4Addr::from(hdr.dst),
            protocol: IpProtocol(hdr.proto),
            ttl: hdr.ttl,
            total_len: hdr.total_len.get(),
            hdr_len: hdr.hdr_len(),
        }
    }
}

/// Read the IPv4 header (and any options) at the cursor and step past
/// it.
pub fn parse(
    cur: &mut HdrCursor<'_>,
) -> Result<(Ipv4Meta, IpNext), WalkError> {
    // First pass: the fixed header, which is where the IHL lives.
    let Peeked { hdr, .. } = cur.peek::<Ipv4Hdr>()?;
    if hdr.ihl() < IPV4_IHL_MIN {
        return Err(Malformed::Ipv4HeaderLen { ihl: hdr.ihl() }.into());
    }
    let meta = Ipv4Meta::from(hdr);

    // Second pass: the size the header claims for itself. The cursor
    // moves by this length rather than the minimum.
    let full = cur.check(Layer::Ipv4Options, meta.hdr_len)?;
    cur.advance(full);

    Ok((meta, IpNext::from_ipv4_protocol(meta.protocol)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::error::BoundsViolation;
    use crate::engine::error::Unsupported;

    #[rustfmt::skip]
    fn hdr_bytes(ihl: u8, proto: u8) -> [u8; IPV4_HDR_SZ] {
        [
            0x40 | ihl, 0x00, 0x00, 0x54,
            0x12, 0x34, 0x40, 0x00,
            0x40, proto, 0x00, 0x00,
            10, 0, 0, 1,
            10, 0, 0, 2,
        ]
    }

    #[test]
    fn minimal_header() {
        let bytes = hdr_bytes(5, 1);
        let mut cur = HdrCursor::new(&bytes);
        let (meta, next) = parse(&mut cur).unwrap();
        assert_eq!(meta.src, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(meta.dst, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(meta.ttl, 64);
        assert_eq!(meta.total_len, 84);
        assert_eq!(meta.hdr_len, IPV4_HDR_SZ);
        assert_eq!(next, IpNext::Icmp);
        assert_eq!(cur.pos(), IPV4_HDR_SZ);
    }

    #[test]
    fn every_ihl_sizes_the_header() {
        for ihl in IPV4_IHL_MIN..=15 {
            let mut bytes = [0u8; IPV4_HDR_MAX_SZ + 8];
            bytes[..IPV4_HDR_SZ].copy_from_slice(&hdr_bytes(ihl, 1));
            let mut cur = HdrCursor::new(&bytes);
            let (meta, _) = parse(&mut cur).unwrap();
            assert_eq!(meta.hdr_len, usize::from(ihl) * 4);
            assert_eq!(cur.pos(), usize::from(ihl) * 4);
        }
    }

    #[test]
    fn options_past_end_are_rejected() {
        // IHL 15 claims 60 bytes; the minimal 20 are present, 40 are not.
        let mut bytes = [0u8; 40];
        bytes[..IPV4_HDR_SZ].copy_from_slice(&hdr_bytes(15, 1));
        let mut cur = HdrCursor::new(&bytes);
        assert_eq!(
            parse(&mut cur),
            Err(WalkError::BoundsViolation(BoundsViolation {
                layer: Layer::Ipv4Options,
                need: 60,
                have: 40,
            }))
        );
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn options_ending_at_frame_end_fit() {
        let mut bytes = [0u8; 24];
        bytes[..IPV4_HDR_SZ].copy_from_slice(&hdr_bytes(6, 1));
        let mut cur = HdrCursor::new(&bytes);
        assert!(parse(&mut cur).is_ok());
        assert_eq!(cur.pos(), 24);
    }

    #[test]
    fn short_ihl_is_malformed() {
        for ihl in 0..IPV4_IHL_MIN {
            let bytes = hdr_bytes(ihl, 1);
            let mut cur = HdrCursor::new(&bytes);
            assert_eq!(
                parse(&mut cur),
                Err(WalkError::Malformed(Malformed::Ipv4HeaderLen { ihl }))
            );
            assert_eq!(cur.pos(), 0);
        }
    }

    #[test]
    fn minimal_header_truncated() {
        let bytes = hdr_bytes(5, 1);
        let mut cur = HdrCursor::new(&bytes[..19]);
        assert_eq!(
            parse(&mut cur),
            Err(WalkError::BoundsViolation(BoundsViolation {
                layer: Layer::Ipv4,
                need: 20,
                have: 19,
            }))
        );
    }

    #[test]
    fn icmpv6_over_ipv4_is_unsupported() {
        let bytes = hdr_bytes(5, 58);
        let mut cur = HdrCursor::new(&bytes);
        let (_, next) = parse(&mut cur).unwrap();
        assert_eq!(
            next,
            IpNext::Unsupported(Unsupported { layer: Layer::Ipv4, value: 58 })
        );
    }
}
