// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Ethernet frames.

use super::cursor::HdrCursor;
use super::cursor::Peeked;
use super::error::WalkError;
use super::headers::EtherNext;
use super::headers::HeaderView;
use super::headers::Layer;
use crate::api::MacAddr;
use ingot::ethernet::Ethertype;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;
use zerocopy::byteorder::network_endian::U16;

pub const ETHER_TYPE_ARP: u16 = 0x0806;
pub const ETHER_TYPE_IPV6: u16 = 0x86DD;

/// IEEE 802.1Q VLAN tag.
pub const ETHER_TYPE_VLAN: Ethertype = Ethertype(0x8100);
/// IEEE 802.1AD service VLAN tag.
pub const ETHER_TYPE_QINQ: Ethertype = Ethertype(0x88A8);

pub const ETHER_ADDR_LEN: usize = 6;
pub const ETHER_HDR_SZ: usize = 14;

/// An Ethernet II header as it sits on the wire.
#[derive(
    Clone, Copy, Debug, FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct EtherHdr {
    pub dst: [u8; ETHER_ADDR_LEN],
    pub src: [u8; ETHER_ADDR_LEN],
    pub ether_type: U16,
}

impl HeaderView for EtherHdr {
    const LAYER: Layer = Layer::Ethernet;
}

impl EtherHdr {
    pub fn new(dst: MacAddr, src: MacAddr, ether_type: Ethertype) -> Self {
        Self {
            dst: dst.bytes(),
            src: src.bytes(),
            ether_type: U16::new(ether_type.0),
        }
    }
}

/// The fields of an Ethernet header, in host order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EtherMeta {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ether_type: Ethertype,
}

impl From<&EtherHdr> for EtherMeta {
    fn from(hdr: &EtherHdr) -> Self {
        Self {
            dst: MacAddr::from(hdr.dst),
            src: MacAddr::from(hdr.src),
            ether_type: Ethertype(hdr.ether_type.get()),
        }
    }
}

/// Read the Ethernet header at the cursor and step past it.
pub fn parse(
    cur: &mut HdrCursor<'_>,
) -> Result<(EtherMeta, EtherNext), WalkError> {
    let Peeked { hdr, span } = cur.peek::<EtherHdr>()?;
    let meta = EtherMeta::from(hdr);
    cur.advance(span);

    Ok((meta, EtherNext::from_ethertype(Layer::Ethernet, meta.ether_type)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::error::BoundsViolation;
    use crate::engine::error::Unsupported;

    #[rustfmt::skip]
    const ETH_IPV6: [u8; 14] = [
        // destination
        0xA8, 0x40, 0x25, 0xFF, 0x77, 0x77,
        // source
        0xA8, 0x40, 0x25, 0xFA, 0xFA, 0x37,
        // ether type
        0x86, 0xDD,
    ];

    #[test]
    fn parse_fields() {
        let mut cur = HdrCursor::new(&ETH_IPV6);
        let (meta, next) = parse(&mut cur).unwrap();
        assert_eq!(
            meta.dst,
            MacAddr::from([0xA8, 0x40, 0x25, 0xFF, 0x77, 0x77])
        );
        assert_eq!(
            meta.src,
            MacAddr::from([0xA8, 0x40, 0x25, 0xFA, 0xFA, 0x37])
        );
        assert_eq!(meta.ether_type.0, ETHER_TYPE_IPV6);
        assert_eq!(next, EtherNext::Ipv6);
        assert_eq!(cur.pos(), ETHER_HDR_SZ);
    }

    #[test]
    fn emit_matches_wire() {
        let hdr = EtherHdr::new(
            MacAddr::from([0xA8, 0x40, 0x25, 0xFF, 0x77, 0x77]),
            MacAddr::from([0xA8, 0x40, 0x25, 0xFA, 0xFA, 0x37]),
            Ethertype::IPV6,
        );
        assert_eq!(hdr.as_bytes(), &ETH_IPV6[..]);
    }

    #[test]
    fn arp_is_unsupported() {
        let mut frame = ETH_IPV6;
        frame[12..14].copy_from_slice(&ETHER_TYPE_ARP.to_be_bytes());
        let mut cur = HdrCursor::new(&frame);
        let (_, next) = parse(&mut cur).unwrap();
        assert_eq!(
            next,
            EtherNext::Unsupported(Unsupported {
                layer: Layer::Ethernet,
                value: ETHER_TYPE_ARP,
            })
        );
    }

    #[test]
    fn every_short_frame_is_rejected() {
        for len in 0..ETHER_HDR_SZ {
            let mut cur = HdrCursor::new(&ETH_IPV6[..len]);
            assert_eq!(
                parse(&mut cur),
                Err(WalkError::BoundsViolation(BoundsViolation {
                    layer: Layer::Ethernet,
                    need: ETHER_HDR_SZ,
                    have: len,
                }))
            );
            assert_eq!(cur.pos(), 0);
        }
    }
}
