// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! IEEE 802.1Q/802.1AD VLAN tags.

use super::cursor::HdrCursor;
use super::cursor::Peeked;
use super::error::WalkError;
use super::headers::EtherNext;
use super::headers::HeaderView;
use super::headers::Layer;
use super::headers::VlanKind;
use ingot::ethernet::Ethertype;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;
use zerocopy::byteorder::network_endian::U16;

pub const VLAN_HDR_SZ: usize = 4;
pub const VLAN_VID_MASK: u16 = 0x0FFF;
const VLAN_DEI_BIT: u16 = 0x1000;
const VLAN_PCP_SHIFT: u16 = 13;

/// The four bytes which follow a VLAN ethertype: the tag control
/// information and the encapsulated protocol.
#[derive(
    Clone, Copy, Debug, FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct VlanHdr {
    pub tci: U16,
    pub ether_type: U16,
}

impl HeaderView for VlanHdr {
    const LAYER: Layer = Layer::Vlan;
}

impl VlanHdr {
    pub fn new(pcp: u8, dei: bool, vid: u16, ether_type: Ethertype) -> Self {
        let tci = (u16::from(pcp & 0x7) << VLAN_PCP_SHIFT)
            | if dei { VLAN_DEI_BIT } else { 0 }
            | (vid & VLAN_VID_MASK);
        Self { tci: U16::new(tci), ether_type: U16::new(ether_type.0) }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VlanMeta {
    /// Which ethertype introduced this tag.
    pub kind: VlanKind,
    /// Priority code point.
    pub pcp: u8,
    /// Drop eligible indicator.
    pub dei: bool,
    /// VLAN identifier.
    pub vid: u16,
    /// The encapsulated protocol.
    pub ether_type: Ethertype,
}

impl VlanMeta {
    fn new(kind: VlanKind, hdr: &VlanHdr) -> Self {
        let tci = hdr.tci.get();
        Self {
            kind,
            pcp: (tci >> VLAN_PCP_SHIFT) as u8,
            dei: tci & VLAN_DEI_BIT != 0,
            vid: tci & VLAN_VID_MASK,
            ether_type: Ethertype(hdr.ether_type.get()),
        }
    }
}

/// Read one VLAN tag at the cursor and step past it.
pub fn parse(
    cur: &mut HdrCursor<'_>,
    kind: VlanKind,
) -> Result<(VlanMeta, EtherNext), WalkError> {
    let Peeked { hdr, span } = cur.peek::<VlanHdr>()?;
    let meta = VlanMeta::new(kind, hdr);
    cur.advance(span);

    Ok((meta, EtherNext::from_ethertype(Layer::Vlan, meta.ether_type)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::error::BoundsViolation;

    #[test]
    fn tci_fields() {
        // PCP 5, DEI set, VID 0xABC, carrying IPv4.
        let bytes = [0xBA, 0xBC, 0x08, 0x00];
        let mut cur = HdrCursor::new(&bytes);
        let (meta, next) = parse(&mut cur, VlanKind::Dot1Q).unwrap();
        assert_eq!(meta.pcp, 5);
        assert!(meta.dei);
        assert_eq!(meta.vid, 0xABC);
        assert_eq!(meta.kind, VlanKind::Dot1Q);
        assert_eq!(next, EtherNext::Ipv4);
        assert_eq!(cur.pos(), VLAN_HDR_SZ);

        let hdr = VlanHdr::new(5, true, 0xABC, Ethertype::IPV4);
        assert_eq!(hdr.as_bytes(), &bytes[..]);
    }

    #[test]
    fn nested_tag_is_reported() {
        let bytes = [0x00, 0x0A, 0x81, 0x00];
        let mut cur = HdrCursor::new(&bytes);
        let (meta, next) = parse(&mut cur, VlanKind::Dot1AD).unwrap();
        assert_eq!(meta.vid, 10);
        assert_eq!(next, EtherNext::Vlan(VlanKind::Dot1Q));
    }

    #[test]
    fn short_tag() {
        let bytes = [0x00, 0x0A, 0x81];
        let mut cur = HdrCursor::new(&bytes);
        assert_eq!(
            parse(&mut cur, VlanKind::Dot1Q),
            Err(WalkError::BoundsViolation(BoundsViolation {
                layer: Layer::Vlan,
                need: 4,
                have: 3,
            }))
        );
    }
}
