// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Routines for building the outer headers of a test frame.

use hdrwalk::api::MacAddr;
use hdrwalk::engine::ether::ETHER_TYPE_QINQ;
use hdrwalk::engine::ether::ETHER_TYPE_VLAN;
use hdrwalk::engine::ether::EtherHdr;
use hdrwalk::engine::headers::VlanKind;
use hdrwalk::engine::ip::v4::IPV4_HDR_SZ;
use hdrwalk::engine::ip::v4::Ipv4Hdr;
use hdrwalk::engine::ip::v6::Ipv6Hdr;
use hdrwalk::engine::vlan::VlanHdr;
use hdrwalk::ingot::ethernet::Ethertype;
use hdrwalk::ingot::ip::IpProtocol;
use smoltcp::wire::Ipv4Packet;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use zerocopy::IntoBytes;
use zerocopy::byteorder::network_endian::U16;
use zerocopy::byteorder::network_endian::U32;

/// The IPv4 NOP option, used to pad out generated option space.
const IPV4_OPT_NOP: u8 = 1;

/// A VLAN tag to place on a generated frame.
#[derive(Clone, Copy, Debug)]
pub struct TestTag {
    pub kind: VlanKind,
    pub vid: u16,
    pub pcp: u8,
}

impl TestTag {
    pub fn dot1q(vid: u16) -> Self {
        Self { kind: VlanKind::Dot1Q, vid, pcp: 0 }
    }

    pub fn dot1ad(vid: u16) -> Self {
        Self { kind: VlanKind::Dot1AD, vid, pcp: 0 }
    }

    fn ethertype(&self) -> Ethertype {
        match self.kind {
            VlanKind::Dot1Q => ETHER_TYPE_VLAN,
            VlanKind::Dot1AD => ETHER_TYPE_QINQ,
        }
    }
}

/// Write an Ethernet header followed by `tags` (outermost first), with
/// the innermost ethertype set to `inner`.
pub fn ether_with_tags(
    src: MacAddr,
    dst: MacAddr,
    tags: &[TestTag],
    inner: Ethertype,
) -> Vec<u8> {
    let mut out = Vec::new();
    let first = tags.first().map(TestTag::ethertype).unwrap_or(inner);
    out.extend_from_slice(EtherHdr::new(dst, src, first).as_bytes());

    for (i, tag) in tags.iter().enumerate() {
        let next = tags.get(i + 1).map(TestTag::ethertype).unwrap_or(inner);
        let hdr = VlanHdr::new(tag.pcp, false, tag.vid, next);
        out.extend_from_slice(hdr.as_bytes());
    }

    out
}

/// Write an IPv4 header carrying `payload_len` bytes of `proto`, with
/// `opt_words` 32-bit words of NOP options.
pub fn ipv4_hdr(
    src: Ipv4Addr,
    dst: Ipv4Addr,
    proto: IpProtocol,
    payload_len: usize,
    opt_words: u8,
) -> Vec<u8> {
    assert!(opt_words <= 10, "IHL cannot exceed 15");
    let hdr_len = IPV4_HDR_SZ + usize::from(opt_words) * 4;
    let hdr = Ipv4Hdr {
        ver_ihl: 0x40 | (5 + opt_words),
        dscp_ecn: 0,
        total_len: U16::new((hdr_len + payload_len) as u16),
        ident: U16::new(0x2a),
        frag_and_flags: U16::new(0x4000),
        ttl: 64,
        proto: proto.0,
        csum: [0; 2],
        src: src.octets(),
        dst: dst.octets(),
    };

    let mut out = hdr.as_bytes().to_vec();
    out.resize(hdr_len, IPV4_OPT_NOP);
    Ipv4Packet::new_unchecked(&mut out[..]).fill_checksum();
    out
}

/// Write an IPv6 header with no extension headers.
pub fn ipv6_hdr(
    src: Ipv6Addr,
    dst: Ipv6Addr,
    next_hdr: IpProtocol,
    payload_len: usize,
) -> Vec<u8> {
    let hdr = Ipv6Hdr {
        vtc_flow: U32::new(6 << 28),
        payload_len: U16::new(payload_len as u16),
        next_hdr: next_hdr.0,
        hop_limit: 64,
        src: src.octets(),
        dst: dst.octets(),
    };

    hdr.as_bytes().to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ipv4_checksum_verifies() {
        let hdr = ipv4_hdr(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            IpProtocol::ICMP,
            8,
            2,
        );
        assert_eq!(hdr.len(), 28);
        assert_eq!(hdr[0], 0x47);
        let pkt = Ipv4Packet::new_unchecked(&hdr[..]);
        assert_eq!(pkt.header_len(), 28);
        assert!(pkt.verify_checksum());
    }

    #[test]
    fn tags_chain_ethertypes() {
        let tags = [TestTag::dot1ad(10), TestTag::dot1q(20)];
        let out = ether_with_tags(
            MacAddr::ZERO,
            MacAddr::BROADCAST,
            &tags,
            Ethertype::IPV6,
        );
        assert_eq!(out.len(), 14 + 8);
        assert_eq!(&out[12..14], &[0x88, 0xA8]);
        assert_eq!(&out[16..18], &[0x81, 0x00]);
        assert_eq!(&out[20..22], &[0x86, 0xDD]);
    }
}
