// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Routines for ICMP testing.

use crate::frame::TestTag;
use crate::frame::ether_with_tags;
use crate::frame::ipv4_hdr;
use crate::frame::ipv6_hdr;
use crate::GUEST_IP4;
use crate::GUEST_IP6;
use crate::GUEST_MAC;
use crate::GW_MAC;
use crate::REMOTE_IP4;
use crate::REMOTE_IP6;
use hdrwalk::api::MacAddr;
use hdrwalk::ingot::ethernet::Ethertype;
use hdrwalk::ingot::ip::IpProtocol;
use smoltcp::wire::Icmpv4Packet;
use smoltcp::wire::Icmpv4Repr;
use smoltcp::wire::Icmpv6Packet;
use smoltcp::wire::Icmpv6Repr;
use smoltcp::wire::Ipv6Address;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;

#[derive(Clone, Copy, Debug)]
pub enum IcmpEchoType {
    Req,
    Reply,
}

/// Everything needed to generate one echo frame.
///
/// Start from [`EchoFrame::v4()`] or [`EchoFrame::v6()`] and adjust the
/// public fields as needed.
#[derive(Clone, Debug)]
pub struct EchoFrame {
    pub etype: IcmpEchoType,
    pub eth_src: MacAddr,
    pub eth_dst: MacAddr,
    pub tags: Vec<TestTag>,
    pub ip_src: IpAddr,
    pub ip_dst: IpAddr,
    /// 32-bit words of IPv4 options; ignored for IPv6.
    pub ipv4_opt_words: u8,
    pub ident: u16,
    pub seq_no: u16,
    pub data: Vec<u8>,
}

impl EchoFrame {
    /// An untagged ICMPv4 echo request.
    pub fn v4(seq_no: u16) -> Self {
        Self::new(IpAddr::V4(GUEST_IP4), IpAddr::V4(REMOTE_IP4), seq_no)
    }

    /// An untagged ICMPv6 echo request.
    pub fn v6(seq_no: u16) -> Self {
        Self::new(IpAddr::V6(GUEST_IP6), IpAddr::V6(REMOTE_IP6), seq_no)
    }

    fn new(ip_src: IpAddr, ip_dst: IpAddr, seq_no: u16) -> Self {
        Self {
            etype: IcmpEchoType::Req,
            eth_src: GUEST_MAC,
            eth_dst: GW_MAC,
            tags: vec![],
            ip_src,
            ip_dst,
            ipv4_opt_words: 0,
            ident: 7,
            seq_no,
            data: b"reunion\0".to_vec(),
        }
    }

    pub fn reply(mut self) -> Self {
        self.etype = IcmpEchoType::Reply;
        self
    }

    /// Tag with one 802.1Q tag per VID, outermost first.
    pub fn vlans(mut self, vids: &[u16]) -> Self {
        self.tags = vids.iter().copied().map(TestTag::dot1q).collect();
        self
    }

    pub fn tags(mut self, tags: &[TestTag]) -> Self {
        self.tags = tags.to_vec();
        self
    }

    pub fn ipv4_options(mut self, words: u8) -> Self {
        self.ipv4_opt_words = words;
        self
    }

    /// Serialize the frame.
    pub fn build(&self) -> Vec<u8> {
        match (self.ip_src, self.ip_dst) {
            (IpAddr::V4(src), IpAddr::V4(dst)) => self.build_v4(src, dst),
            (IpAddr::V6(src), IpAddr::V6(dst)) => self.build_v6(src, dst),
            (_, _) => panic!("IP src and dst versions must match"),
        }
    }

    fn build_v4(&self, src: Ipv4Addr, dst: Ipv4Addr) -> Vec<u8> {
        let body = icmpv4_echo(self.etype, self.ident, self.seq_no, &self.data);
        let mut pkt = ether_with_tags(
            self.eth_src,
            self.eth_dst,
            &self.tags,
            Ethertype::IPV4,
        );
        pkt.extend(ipv4_hdr(
            src,
            dst,
            IpProtocol::ICMP,
            body.len(),
            self.ipv4_opt_words,
        ));
        pkt.extend(body);
        pkt
    }

    fn build_v6(&self, src: Ipv6Addr, dst: Ipv6Addr) -> Vec<u8> {
        let body = icmpv6_echo(
            self.etype,
            src,
            dst,
            self.ident,
            self.seq_no,
            &self.data,
        );
        let mut pkt = ether_with_tags(
            self.eth_src,
            self.eth_dst,
            &self.tags,
            Ethertype::IPV6,
        );
        pkt.extend(ipv6_hdr(src, dst, IpProtocol::ICMP_V6, body.len()));
        pkt.extend(body);
        pkt
    }
}

/// Emit an ICMPv4 echo message, checksum included.
pub fn icmpv4_echo(
    etype: IcmpEchoType,
    ident: u16,
    seq_no: u16,
    data: &[u8],
) -> Vec<u8> {
    let icmp = match etype {
        IcmpEchoType::Req => Icmpv4Repr::EchoRequest { ident, seq_no, data },
        IcmpEchoType::Reply => Icmpv4Repr::EchoReply { ident, seq_no, data },
    };
    let mut icmp_bytes = vec![0u8; icmp.buffer_len()];
    let mut icmp_pkt = Icmpv4Packet::new_unchecked(&mut icmp_bytes);
    icmp.emit(&mut icmp_pkt, &Default::default());
    icmp_bytes
}

/// Emit an ICMPv6 echo message, checksum (over the pseudo-header)
/// included.
pub fn icmpv6_echo(
    etype: IcmpEchoType,
    ip_src: Ipv6Addr,
    ip_dst: Ipv6Addr,
    ident: u16,
    seq_no: u16,
    data: &[u8],
) -> Vec<u8> {
    let icmp = match etype {
        IcmpEchoType::Req => Icmpv6Repr::EchoRequest { ident, seq_no, data },
        IcmpEchoType::Reply => Icmpv6Repr::EchoReply { ident, seq_no, data },
    };

    let mut body_bytes = vec![0u8; icmp.buffer_len()];
    let mut req_pkt = Icmpv6Packet::new_unchecked(&mut body_bytes);
    icmp.emit(
        &Ipv6Address::from_bytes(&ip_src.octets()).into(),
        &Ipv6Address::from_bytes(&ip_dst.octets()).into(),
        &mut req_pkt,
        &Default::default(),
    );
    body_bytes
}
