// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Common routines for integration tests, benchmarks and tooling which
//! need well-formed frames to feed the walker.

// This type of pedantry is more trouble than it's worth here.
#![allow(dead_code)]

pub mod frame;
pub mod icmp;
pub mod pcap;

// Let's make our lives easier and pub use a bunch of stuff.
pub use frame::TestTag;
pub use hdrwalk::api::IngressMeta;
pub use hdrwalk::api::MacAddr;
pub use hdrwalk::api::Verdict;
pub use hdrwalk::engine::Classifier;
pub use hdrwalk::engine::Outcome;
pub use hdrwalk::engine::VLAN_MAX_DEPTH;
pub use hdrwalk::engine::WalkError;
pub use hdrwalk::engine::classify;
pub use hdrwalk::engine::headers::Layer;
pub use hdrwalk::engine::headers::VlanKind;
pub use hdrwalk::engine::walk;
pub use hdrwalk::ingot::ethernet::Ethertype;
pub use hdrwalk::ingot::ip::IpProtocol;
pub use icmp::EchoFrame;
pub use icmp::IcmpEchoType;
pub use pcap::PcapBuilder;
pub use std::net::IpAddr;
pub use std::net::Ipv4Addr;
pub use std::net::Ipv6Addr;

pub const GUEST_MAC: MacAddr =
    MacAddr::from_const([0xA8, 0x40, 0x25, 0xF7, 0x00, 0x01]);
pub const GW_MAC: MacAddr =
    MacAddr::from_const([0xA8, 0x40, 0x25, 0xFF, 0x77, 0x77]);

pub const GUEST_IP4: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 5);
pub const REMOTE_IP4: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

pub const GUEST_IP6: Ipv6Addr =
    Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 5);
pub const REMOTE_IP6: Ipv6Addr =
    Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1);

/// Decode a frame written as hex. Whitespace and `:` separators are
/// ignored, as is a leading `0x`.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let digits: Vec<u8> = s
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':')
        .collect();

    if digits.len() % 2 != 0 {
        return Err("odd number of digits".to_string());
    }

    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|p| u8::from_str_radix(p, 16).ok())
                .ok_or_else(|| {
                    format!("bad digits {:?}", String::from_utf8_lossy(pair))
                })
        })
        .collect()
}

/// Decode a frame written as hex, panicking on bad input.
pub fn hex_frame(s: &str) -> Vec<u8> {
    parse_hex(s).unwrap_or_else(|e| panic!("invalid hex frame: {e}"))
}
