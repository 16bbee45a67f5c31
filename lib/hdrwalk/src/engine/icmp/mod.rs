// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Internet Control Message Protocol (ICMP) shared data structures.
//!
//! ICMP and ICMPv6 share the same eight byte layout for the messages
//! the classifier cares about: type, code, checksum, and then the
//! identifier and sequence number of an echo.

pub mod v4;
pub mod v6;

use zerocopy::byteorder::network_endian::U16;

/// The common header of an ICMP or ICMPv6 message.
///
/// For non-echo messages `ident` and `seq` hold whatever the message
/// type puts in its "rest of header" and must not be interpreted.
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
#[repr(C)]
pub struct IcmpEchoHdr {
    pub msg_type: u8,
    pub code: u8,
    pub csum: [u8; 2],
    pub ident: U16,
    pub seq: U16,
}

pub const ICMP_HDR_SZ: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EchoKind {
    Request,
    Reply,
}

/// The identifying fields of an echo message, in host order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Echo {
    pub kind: EchoKind,
    pub ident: u16,
    pub seq: u16,
}

/// The fields of an ICMP or ICMPv6 header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IcmpMeta {
    pub msg_type: u8,
    pub code: u8,
    /// Present only for echo requests and replies.
    pub echo: Option<Echo>,
}

impl IcmpMeta {
    fn from_hdr(
        hdr: &IcmpEchoHdr,
        echo_request: u8,
        echo_reply: u8,
    ) -> Self {
        let kind = match hdr.msg_type {
            t if t == echo_request => Some(EchoKind::Request),
            t if t == echo_reply => Some(EchoKind::Reply),
            _ => None,
        };

        Self {
            msg_type: hdr.msg_type,
            code: hdr.code,
            echo: kind.map(|kind| Echo {
                kind,
                ident: hdr.ident.get(),
                seq: hdr.seq.get(),
            }),
        }
    }

    pub fn is_echo_request(&self) -> bool {
        matches!(self.echo, Some(Echo { kind: EchoKind::Request, .. }))
    }
}

/// The innermost header of a walked frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UlpMeta {
    Icmp(IcmpMeta),
    Icmpv6(IcmpMeta),
}

impl UlpMeta {
    pub fn icmp(&self) -> &IcmpMeta {
        match self {
            UlpMeta::Icmp(m) | UlpMeta::Icmpv6(m) => m,
        }
    }

    /// The sequence number of an echo request, if this is one.
    pub fn echo_request_seq(&self) -> Option<u16> {
        let icmp = self.icmp();
        match icmp.echo {
            Some(Echo { kind: EchoKind::Request, seq, .. }) => Some(seq),
            _ => None,
        }
    }
}
