// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Types shared by every header parser: the layer names, the
//! next-protocol tokens threaded between parsers, and the trait which
//! lets the cursor project a header view over the frame.

use super::error::Unsupported;
use super::ether::ETHER_TYPE_QINQ;
use super::ether::ETHER_TYPE_VLAN;
use core::fmt;
use core::fmt::Display;
use ingot::ethernet::Ethertype;
use ingot::ip::IpProtocol;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;

/// The headers the walker knows how to read.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Layer {
    Ethernet,
    Vlan,
    Ipv4,
    /// The part of an IPv4 header beyond its fixed 20 bytes, as sized
    /// by the IHL field.
    Ipv4Options,
    Ipv6,
    Icmp,
    Icmpv6,
}

impl Layer {
    pub const fn as_str(self) -> &'static str {
        match self {
            Layer::Ethernet => "Ethernet",
            Layer::Vlan => "Vlan",
            Layer::Ipv4 => "Ipv4",
            Layer::Ipv4Options => "Ipv4Options",
            Layer::Ipv6 => "Ipv6",
            Layer::Icmp => "Icmp",
            Layer::Icmpv6 => "Icmpv6",
        }
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed-size wire header which may be viewed in place.
///
/// Implementors are `repr(C)` structs of byte arrays and network-order
/// integers, so any byte slice of exactly `SIZE` bytes is a valid
/// instance.
pub trait HeaderView:
    FromBytes + KnownLayout + Immutable + Unaligned + Sized
{
    /// The layer this header is reported as in errors.
    const LAYER: Layer;

    /// The number of bytes the header occupies on the wire.
    const SIZE: usize = core::mem::size_of::<Self>();
}

/// The two VLAN tag flavours.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VlanKind {
    /// IEEE 802.1Q customer tag (0x8100).
    Dot1Q,
    /// IEEE 802.1AD service tag (0x88A8), the outer tag of QinQ.
    Dot1AD,
}

impl Display for VlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VlanKind::Dot1Q => f.write_str("802.1Q"),
            VlanKind::Dot1AD => f.write_str("802.1AD"),
        }
    }
}

/// What follows an Ethernet header or VLAN tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EtherNext {
    Vlan(VlanKind),
    Ipv4,
    Ipv6,
    Unsupported(Unsupported),
}

impl EtherNext {
    /// Translate a host-order ethertype read from `layer`.
    pub fn from_ethertype(layer: Layer, ether_type: Ethertype) -> Self {
        if ether_type == Ethertype::IPV6 {
            EtherNext::Ipv6
        } else if ether_type == Ethertype::IPV4 {
            EtherNext::Ipv4
        } else if ether_type == ETHER_TYPE_VLAN {
            EtherNext::Vlan(VlanKind::Dot1Q)
        } else if ether_type == ETHER_TYPE_QINQ {
            EtherNext::Vlan(VlanKind::Dot1AD)
        } else {
            EtherNext::Unsupported(Unsupported { layer, value: ether_type.0 })
        }
    }
}

/// What follows an IP header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IpNext {
    Icmp,
    Icmpv6,
    Unsupported(Unsupported),
}

impl IpNext {
    /// Translate the protocol field of an IPv4 header. Only ICMP is
    /// accepted; ICMPv6 over IPv4 is not a valid pairing.
    pub fn from_ipv4_protocol(proto: IpProtocol) -> Self {
        if proto == IpProtocol::ICMP {
            IpNext::Icmp
        } else {
            IpNext::Unsupported(Unsupported {
                layer: Layer::Ipv4,
                value: u16::from(proto.0),
            })
        }
    }

    /// Translate the next-header field of an IPv6 header.
    ///
    /// Extension headers are not walked, so anything other than ICMPv6
    /// directly after the fixed header is unsupported.
    pub fn from_ipv6_next_header(proto: IpProtocol) -> Self {
        if proto == IpProtocol::ICMP_V6 {
            IpNext::Icmpv6
        } else {
            IpNext::Unsupported(Unsupported {
                layer: Layer::Ipv6,
                value: u16::from(proto.0),
            })
        }
    }
}
