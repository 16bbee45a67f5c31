// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! IP headers.

pub mod v4;
pub mod v6;

use core::net::IpAddr;
pub use v4::Ipv4Meta;
pub use v6::Ipv6Meta;

/// The network layer of a walked frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum L3Meta {
    Ipv4(Ipv4Meta),
    Ipv6(Ipv6Meta),
}

impl L3Meta {
    pub fn src(&self) -> IpAddr {
        match self {
            L3Meta::Ipv4(v4) => IpAddr::V4(v4.src),
            L3Meta::Ipv6(v6) => IpAddr::V6(v6.src),
        }
    }

    pub fn dst(&self) -> IpAddr {
        match self {
            L3Meta::Ipv4(v4) => IpAddr::V4(v4.dst),
            L3Meta::Ipv6(v6) => IpAddr::V6(v6.dst),
        }
    }
}
