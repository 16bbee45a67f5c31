// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! ICMPv4 headers.

use super::IcmpEchoHdr;
use super::IcmpMeta;
use crate::engine::cursor::HdrCursor;
use crate::engine::cursor::Peeked;
use crate::engine::error::WalkError;
use crate::engine::headers::HeaderView;
use crate::engine::headers::Layer;

pub const ICMP_ECHO_REPLY: u8 = 0;
pub const ICMP_DEST_UNREACH: u8 = 3;
pub const ICMP_ECHO_REQUEST: u8 = 8;

/// An ICMPv4 header. The view is distinct from [`super::v6::Icmpv6Hdr`]
/// only so that errors name the right layer.
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
#[repr(transparent)]
pub struct IcmpHdr(pub IcmpEchoHdr);

impl HeaderView for IcmpHdr {
    const LAYER: Layer = Layer::Icmp;
}

/// Read the ICMPv4 header at the cursor and step past it.
pub fn parse(cur: &mut HdrCursor<'_>) -> Result<IcmpMeta, WalkError> {
    let Peeked { hdr, span } = cur.peek::<IcmpHdr>()?;
    let meta = IcmpMeta::from_hdr(&hdr.0, ICMP_ECHO_REQUEST, ICMP_ECHO_REPLY);
    cur.advance(span);

    Ok(meta)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::error::BoundsViolation;
    use crate::engine::icmp::Echo;
    use crate::engine::icmp::EchoKind;

    #[test]
    fn echo_request() {
        let bytes = [8, 0, 0xF7, 0xFD, 0x12, 0x34, 0x00, 0x02];
        let mut cur = HdrCursor::new(&bytes);
        let meta = parse(&mut cur).unwrap();
        assert!(meta.is_echo_request());
        assert_eq!(
            meta.echo,
            Some(Echo { kind: EchoKind::Request, ident: 0x1234, seq: 2 })
        );
    }

    #[test]
    fn echo_reply() {
        let bytes = [0, 0, 0xFF, 0xFD, 0x00, 0x01, 0x01, 0x00];
        let mut cur = HdrCursor::new(&bytes);
        let meta = parse(&mut cur).unwrap();
        assert!(!meta.is_echo_request());
        assert_eq!(
            meta.echo,
            Some(Echo { kind: EchoKind::Reply, ident: 1, seq: 256 })
        );
    }

    #[test]
    fn unreachable_has_no_echo() {
        let bytes = [ICMP_DEST_UNREACH, 3, 0, 0, 0, 0, 0, 0];
        let mut cur = HdrCursor::new(&bytes);
        let meta = parse(&mut cur).unwrap();
        assert_eq!(meta.msg_type, ICMP_DEST_UNREACH);
        assert_eq!(meta.code, 3);
        assert_eq!(meta.echo, None);
    }

    #[test]
    fn ipv6_echo_type_is_not_echo() {
        let bytes = [128, 0, 0, 0, 0, 1, 0, 2];
        let mut cur = HdrCursor::new(&bytes);
        assert_eq!(parse(&mut cur).unwrap().echo, None);
    }

    #[test]
    fn short_header() {
        let bytes = [8, 0, 0xF7, 0xFD, 0x12, 0x34, 0x00];
        let mut cur = HdrCursor::new(&bytes);
        assert_eq!(
            parse(&mut cur),
            Err(WalkError::BoundsViolation(BoundsViolation {
                layer: Layer::Icmp,
                need: 8,
                have: 7,
            }))
        );
    }
}
