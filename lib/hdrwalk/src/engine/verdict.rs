// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The verdict engine: drop every echo request with an even sequence
//! number, pass everything else.

use super::icmp::UlpMeta;
use crate::api::Verdict;

/// Decide the fate of a frame from its innermost header.
///
/// This is a pure function of its arguments. Parity is read straight
/// off the wire, so two requests with the same even sequence number
/// are both dropped, whatever flow they belong to.
#[inline]
pub const fn decide(seq: u16, is_echo_request: bool) -> Verdict {
    if is_echo_request && seq % 2 == 0 {
        Verdict::Drop
    } else {
        Verdict::Pass
    }
}

/// Apply [`decide()`] to a walked ICMP or ICMPv6 header.
pub fn decide_ulp(ulp: &UlpMeta) -> Verdict {
    let icmp = ulp.icmp();
    let seq = icmp.echo.map(|e| e.seq).unwrap_or_default();
    decide(seq, icmp.is_echo_request())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::icmp::Echo;
    use crate::engine::icmp::EchoKind;
    use crate::engine::icmp::IcmpMeta;

    #[test]
    fn even_requests_drop() {
        assert_eq!(decide(0, true), Verdict::Drop);
        assert_eq!(decide(4, true), Verdict::Drop);
        assert_eq!(decide(u16::MAX - 1, true), Verdict::Drop);
        assert_eq!(decide(5, true), Verdict::Pass);
        assert_eq!(decide(u16::MAX, true), Verdict::Pass);
    }

    #[test]
    fn non_requests_pass() {
        for seq in [0, 1, 2, 3, 0x8000] {
            assert_eq!(decide(seq, false), Verdict::Pass);
        }
    }

    #[test]
    fn decide_is_stateless() {
        // The same inputs, asked in any order and from any thread, give
        // the same answer.
        let expected: std::vec::Vec<Verdict> =
            (0..64u16).map(|s| decide(s, true)).collect();

        let threads: std::vec::Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..64u16)
                        .rev()
                        .map(|s| decide(s, true))
                        .collect::<std::vec::Vec<_>>()
                })
            })
            .collect();

        for t in threads {
            let mut got = t.join().unwrap();
            got.reverse();
            assert_eq!(got, expected);
        }

        assert_eq!(decide(6, true), decide(6, true));
    }

    #[test]
    fn reply_with_even_seq_passes() {
        let ulp = UlpMeta::Icmpv6(IcmpMeta {
            msg_type: 129,
            code: 0,
            echo: Some(Echo { kind: EchoKind::Reply, ident: 1, seq: 2 }),
        });
        assert_eq!(decide_ulp(&ulp), Verdict::Pass);

        let ulp = UlpMeta::Icmp(IcmpMeta {
            msg_type: 8,
            code: 0,
            echo: Some(Echo { kind: EchoKind::Request, ident: 1, seq: 2 }),
        });
        assert_eq!(decide_ulp(&ulp), Verdict::Drop);

        let ulp = UlpMeta::Icmp(IcmpMeta { msg_type: 3, code: 1, echo: None });
        assert_eq!(decide_ulp(&ulp), Verdict::Pass);
    }
}
