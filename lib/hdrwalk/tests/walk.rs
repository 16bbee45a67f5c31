// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! End-to-end tests of the header walk and the verdict it leads to,
//! using frames generated by `hdrwalk-test-utils`.

use hdrwalk::engine::WalkError;
use hdrwalk::engine::error::BoundsViolation;
use hdrwalk::engine::error::Unsupported;
use hdrwalk::engine::icmp::UlpMeta;
use hdrwalk::engine::ip::L3Meta;
use hdrwalk::engine::walk::walk_with_depth;
use hdrwalk_test_utils::*;
use itertools::Itertools;

#[test]
fn ipv6_echo_even_seq_drops() {
    let frame = EchoFrame::v6(4).build();
    let walked = walk(&frame).unwrap();
    assert!(matches!(walked.l3, L3Meta::Ipv6(_)));
    assert!(matches!(walked.ulp, UlpMeta::Icmpv6(_)));
    assert_eq!(walked.echo_request_seq(), Some(4));
    assert_eq!(classify(&frame), Outcome::Classified(Verdict::Drop));
}

#[test]
fn ipv6_echo_odd_seq_passes() {
    let frame = EchoFrame::v6(5).build();
    assert_eq!(classify(&frame), Outcome::Classified(Verdict::Pass));
}

#[test]
fn vlan_ipv4_echo_even_seq_drops() {
    let frame = EchoFrame::v4(2).vlans(&[42]).build();
    let walked = walk(&frame).unwrap();
    assert_eq!(walked.vlan_ids().collect::<Vec<_>>(), vec![42]);
    match walked.l3 {
        L3Meta::Ipv4(ip) => {
            assert_eq!(ip.hdr_len, 20);
            assert_eq!(ip.src, GUEST_IP4);
            assert_eq!(ip.dst, REMOTE_IP4);
        }
        L3Meta::Ipv6(_) => panic!("expected IPv4"),
    }
    assert_eq!(classify(&frame), Outcome::Classified(Verdict::Drop));
}

#[test]
fn arp_stops_at_ethernet() {
    let mut frame = EchoFrame::v4(2).build();
    frame[12] = 0x08;
    frame[13] = 0x06;

    let outcome = classify(&frame);
    assert_eq!(
        outcome,
        Outcome::Fallback(WalkError::UnsupportedProtocol(Unsupported {
            layer: Layer::Ethernet,
            value: 0x0806,
        }))
    );
    assert_eq!(outcome.verdict(), Verdict::Pass);
}

#[test]
fn ethernet_truncated_at_byte_13() {
    let frame = EchoFrame::v6(4).build();
    assert_eq!(
        classify(&frame[..13]),
        Outcome::Fallback(WalkError::BoundsViolation(BoundsViolation {
            layer: Layer::Ethernet,
            need: 14,
            have: 13,
        }))
    );
}

// Every strict prefix of a valid frame is rejected, and always by a
// bounds check at the layer the prefix ends in.
#[test]
fn every_prefix_is_a_bounds_violation() {
    let frames = [
        EchoFrame::v4(2).build(),
        EchoFrame::v4(2).vlans(&[10, 20]).ipv4_options(3).build(),
        EchoFrame::v6(4).tags(&[TestTag::dot1ad(1), TestTag::dot1q(2)]).build(),
    ];

    for frame in &frames {
        // The ICMP body (data after the 8 byte header) is never read.
        let walked = walk(frame).unwrap();
        for len in 0..walked.hdr_len {
            match walk(&frame[..len]) {
                Err(WalkError::BoundsViolation(bv)) => {
                    assert_eq!(bv.have, len);
                    assert!(bv.need > len, "{bv:?} at {len}");
                }
                res => panic!("prefix of {len} bytes gave {res:?}"),
            }
        }

        for len in walked.hdr_len..=frame.len() {
            assert!(walk(&frame[..len]).is_ok(), "prefix of {len} bytes");
        }
    }
}

#[test]
fn every_vlan_depth_to_the_cap() {
    for n in 0..=VLAN_MAX_DEPTH {
        let vids = (1..=n as u16).collect_vec();
        for frame in [
            EchoFrame::v6(8).vlans(&vids).build(),
            EchoFrame::v4(8).vlans(&vids).build(),
        ] {
            let walked = walk(&frame).unwrap();
            assert_eq!(walked.vlan_ids().collect_vec(), vids);
            assert_eq!(walked.echo_request_seq(), Some(8));
        }
    }

    let vids = (1..=VLAN_MAX_DEPTH as u16 + 1).collect_vec();
    let frame = EchoFrame::v6(8).vlans(&vids).build();
    assert_eq!(
        walk(&frame),
        Err(WalkError::DepthExceeded { depth: VLAN_MAX_DEPTH + 1 })
    );
    assert_eq!(classify(&frame).verdict(), Verdict::Pass);

    // A deeper cap accepts the same frame.
    let walked = walk_with_depth::<{ VLAN_MAX_DEPTH + 1 }>(&frame).unwrap();
    assert_eq!(walked.vlans.len(), VLAN_MAX_DEPTH + 1);
}

#[test]
fn ipv4_header_length_follows_ihl() {
    for words in 0..=10u8 {
        let frame = EchoFrame::v4(6).ipv4_options(words).build();
        let walked = walk(&frame).unwrap();
        let L3Meta::Ipv4(ip) = walked.l3 else {
            panic!("expected IPv4");
        };
        assert_eq!(ip.hdr_len, 20 + usize::from(words) * 4);
        assert_eq!(walked.hdr_len, 14 + ip.hdr_len + 8);
        assert_eq!(walked.echo_request_seq(), Some(6));
    }
}

#[test]
fn ipv4_options_past_the_frame_are_rejected() {
    // The minimal header fits, the options it declares do not.
    let frame = EchoFrame::v4(6).ipv4_options(10).build();
    let cut = &frame[..14 + 20 + 4];
    assert_eq!(
        walk(cut),
        Err(WalkError::BoundsViolation(BoundsViolation {
            layer: Layer::Ipv4Options,
            need: 14 + 60,
            have: 14 + 24,
        }))
    );
}

#[test]
fn replies_pass_whatever_the_seq() {
    for seq in 0..8 {
        for frame in [EchoFrame::v4(seq).reply(), EchoFrame::v6(seq).reply()] {
            let frame = frame.build();
            assert_eq!(classify(&frame), Outcome::Classified(Verdict::Pass));
        }
    }
}

#[test]
fn same_seq_from_different_flows_both_drop() {
    let a = EchoFrame::v6(12).build();
    let mut b = EchoFrame::v6(12);
    b.ident = 0x4242;
    b.ip_src = IpAddr::V6("fd00::99".parse().unwrap());
    let b = b.build();

    assert_eq!(classify(&a), Outcome::Classified(Verdict::Drop));
    assert_eq!(classify(&b), Outcome::Classified(Verdict::Drop));
    assert_eq!(classify(&a), Outcome::Classified(Verdict::Drop));
}

#[test]
fn drop_every_other_request() {
    let c = Classifier::default();
    let meta = IngressMeta { ifindex: 2, rx_queue: 0 };

    let verdicts = (0..10u16)
        .map(|seq| c.process(&EchoFrame::v4(seq).build(), &meta).verdict())
        .collect_vec();
    let expected = (0..10)
        .map(|seq| if seq % 2 == 0 { Verdict::Drop } else { Verdict::Pass })
        .collect_vec();
    assert_eq!(verdicts, expected);

    let snap = c.stats().snapshot();
    assert_eq!(snap.record(Verdict::Drop).rx_packets, 5);
    assert_eq!(snap.record(Verdict::Pass).rx_packets, 5);
    assert_eq!(snap.fallback.total(), 0);
}

#[test]
fn inspect_output_names_both_addresses() {
    let v4 = walk(&EchoFrame::v4(1).vlans(&[7]).build()).unwrap();
    assert_eq!(v4.l3.src(), IpAddr::V4(GUEST_IP4));
    assert_eq!(v4.l3.dst(), IpAddr::V4(REMOTE_IP4));

    let mut out = vec![];
    hdrwalk::print::print_walk_into(&mut out, &v4).unwrap();
    let out = String::from_utf8(out).unwrap();
    let line = out.lines().find(|l| l.starts_with("Ipv4")).unwrap();
    assert!(line.ends_with("10.0.0.5 -> 10.0.0.1 proto 1 ttl 64 hdr_len 20"));
    assert!(out.lines().any(|l| l.starts_with("Vlan") && l.contains("vid 7")));

    let v6 = walk(&EchoFrame::v6(1).build()).unwrap();
    assert_eq!(v6.l3.src(), IpAddr::V6(GUEST_IP6));

    let mut out = vec![];
    hdrwalk::print::print_walk_into(&mut out, &v6).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("fd00::5 -> fd00::1 next 58 hop_limit 64"));
}
