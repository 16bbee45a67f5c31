// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Print walk results and stats in a human-friendly manner.
//!
//! This is mostly just a place to hang printing routines so that they
//! can be used by both hdrwalkadm and integration tests.

use crate::api::StatsSnapshot;
use crate::api::Verdict;
use crate::d_error::ErrorTrail;
use crate::engine::Outcome;
use crate::engine::WalkError;
use crate::engine::Walked;
use crate::engine::icmp::UlpMeta;
use crate::engine::ip::L3Meta;
use std::io::Write;
use tabwriter::TabWriter;

/// Print a [`StatsSnapshot`].
pub fn print_stats_into(
    writer: &mut impl Write,
    snap: &StatsSnapshot,
) -> std::io::Result<()> {
    let mut t = TabWriter::new(writer);

    writeln!(t, "Verdicts")?;
    write_hrb(&mut t)?;
    writeln!(t, "VERDICT\tPACKETS\tBYTES")?;
    for v in Verdict::ALL {
        let rec = snap.record(v);
        writeln!(t, "{v}\t{}\t{}", rec.rx_packets, rec.rx_bytes)?;
    }
    t.flush()?;

    writeln!(t, "\nFallbacks")?;
    write_hr(&mut t)?;
    writeln!(t, "REASON\tPACKETS")?;
    writeln!(t, "BoundsViolation\t{}", snap.fallback.bounds_violation)?;
    writeln!(
        t,
        "UnsupportedProtocol\t{}",
        snap.fallback.unsupported_protocol
    )?;
    writeln!(t, "DepthExceeded\t{}", snap.fallback.depth_exceeded)?;
    writeln!(t, "Malformed\t{}", snap.fallback.malformed)?;
    writeln!(t, "TOTAL\t{}", snap.fallback.total())?;
    t.flush()?;

    writeln!(t)?;
    t.flush()
}

/// Print every header of a walked frame, outermost first.
pub fn print_walk_into<const N: usize>(
    writer: &mut impl Write,
    walked: &Walked<N>,
) -> std::io::Result<()> {
    let mut t = TabWriter::new(writer);

    writeln!(t, "LAYER\tDETAIL")?;
    write_hr(&mut t)?;

    let eth = &walked.ether;
    writeln!(
        t,
        "Ethernet\t{} -> {} type 0x{:04X}",
        eth.src, eth.dst, eth.ether_type.0
    )?;

    for tag in &walked.vlans {
        writeln!(
            t,
            "Vlan\t{} vid {} pcp {} dei {} type 0x{:04X}",
            tag.kind, tag.vid, tag.pcp, tag.dei as u8, tag.ether_type.0,
        )?;
    }

    let l3 = &walked.l3;
    let (name, detail) = match l3 {
        L3Meta::Ipv4(ip) => (
            "Ipv4",
            format!(
                "proto {} ttl {} hdr_len {}",
                ip.protocol.0, ip.ttl, ip.hdr_len
            ),
        ),
        L3Meta::Ipv6(ip) => (
            "Ipv6",
            format!(
                "next {} hop_limit {} payload_len {}",
                ip.next_header.0, ip.hop_limit, ip.payload_len
            ),
        ),
    };
    writeln!(t, "{name}\t{} -> {} {detail}", l3.src(), l3.dst())?;

    let (name, icmp) = match &walked.ulp {
        UlpMeta::Icmp(m) => ("Icmp", m),
        UlpMeta::Icmpv6(m) => ("Icmpv6", m),
    };
    match icmp.echo {
        Some(echo) => writeln!(
            t,
            "{name}\ttype {} code {} echo {:?} ident {} seq {}",
            icmp.msg_type, icmp.code, echo.kind, echo.ident, echo.seq,
        )?,
        None => writeln!(
            t,
            "{name}\ttype {} code {}",
            icmp.msg_type, icmp.code
        )?,
    }

    t.flush()
}

/// Print why a walk stopped, as its error trail plus the leaf data.
pub fn print_walk_err_into(
    writer: &mut impl Write,
    err: &WalkError,
) -> std::io::Result<()> {
    let trail = ErrorTrail::<4>::from_err(err).unwrap_or_else(|t| t);
    writeln!(writer, "rejected: {err}")?;
    writeln!(writer, "trail:    {trail} {:?}", trail.data())
}

/// Print the header for [`print_outcome()`].
pub fn print_outcome_header(t: &mut impl Write) -> std::io::Result<()> {
    writeln!(t, "FRAME\tLEN\tVERDICT\tREASON")
}

/// Print a single frame's [`Outcome`] as a table row.
pub fn print_outcome(
    t: &mut impl Write,
    idx: usize,
    len: usize,
    outcome: &Outcome,
) -> std::io::Result<()> {
    let reason = match outcome.error() {
        Some(err) => {
            let trail = ErrorTrail::<4>::from_err(err).unwrap_or_else(|t| t);
            trail.to_string()
        }
        None => "-".to_string(),
    };

    writeln!(t, "{idx}\t{len}\t{}\t{reason}", outcome.verdict())
}

/// Output a horizontal rule in bold to the given writer.
pub fn write_hrb(t: &mut impl Write) -> std::io::Result<()> {
    writeln!(t, "{:=<70}", "=")
}

/// Output a horizontal rule to the given writer.
pub fn write_hr(t: &mut impl Write) -> std::io::Result<()> {
    writeln!(t, "{:-<70}", "-")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stats_table_lists_every_verdict() {
        let mut snap = StatsSnapshot::default();
        snap.records[Verdict::Drop.index()].rx_packets = 7;
        snap.fallback.malformed = 2;

        let mut out = Vec::new();
        print_stats_into(&mut out, &snap).unwrap();
        let out = String::from_utf8(out).unwrap();

        for v in Verdict::ALL {
            assert!(out.contains(v.as_str()), "missing {v}:\n{out}");
        }
        assert!(out.lines().any(|l| l.starts_with("DROP") && l.contains('7')));
        assert!(
            out.lines().any(|l| l.starts_with("Malformed") && l.contains('2'))
        );
    }

    #[test]
    fn outcome_row_names_the_reason() {
        let mut out = Vec::new();
        let outcome = Outcome::Fallback(WalkError::DepthExceeded { depth: 3 });
        print_outcome(&mut out, 0, 90, &outcome).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0\t90\tPASS\tDepthExceeded\n"
        );
    }
}
