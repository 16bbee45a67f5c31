// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The result of classifying a capture, in a form which can be printed
//! as a table or serialized as JSON.

use crate::pcap::Captured;
use hdrwalk::api::API_VERSION;
use hdrwalk::api::IngressMeta;
use hdrwalk::api::StatsSnapshot;
use hdrwalk::api::Verdict;
use hdrwalk::d_error::ErrorTrail;
use hdrwalk::engine::Classifier;
use hdrwalk::engine::Outcome;
use hdrwalk::print::print_outcome;
use hdrwalk::print::print_outcome_header;
use hdrwalk::print::print_stats_into;
use hdrwalk::print::write_hr;
use serde::Serialize;
use std::io::Write;
use tabwriter::TabWriter;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub len: usize,
    pub verdict: Verdict,
    /// Why the walk stopped, for fallbacks.
    pub reason: Option<String>,
    #[serde(skip)]
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub api_version: u64,
    pub ingress: IngressMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameReport>,
    pub stats: StatsSnapshot,
}

/// Run every captured frame through `classifier`.
///
/// Per-frame results are only kept when `per_frame` is set; the stats
/// always cover the whole capture.
pub fn classify_capture(
    classifier: &Classifier,
    frames: &[Captured],
    ingress: IngressMeta,
    per_frame: bool,
) -> Report {
    let mut reports = vec![];

    for (index, frame) in frames.iter().enumerate() {
        let outcome = classifier.process(&frame.data, &ingress);
        if per_frame {
            let reason = outcome.error().map(|e| {
                ErrorTrail::<4>::from_err(e).unwrap_or_else(|t| t).to_string()
            });
            reports.push(FrameReport {
                index,
                len: frame.data.len(),
                verdict: outcome.verdict(),
                reason,
                outcome,
            });
        }
    }

    Report {
        api_version: API_VERSION,
        ingress,
        frames: reports,
        stats: classifier.stats().snapshot(),
    }
}

impl Report {
    pub fn print_table_into(&self, w: &mut impl Write) -> std::io::Result<()> {
        if !self.frames.is_empty() {
            let mut t = TabWriter::new(&mut *w);
            writeln!(t, "Frames ({})", self.ingress)?;
            write_hr(&mut t)?;
            print_outcome_header(&mut t)?;
            for f in &self.frames {
                print_outcome(&mut t, f.index, f.len, &f.outcome)?;
            }
            writeln!(t)?;
            t.flush()?;
        }

        print_stats_into(w, &self.stats)
    }

    pub fn print_json_into(&self, w: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hdrwalk_test_utils::EchoFrame;

    fn captured(frames: Vec<Vec<u8>>) -> Vec<Captured> {
        frames
            .into_iter()
            .map(|data| Captured {
                ts_usec: 0,
                origlen: data.len() as u32,
                data,
            })
            .collect()
    }

    #[test]
    fn per_frame_reasons() {
        let v6 = EchoFrame::v6(2).build();
        let frames = captured(vec![v6.clone(), v6[..20].to_vec()]);
        let c = Classifier::default();
        let meta = IngressMeta { ifindex: 4, rx_queue: 2 };
        let report = classify_capture(&c, &frames, meta, true);

        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.frames[0].verdict, Verdict::Drop);
        assert_eq!(report.frames[0].reason, None);
        assert_eq!(report.frames[1].verdict, Verdict::Pass);
        assert_eq!(
            report.frames[1].reason.as_deref(),
            Some("BoundsViolation.Ipv6")
        );
        assert_eq!(report.stats.fallback.bounds_violation, 1);

        let mut out = vec![];
        report.print_json_into(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["frames"][1]["reason"], "BoundsViolation.Ipv6");
        assert_eq!(json["frames"][0]["verdict"], "DROP");
        assert_eq!(json["frames"][1]["verdict"], Verdict::Pass.to_string());
        assert_eq!(json["ingress"]["ifindex"], 4);
    }

    #[test]
    fn totals_only() {
        let frames =
            captured((0..4).map(|s| EchoFrame::v4(s).build()).collect());
        let c = Classifier::default();
        let report =
            classify_capture(&c, &frames, IngressMeta::default(), false);
        assert!(report.frames.is_empty());
        assert_eq!(report.stats.record(Verdict::Drop).rx_packets, 2);
        assert_eq!(report.stats.record(Verdict::Pass).rx_packets, 2);

        let mut out = vec![];
        report.print_table_into(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("Frames"));
        assert!(out.contains("Verdicts"));
    }
}
