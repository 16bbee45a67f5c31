// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The per-frame entry point.

use super::error::WalkError;
use super::stat::VerdictStats;
use super::verdict;
use super::walk::walk;
use crate::api::IngressMeta;
use crate::api::Verdict;
use crate::d_error::ErrorTrail;
use slog::Logger;

/// The verdict given to any frame the walk could not fully parse.
///
/// Such frames continue up the normal receive path rather than risk
/// being misclassified.
pub const FALLBACK_VERDICT: Verdict = Verdict::Pass;

/// Enough slots for the deepest [`WalkError`] chain.
const TRAIL_DEPTH: usize = 4;

/// The result of classifying one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The walk reached the innermost header and the verdict engine
    /// decided.
    Classified(Verdict),
    /// The walk stopped early; the frame gets [`FALLBACK_VERDICT`].
    Fallback(WalkError),
}

impl Outcome {
    pub fn verdict(&self) -> Verdict {
        match self {
            Outcome::Classified(v) => *v,
            Outcome::Fallback(_) => FALLBACK_VERDICT,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    pub fn error(&self) -> Option<&WalkError> {
        match self {
            Outcome::Classified(_) => None,
            Outcome::Fallback(err) => Some(err),
        }
    }
}

impl From<Result<Verdict, WalkError>> for Outcome {
    fn from(res: Result<Verdict, WalkError>) -> Self {
        match res {
            Ok(v) => Outcome::Classified(v),
            Err(e) => Outcome::Fallback(e),
        }
    }
}

/// Walk `frame` and decide its verdict. Never fails: a frame which
/// cannot be walked is reported as a fallback.
pub fn classify(frame: &[u8]) -> Outcome {
    walk(frame).map(|w| verdict::decide_ulp(&w.ulp)).into()
}

/// A classifier which logs each decision and counts it in shared
/// stats.
///
/// `process()` takes `&self`, so one classifier may be shared by every
/// receive queue.
#[derive(Debug)]
pub struct Classifier {
    log: Logger,
    stats: VerdictStats,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&Logger::root(slog::Discard, slog::o!()))
    }
}

impl Classifier {
    pub fn new(log: &Logger) -> Self {
        Self {
            log: log.new(slog::o!("component" => "classifier")),
            stats: VerdictStats::new(),
        }
    }

    /// Classify one received frame.
    pub fn process(&self, frame: &[u8], meta: &IngressMeta) -> Outcome {
        let outcome = classify(frame);
        self.stats.record(&outcome, frame.len());

        match &outcome {
            Outcome::Classified(verdict) => {
                slog::trace!(
                    self.log, "classified";
                    "verdict" => verdict.as_str(),
                    "len" => frame.len(),
                    "ifindex" => meta.ifindex,
                    "rx_queue" => meta.rx_queue,
                );
            }

            Outcome::Fallback(err) => {
                // A trail which does not fit is still worth logging.
                let trail = ErrorTrail::<TRAIL_DEPTH>::from_err(err)
                    .unwrap_or_else(|partial| partial);
                slog::debug!(
                    self.log, "fallback";
                    "reason" => %trail,
                    "data" => ?trail.data(),
                    "verdict" => FALLBACK_VERDICT.as_str(),
                    "len" => frame.len(),
                    "ifindex" => meta.ifindex,
                    "rx_queue" => meta.rx_queue,
                );
            }
        }

        outcome
    }

    pub fn stats(&self) -> &VerdictStats {
        &self.stats
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::error::Unsupported;
    use crate::engine::headers::Layer;

    #[rustfmt::skip]
    const ARP: [u8; 42] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xA8, 0x40, 0x25, 0x00, 0x00, 0x01,
        0x08, 0x06,
        0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01,
        0xA8, 0x40, 0x25, 0x00, 0x00, 0x01,
        10, 0, 0, 1,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        10, 0, 0, 2,
    ];

    #[test]
    fn arp_falls_back_to_pass() {
        let outcome = classify(&ARP);
        assert_eq!(
            outcome,
            Outcome::Fallback(WalkError::UnsupportedProtocol(Unsupported {
                layer: Layer::Ethernet,
                value: 0x0806,
            }))
        );
        assert_eq!(outcome.verdict(), Verdict::Pass);
        assert!(outcome.is_fallback());
    }

    #[test]
    fn classifier_counts_what_it_sees() {
        let c = Classifier::default();
        let meta = IngressMeta { ifindex: 3, rx_queue: 1 };

        assert!(c.process(&ARP, &meta).is_fallback());
        assert!(c.process(&ARP[..13], &meta).is_fallback());
        assert!(c.process(&[], &meta).is_fallback());

        let snap = c.stats().snapshot();
        assert_eq!(snap.record(Verdict::Pass).rx_packets, 3);
        assert_eq!(snap.record(Verdict::Pass).rx_bytes, 42 + 13);
        assert_eq!(snap.fallback.unsupported_protocol, 1);
        assert_eq!(snap.fallback.bounds_violation, 2);
        assert_eq!(snap.record(Verdict::Drop).rx_packets, 0);
    }
}
