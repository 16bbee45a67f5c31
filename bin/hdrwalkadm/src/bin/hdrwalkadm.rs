// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use clap::Parser;
use slog::info;

use hdrwalk::engine::Classifier;
use hdrwalk::engine::classify::FALLBACK_VERDICT;
use hdrwalk::engine::verdict::decide_ulp;
use hdrwalk::engine::walk;
use hdrwalk::print::print_walk_err_into;
use hdrwalk::print::print_walk_into;
use hdrwalk_test_utils::EchoFrame;
use hdrwalk_test_utils::PcapBuilder;
use hdrwalkadm::Config;
use hdrwalkadm::Output;
use hdrwalkadm::config::Overrides;
use hdrwalkadm::parse_hex;
use hdrwalkadm::pcap::read_frames;
use hdrwalkadm::report::classify_capture;

/// Classify captured frames with the hdrwalk header walker.
#[derive(Debug, Parser)]
#[command(version=hdrwalkadm::pkg_version())]
enum Command {
    /// Classify every frame of a legacy pcap capture.
    Classify(ClassifyArgs),

    /// Walk a single frame given as hex and show each header.
    Inspect {
        /// The frame, e.g. `a84025ff7777...`. Whitespace and `:` are
        /// ignored.
        hex: String,
    },

    /// Write a capture of echo requests for manual verification.
    GenPcap {
        out: PathBuf,

        /// Number of frames, with sequence numbers from 0.
        #[arg(long, default_value_t = 10)]
        count: u16,

        /// Generate ICMPv4 over IPv4 rather than ICMPv6 over IPv6.
        #[arg(long)]
        ipv4: bool,

        /// Push an 802.1Q tag with this VID. May be repeated, outermost
        /// first.
        #[arg(long = "vlan")]
        vlans: Vec<u16>,
    },
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    pcap: PathBuf,

    /// TOML config file. Flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

fn main() -> anyhow::Result<()> {
    let cmd = Command::parse();
    let log = hdrwalkadm::logger();

    match cmd {
        Command::Classify(args) => {
            let cfg = Config::resolve(args.config.as_deref(), &args.overrides)?;
            let bytes = std::fs::read(&args.pcap).with_context(|| {
                format!("failed to read {}", args.pcap.display())
            })?;
            let frames = read_frames(&bytes)?;
            info!(log, "classifying capture";
                "path" => %args.pcap.display(),
                "frames" => frames.len(),
                "ingress" => %cfg.ingress(),
            );

            let classifier = Classifier::new(&log);
            let report = classify_capture(
                &classifier,
                &frames,
                cfg.ingress(),
                cfg.per_frame,
            );

            let mut out = io::stdout().lock();
            match cfg.output {
                Output::Table => report.print_table_into(&mut out)?,
                Output::Json => report.print_json_into(&mut out)?,
            }
        }

        Command::Inspect { hex } => {
            let frame = parse_hex(&hex)?;
            let mut out = io::stdout().lock();

            match walk(&frame) {
                Ok(walked) => {
                    print_walk_into(&mut out, &walked)?;
                    writeln!(out, "\nverdict: {}", decide_ulp(&walked.ulp))?;
                }
                Err(err) => {
                    print_walk_err_into(&mut out, &err)?;
                    writeln!(out, "verdict: {FALLBACK_VERDICT} (fallback)")?;
                }
            }
        }

        Command::GenPcap { out, count, ipv4, vlans } => {
            let mut pcap = PcapBuilder::new(&out).with_context(|| {
                format!("failed to create {}", out.display())
            })?;

            for seq in 0..count {
                let frame =
                    if ipv4 { EchoFrame::v4(seq) } else { EchoFrame::v6(seq) };
                let frame = frame.vlans(&vlans).build();
                pcap.add_frame(&frame, u64::from(seq) * 1_000_000)?;
            }

            info!(log, "wrote capture";
                "path" => %out.display(),
                "frames" => count,
            );
        }
    }
    Ok(())
}
