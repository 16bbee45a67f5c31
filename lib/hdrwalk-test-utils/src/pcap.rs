// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Routines for building packet capture files.

use pcap_parser::Linktype;
use pcap_parser::ToVec;
use pcap_parser::pcap::LegacyPcapBlock;
use pcap_parser::pcap::PcapHeader;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

/// The largest frame a generated capture claims to hold.
pub const SNAPLEN: u32 = 1518;

/// Build a packet capture file from a series of frames.
pub struct PcapBuilder<W: Write = File> {
    out: W,
}

impl PcapBuilder<File> {
    /// Create a new pcap builder, writing all captures to `path`.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> PcapBuilder<W> {
    pub fn from_writer(mut out: W) -> io::Result<Self> {
        let mut hdr = PcapHeader {
            magic_number: 0xa1b2c3d4,
            version_major: 2,
            version_minor: 4,
            thiszone: 0,
            sigfigs: 0,
            snaplen: SNAPLEN,
            network: Linktype::ETHERNET,
        };

        out.write_all(&hdr.to_vec().map_err(serialize_err)?)?;

        Ok(Self { out })
    }

    /// Add a frame to the capture, stamped `ts_usec` microseconds into
    /// the capture.
    pub fn add_frame(&mut self, frame: &[u8], ts_usec: u64) -> io::Result<()> {
        let mut block = LegacyPcapBlock {
            ts_sec: (ts_usec / 1_000_000) as u32,
            ts_usec: (ts_usec % 1_000_000) as u32,
            caplen: frame.len() as u32,
            origlen: frame.len() as u32,
            data: frame,
        };

        self.out.write_all(&block.to_vec().map_err(serialize_err)?)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn serialize_err(e: impl std::fmt::Debug) -> io::Error {
    io::Error::other(format!("pcap serialization failed: {e:?}"))
}
