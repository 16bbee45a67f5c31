// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Reading legacy pcap captures.

use crate::Error;
use pcap_parser::Linktype;
use pcap_parser::pcap;

/// Magic numbers of little-endian legacy captures, as they appear on
/// disk.
const MAGIC_LE_USEC: [u8; 4] = [0xd4, 0xc3, 0xb2, 0xa1];
const MAGIC_LE_NSEC: [u8; 4] = [0x4d, 0x3c, 0xb2, 0xa1];

/// A single captured frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Captured {
    /// Capture timestamp in microseconds.
    pub ts_usec: u64,
    /// The frame's length on the wire. May exceed `data.len()` when the
    /// capture was truncated by its snaplen.
    pub origlen: u32,
    pub data: Vec<u8>,
}

/// Split a capture file into its frames.
pub fn read_frames(bytes: &[u8]) -> Result<Vec<Captured>, Error> {
    let nsec = match bytes.get(..4) {
        Some(m) if m == MAGIC_LE_USEC => false,
        Some(m) if m == MAGIC_LE_NSEC => true,
        _ => return Err(Error::PcapMagic),
    };

    let (mut rest, hdr) =
        pcap::parse_pcap_header(bytes).map_err(|_| Error::PcapHeader)?;

    if hdr.network != Linktype::ETHERNET {
        return Err(Error::Linktype(hdr.network.0));
    }

    let mut frames = vec![];
    while !rest.is_empty() {
        let offset = bytes.len() - rest.len();
        let (next, block) = pcap::parse_pcap_frame(rest)
            .map_err(|_| Error::PcapRecord(offset))?;

        let frac = u64::from(block.ts_usec);
        let ts_usec = u64::from(block.ts_sec) * 1_000_000
            + if nsec { frac / 1000 } else { frac };

        frames.push(Captured {
            ts_usec,
            origlen: block.origlen,
            data: block.data.to_vec(),
        });
        rest = next;
    }

    Ok(frames)
}
