// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! hdrwalk administration library: capture reading, configuration and
//! reporting shared by the `hdrwalkadm` commands.

pub mod config;
pub mod pcap;
pub mod report;

use hdrwalk::api::API_VERSION;
use hdrwalk::api::MAJOR_VERSION;
use slog::Drain;
use thiserror::Error;

pub use config::Config;
pub use config::Output;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {err}")]
    Io { path: String, err: std::io::Error },

    #[error("failed to parse config {path}: {err}")]
    Config { path: String, err: toml::de::Error },

    #[error("not a little-endian legacy pcap file")]
    PcapMagic,

    #[error("malformed pcap header")]
    PcapHeader,

    #[error("unsupported link type {0}: only Ethernet can be classified")]
    Linktype(i32),

    #[error("malformed pcap record at offset {0}")]
    PcapRecord(usize),

    #[error("invalid hex frame: {0}")]
    Hex(String),
}

/// The version reported by `hdrwalkadm --version`.
pub fn pkg_version() -> String {
    format!("{MAJOR_VERSION}.{API_VERSION}")
}

/// Build the logger used by every command.
///
/// Records go to stderr and are filtered by `RUST_LOG`; with it unset
/// only errors are shown.
pub fn logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_envlogger::new(drain).ignore_res();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, slog::o!("unit" => "hdrwalkadm"))
}

/// Decode a frame given on the command line as hex.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, Error> {
    hdrwalk_test_utils::parse_hex(s).map_err(Error::Hex)
}
