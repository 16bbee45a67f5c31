// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! The optional TOML config file for `hdrwalkadm classify`.
//!
//! ```toml
//! ifindex = 3
//! rx_queue = 0
//! output = "json"
//! per_frame = true
//! ```
//!
//! Every field is optional, and any flag given on the command line
//! overrides the file.

use crate::Error;
use hdrwalk::api::IngressMeta;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Table,
    Json,
}

/// Flags of `hdrwalkadm classify` which override the config file.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct Overrides {
    /// Interface index to report frames as arriving on.
    #[arg(long)]
    pub ifindex: Option<u32>,

    /// Receive queue to report frames as arriving on.
    #[arg(long)]
    pub rx_queue: Option<u32>,

    /// Print JSON rather than tables.
    #[arg(long)]
    pub json: bool,

    /// Print a verdict for every frame.
    #[arg(long)]
    pub per_frame: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface index reported for every frame of the capture.
    pub ifindex: u32,
    /// Receive queue reported for every frame of the capture.
    pub rx_queue: u32,
    pub output: Output,
    /// Report every frame's verdict, not just the totals.
    pub per_frame: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::Io { path: path.display().to_string(), err }
        })?;

        toml::from_str(&contents).map_err(|err| Error::Config {
            path: path.display().to_string(),
            err,
        })
    }

    /// Load the file at `path`, if any, then apply `ov` on top.
    pub fn resolve(
        path: Option<&Path>,
        ov: &Overrides,
    ) -> Result<Self, Error> {
        let cfg = match path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Ok(cfg.with_overrides(ov))
    }

    pub fn with_overrides(mut self, ov: &Overrides) -> Self {
        if let Some(ifindex) = ov.ifindex {
            self.ifindex = ifindex;
        }
        if let Some(rx_queue) = ov.rx_queue {
            self.rx_queue = rx_queue;
        }
        if ov.json {
            self.output = Output::Json;
        }
        if ov.per_frame {
            self.per_frame = true;
        }
        self
    }

    pub fn ingress(&self) -> IngressMeta {
        IngressMeta { ifindex: self.ifindex, rx_queue: self.rx_queue }
    }
}
