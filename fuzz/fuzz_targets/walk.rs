// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

#![no_main]

use hdrwalk::api::Verdict;
use hdrwalk::engine::Outcome;
use hdrwalk::engine::classify;
use hdrwalk::engine::walk;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let outcome = classify(data);

    // Only the two core verdicts are ever produced, and the walk never
    // claims to have consumed more than it was given.
    assert!(matches!(outcome.verdict(), Verdict::Pass | Verdict::Drop));
    match walk(data) {
        Ok(walked) => {
            assert!(walked.hdr_len <= data.len());
            assert!(!outcome.is_fallback());
        }
        Err(e) => assert_eq!(outcome, Outcome::Fallback(e)),
    }
});
