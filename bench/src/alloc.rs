// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Counting allocator with `criterion` integration.
//!
//! A header walk must not touch the heap, so every case measured with
//! these should report zero.

use super::MeasurementInfo;
use criterion::Criterion;
use criterion::Throughput;
use criterion::measurement::Measurement;
use criterion::measurement::ValueFormatter;
use std::alloc::GlobalAlloc;
use std::alloc::Layout;
use std::alloc::System;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;
use std::time::Duration;

#[global_allocator]
static BENCH_ALLOC: CountingAlloc = CountingAlloc {
    allocs: AtomicU64::new(0),
    bytes: AtomicU64::new(0),
};

// Criterion runs one benchmark at a time, so counts are not kept per
// thread.
struct CountingAlloc {
    allocs: AtomicU64,
    bytes: AtomicU64,
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.allocs.fetch_add(1, Relaxed);
        self.bytes.fetch_add(layout.size() as u64, Relaxed);
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// A counter read before and after each iteration.
pub trait MemMeasure {
    fn read() -> u64;
    fn unit() -> &'static str;
    fn label() -> &'static str;
}

/// Number of allocations made.
pub struct Allocs;

/// Number of bytes allocated.
pub struct BytesAlloced;

impl MemMeasure for Allocs {
    fn read() -> u64 {
        BENCH_ALLOC.allocs.load(Relaxed)
    }

    fn unit() -> &'static str {
        ""
    }

    fn label() -> &'static str {
        "alloc_ct"
    }
}

impl MemMeasure for BytesAlloced {
    fn read() -> u64 {
        BENCH_ALLOC.bytes.load(Relaxed)
    }

    fn unit() -> &'static str {
        "B"
    }

    fn label() -> &'static str {
        "alloc_sz"
    }
}

/// Values are small enough per frame that no scaling is needed.
struct Unscaled(&'static str);

impl ValueFormatter for Unscaled {
    fn scale_values(&self, _typical: f64, _values: &mut [f64]) -> &'static str {
        self.0
    }

    fn scale_throughputs(
        &self,
        _typical: f64,
        _throughput: &Throughput,
        _values: &mut [f64],
    ) -> &'static str {
        self.0
    }

    fn scale_for_machines(&self, _values: &mut [f64]) -> &'static str {
        self.0
    }
}

/// Newtype used to mass-impl [`MemMeasure`] -> [`Measurement`].
pub struct Local<T> {
    fmt: Unscaled,
    _m: std::marker::PhantomData<T>,
}

impl<T: MemMeasure> Local<T> {
    fn new() -> Self {
        Self { fmt: Unscaled(T::unit()), _m: std::marker::PhantomData }
    }
}

impl<T: MemMeasure> Measurement for Local<T> {
    type Intermediate = u64;
    type Value = u64;

    fn start(&self) -> Self::Intermediate {
        T::read()
    }

    fn end(&self, i: Self::Intermediate) -> Self::Value {
        T::read() - i
    }

    fn add(&self, v1: &Self::Value, v2: &Self::Value) -> Self::Value {
        v1 + v2
    }

    fn zero(&self) -> Self::Value {
        0
    }

    fn to_f64(&self, value: &Self::Value) -> f64 {
        *value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &self.fmt
    }
}

impl<T: MemMeasure> MeasurementInfo for Local<T> {
    fn label() -> &'static str {
        T::label()
    }
}

/// Create a new [`Criterion`] instance tuned for measuring allocation
/// info.
pub fn new_crit<T: MemMeasure>() -> Criterion<Local<T>> {
    Criterion::default()
        .with_measurement(Local::<T>::new())
        .sample_size(10)
        .warm_up_time(Duration::from_nanos(1))
        .measurement_time(Duration::from_micros(10))
        .nresamples(1)
        // Every sample is expected to be identical (zero), which the
        // plotting backend does not cope with.
        .without_plots()
}
