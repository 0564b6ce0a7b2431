//! Test Doubles
//!
//! Recording implementations of the out-of-scope collaborators (physical and
//! virtual memory managers, secure monitor, interrupt controller, timer) so
//! the whole bring-up path runs on the host. A shared [`SeqClock`] stamps
//! events, letting tests assert ordering across different doubles.

use core::cell::Cell;
use core::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use tern_common::{PhysAddr, VirtAddr};
use tern_mm::{
    Arena, CachePolicy, MapError, MapRequest, PhysicalMemory, VirtSlot, VirtualMemory,
};

use crate::gic::InterruptController;
use crate::smc::SecureMonitor;
use crate::timer::SystemTimer;

/// Shared monotonic event counter.
pub(crate) struct SeqClock(Cell<u32>);

impl SeqClock {
    pub(crate) fn new() -> Self {
        Self(Cell::new(0))
    }

    pub(crate) fn tick(&self) -> u32 {
        let n = self.0.get();
        self.0.set(n + 1);
        n
    }
}

/// One mapping request as the VMM double saw it.
#[derive(Clone, Copy)]
pub(crate) struct RecordedMap {
    pub tag: &'static str,
    pub phys: PhysAddr,
    pub size: usize,
    pub slot: VirtSlot,
    pub cache: CachePolicy,
    pub seq: u32,
}

const MAX_REQUESTS: usize = 8;

/// Virtual memory manager double: records every request, optionally refusing
/// requests with selected tags.
pub(crate) struct RecordingVmm<'a> {
    pub requests: [Option<RecordedMap>; MAX_REQUESTS],
    pub count: usize,
    fail_tags: &'static [&'static str],
    clock: Option<&'a SeqClock>,
}

impl<'a> RecordingVmm<'a> {
    pub(crate) fn new() -> Self {
        Self {
            requests: [None; MAX_REQUESTS],
            count: 0,
            fail_tags: &[],
            clock: None,
        }
    }

    pub(crate) fn failing_on(tags: &'static [&'static str]) -> Self {
        Self {
            fail_tags: tags,
            ..Self::new()
        }
    }

    pub(crate) fn with_clock(clock: &'a SeqClock) -> Self {
        Self {
            clock: Some(clock),
            ..Self::new()
        }
    }

    pub(crate) fn failing_with_clock(tags: &'static [&'static str], clock: &'a SeqClock) -> Self {
        Self {
            fail_tags: tags,
            clock: Some(clock),
            ..Self::new()
        }
    }

    /// Find the recorded request with the given tag.
    pub(crate) fn find(&self, tag: &str) -> Option<RecordedMap> {
        self.requests
            .iter()
            .flatten()
            .find(|r| r.tag == tag)
            .copied()
    }
}

impl VirtualMemory for RecordingVmm<'_> {
    fn allocate_physical(&mut self, request: &MapRequest) -> Result<VirtAddr, MapError> {
        let seq = self.clock.map(SeqClock::tick).unwrap_or(0);
        self.requests[self.count] = Some(RecordedMap {
            tag: request.tag,
            phys: request.phys,
            size: request.size,
            slot: request.slot,
            cache: request.cache,
            seq,
        });
        self.count += 1;

        if self.fail_tags.contains(&request.tag) {
            return Err(MapError::OutOfMemory);
        }
        Ok(match request.slot {
            VirtSlot::Fixed(addr) => addr,
            VirtSlot::Anywhere { .. } => VirtAddr::new(0xFFFF_FF80_0000_0000),
        })
    }
}

/// Physical memory manager double: records registered arenas.
pub(crate) struct RecordingPmm {
    pub arenas: [Option<Arena>; 4],
    pub count: usize,
}

impl RecordingPmm {
    pub(crate) fn new() -> Self {
        Self {
            arenas: [None; 4],
            count: 0,
        }
    }
}

impl PhysicalMemory for RecordingPmm {
    fn register_arena(&mut self, arena: Arena) {
        self.arenas[self.count] = Some(arena);
        self.count += 1;
    }
}

/// Secure monitor double answering register-base queries.
pub(crate) struct MockMonitor {
    gicc: u64,
    gicd: u64,
    calls: Cell<u32>,
}

impl MockMonitor {
    pub(crate) fn new(gicc: u64, gicd: u64) -> Self {
        Self {
            gicc,
            gicd,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl SecureMonitor for MockMonitor {
    fn call(&self, _function: u32, arg0: u64, _arg1: u64, _arg2: u64) -> u64 {
        self.calls.set(self.calls.get() + 1);
        match arg0 {
            0 => self.gicc,
            1 => self.gicd,
            _ => 0,
        }
    }
}

/// Interrupt controller double.
pub(crate) struct MockIntc<'a> {
    clock: &'a SeqClock,
    pub init_at: Option<u32>,
    pub init_count: u32,
}

impl<'a> MockIntc<'a> {
    pub(crate) fn new(clock: &'a SeqClock) -> Self {
        Self {
            clock,
            init_at: None,
            init_count: 0,
        }
    }
}

impl InterruptController for MockIntc<'_> {
    fn init(&mut self) {
        let seq = self.clock.tick();
        if self.init_at.is_none() {
            self.init_at = Some(seq);
        }
        self.init_count += 1;
    }
}

/// System timer double.
pub(crate) struct MockTimer<'a> {
    clock: &'a SeqClock,
    pub init_at: Option<u32>,
    pub irq: Option<u32>,
}

impl<'a> MockTimer<'a> {
    pub(crate) fn new(clock: &'a SeqClock) -> Self {
        Self {
            clock,
            init_at: None,
            irq: None,
        }
    }
}

impl SystemTimer for MockTimer<'_> {
    fn init(&mut self, irq: u32) {
        let seq = self.clock.tick();
        if self.init_at.is_none() {
            self.init_at = Some(seq);
        }
        self.irq = Some(irq);
    }
}

/// Logger counting error-severity records, for tests that assert a critical
/// log was produced.
pub(crate) struct CountingLogger {
    errors: AtomicUsize,
}

impl CountingLogger {
    pub(crate) fn install(&'static self) {
        // Only the first test to install wins; the counter is shared anyway.
        let _ = log::set_logger(self);
        log::set_max_level(LevelFilter::Trace);
    }

    pub(crate) fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

impl Log for CountingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Error {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn flush(&self) {}
}

pub(crate) static LOGGER: CountingLogger = CountingLogger {
    errors: AtomicUsize::new(0),
};
