//! Run progress reporting
//!
//! A split run exposes one scalar in [0, 1] plus a terminal message through
//! [`Progress`], a cheaply clonable handle the caller may poll from any
//! thread. Within a run the value only moves forward; it resets to zero when
//! the next run starts.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

/// Phase of the split state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPhase {
    Idle,
    Detecting,
    Planning,
    Writing,
    Done,
    Failed,
}

impl SplitPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => SplitPhase::Detecting,
            2 => SplitPhase::Planning,
            3 => SplitPhase::Writing,
            4 => SplitPhase::Done,
            5 => SplitPhase::Failed,
            _ => SplitPhase::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            SplitPhase::Idle => 0,
            SplitPhase::Detecting => 1,
            SplitPhase::Planning => 2,
            SplitPhase::Writing => 3,
            SplitPhase::Done => 4,
            SplitPhase::Failed => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SplitPhase::Done | SplitPhase::Failed)
    }
}

#[derive(Default)]
struct ProgressInner {
    // f64 bits; non-negative values compare correctly as u64
    value_bits: AtomicU64,
    phase: AtomicU8,
    message: Mutex<Option<String>>,
}

/// Observable progress of one split run
#[derive(Clone, Default)]
pub struct Progress {
    inner: Arc<ProgressInner>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current progress in [0, 1], monotonically non-decreasing within a run
    pub fn value(&self) -> f64 {
        f64::from_bits(self.inner.value_bits.load(Ordering::Acquire))
    }

    pub fn phase(&self) -> SplitPhase {
        SplitPhase::from_u8(self.inner.phase.load(Ordering::Acquire))
    }

    /// Terminal human-readable message, present once the run is done or
    /// failed
    pub fn message(&self) -> Option<String> {
        self.inner.message.lock().ok()?.clone()
    }

    /// Start of a new run: value back to zero, prior message cleared
    pub(crate) fn reset(&self) {
        self.inner.value_bits.store(0, Ordering::Release);
        self.inner
            .phase
            .store(SplitPhase::Idle.as_u8(), Ordering::Release);
        if let Ok(mut message) = self.inner.message.lock() {
            *message = None;
        }
    }

    pub(crate) fn set_phase(&self, phase: SplitPhase) {
        self.inner.phase.store(phase.as_u8(), Ordering::Release);
    }

    /// Raise the value to `target`, clamped to [0, 1]; lower targets are
    /// ignored to keep the published value monotonic
    pub(crate) fn advance_to(&self, target: f64) {
        let target = target.clamp(0.0, 1.0);
        let bits = target.to_bits();
        let _ = self
            .inner
            .value_bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (bits > current).then_some(bits)
            });
    }

    pub(crate) fn finish(&self, message: String) {
        self.advance_to(1.0);
        self.set_message(message);
        self.set_phase(SplitPhase::Done);
    }

    pub(crate) fn fail(&self, message: String) {
        self.set_message(message);
        self.set_phase(SplitPhase::Failed);
    }

    fn set_message(&self, message: String) {
        if let Ok(mut slot) = self.inner.message.lock() {
            *slot = Some(message);
        }
    }
}

/// Cooperative cancellation flag, honored between chunk writes
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
