//! Per-form submit guard: one in-flight request per form.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct SubmitGate {
    busy: AtomicBool,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. `None` while another submit from the same form is running.
    pub fn try_begin(&self) -> Option<SubmitTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases its gate when dropped
#[derive(Debug)]
pub struct SubmitTicket<'a> {
    gate: &'a SubmitGate,
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
