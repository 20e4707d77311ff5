//! crates/slotlog/src/trace.rs
//! Internal diagnostics for binding and flushing.
//!
//! Every helper is an inline no-op unless the `tracing` feature is enabled, in
//! which case events are emitted under the `slotlog::bind` and
//! `slotlog::flush` targets. Line text itself is never attached to these
//! events; only slot numbers and byte counts are.

#[cfg(feature = "tracing")]
const BIND_TARGET: &str = "slotlog::bind";

#[cfg(feature = "tracing")]
const FLUSH_TARGET: &str = "slotlog::flush";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces an attempt to bind the process-wide sink.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_bind(accepted: bool) {
    if accepted {
        tracing::debug!(target: BIND_TARGET, "line_sink_bound");
    } else {
        tracing::warn!(target: BIND_TARGET, "line_sink_rebind_rejected");
    }
}

/// Traces a completed emission handed to the sink.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_flush(slot: usize, bytes: usize) {
    tracing::trace!(target: FLUSH_TARGET, slot, bytes, "line_flushed");
}

/// Traces an emission abandoned because its expression failed.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_suppressed(slot: usize, retained: usize) {
    tracing::debug!(target: FLUSH_TARGET, slot, retained, "line_flush_suppressed");
}

// ============================================================================
// No-op stubs
// ============================================================================

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_bind(_accepted: bool) {}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_flush(_slot: usize, _bytes: usize) {}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_suppressed(_slot: usize, _retained: usize) {}
