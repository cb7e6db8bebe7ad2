//! Structured trace events.
//!
//! `trace_event!` forwards to `tracing::trace!` under the `syncset` target
//! when the `tracing` feature is enabled and expands to nothing otherwise.
//! Events carry operation names and counts only, never member values.

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($argument:tt)*) => {
        ::tracing::trace!(target: "syncset", $($argument)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($argument:tt)*) => {};
}
