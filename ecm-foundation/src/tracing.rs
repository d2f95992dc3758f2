//! Tracing support for the object model
//!
//! Structured tracing that works in `no_std`: it wraps the `tracing` crate
//! and provides span helpers for the phases of composition, dispatch and
//! event delivery. Nothing here is compiled without the `tracing` feature;
//! the [`trace_event!`](crate::trace_event) and
//! [`enter_span!`](crate::enter_span) macros expand to nothing in that case.

pub use tracing::{debug, error, info, trace, warn};
pub use tracing::{debug_span, info_span, trace_span};
pub use tracing::{event, Level, Span};

/// Spans for the composition root
#[derive(Debug, Clone)]
pub struct CompositionTrace;

impl CompositionTrace {
    /// Span covering a whole `compose` call
    #[inline]
    pub fn composing(classes: usize, slots: usize, vtables: usize) -> Span {
        info_span!("compose", classes = classes, slots = slots, vtables = vtables)
    }

    /// Span for one validation phase
    #[inline]
    pub fn phase(name: &'static str) -> Span {
        debug_span!("compose_phase", phase = name)
    }

    /// Span for defining one declared class
    #[inline]
    pub fn defining(class: &str) -> Span {
        trace_span!("define_class", class = class)
    }
}

/// Spans for virtual dispatch
#[derive(Debug, Clone)]
pub struct DispatchTrace;

impl DispatchTrace {
    /// Span for one dispatched operation
    #[inline]
    pub fn call(class: &str, operation: &str) -> Span {
        trace_span!("dispatch", class = class, op = operation)
    }
}

/// Spans for event delivery
#[derive(Debug, Clone)]
pub struct EventTrace;

impl EventTrace {
    /// Span for one fan-out delivery
    #[inline]
    pub fn forward(event: &str, receivers: usize) -> Span {
        trace_span!("event_forward", event = event, receivers = receivers)
    }
}

/// Emit a tracing event; expands to nothing without the `tracing` feature.
///
/// ```ignore
/// trace_event!(DEBUG, class = "Circle", "class defined");
/// ```
#[macro_export]
macro_rules! trace_event {
    ($level:ident, $($arg:tt)*) => {
        $crate::tracing::event!($crate::tracing::Level::$level, $($arg)*)
    };
}

/// Enter a span for the rest of the scope; expands to nothing without the
/// `tracing` feature.
#[macro_export]
macro_rules! enter_span {
    ($span:expr) => {
        let _span = $span;
        let _guard = _span.enter();
    };
}
