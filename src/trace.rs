//! Optional match tracing for diagnostics.
//!
//! A pattern tree accepts a trace sink at match time; every leaf attempt
//! appends one event describing the span it matched or the way it failed.

use crate::outcome::Miss;

/// One recorded match event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A leaf matched the half-open character span `start..end`.
    Matched { start: usize, end: usize },
    /// A leaf failed at `at`.
    Missed { at: usize, miss: Miss },
}

/// Receiver for trace events: append one event per call.
///
/// Implemented for `Vec<TraceEvent>` so tests and callers can collect into
/// an ordinary vector.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_appends_in_order() {
        let mut sink: Vec<TraceEvent> = Vec::new();
        sink.record(TraceEvent::Matched { start: 0, end: 2 });
        sink.record(TraceEvent::Missed {
            at: 2,
            miss: Miss::NoMatch,
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], TraceEvent::Matched { start: 0, end: 2 });
    }
}
