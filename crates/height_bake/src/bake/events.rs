//! Event types and sinks for observing bakes.
//!
//! This module defines [`BakeEvent`] and a set of sinks to emit, collect, or forward
//! events while [`crate::bake::GridBaker::bake_with_events`] runs.
use crate::bake::BakeStats;
use crate::grid::{CellId, GridGeometry};

/// Describes events emitted by a bake.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum BakeEvent {
    /// Emitted before the first cell is sampled.
    BakeStarted {
        /// Geometry being baked.
        geometry: GridGeometry,
        /// Sub-samples per cell along each axis.
        samples_per_axis: u32,
    },

    /// Emitted after every sub-sample of a cell was traced.
    CellBaked {
        cell: CellId,
        /// Maximum hit elevation, or `None` if every ray missed.
        max_height: Option<f32>,
        /// Number of rays that hit the terrain in this cell.
        hits: u32,
    },

    /// Emitted once the cache is complete.
    BakeFinished { stats: BakeStats },

    /// Non-fatal warning generated during the bake.
    Warning {
        /// Context string (e.g. cell index).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`BakeEvent`], used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BakeEventKind {
    BakeStarted,
    CellBaked,
    BakeFinished,
    Warning,
}

impl BakeEvent {
    pub fn kind(&self) -> BakeEventKind {
        match self {
            BakeEvent::BakeStarted { .. } => BakeEventKind::BakeStarted,
            BakeEvent::CellBaked { .. } => BakeEventKind::CellBaked,
            BakeEvent::BakeFinished { .. } => BakeEventKind::BakeFinished,
            BakeEvent::Warning { .. } => BakeEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`BakeEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: BakeEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: BakeEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = BakeEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: BakeEvent) {}

    #[inline]
    fn wants(&self, _kind: BakeEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(BakeEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(BakeEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(BakeEvent),
{
    #[inline]
    fn send(&mut self, event: BakeEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<BakeEvent>,
    only: Option<Vec<BakeEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events whose kind is in `kinds`.
    pub fn only(kinds: impl IntoIterator<Item = BakeEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<BakeEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[BakeEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: BakeEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: BakeEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: BakeEvent) {
        let Some(last_idx) = self.sinks.len().checked_sub(1) else {
            return;
        };
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: BakeEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> BakeEvent {
        BakeEvent::Warning {
            context: context.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(warning("a").kind(), BakeEventKind::Warning);
        let event = BakeEvent::CellBaked {
            cell: CellId(0, 0),
            max_height: None,
            hits: 0,
        };
        assert_eq!(event.kind(), BakeEventKind::CellBaked);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(BakeEventKind::BakeFinished));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filters_by_kind() {
        let mut sink = VecSink::only([BakeEventKind::CellBaked]);
        assert!(!sink.wants(BakeEventKind::Warning));
        sink.send(warning("dropped"));
        sink.send(BakeEvent::CellBaked {
            cell: CellId(1, 2),
            max_height: Some(3.0),
            hits: 1,
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), BakeEventKind::CellBaked);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            BakeEvent::Warning { .. }
        ));
    }

    #[test]
    fn multi_sink_wants_any() {
        let multi = MultiSink::with_sinks(vec![
            VecSink::only([BakeEventKind::Warning]),
            VecSink::only([BakeEventKind::BakeFinished]),
        ]);
        assert!(multi.wants(BakeEventKind::Warning));
        assert!(multi.wants(BakeEventKind::BakeFinished));
        assert!(!multi.wants(BakeEventKind::CellBaked));
        assert!(!MultiSink::<VecSink>::new().wants(BakeEventKind::Warning));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
