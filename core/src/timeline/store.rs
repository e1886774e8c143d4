use std::borrow::Cow;

use hashbrown::HashMap;

use super::game_event::{EventKind, GameEvent, TimelineRecord};

/// Stable handle to a stored event. Valid until the next [`EventTimeline::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(usize);

impl EventId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Append-only arena of events, partitioned by kind in arrival order.
///
/// Corrections patch the arena copy in place, so every later query observes them.
#[derive(Debug, Clone, Default)]
pub struct EventTimeline {
    events: Vec<GameEvent>,
    by_kind: HashMap<EventKind, Vec<EventId>>,
}

impl EventTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Writes ---

    pub fn append(&mut self, event: GameEvent) -> EventId {
        let id = EventId(self.events.len());
        self.by_kind.entry(event.kind()).or_default().push(id);
        self.events.push(event);
        id
    }

    pub fn push<T: TimelineRecord>(&mut self, record: T) -> EventId {
        self.append(record.into_event())
    }

    /// Apply `patch` to a stored event. Returns false for a stale id.
    pub fn update_in_place<F>(&mut self, id: EventId, patch: F) -> bool
    where
        F: FnOnce(&mut GameEvent),
    {
        match self.events.get_mut(id.0) {
            Some(event) => {
                patch(event);
                true
            }
            None => false,
        }
    }

    /// Typed variant of [`update_in_place`](Self::update_in_place)
    pub fn update_record<T, F>(&mut self, id: EventId, patch: F) -> bool
    where
        T: TimelineRecord,
        F: FnOnce(&mut T),
    {
        match self.record_mut::<T>(id) {
            Some(record) => {
                patch(record);
                true
            }
            None => false,
        }
    }

    /// Drop everything. Only a fresh match start does this.
    pub fn reset(&mut self) {
        self.events.clear();
        self.by_kind.clear();
    }

    // --- Untyped reads ---

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&GameEvent> {
        self.events.get(id.0)
    }

    pub fn get_mut(&mut self, id: EventId) -> Option<&mut GameEvent> {
        self.events.get_mut(id.0)
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    pub fn ids(&self, kind: EventKind) -> &[EventId] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn query(&self, kind: EventKind) -> impl Iterator<Item = &GameEvent> {
        self.ids(kind).iter().filter_map(|id| self.events.get(id.0))
    }

    /// Ids of several kinds merged back into global arrival order
    pub fn query_many(&self, kinds: &[EventKind]) -> Vec<EventId> {
        let mut ids: Vec<EventId> = kinds.iter().flat_map(|k| self.ids(*k).iter().copied()).collect();
        ids.sort_unstable();
        ids
    }

    // --- Typed reads ---

    fn ids_for<T: TimelineRecord>(&self) -> Cow<'_, [EventId]> {
        match T::KINDS {
            [kind] => Cow::Borrowed(self.ids(*kind)),
            kinds => Cow::Owned(self.query_many(kinds)),
        }
    }

    pub fn count_of<T: TimelineRecord>(&self) -> usize {
        T::KINDS.iter().map(|k| self.count(*k)).sum()
    }

    pub fn record<T: TimelineRecord>(&self, id: EventId) -> Option<&T> {
        self.events.get(id.0).and_then(T::from_event)
    }

    pub fn record_mut<T: TimelineRecord>(&mut self, id: EventId) -> Option<&mut T> {
        self.events.get_mut(id.0).and_then(T::from_event_mut)
    }

    pub fn record_ids<T: TimelineRecord>(&self) -> Vec<EventId> {
        self.ids_for::<T>().into_owned()
    }

    /// All records of one payload type in arrival order
    pub fn records<T: TimelineRecord>(&self) -> impl Iterator<Item = &T> {
        let ids = self.ids_for::<T>();
        (0..ids.len()).filter_map(move |i| self.record::<T>(ids[i]))
    }

    /// The `index`-th record of a payload type
    pub fn nth<T: TimelineRecord>(&self, index: usize) -> Option<&T> {
        let ids = self.ids_for::<T>();
        ids.get(index).and_then(|id| self.record::<T>(*id))
    }

    pub fn last<T: TimelineRecord>(&self) -> Option<&T> {
        let ids = self.ids_for::<T>();
        ids.last().and_then(|id| self.record::<T>(*id))
    }
}
