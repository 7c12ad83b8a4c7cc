use crate::domain::model::{Event, EventDetail, EventKey, EventStub};
use std::collections::HashMap;

/// The deduplicated set of events discovered this session. The catalog is
/// the only place candidate records from extraction become stored state.
#[derive(Debug, Default)]
pub struct EventCatalog {
    events: HashMap<EventKey, Event>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, key: &EventKey) -> Option<&Event> {
        self.events.get(key)
    }

    pub fn get_mut(&mut self, key: &EventKey) -> Option<&mut Event> {
        self.events.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Insert-if-absent merge of a listing stub. Identity fields of an
    /// already-present event are never overwritten. Returns `true` when the
    /// event was new, which is the signal to fetch its detail.
    pub fn insert_stub(&mut self, stub: EventStub) -> bool {
        if self.events.contains_key(&stub.key) {
            return false;
        }
        let event = Event {
            key: stub.key.clone(),
            name: stub.name,
            meet: None,
            start: None,
            end: None,
            participations: Vec::new(),
        };
        self.events.insert(stub.key, event);
        true
    }

    /// Populate times and roster from a parsed detail fragment. Called once
    /// per event, right after its stub was inserted.
    pub fn apply_detail(&mut self, key: &EventKey, detail: EventDetail) {
        let Some(event) = self.events.get_mut(key) else {
            tracing::warn!("detail for unknown event {key:?} dropped");
            return;
        };
        event.meet = detail.meet;
        event.start = detail.start;
        event.end = detail.end;
        event.participations = detail.participations;
    }

    /// Events sorted ascending by start time, undated events last. Computed
    /// on demand; ordering is presentation, not stored state.
    pub fn ordered_by_start(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.values().collect();
        events.sort_by_key(|e| (e.start.is_none(), e.start));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stub(id: &str, event_type: &str, name: &str) -> EventStub {
        EventStub {
            key: EventKey::new(id, event_type),
            name: name.to_string(),
        }
    }

    #[test]
    fn insert_is_idempotent_per_key() {
        let mut catalog = EventCatalog::new();
        assert!(catalog.insert_stub(stub("1", "training", "Practice")));
        assert!(!catalog.insert_stub(stub("1", "training", "Renamed")));
        assert_eq!(catalog.len(), 1);
        // identity and name of the first insert win
        let key = EventKey::new("1", "training");
        assert_eq!(catalog.get(&key).unwrap().name, "Practice");
    }

    #[test]
    fn same_id_different_type_are_distinct() {
        let mut catalog = EventCatalog::new();
        assert!(catalog.insert_stub(stub("1", "training", "Practice")));
        assert!(catalog.insert_stub(stub("1", "game", "Match")));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn orders_by_start_with_undated_last() {
        let mut catalog = EventCatalog::new();
        catalog.insert_stub(stub("a", "training", "Later"));
        catalog.insert_stub(stub("b", "training", "Earlier"));
        catalog.insert_stub(stub("c", "training", "Undated"));

        let day = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap()
        };
        catalog.apply_detail(
            &EventKey::new("a", "training"),
            EventDetail {
                start: Some(day(9)),
                ..Default::default()
            },
        );
        catalog.apply_detail(
            &EventKey::new("b", "training"),
            EventDetail {
                start: Some(day(2)),
                ..Default::default()
            },
        );

        let names: Vec<&str> = catalog
            .ordered_by_start()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Earlier", "Later", "Undated"]);
    }
}
