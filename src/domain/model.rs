use chrono::NaiveDateTime;
use serde::Deserialize;

/// Attendance status of one user for one event.
///
/// The discriminant order matters: the participation modal renders one list
/// section per status, in exactly this order, and extraction maps section
/// position to status through [`SECTION_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationStatus {
    Unassigned,
    Going,
    Unsafe,
    Absent,
    NotNominated,
}

/// Canonical mapping from modal section index to status. Single source of
/// truth for the positional contract; index 0 is the first
/// `participation-list` section in document order.
pub const SECTION_ORDER: [ParticipationStatus; 5] = [
    ParticipationStatus::Unassigned,
    ParticipationStatus::Going,
    ParticipationStatus::Unsafe,
    ParticipationStatus::Absent,
    ParticipationStatus::NotNominated,
];

impl ParticipationStatus {
    pub fn from_section_index(index: usize) -> Option<Self> {
        SECTION_ORDER.get(index).copied()
    }
}

/// A spielerplus user as rendered in a roster row. Plain value object,
/// re-created on every extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One roster entry: user, status and the free-text reason they gave.
#[derive(Debug, Clone)]
pub struct UserParticipation {
    pub user: User,
    pub status: ParticipationStatus,
    pub reason: String,
}

/// Composite identity of an event. Both halves come verbatim from the
/// `event-<type>-<id>` panel identifier and are opaque to us.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub id: String,
    pub event_type: String,
}

impl EventKey {
    pub fn new(id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
        }
    }
}

/// A discovered event. Identity fields are fixed at discovery; times and
/// roster are filled in once by the detail-extraction step. All timestamps
/// are naive local time (the site renders a single implied timezone).
#[derive(Debug, Clone)]
pub struct Event {
    pub key: EventKey,
    pub name: String,
    pub meet: Option<NaiveDateTime>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub participations: Vec<UserParticipation>,
}

/// Partial event record scanned from a listing panel, before the detail
/// fetch. Immutable candidate; the catalog decides whether it is new.
#[derive(Debug, Clone)]
pub struct EventStub {
    pub key: EventKey,
    pub name: String,
}

/// Everything the participation modal yields for one event.
#[derive(Debug, Clone, Default)]
pub struct EventDetail {
    pub meet: Option<NaiveDateTime>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub participations: Vec<UserParticipation>,
}

/// JSON envelope wrapped around server-rendered fragments by the ajax
/// endpoints. The server omits `count` on some responses and sends `-1`
/// to signal an exhausted listing, so both fields default like the
/// original deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub count: i64,
}
