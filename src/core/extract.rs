//! Pure markup extraction. Everything here is stateless: fragments go in,
//! immutable candidate records come out, and the catalog decides what to do
//! with them.
//!
//! The site exposes no API, so these routines codify its rendered structure:
//! class names, the `event-<type>-<id>` panel identifier, the fixed date-line
//! format and the positional section-to-status contract. Positional
//! assumptions are kept behind the small named helpers at the bottom so a
//! layout change breaks in one place.

use crate::domain::model::{
    EventDetail, EventKey, EventStub, ParticipationStatus, User, UserParticipation,
};
use crate::utils::error::{Result, ScrapeError};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Rendered in a time-item block when no time has been set for the event.
const TIME_PLACEHOLDER: &str = "-:-";

const DATE_LINE_FORMAT: &str = "%d.%m.%y %H:%M";
const TIME_FORMAT: &str = "%H:%M";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{css}': {e}"))
}

static PANEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"div.panel[id^="event-"]"#));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("div.panel-heading-text"));
static SUBLABEL: LazyLock<Selector> = LazyLock::new(|| selector("div.menu-header-sublabel"));
static DATE_LINE: LazyLock<Selector> =
    LazyLock::new(|| selector("div.participation-header > div.subline"));
static TIME_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("div.event-time-item"));
static SECTION: LazyLock<Selector> = LazyLock::new(|| selector("div.participation-list"));
static ROSTER_ROW: LazyLock<Selector> =
    LazyLock::new(|| selector("div.participation-list-user"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("digit pattern"));

/// The logged-in user's display name as shown in the page menu, or `None`
/// when the element is absent (e.g. the session expired and the server
/// rendered the anonymous shell).
pub fn find_display_name(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let label = doc.select(&SUBLABEL).next()?;
    let name = clean_text(&label);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Scan a listing page or pagination fragment for event panels. Panels with
/// an identifier that does not split into exactly `event-<type>-<id>` or
/// with no title node are skipped; the caller's catalog handles dedup.
pub fn scan_listing(html: &str) -> Vec<EventStub> {
    let doc = Html::parse_document(html);
    let mut stubs = Vec::new();

    for panel in doc.select(&PANEL) {
        let raw_id = panel.value().attr("id").unwrap_or_default();
        let Some(key) = parse_panel_id(raw_id) else {
            tracing::debug!("skipping panel with unparsable id '{raw_id}'");
            continue;
        };
        let Some(heading) = panel.select(&HEADING).next() else {
            tracing::debug!("skipping panel '{raw_id}': no title node");
            continue;
        };
        stubs.push(EventStub {
            key,
            name: heading_title(&heading),
        });
    }

    stubs
}

/// Parse a participation modal: start timestamp from the date line, meet/end
/// from the three time-item blocks, roster from the positional list sections.
pub fn parse_detail(html: &str) -> Result<EventDetail> {
    let doc = Html::parse_document(html);
    let mut detail = EventDetail::default();

    if let Some(line) = doc.select(&DATE_LINE).next() {
        let text = clean_text(&line).replace("- ", "").replace(" Uhr", "");
        detail.start = Some(
            NaiveDateTime::parse_from_str(text.trim(), DATE_LINE_FORMAT)
                .map_err(|e| ScrapeError::extraction(format!("date line '{text}': {e}")))?,
        );
    }

    let time_items: Vec<ElementRef> = doc.select(&TIME_ITEM).collect();
    // Layout renders meet / start / end; the middle block repeats the date
    // line and is ignored. Anything but three blocks means an unexpected
    // layout, and without a start date there is nothing to anchor times to.
    if time_items.len() == 3 {
        if let Some(start) = detail.start {
            detail.meet = Some(derive_time(&time_items[0], start, Duration::hours(-1))?);
            detail.end = Some(derive_time(&time_items[2], start, Duration::hours(3))?);
        } else {
            tracing::debug!("no start date; skipping meet/end derivation");
        }
    }

    for (index, section) in doc.select(&SECTION).enumerate() {
        let Some(status) = ParticipationStatus::from_section_index(index) else {
            tracing::warn!("unexpected participation section at index {index}; skipping");
            continue;
        };
        for row in section.select(&ROSTER_ROW) {
            if let Some(participation) = parse_roster_row(&row, status) {
                detail.participations.push(participation);
            }
        }
    }

    Ok(detail)
}

/// Split `event-<type>-<id>` into its key. All three parts must be present
/// and non-empty.
fn parse_panel_id(raw: &str) -> Option<EventKey> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(EventKey::new(parts[2], parts[1]))
}

/// Title of an event panel. Headings with more than one child div carry a
/// subtitle, rendered as `title - subtitle`; otherwise the heading's own
/// text is the title.
fn heading_title(heading: &ElementRef) -> String {
    let divs: Vec<ElementRef> = element_children(heading)
        .into_iter()
        .filter(|e| e.value().name() == "div")
        .collect();
    if divs.len() > 1 {
        format!("{} - {}", clean_text(&divs[0]), clean_text(&divs[1]))
    } else {
        clean_text(heading)
    }
}

/// Read a time-item block's clock text and anchor it on the start date.
/// The placeholder value means "no time set" and falls back to a fixed
/// offset from the start.
fn derive_time(
    block: &ElementRef,
    start: NaiveDateTime,
    fallback_offset: Duration,
) -> Result<NaiveDateTime> {
    let text = nth_element_child(block, 1)
        .map(|el| clean_text(&el))
        .unwrap_or_default()
        .replace(" Uhr", "");
    let text = text.trim();

    if text == TIME_PLACEHOLDER || text.is_empty() {
        return Ok(start + fallback_offset);
    }

    let time = NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|e| ScrapeError::extraction(format!("time item '{text}': {e}")))?;
    Ok(start.date().and_time(time))
}

/// One roster row: user id from the first digit run among the avatar
/// element's attribute values, name and reason from the text container.
/// Rows that carry no user id are skipped.
fn parse_roster_row(row: &ElementRef, status: ParticipationStatus) -> Option<UserParticipation> {
    let children = element_children(row);

    let id_holder = children.first()?;
    let uid = id_holder
        .value()
        .attrs()
        .find_map(|(_, value)| first_digit_run(value))?;

    let text_box = children.get(1)?;
    let text_children = element_children(text_box);
    let name = text_children
        .first()
        .map(clean_text)
        .unwrap_or_default();
    let reason = text_children.get(1).map(clean_text).unwrap_or_default();

    Some(UserParticipation {
        user: User::new(uid, name),
        status,
        reason,
    })
}

/// Element children only, skipping text and comment nodes.
fn element_children<'a>(el: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap).collect()
}

fn nth_element_child<'a>(el: &ElementRef<'a>, n: usize) -> Option<ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap).nth(n)
}

/// Concatenated text content with runs of whitespace collapsed to single
/// spaces and the ends trimmed.
fn clean_text(el: &ElementRef) -> String {
    let mut out = String::new();
    let mut prev_space = true;
    for chunk in el.text() {
        for ch in chunk.chars() {
            if ch.is_whitespace() {
                if !prev_space {
                    out.push(' ');
                    prev_space = true;
                }
            } else {
                out.push(ch);
                prev_space = false;
            }
        }
    }
    out.trim_end().to_string()
}

fn first_digit_run(s: &str) -> Option<String> {
    DIGITS.find(s).map(|m| m.as_str().to_string())
}
