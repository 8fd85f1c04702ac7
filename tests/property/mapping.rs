//! Property-based tests for the row/domain mappers.
//!
//! Uses proptest to verify:
//! 1. Mapping is total: any row that deserialized maps without panicking,
//!    whatever its columns contain.
//! 2. A fully-populated row survives a row → domain → row round-trip.
//! 3. Row → domain mapping is idempotent once defaults are applied.
//! 4. Time normalization is canonical: normalizing twice equals once.
//! 5. Draft payloads always carry the invariant creation defaults.

use proptest::prelude::*;

use flowspace_model::map::{
    apply_task_patch, event_from_row, format_date, format_time, new_task_row, normalize_time,
    note_from_row, task_from_row, task_to_row,
};
use flowspace_model::row::{EventRow, NoteRow, TaskRow};
use flowspace_model::task::{TaskDraft, TaskPatch};
use flowspace_model::{Priority, TaskStatus};

// --- Strategies ---

/// Free-form text as it might appear in any string column.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!-]{0,24}"
}

/// A valid calendar date, avoiding month-length edge cases.
fn arb_date() -> impl Strategy<Value = chrono::NaiveDate> {
    (1970..2100i32, 1..=12u32, 1..=28u32).prop_map(|(y, m, d)| {
        chrono::NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    })
}

/// A valid time of day.
fn arb_time() -> impl Strategy<Value = chrono::NaiveTime> {
    (0..24u32, 0..60u32, 0..60u32).prop_map(|(h, m, s)| {
        chrono::NaiveTime::from_hms_opt(h, m, s).expect("valid time")
    })
}

/// A recognized wire priority string.
fn arb_wire_priority() -> impl Strategy<Value = String> {
    prop_oneof![Just("low"), Just("medium"), Just("high")].prop_map(str::to_string)
}

/// A recognized wire status string.
fn arb_wire_status() -> impl Strategy<Value = String> {
    prop_oneof![Just("todo"), Just("in-progress"), Just("completed")].prop_map(str::to_string)
}

/// A task row with every optional column populated with canonical wire
/// values, as the backend would return it.
fn arb_full_task_row() -> impl Strategy<Value = TaskRow> {
    (
        arb_text(),
        arb_text(),
        arb_text(),
        arb_text(),
        arb_wire_priority(),
        arb_wire_status(),
        arb_date(),
        arb_text(),
        prop::collection::vec(arb_text(), 0..4),
        any::<bool>(),
        prop::option::of(arb_text()),
    )
        .prop_map(
            |(id, user_id, title, description, priority, status, due, assignee, tags, completed, suggestion)| {
                TaskRow {
                    id,
                    user_id,
                    title,
                    description: Some(description),
                    priority: Some(priority),
                    status: Some(status),
                    due_date: format_date(due),
                    assignee: Some(assignee),
                    tags: Some(tags),
                    completed: Some(completed),
                    ai_suggestion: suggestion,
                }
            },
        )
}

/// A task row where every optional column may be missing and string
/// columns may hold arbitrary (possibly malformed) text.
fn arb_messy_task_row() -> impl Strategy<Value = TaskRow> {
    (
        arb_text(),
        arb_text(),
        arb_text(),
        prop::option::of(arb_text()),
        prop::option::of(arb_text()),
        prop::option::of(arb_text()),
        arb_text(),
        prop::option::of(arb_text()),
        prop::option::of(prop::collection::vec(arb_text(), 0..4)),
        prop::option::of(any::<bool>()),
        prop::option::of(arb_text()),
    )
        .prop_map(
            |(id, user_id, title, description, priority, status, due_date, assignee, tags, completed, suggestion)| {
                TaskRow {
                    id,
                    user_id,
                    title,
                    description,
                    priority,
                    status,
                    due_date,
                    assignee,
                    tags,
                    completed,
                    ai_suggestion: suggestion,
                }
            },
        )
}

// --- Property tests ---

proptest! {
    /// Any row maps to a domain task without panicking, however messy.
    #[test]
    fn task_mapping_is_total(row in arb_messy_task_row()) {
        let _ = task_from_row(row);
    }

    /// A fully-populated canonical row survives row → domain → row.
    #[test]
    fn full_task_row_round_trips(row in arb_full_task_row()) {
        let user_id = row.user_id.clone();
        let task = task_from_row(row.clone());
        prop_assert_eq!(task_to_row(&task, &user_id), row);
    }

    /// Mapping to domain and back stabilizes after one pass: defaults
    /// applied once are preserved exactly by every further pass.
    #[test]
    fn task_mapping_is_idempotent(row in arb_messy_task_row()) {
        let once = task_from_row(row);
        let twice = task_from_row(task_to_row(&once, "u1"));
        prop_assert_eq!(once, twice);
    }

    /// Unrecognized enum strings always fall back to the defaults.
    #[test]
    fn unknown_enum_strings_fall_back(mut row in arb_full_task_row(), junk in "[a-z]{4,10}") {
        prop_assume!(Priority::from_wire(&junk).is_none());
        prop_assume!(TaskStatus::from_wire(&junk).is_none());
        row.priority = Some(junk.clone());
        row.status = Some(junk);
        let task = task_from_row(row);
        prop_assert_eq!(task.priority, Priority::Medium);
        prop_assert_eq!(task.status, TaskStatus::Todo);
    }

    /// Wire-format dates round-trip exactly.
    #[test]
    fn dates_round_trip_through_wire_format(date in arb_date()) {
        let wire = format_date(date);
        prop_assert_eq!(flowspace_model::map::parse_date(&wire), date);
    }

    /// Normalizing a time string is canonical: feeding the normalized
    /// form back through changes nothing.
    #[test]
    fn time_normalization_is_canonical(time in arb_time()) {
        let wire = format_time(time);
        prop_assert_eq!(normalize_time(&wire), time);

        // Minute-precision input normalizes to the same time of day
        // with zero seconds.
        let minute_wire = time.format("%H:%M").to_string();
        prop_assert_eq!(
            format_time(normalize_time(&minute_wire)),
            format!("{minute_wire}:00")
        );
    }

    /// Time normalization never panics on arbitrary input.
    #[test]
    fn time_normalization_is_total(s in ".{0,16}") {
        let _ = normalize_time(&s);
    }

    /// Creation payloads always start as uncompleted todos owned by the
    /// requesting user, whatever the draft contains.
    #[test]
    fn new_task_rows_carry_creation_invariants(
        title in prop::option::of(arb_text()),
        description in prop::option::of(arb_text()),
        due in prop::option::of(arb_date()),
        today in arb_date(),
    ) {
        let draft = TaskDraft {
            title,
            description,
            priority: None,
            due_date: due,
            tags: None,
        };
        let row = new_task_row(draft, "u1", today);
        prop_assert_eq!(row.status, "todo");
        prop_assert!(!row.completed);
        prop_assert_eq!(row.user_id, "u1");
        prop_assert_eq!(row.assignee, "You");
        prop_assert_eq!(row.due_date, format_date(due.unwrap_or(today)));
    }

    /// An empty patch is the identity on any task.
    #[test]
    fn empty_patch_is_identity(row in arb_full_task_row()) {
        let mut task = task_from_row(row);
        let before = task.clone();
        apply_task_patch(&mut task, &TaskPatch::default());
        prop_assert_eq!(task, before);
    }

    /// A patched field always lands; unpatched fields never move.
    #[test]
    fn completed_patch_touches_only_completed(row in arb_full_task_row(), value in any::<bool>()) {
        let mut task = task_from_row(row);
        let before = task.clone();
        apply_task_patch(
            &mut task,
            &TaskPatch {
                completed: Some(value),
                ..TaskPatch::default()
            },
        );
        prop_assert_eq!(task.completed, value);
        prop_assert_eq!(task.title, before.title);
        prop_assert_eq!(task.status, before.status);
        prop_assert_eq!(task.due_date, before.due_date);
        prop_assert_eq!(task.tags, before.tags);
    }

    /// Event mapping is total on arbitrary string columns.
    #[test]
    fn event_mapping_is_total(
        id in arb_text(),
        title in arb_text(),
        date in arb_text(),
        time in arb_text(),
        duration in prop::option::of(arb_text()),
    ) {
        let row = EventRow {
            id,
            user_id: "u1".to_string(),
            title,
            description: None,
            date,
            time,
            duration,
        };
        let _ = event_from_row(row);
    }

    /// Note mapping is total, including on malformed timestamps.
    #[test]
    fn note_mapping_is_total(
        id in arb_text(),
        title in arb_text(),
        content in arb_text(),
        created_at in ".{0,32}",
    ) {
        let row = NoteRow {
            id,
            user_id: "u1".to_string(),
            title,
            content,
            tags: None,
            created_at,
        };
        let _ = note_from_row(row);
    }
}
