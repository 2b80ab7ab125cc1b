//! # Attendance Mutator
//!
//! Changes the acting user's attendance on a match. The local event is
//! rewritten first (optimistic update) and the backing write is issued
//! afterwards. A failed write leaves the optimistic value in place; the
//! caller receives an [`AttendanceFailure`] carrying the previous values so
//! it can surface a retry or roll back with [`AttendanceMutator::revert`].
//!
//! The acting user's record in `attendances` is found by user id when one is
//! configured. Without an id the first record is treated as the acting user.

use log::{debug, info, warn};
use shared::{AttendanceStatus, UpdateAttendanceRequest};

use super::event_index::EventStore;
use crate::services::api::AttendanceSink;

/// Values an optimistic update overwrote
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSnapshot {
    pub event_id: String,
    pub previous_status: Option<AttendanceStatus>,
    /// Position and previous status of the acting user's record, if one was rewritten
    pub previous_person: Option<(usize, AttendanceStatus)>,
}

/// A backing write that failed after the optimistic update was applied
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceFailure {
    pub snapshot: AttendanceSnapshot,
    pub attempted: AttendanceStatus,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    /// Local state updated and the write succeeded
    Confirmed,
    /// Local state updated, the write failed
    Failed(AttendanceFailure),
    /// No match with that id is loaded; nothing was written
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceMutator {
    acting_user_id: Option<String>,
}

impl AttendanceMutator {
    pub fn new(acting_user_id: Option<String>) -> Self {
        Self { acting_user_id }
    }

    pub fn acting_user_id(&self) -> Option<&str> {
        self.acting_user_id.as_deref()
    }

    /// Rewrite the local attendance of `event_id` in place
    pub fn apply(
        &self,
        store: &mut EventStore,
        event_id: &str,
        status: AttendanceStatus,
    ) -> Option<AttendanceSnapshot> {
        let acting_user_id = self.acting_user_id.as_deref();
        let event = store.match_mut(event_id)?;

        let previous_status = event.attendance_status.replace(status);

        let person_position = match acting_user_id {
            Some(user_id) => event
                .attendances
                .iter()
                .position(|person| person.user_id == user_id),
            None if !event.attendances.is_empty() => Some(0),
            None => None,
        };

        let previous_person = person_position.map(|position| {
            let person = &mut event.attendances[position];
            let previous = person.status;
            person.status = status;
            (position, previous)
        });

        debug!(
            "Applied attendance {} to {} (person record: {:?})",
            status, event_id, person_position
        );

        Some(AttendanceSnapshot {
            event_id: event_id.to_string(),
            previous_status,
            previous_person,
        })
    }

    /// Put back the values captured in `snapshot`
    pub fn revert(&self, store: &mut EventStore, snapshot: &AttendanceSnapshot) -> bool {
        let Some(event) = store.match_mut(&snapshot.event_id) else {
            return false;
        };

        event.attendance_status = snapshot.previous_status;
        if let Some((position, previous)) = snapshot.previous_person {
            if let Some(person) = event.attendances.get_mut(position) {
                person.status = previous;
            }
        }

        info!("↩️ Reverted attendance on {}", snapshot.event_id);
        true
    }

    /// Optimistically update `event_id`, then issue the backing write
    pub async fn set_attendance(
        &self,
        store: &mut EventStore,
        sink: &dyn AttendanceSink,
        event_id: &str,
        status: AttendanceStatus,
    ) -> AttendanceOutcome {
        let Some(snapshot) = self.apply(store, event_id, status) else {
            warn!("⚠️ Attendance change for unknown match {}", event_id);
            return AttendanceOutcome::NotFound;
        };

        let request = UpdateAttendanceRequest {
            event_id: event_id.to_string(),
            status,
        };

        match sink.update_attendance(&request).await {
            Ok(()) => {
                info!("✅ Attendance for {} set to {}", event_id, status);
                AttendanceOutcome::Confirmed
            }
            Err(e) => {
                warn!("⚠️ Attendance write for {} failed, keeping local value: {}", event_id, e);
                AttendanceOutcome::Failed(AttendanceFailure {
                    snapshot,
                    attempted: status,
                    error: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::anchor::CalendarAnchor;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::DateTime;
    use shared::{BoardEvent, CalendarEvent, MatchEvent, PersonAttendance};
    use std::sync::Mutex;

    struct RecordingSink {
        fail: bool,
        requests: Mutex<Vec<UpdateAttendanceRequest>>,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AttendanceSink for RecordingSink {
        async fn update_attendance(&self, request: &UpdateAttendanceRequest) -> Result<()> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(anyhow!("backend unavailable"))
            } else {
                Ok(())
            }
        }
    }

    fn person(user_id: &str, status: AttendanceStatus) -> PersonAttendance {
        PersonAttendance {
            user_id: user_id.to_string(),
            nickname: None,
            status,
        }
    }

    fn store_with(attendances: Vec<PersonAttendance>) -> EventStore {
        let anchor = CalendarAnchor::new(2025, 3).unwrap();
        let events = vec![
            CalendarEvent::Match(MatchEvent {
                id: "m1".to_string(),
                title: "Derby".to_string(),
                start_date: DateTime::parse_from_rfc3339("2025-03-15T19:00:00+09:00").unwrap(),
                end_date: None,
                attendance_status: Some(AttendanceStatus::Undecided),
                attendances,
            }),
            CalendarEvent::Board(BoardEvent {
                id: "b1".to_string(),
                title: "Cafe".to_string(),
                start_date: DateTime::parse_from_rfc3339("2025-03-15T11:00:00+09:00").unwrap(),
                end_date: None,
            }),
        ];
        let mut store = EventStore::new(anchor);
        store.replace_all(events, anchor);
        store
    }

    fn match_of<'a>(store: &'a EventStore, id: &str) -> &'a MatchEvent {
        store.get(id).and_then(CalendarEvent::as_match).unwrap()
    }

    #[test]
    fn test_apply_uses_user_identity() {
        let mut store = store_with(vec![
            person("partner", AttendanceStatus::Attending),
            person("me", AttendanceStatus::Undecided),
        ]);
        let mutator = AttendanceMutator::new(Some("me".to_string()));

        let snapshot = mutator.apply(&mut store, "m1", AttendanceStatus::NotAttending).unwrap();

        let event = match_of(&store, "m1");
        assert_eq!(event.attendance_status, Some(AttendanceStatus::NotAttending));
        assert_eq!(event.attendances[0].status, AttendanceStatus::Attending);
        assert_eq!(event.attendances[1].status, AttendanceStatus::NotAttending);
        assert_eq!(snapshot.previous_person, Some((1, AttendanceStatus::Undecided)));
    }

    #[test]
    fn test_apply_without_identity_uses_first_record() {
        let mut store = store_with(vec![
            person("a", AttendanceStatus::Undecided),
            person("b", AttendanceStatus::Undecided),
        ]);
        let mutator = AttendanceMutator::default();

        mutator.apply(&mut store, "m1", AttendanceStatus::Attending).unwrap();

        let event = match_of(&store, "m1");
        assert_eq!(event.attendances[0].status, AttendanceStatus::Attending);
        assert_eq!(event.attendances[1].status, AttendanceStatus::Undecided);
    }

    #[test]
    fn test_unknown_user_leaves_records_alone() {
        let mut store = store_with(vec![person("partner", AttendanceStatus::Attending)]);
        let mutator = AttendanceMutator::new(Some("me".to_string()));

        let snapshot = mutator.apply(&mut store, "m1", AttendanceStatus::NotAttending).unwrap();

        assert_eq!(snapshot.previous_person, None);
        assert_eq!(match_of(&store, "m1").attendances[0].status, AttendanceStatus::Attending);
    }

    #[test]
    fn test_board_events_have_no_attendance() {
        let mut store = store_with(Vec::new());
        let mutator = AttendanceMutator::default();
        assert!(mutator.apply(&mut store, "b1", AttendanceStatus::Attending).is_none());
    }

    #[test]
    fn test_revert_restores_snapshot() {
        let mut store = store_with(vec![person("me", AttendanceStatus::Undecided)]);
        let mutator = AttendanceMutator::new(Some("me".to_string()));

        let snapshot = mutator.apply(&mut store, "m1", AttendanceStatus::Attending).unwrap();
        assert!(mutator.revert(&mut store, &snapshot));

        let event = match_of(&store, "m1");
        assert_eq!(event.attendance_status, Some(AttendanceStatus::Undecided));
        assert_eq!(event.attendances[0].status, AttendanceStatus::Undecided);
    }

    #[tokio::test]
    async fn test_set_attendance_confirmed() {
        let mut store = store_with(Vec::new());
        let sink = RecordingSink::new(false);
        let mutator = AttendanceMutator::default();

        let outcome = mutator
            .set_attendance(&mut store, &sink, "m1", AttendanceStatus::Attending)
            .await;

        assert_eq!(outcome, AttendanceOutcome::Confirmed);
        assert_eq!(sink.requests.lock().unwrap().len(), 1);
        assert_eq!(match_of(&store, "m1").attendance_status, Some(AttendanceStatus::Attending));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_optimistic_value() {
        let mut store = store_with(Vec::new());
        let sink = RecordingSink::new(true);
        let mutator = AttendanceMutator::default();

        let outcome = mutator
            .set_attendance(&mut store, &sink, "m1", AttendanceStatus::NotAttending)
            .await;

        match outcome {
            AttendanceOutcome::Failed(failure) => {
                assert_eq!(failure.attempted, AttendanceStatus::NotAttending);
                assert_eq!(failure.snapshot.previous_status, Some(AttendanceStatus::Undecided));
                assert!(failure.error.contains("backend unavailable"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(match_of(&store, "m1").attendance_status, Some(AttendanceStatus::NotAttending));
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_written() {
        let mut store = store_with(Vec::new());
        let sink = RecordingSink::new(false);
        let mutator = AttendanceMutator::default();

        let outcome = mutator
            .set_attendance(&mut store, &sink, "nope", AttendanceStatus::Attending)
            .await;

        assert_eq!(outcome, AttendanceOutcome::NotFound);
        assert!(sink.requests.lock().unwrap().is_empty());
    }
}
