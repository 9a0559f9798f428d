//! Property-based tests for overlap and availability using proptest.
//!
//! These verify invariants that hold for any booking layout, not just the
//! scenarios in `availability_tests.rs` and `overlap_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use proptest::prelude::*;
use unconf_engine::model::{Day, DayId, Session, SessionId, Venue, VenueId};
use unconf_engine::{compute_available_start_times, overlaps};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

/// A session at `hall` starting 0-600 minutes after 08:00 UTC, 5-240 minutes long.
fn arb_session() -> impl Strategy<Value = Session> {
    ("[a-e]", 0i64..600, 5i64..240).prop_map(|(id, offset, len)| {
        let start = base() + Duration::minutes(offset);
        Session {
            id: Some(SessionId::new(id)),
            title: "generated".to_string(),
            start: Some(start),
            end: Some(start + Duration::minutes(len)),
            venue: Some(VenueId::from("hall")),
            ..Session::default()
        }
    })
}

/// A booking window starting on a half hour, up to 10 hours long.
fn arb_day() -> impl Strategy<Value = Day> {
    (0i64..8, 0i64..=600).prop_map(|(half_hours, len)| {
        let start_bookings = base() + Duration::minutes(half_hours * 30);
        Day {
            id: DayId::from("d"),
            event: None,
            start: base(),
            end: base() + Duration::hours(16),
            start_bookings,
            end_bookings: start_bookings + Duration::minutes(len),
        }
    })
}

fn hall() -> Venue {
    Venue {
        id: VenueId::from("hall"),
        name: "Hall".to_string(),
        capacity: 10,
        bookable: true,
        color: String::new(),
        events: vec![],
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_session(), b in arb_session()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn session_never_overlaps_itself(a in arb_session()) {
        prop_assert!(!overlaps(&a, &a));
    }

    #[test]
    fn touching_sessions_never_overlap(a in arb_session(), len in 1i64..120) {
        let mut b = a.clone();
        b.id = Some(SessionId::from("other"));
        b.start = a.end;
        b.end = a.end.map(|end| end + Duration::minutes(len));
        prop_assert!(!overlaps(&a, &b));
    }

    #[test]
    fn slot_count_matches_window(day in arb_day()) {
        let slots = compute_available_start_times(&day, &[], &Session::empty(), None, Berlin);
        let minutes = day.booking_window_minutes();
        let expected = (minutes + 29) / 30;
        prop_assert_eq!(slots.len() as i64, expected);
        for (i, slot) in slots.iter().enumerate() {
            prop_assert_eq!(slot.start, day.start_bookings + Duration::minutes(30 * i as i64));
        }
    }

    #[test]
    fn availability_flag_matches_occupancy(
        day in arb_day(),
        sessions in prop::collection::vec(arb_session(), 0..6),
    ) {
        let slots = compute_available_start_times(
            &day, &sessions, &Session::empty(), Some(&hall()), Berlin,
        );
        for slot in &slots {
            let occupied = sessions.iter().filter_map(Session::interval)
                .any(|(s, e)| s <= slot.start && slot.start < e);
            prop_assert_eq!(slot.available, !occupied);
            if slot.available {
                let next = sessions.iter().filter_map(Session::interval)
                    .map(|(s, _)| s)
                    .filter(|&s| s > slot.start)
                    .min()
                    .unwrap_or(day.end_bookings);
                prop_assert!(slot.max_duration_minutes > 0);
                prop_assert_eq!(slot.max_duration_minutes, (next - slot.start).num_minutes());
            } else {
                prop_assert_eq!(slot.max_duration_minutes, 0);
            }
        }
    }

    #[test]
    fn editing_never_blocks_own_ticks(
        day in arb_day(),
        mine in arb_session(),
    ) {
        let mut mine = mine;
        mine.id = Some(SessionId::from("mine"));
        let slots = compute_available_start_times(
            &day, std::slice::from_ref(&mine), &mine, Some(&hall()), Berlin,
        );
        prop_assert!(slots.iter().all(|s| s.available));
    }
}
