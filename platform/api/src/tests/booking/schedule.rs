use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::booking::{free_slots, overlaps, validate, ScheduleError, TimeWindow};
use crate::config::BookingConfig;

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
}

fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
	TimeWindow::new(start, end)
}

fn now() -> DateTime<Utc> {
	at(1, 6, 0)
}

#[test]
fn test_validate_accepts_window_inside_opening_hours() {
	let config = BookingConfig::default();

	assert_eq!(validate(&window(at(2, 10, 0), at(2, 11, 30)), &config, now()), Ok(()));
	assert_eq!(validate(&window(at(2, 8, 0), at(2, 9, 0)), &config, now()), Ok(()));
	assert_eq!(validate(&window(at(2, 19, 0), at(2, 23, 0)), &config, now()), Ok(()));
}

#[test]
fn test_validate_rejects_each_invalid_window() {
	let config = BookingConfig::default();

	let cases = [
		(window(at(2, 11, 0), at(2, 10, 0)), ScheduleError::EndBeforeStart),
		(window(at(2, 10, 0), at(2, 10, 0)), ScheduleError::EndBeforeStart),
		(window(at(2, 10, 15), at(2, 11, 15)), ScheduleError::Misaligned(30)),
		(window(at(2, 10, 0), at(2, 10, 30)), ScheduleError::TooShort(60)),
		(window(at(2, 10, 0), at(2, 14, 30)), ScheduleError::TooLong(240)),
		(
			window(Utc.with_ymd_and_hms(2024, 2, 28, 10, 0, 0).unwrap(), Utc.with_ymd_and_hms(2024, 2, 28, 11, 0, 0).unwrap()),
			ScheduleError::InPast,
		),
		(
			window(Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap(), Utc.with_ymd_and_hms(2024, 5, 2, 11, 0, 0).unwrap()),
			ScheduleError::TooFarAhead(60),
		),
		(
			window(at(2, 7, 0), at(2, 8, 30)),
			ScheduleError::OutsideHours { open: 8, close: 23 },
		),
		(
			window(at(2, 22, 30), at(2, 23, 30)),
			ScheduleError::OutsideHours { open: 8, close: 23 },
		),
		(
			window(at(2, 23, 0), at(3, 1, 0)),
			ScheduleError::OutsideHours { open: 8, close: 23 },
		),
	];

	for (window, expected) in cases {
		assert_eq!(validate(&window, &config, now()), Err(expected), "{window:?}");
	}
}

#[test]
fn test_validate_rejects_sub_second_times() {
	let config = BookingConfig::default();
	let start = at(2, 10, 0) + chrono::Duration::milliseconds(1);

	assert_eq!(
		validate(&window(start, at(2, 11, 0)), &config, now()),
		Err(ScheduleError::Misaligned(30))
	);
}

#[test]
fn test_schedule_error_fields() {
	assert_eq!(ScheduleError::InPast.fields(), vec!["startsAt"]);
	assert_eq!(ScheduleError::TooFarAhead(60).fields(), vec!["startsAt"]);
	assert_eq!(ScheduleError::TooShort(60).fields(), vec!["startsAt", "endsAt"]);
}

#[test]
fn test_overlaps_is_half_open() {
	let a = window(at(2, 10, 0), at(2, 11, 0));

	assert!(!overlaps(&a, &window(at(2, 11, 0), at(2, 12, 0))));
	assert!(!overlaps(&window(at(2, 9, 0), at(2, 10, 0)), &a));
	assert!(overlaps(&a, &window(at(2, 10, 30), at(2, 11, 30))));
	assert!(overlaps(&a, &window(at(2, 10, 15), at(2, 10, 45))));
	assert!(overlaps(&window(at(2, 9, 0), at(2, 12, 0)), &a));
	assert!(overlaps(&a, &a));
}

#[test]
fn test_free_slots() {
	let config = BookingConfig::default();
	let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

	let all = free_slots(day, &[], &config);
	assert_eq!(all.len(), 30);
	assert_eq!(all.first().map(|s| s.starts_at), Some(at(2, 8, 0)));
	assert_eq!(all.last().map(|s| s.ends_at), Some(at(2, 23, 0)));
	assert!(all.iter().all(|s| s.minutes() == 30));

	let busy = [window(at(2, 10, 0), at(2, 11, 0))];
	let free = free_slots(day, &busy, &config);
	assert_eq!(free.len(), 28);
	assert!(!free.iter().any(|s| s.starts_at == at(2, 10, 0) || s.starts_at == at(2, 10, 30)));
	assert!(free.iter().any(|s| s.starts_at == at(2, 11, 0)));
	assert!(free.iter().all(|s| !busy.iter().any(|b| overlaps(s, b))));

	// A booking running over from the previous evening.
	let busy = [window(at(1, 22, 0), at(2, 8, 30))];
	let free = free_slots(day, &busy, &config);
	assert_eq!(free.first().map(|s| s.starts_at), Some(at(2, 8, 30)));
}

#[test]
fn test_free_slots_are_bookable_for_uneven_slot_sizes() {
	let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

	for slot_minutes in [30, 45, 90] {
		let config = BookingConfig {
			slot_minutes,
			min_duration_minutes: slot_minutes,
			max_duration_minutes: slot_minutes * 2,
			..Default::default()
		};

		let slots = free_slots(day, &[], &config);
		assert!(!slots.is_empty());

		for slot in slots {
			assert_eq!(validate(&slot, &config, now()), Ok(()), "{slot_minutes} minute slot {slot:?}");
		}
	}
}

#[test]
fn test_alignment_counts_from_opening() {
	let config = BookingConfig {
		slot_minutes: 45,
		min_duration_minutes: 45,
		..Default::default()
	};

	assert_eq!(validate(&window(at(2, 8, 45), at(2, 10, 15)), &config, now()), Ok(()));
	assert_eq!(
		validate(&window(at(2, 9, 0), at(2, 9, 45)), &config, now()),
		Err(ScheduleError::Misaligned(45))
	);
}
