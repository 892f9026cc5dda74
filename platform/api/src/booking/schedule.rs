use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::config::BookingConfig;

/// A half open time interval, `[starts_at, ends_at)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
}

impl TimeWindow {
	pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
		Self { starts_at, ends_at }
	}

	pub fn minutes(&self) -> i64 {
		(self.ends_at - self.starts_at).num_minutes()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
	#[error("booking must end after it starts")]
	EndBeforeStart,
	#[error("booking times must be aligned to {0} minute slots")]
	Misaligned(u32),
	#[error("booking must last at least {0} minutes")]
	TooShort(u32),
	#[error("booking must last at most {0} minutes")]
	TooLong(u32),
	#[error("booking cannot start in the past")]
	InPast,
	#[error("booking cannot start more than {0} days ahead")]
	TooFarAhead(u32),
	#[error("booking must be between {open:02}:00 and {close:02}:00 UTC")]
	OutsideHours { open: u32, close: u32 },
}

impl ScheduleError {
	/// The input fields the error refers to.
	pub fn fields(&self) -> Vec<&'static str> {
		match self {
			Self::InPast | Self::TooFarAhead(_) => vec!["startsAt"],
			_ => vec!["startsAt", "endsAt"],
		}
	}
}

pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
	a.starts_at < b.ends_at && b.starts_at < a.ends_at
}

/// Slots are counted from the day's opening instant, so any slot size lines
/// up with what [`free_slots`] hands out.
fn is_aligned(at: DateTime<Utc>, opens_at: DateTime<Utc>, slot_minutes: u32) -> bool {
	let slot_secs = slot_minutes.max(1) as i64 * 60;
	at.timestamp_subsec_nanos() == 0 && (at - opens_at).num_seconds().rem_euclid(slot_secs) == 0
}

/// Opening and closing instants of `day`.
pub fn opening_hours(day: NaiveDate, config: &BookingConfig) -> TimeWindow {
	let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));

	TimeWindow::new(
		midnight + Duration::hours(config.open_hour as i64),
		midnight + Duration::hours(config.close_hour as i64),
	)
}

pub fn validate(window: &TimeWindow, config: &BookingConfig, now: DateTime<Utc>) -> Result<(), ScheduleError> {
	if window.ends_at <= window.starts_at {
		return Err(ScheduleError::EndBeforeStart);
	}

	let hours = opening_hours(window.starts_at.date_naive(), config);
	if !is_aligned(window.starts_at, hours.starts_at, config.slot_minutes)
		|| !is_aligned(window.ends_at, hours.starts_at, config.slot_minutes)
	{
		return Err(ScheduleError::Misaligned(config.slot_minutes));
	}

	let minutes = window.minutes();
	if minutes < config.min_duration_minutes as i64 {
		return Err(ScheduleError::TooShort(config.min_duration_minutes));
	}

	if minutes > config.max_duration_minutes as i64 {
		return Err(ScheduleError::TooLong(config.max_duration_minutes));
	}

	if window.starts_at < now {
		return Err(ScheduleError::InPast);
	}

	if window.starts_at > now + Duration::days(config.max_advance_days as i64) {
		return Err(ScheduleError::TooFarAhead(config.max_advance_days));
	}

	if window.starts_at < hours.starts_at || window.ends_at > hours.ends_at {
		return Err(ScheduleError::OutsideHours {
			open: config.open_hour,
			close: config.close_hour,
		});
	}

	Ok(())
}

/// Slots of `day` that do not intersect any of `busy`, in order.
pub fn free_slots(day: NaiveDate, busy: &[TimeWindow], config: &BookingConfig) -> Vec<TimeWindow> {
	let hours = opening_hours(day, config);
	let step = Duration::minutes(config.slot_minutes.max(1) as i64);

	let mut slots = Vec::new();
	let mut starts_at = hours.starts_at;

	while starts_at + step <= hours.ends_at {
		let slot = TimeWindow::new(starts_at, starts_at + step);
		if !busy.iter().any(|b| overlaps(&slot, b)) {
			slots.push(slot);
		}

		starts_at += step;
	}

	slots
}
