use std::cmp::Ordering;

use crate::database::{RatedField, SportKind};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, async_graphql::Enum)]
pub enum FieldSort {
	#[default]
	Newest,
	PriceAsc,
	PriceDesc,
	Rating,
	Name,
	Capacity,
}

/// Browse filters. Unset predicates match everything.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
	/// Matches name, city, address or description, case-insensitively.
	pub query: Option<String>,
	pub city: Option<String>,
	pub sport: Option<SportKind>,
	pub min_price_cents: Option<i64>,
	pub max_price_cents: Option<i64>,
	pub min_capacity: Option<i32>,
	pub indoor: Option<bool>,
	/// Only admins see inactive fields.
	pub include_inactive: bool,
	pub sort: FieldSort,
	pub limit: Option<u32>,
	pub offset: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	pub items: Vec<T>,
	/// Number of matches before pagination.
	pub total: usize,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(needle)
}

fn compare_names(a: &RatedField, b: &RatedField) -> Ordering {
	a.field
		.name
		.to_lowercase()
		.cmp(&b.field.name.to_lowercase())
		.then_with(|| a.field.id.cmp(&b.field.id))
}

impl FieldFilter {
	pub fn limit(&self) -> usize {
		self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize
	}

	pub fn matches(&self, rated: &RatedField) -> bool {
		let field = &rated.field;

		if !self.include_inactive && !field.active {
			return false;
		}

		if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
			let query = query.to_lowercase();
			if ![&field.name, &field.city, &field.address, &field.description]
				.iter()
				.any(|value| contains_ci(value, &query))
			{
				return false;
			}
		}

		if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
			if field.city.trim().to_lowercase() != city.to_lowercase() {
				return false;
			}
		}

		if self.sport.is_some_and(|sport| sport != field.sport) {
			return false;
		}

		if self.min_price_cents.is_some_and(|min| field.price_per_hour_cents < min) {
			return false;
		}

		if self.max_price_cents.is_some_and(|max| field.price_per_hour_cents > max) {
			return false;
		}

		if self.min_capacity.is_some_and(|min| field.capacity < min) {
			return false;
		}

		if self.indoor.is_some_and(|indoor| indoor != field.indoor) {
			return false;
		}

		true
	}

	fn compare(&self, a: &RatedField, b: &RatedField) -> Ordering {
		let primary = match self.sort {
			FieldSort::Newest => b.field.created_at.cmp(&a.field.created_at),
			FieldSort::PriceAsc => a.field.price_per_hour_cents.cmp(&b.field.price_per_hour_cents),
			FieldSort::PriceDesc => b.field.price_per_hour_cents.cmp(&a.field.price_per_hour_cents),
			// Unrated fields go last.
			FieldSort::Rating => match (a.rating_average, b.rating_average) {
				(Some(a), Some(b)) => b.total_cmp(&a),
				(Some(_), None) => Ordering::Less,
				(None, Some(_)) => Ordering::Greater,
				(None, None) => Ordering::Equal,
			},
			FieldSort::Name => Ordering::Equal,
			FieldSort::Capacity => b.field.capacity.cmp(&a.field.capacity),
		};

		primary.then_with(|| compare_names(a, b))
	}

	pub fn apply(&self, fields: Vec<RatedField>) -> Page<RatedField> {
		let mut matched = fields.into_iter().filter(|f| self.matches(f)).collect::<Vec<_>>();

		matched.sort_by(|a, b| self.compare(a, b));

		let total = matched.len();
		let items = matched.into_iter().skip(self.offset as usize).take(self.limit()).collect();

		Page { items, total }
	}
}
