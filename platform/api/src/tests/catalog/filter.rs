use chrono::{Duration, TimeZone, Utc};
use common::database::Ulid;

use crate::catalog::filter::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::catalog::{FieldFilter, FieldSort};
use crate::database::{Field, RatedField, SportKind};

struct Listing {
	name: &'static str,
	city: &'static str,
	sport: SportKind,
	price: i64,
	capacity: i32,
	indoor: bool,
	active: bool,
	rating: Option<f64>,
	age_days: i64,
}

impl Default for Listing {
	fn default() -> Self {
		Self {
			name: "Field",
			city: "Springfield",
			sport: SportKind::Football,
			price: 5000,
			capacity: 10,
			indoor: false,
			active: true,
			rating: None,
			age_days: 0,
		}
	}
}

fn rated(listing: Listing) -> RatedField {
	let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() - Duration::days(listing.age_days);

	RatedField {
		field: Field {
			id: Ulid::new(),
			owner_id: Ulid::new(),
			name: listing.name.to_string(),
			description: format!("{} in {}", listing.name, listing.city),
			city: listing.city.to_string(),
			address: "1 Main Street".to_string(),
			sport: listing.sport,
			surface: "grass".to_string(),
			capacity: listing.capacity,
			price_per_hour_cents: listing.price,
			indoor: listing.indoor,
			image_url: None,
			active: listing.active,
			created_at,
			updated_at: created_at,
		},
		rating_average: listing.rating,
		review_count: listing.rating.map(|_| 3).unwrap_or_default(),
	}
}

fn catalogue() -> Vec<RatedField> {
	vec![
		rated(Listing {
			name: "Evergreen Arena",
			price: 6000,
			capacity: 22,
			rating: Some(4.5),
			age_days: 3,
			..Default::default()
		}),
		rated(Listing {
			name: "Shelby Futsal Hall",
			city: "Shelbyville",
			sport: SportKind::Futsal,
			price: 3500,
			indoor: true,
			rating: Some(3.0),
			age_days: 1,
			..Default::default()
		}),
		rated(Listing {
			name: "Riverside Courts",
			sport: SportKind::Tennis,
			price: 2000,
			capacity: 8,
			age_days: 2,
			..Default::default()
		}),
		rated(Listing {
			name: "Closed Pitch",
			price: 1000,
			active: false,
			rating: Some(5.0),
			..Default::default()
		}),
		rated(Listing {
			name: "Dome Padel",
			city: "shelbyville ",
			sport: SportKind::Padel,
			price: 4000,
			indoor: true,
			rating: Some(4.5),
			age_days: 5,
			..Default::default()
		}),
	]
}

fn names(fields: &[RatedField]) -> Vec<&str> {
	fields.iter().map(|f| f.field.name.as_str()).collect()
}

#[test]
fn test_inactive_fields_hidden_unless_requested() {
	let page = FieldFilter::default().apply(catalogue());
	assert_eq!(page.total, 4);
	assert!(page.items.iter().all(|f| f.field.active));

	let page = FieldFilter {
		include_inactive: true,
		..Default::default()
	}
	.apply(catalogue());
	assert_eq!(page.total, 5);
}

#[test]
fn test_default_sort_is_newest_first() {
	let page = FieldFilter::default().apply(catalogue());

	assert_eq!(
		names(&page.items),
		vec!["Shelby Futsal Hall", "Riverside Courts", "Evergreen Arena", "Dome Padel"]
	);
}

#[test]
fn test_predicates() {
	let filter = FieldFilter {
		city: Some("SHELBYVILLE".to_string()),
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Shelby Futsal Hall", "Dome Padel"]);

	let filter = FieldFilter {
		query: Some("  courts ".to_string()),
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Riverside Courts"]);

	// Matches the description.
	let filter = FieldFilter {
		query: Some("in springfield".to_string()),
		sort: FieldSort::Name,
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Evergreen Arena", "Riverside Courts"]);

	let filter = FieldFilter {
		sport: Some(SportKind::Padel),
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Dome Padel"]);

	let filter = FieldFilter {
		min_price_cents: Some(3500),
		max_price_cents: Some(4000),
		sort: FieldSort::PriceAsc,
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Shelby Futsal Hall", "Dome Padel"]);

	let filter = FieldFilter {
		min_capacity: Some(11),
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Evergreen Arena"]);

	let filter = FieldFilter {
		indoor: Some(false),
		sort: FieldSort::Name,
		..Default::default()
	};
	assert_eq!(names(&filter.apply(catalogue()).items), vec!["Evergreen Arena", "Riverside Courts"]);

	let filter = FieldFilter {
		query: Some("   ".to_string()),
		city: Some(String::new()),
		..Default::default()
	};
	assert_eq!(filter.apply(catalogue()).total, 4);
}

#[test]
fn test_every_item_matches_and_is_subset() {
	let input = catalogue();
	let ids = input.iter().map(|f| f.field.id).collect::<Vec<_>>();

	let filter = FieldFilter {
		indoor: Some(true),
		max_price_cents: Some(5000),
		include_inactive: true,
		..Default::default()
	};

	let page = filter.apply(input);
	assert!(!page.items.is_empty());
	assert!(page.items.iter().all(|f| filter.matches(f)));
	assert!(page.items.iter().all(|f| ids.contains(&f.field.id)));
}

#[test]
fn test_sort_orders() {
	let sorted = |sort| names(&FieldFilter { sort, ..Default::default() }.apply(catalogue()).items)
		.into_iter()
		.map(str::to_string)
		.collect::<Vec<_>>();

	assert_eq!(
		sorted(FieldSort::PriceAsc),
		vec!["Riverside Courts", "Shelby Futsal Hall", "Dome Padel", "Evergreen Arena"]
	);
	assert_eq!(
		sorted(FieldSort::PriceDesc),
		vec!["Evergreen Arena", "Dome Padel", "Shelby Futsal Hall", "Riverside Courts"]
	);
	// Ties on rating fall back to the name, unrated fields go last.
	assert_eq!(
		sorted(FieldSort::Rating),
		vec!["Dome Padel", "Evergreen Arena", "Shelby Futsal Hall", "Riverside Courts"]
	);
	assert_eq!(
		sorted(FieldSort::Name),
		vec!["Dome Padel", "Evergreen Arena", "Riverside Courts", "Shelby Futsal Hall"]
	);
	assert_eq!(
		sorted(FieldSort::Capacity),
		vec!["Evergreen Arena", "Dome Padel", "Shelby Futsal Hall", "Riverside Courts"]
	);
}

#[test]
fn test_pagination() {
	let filter = FieldFilter {
		sort: FieldSort::Name,
		limit: Some(2),
		offset: 1,
		..Default::default()
	};

	let page = filter.apply(catalogue());
	assert_eq!(page.total, 4);
	assert_eq!(names(&page.items), vec!["Evergreen Arena", "Riverside Courts"]);

	let page = FieldFilter {
		offset: 10,
		..Default::default()
	}
	.apply(catalogue());
	assert_eq!(page.total, 4);
	assert!(page.items.is_empty());
}

#[test]
fn test_limit_is_clamped() {
	assert_eq!(FieldFilter::default().limit(), DEFAULT_LIMIT as usize);
	assert_eq!(
		FieldFilter {
			limit: Some(0),
			..Default::default()
		}
		.limit(),
		1
	);
	assert_eq!(
		FieldFilter {
			limit: Some(1000),
			..Default::default()
		}
		.limit(),
		MAX_LIMIT as usize
	);
}
