use chrono::{Duration, Utc};
use common::database::Ulid;
use sqlx::{PgPool, Postgres, Transaction};

use super::SetupError;
use crate::database::SportKind;

/// Rows inserted by one [`seed`] run. A second run inserts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
	pub owners: u64,
	pub fields: u64,
	pub services: u64,
	pub field_services: u64,
	pub offers: u64,
}

const fn seed_id(n: u128) -> Ulid {
	Ulid(ulid::Ulid((0x018E_0000_0000u128 << 80) | n))
}

struct SeedOwner {
	id: Ulid,
	name: &'static str,
	email: &'static str,
	phone: &'static str,
}

struct SeedField {
	id: Ulid,
	owner_id: Ulid,
	name: &'static str,
	description: &'static str,
	city: &'static str,
	address: &'static str,
	sport: SportKind,
	surface: &'static str,
	capacity: i32,
	price_per_hour_cents: i64,
	indoor: bool,
}

struct SeedService {
	id: Ulid,
	name: &'static str,
	description: &'static str,
	price_cents: i64,
}

struct SeedOffer {
	id: Ulid,
	field_id: Ulid,
	title: &'static str,
	description: &'static str,
	discount_percent: i32,
	days: i64,
}

const OWNERS: [SeedOwner; 2] = [
	SeedOwner {
		id: seed_id(0x101),
		name: "Green Park Sports",
		email: "contact@greenpark.example",
		phone: "+1 555 0101",
	},
	SeedOwner {
		id: seed_id(0x102),
		name: "City Arena Group",
		email: "hello@cityarena.example",
		phone: "+1 555 0102",
	},
];

const FIELDS: [SeedField; 4] = [
	SeedField {
		id: seed_id(0x201),
		owner_id: seed_id(0x101),
		name: "Green Park Stadium",
		description: "Full size football pitch with floodlights and stands.",
		city: "Springfield",
		address: "12 Park Avenue",
		sport: SportKind::Football,
		surface: "natural grass",
		capacity: 22,
		price_per_hour_cents: 12000,
		indoor: false,
	},
	SeedField {
		id: seed_id(0x202),
		owner_id: seed_id(0x101),
		name: "Green Park Five",
		description: "Five a side cage next to the main stadium.",
		city: "Springfield",
		address: "14 Park Avenue",
		sport: SportKind::Futsal,
		surface: "artificial turf",
		capacity: 10,
		price_per_hour_cents: 6000,
		indoor: false,
	},
	SeedField {
		id: seed_id(0x203),
		owner_id: seed_id(0x102),
		name: "City Arena Court",
		description: "Indoor hardwood court with changing rooms.",
		city: "Shelbyville",
		address: "1 Arena Plaza",
		sport: SportKind::Basketball,
		surface: "hardwood",
		capacity: 10,
		price_per_hour_cents: 8000,
		indoor: true,
	},
	SeedField {
		id: seed_id(0x204),
		owner_id: seed_id(0x102),
		name: "City Arena Padel Club",
		description: "Two glass walled padel courts.",
		city: "Shelbyville",
		address: "3 Arena Plaza",
		sport: SportKind::Padel,
		surface: "synthetic",
		capacity: 8,
		price_per_hour_cents: 4000,
		indoor: true,
	},
];

const SERVICES: [SeedService; 4] = [
	SeedService {
		id: seed_id(0x301),
		name: "Ball rental",
		description: "Match ball for the whole booking.",
		price_cents: 500,
	},
	SeedService {
		id: seed_id(0x302),
		name: "Referee",
		description: "Certified referee for one match.",
		price_cents: 3000,
	},
	SeedService {
		id: seed_id(0x303),
		name: "Bibs",
		description: "Two sets of coloured bibs.",
		price_cents: 300,
	},
	SeedService {
		id: seed_id(0x304),
		name: "Shower access",
		description: "Changing room and showers for the group.",
		price_cents: 1000,
	},
];

const FIELD_SERVICES: [(Ulid, Ulid); 7] = [
	(seed_id(0x201), seed_id(0x301)),
	(seed_id(0x201), seed_id(0x302)),
	(seed_id(0x201), seed_id(0x303)),
	(seed_id(0x202), seed_id(0x301)),
	(seed_id(0x202), seed_id(0x303)),
	(seed_id(0x203), seed_id(0x304)),
	(seed_id(0x204), seed_id(0x304)),
];

const OFFERS: [SeedOffer; 2] = [
	SeedOffer {
		id: seed_id(0x401),
		field_id: seed_id(0x201),
		title: "Weekday morning discount",
		description: "Book the stadium before noon and save.",
		discount_percent: 20,
		days: 30,
	},
	SeedOffer {
		id: seed_id(0x402),
		field_id: seed_id(0x204),
		title: "Padel launch week",
		description: "Half price on the new padel courts.",
		discount_percent: 50,
		days: 7,
	},
];

async fn insert_catalogue(tx: &mut Transaction<'_, Postgres>) -> sqlx::Result<SeedReport> {
	let mut report = SeedReport::default();

	for owner in &OWNERS {
		report.owners += sqlx::query(
			"INSERT INTO owners (id, name, email, phone) VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
		)
		.bind(owner.id)
		.bind(owner.name)
		.bind(owner.email)
		.bind(owner.phone)
		.execute(&mut **tx)
		.await?
		.rows_affected();
	}

	for field in &FIELDS {
		report.fields += sqlx::query(
			r#"
			INSERT INTO fields (id, owner_id, name, description, city, address, sport, surface, capacity, price_per_hour_cents, indoor)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
			ON CONFLICT DO NOTHING
			"#,
		)
		.bind(field.id)
		.bind(field.owner_id)
		.bind(field.name)
		.bind(field.description)
		.bind(field.city)
		.bind(field.address)
		.bind(field.sport)
		.bind(field.surface)
		.bind(field.capacity)
		.bind(field.price_per_hour_cents)
		.bind(field.indoor)
		.execute(&mut **tx)
		.await?
		.rows_affected();
	}

	for service in &SERVICES {
		report.services += sqlx::query(
			"INSERT INTO services (id, name, description, price_cents) VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
		)
		.bind(service.id)
		.bind(service.name)
		.bind(service.description)
		.bind(service.price_cents)
		.execute(&mut **tx)
		.await?
		.rows_affected();
	}

	for (field_id, service_id) in FIELD_SERVICES {
		report.field_services += sqlx::query(
			"INSERT INTO field_services (field_id, service_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
		)
		.bind(field_id)
		.bind(service_id)
		.execute(&mut **tx)
		.await?
		.rows_affected();
	}

	let now = Utc::now();
	for offer in &OFFERS {
		report.offers += sqlx::query(
			r#"
			INSERT INTO offers (id, field_id, title, description, discount_percent, starts_at, ends_at)
			VALUES ($1, $2, $3, $4, $5, $6, $7)
			ON CONFLICT DO NOTHING
			"#,
		)
		.bind(offer.id)
		.bind(offer.field_id)
		.bind(offer.title)
		.bind(offer.description)
		.bind(offer.discount_percent)
		.bind(now)
		.bind(now + Duration::days(offer.days))
		.execute(&mut **tx)
		.await?
		.rows_affected();
	}

	Ok(report)
}

/// Inserts the sample catalogue in one transaction. Rows are keyed by fixed
/// ids, so running it again changes nothing.
pub async fn seed(db: &PgPool) -> Result<SeedReport, SetupError> {
	let mut tx = db.begin().await?;

	let report = insert_catalogue(&mut tx).await?;

	tx.commit().await?;

	tracing::info!(?report, "seeded database");

	Ok(report)
}
