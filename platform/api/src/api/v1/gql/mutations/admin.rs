use async_graphql::{Context, InputObject, Object};
use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::booking::{lock_booking, set_status};
use super::review;
use crate::api::auth::AuthData;
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::booking::Booking;
use crate::api::v1::gql::models::field::Field;
use crate::api::v1::gql::models::offer::Offer;
use crate::api::v1::gql::models::owner::Owner;
use crate::api::v1::gql::models::service::Service;
use crate::api::v1::gql::models::setup::SeedReport;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::api::v1::gql::validators::{EmailValidator, PhoneValidator};
use crate::database::{self, BookingStatus, SportKind};
use crate::global::ApiGlobal;
use crate::setup;

#[derive(InputObject)]
pub struct CreateFieldInput {
	pub owner_id: GqlUlid,
	pub name: String,
	#[graphql(default)]
	pub description: String,
	pub city: String,
	pub address: String,
	pub sport: SportKind,
	pub surface: String,
	/// Must be more than 7.
	pub capacity: i32,
	pub price_per_hour_cents: i64,
	#[graphql(default)]
	pub indoor: bool,
	pub image_url: Option<String>,
}

/// Unset values are kept.
#[derive(InputObject, Default)]
pub struct UpdateFieldInput {
	pub owner_id: Option<GqlUlid>,
	pub name: Option<String>,
	pub description: Option<String>,
	pub city: Option<String>,
	pub address: Option<String>,
	pub sport: Option<SportKind>,
	pub surface: Option<String>,
	pub capacity: Option<i32>,
	pub price_per_hour_cents: Option<i64>,
	pub indoor: Option<bool>,
	pub image_url: Option<String>,
}

#[derive(InputObject)]
pub struct OfferInput {
	pub field_id: GqlUlid,
	pub title: String,
	#[graphql(default)]
	pub description: String,
	pub discount_percent: i32,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
}

/// Unset values are kept.
#[derive(InputObject, Default)]
pub struct UpdateOfferInput {
	pub title: Option<String>,
	pub description: Option<String>,
	pub discount_percent: Option<i32>,
	pub starts_at: Option<DateTime<Utc>>,
	pub ends_at: Option<DateTime<Utc>>,
}

fn invalid(field: &'static str, message: &'static str) -> GqlError {
	GqlError::InvalidInput {
		fields: vec![field],
		message,
	}
}

fn check_name(field: &'static str, value: Option<&str>) -> Result<()> {
	match value.map(str::trim) {
		Some(value) if value.is_empty() => Err(invalid(field, "must not be empty").into()),
		Some(value) if value.chars().count() > 100 => Err(invalid(field, "must be at most 100 characters long").into()),
		_ => Ok(()),
	}
}

fn check_field(name: Option<&str>, capacity: Option<i32>, price_per_hour_cents: Option<i64>) -> Result<()> {
	check_name("name", name)?;

	if capacity.is_some_and(|capacity| capacity < database::Field::MIN_CAPACITY) {
		return Err(invalid("capacity", "capacity must be more than 7").into());
	}

	if price_per_hour_cents.is_some_and(|price| price < 0) {
		return Err(invalid("pricePerHourCents", "price must not be negative").into());
	}

	Ok(())
}

fn check_offer(title: &str, discount_percent: i32, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<()> {
	check_name("title", Some(title))?;

	if !(1..=100).contains(&discount_percent) {
		return Err(invalid("discountPercent", "discount must be between 1 and 100 percent").into());
	}

	if ends_at <= starts_at {
		return Err(GqlError::InvalidInput {
			fields: vec!["startsAt", "endsAt"],
			message: "offer must end after it starts",
		}
		.into());
	}

	Ok(())
}

async fn ensure_owner(db: &sqlx::PgPool, owner_id: Ulid) -> Result<()> {
	let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)")
		.bind(owner_id)
		.fetch_one(db)
		.await?;

	if !exists {
		return Err(GqlError::NotFound("owner").into());
	}

	Ok(())
}

pub struct AdminMutation<G: ApiGlobal> {
	admin: AuthData,
	_phantom: std::marker::PhantomData<G>,
}

impl<G: ApiGlobal> AdminMutation<G> {
	pub fn new(admin: AuthData) -> Self {
		Self {
			admin,
			_phantom: std::marker::PhantomData,
		}
	}
}

#[Object]
impl<G: ApiGlobal> AdminMutation<G> {
	async fn create_owner(
		&self,
		ctx: &Context<'_>,
		name: String,
		#[graphql(validator(custom = "EmailValidator"))] email: String,
		#[graphql(validator(custom = "PhoneValidator"))] phone: String,
	) -> Result<Owner> {
		let global = ctx.get_global::<G>();

		check_name("name", Some(name.as_str()))?;

		let owner: database::Owner = sqlx::query_as(
			r#"
			INSERT INTO owners (
				id,
				name,
				email,
				phone
			) VALUES (
				$1,
				$2,
				$3,
				$4
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(name.trim())
		.bind(email.trim().to_lowercase())
		.bind(phone.trim())
		.fetch_one(global.db().as_ref())
		.await?;

		Ok(owner.into())
	}

	async fn create_field(&self, ctx: &Context<'_>, input: CreateFieldInput) -> Result<Field<G>> {
		let global = ctx.get_global::<G>();

		check_field(Some(input.name.as_str()), Some(input.capacity), Some(input.price_per_hour_cents))?;
		ensure_owner(global.db(), input.owner_id.to_ulid()).await?;

		let field: database::Field = sqlx::query_as(
			r#"
			INSERT INTO fields (
				id,
				owner_id,
				name,
				description,
				city,
				address,
				sport,
				surface,
				capacity,
				price_per_hour_cents,
				indoor,
				image_url
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5,
				$6,
				$7,
				$8,
				$9,
				$10,
				$11,
				$12
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(input.owner_id.to_ulid())
		.bind(input.name.trim())
		.bind(input.description.trim())
		.bind(input.city.trim())
		.bind(input.address.trim())
		.bind(input.sport)
		.bind(input.surface.trim())
		.bind(input.capacity)
		.bind(input.price_per_hour_cents)
		.bind(input.indoor)
		.bind(input.image_url)
		.fetch_one(global.db().as_ref())
		.await?;

		tracing::info!(field_id = %field.id, admin_id = %self.admin.customer_id(), "field created");

		Ok(field.into())
	}

	async fn update_field(&self, ctx: &Context<'_>, id: GqlUlid, input: UpdateFieldInput) -> Result<Field<G>> {
		let global = ctx.get_global::<G>();

		check_field(input.name.as_deref(), input.capacity, input.price_per_hour_cents)?;
		if let Some(owner_id) = input.owner_id {
			ensure_owner(global.db(), owner_id.to_ulid()).await?;
		}

		let field: database::Field = sqlx::query_as(
			r#"
			UPDATE
				fields
			SET
				owner_id = COALESCE($2, owner_id),
				name = COALESCE($3, name),
				description = COALESCE($4, description),
				city = COALESCE($5, city),
				address = COALESCE($6, address),
				sport = COALESCE($7, sport),
				surface = COALESCE($8, surface),
				capacity = COALESCE($9, capacity),
				price_per_hour_cents = COALESCE($10, price_per_hour_cents),
				indoor = COALESCE($11, indoor),
				image_url = COALESCE($12, image_url),
				updated_at = NOW()
			WHERE
				id = $1
			RETURNING
				*
			"#,
		)
		.bind(id.to_ulid())
		.bind(input.owner_id.map(GqlUlid::to_ulid))
		.bind(input.name.as_deref().map(str::trim))
		.bind(input.description.as_deref().map(str::trim))
		.bind(input.city.as_deref().map(str::trim))
		.bind(input.address.as_deref().map(str::trim))
		.bind(input.sport)
		.bind(input.surface.as_deref().map(str::trim))
		.bind(input.capacity)
		.bind(input.price_per_hour_cents)
		.bind(input.indoor)
		.bind(input.image_url)
		.fetch_optional(global.db().as_ref())
		.await?
		.map_err_gql(GqlError::NotFound("field"))?;

		Ok(field.into())
	}

	/// Inactive fields are hidden from customers and cannot be booked.
	async fn set_field_active(&self, ctx: &Context<'_>, id: GqlUlid, active: bool) -> Result<Field<G>> {
		let global = ctx.get_global::<G>();

		let field: database::Field =
			sqlx::query_as("UPDATE fields SET active = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
				.bind(id.to_ulid())
				.bind(active)
				.fetch_optional(global.db().as_ref())
				.await?
				.map_err_gql(GqlError::NotFound("field"))?;

		Ok(field.into())
	}

	/// Fails for fields that have bookings, deactivate those instead.
	async fn delete_field(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		let result = sqlx::query("DELETE FROM fields WHERE id = $1")
			.bind(id.to_ulid())
			.execute(global.db().as_ref())
			.await?;

		tracing::info!(field_id = %id.to_ulid(), admin_id = %self.admin.customer_id(), "field deleted");

		Ok(result.rows_affected() > 0)
	}

	async fn create_service(
		&self,
		ctx: &Context<'_>,
		name: String,
		#[graphql(default)] description: String,
		price_cents: i64,
	) -> Result<Service> {
		let global = ctx.get_global::<G>();

		check_name("name", Some(name.as_str()))?;
		if price_cents < 0 {
			return Err(invalid("priceCents", "price must not be negative").into());
		}

		let service: database::Service = sqlx::query_as(
			r#"
			INSERT INTO services (
				id,
				name,
				description,
				price_cents
			) VALUES (
				$1,
				$2,
				$3,
				$4
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(name.trim())
		.bind(description.trim())
		.bind(price_cents)
		.fetch_one(global.db().as_ref())
		.await?;

		Ok(service.into())
	}

	async fn update_service(
		&self,
		ctx: &Context<'_>,
		id: GqlUlid,
		name: Option<String>,
		description: Option<String>,
		price_cents: Option<i64>,
	) -> Result<Service> {
		let global = ctx.get_global::<G>();

		check_name("name", name.as_deref())?;
		if price_cents.is_some_and(|price| price < 0) {
			return Err(invalid("priceCents", "price must not be negative").into());
		}

		let service: database::Service = sqlx::query_as(
			r#"
			UPDATE
				services
			SET
				name = COALESCE($2, name),
				description = COALESCE($3, description),
				price_cents = COALESCE($4, price_cents)
			WHERE
				id = $1
			RETURNING
				*
			"#,
		)
		.bind(id.to_ulid())
		.bind(name.as_deref().map(str::trim))
		.bind(description.as_deref().map(str::trim))
		.bind(price_cents)
		.fetch_optional(global.db().as_ref())
		.await?
		.map_err_gql(GqlError::NotFound("service"))?;

		Ok(service.into())
	}

	/// Also detaches the service from every field.
	async fn delete_service(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		let result = sqlx::query("DELETE FROM services WHERE id = $1")
			.bind(id.to_ulid())
			.execute(global.db().as_ref())
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Offer a service on a field. Attaching twice is a no-op.
	async fn attach_service(&self, ctx: &Context<'_>, field_id: GqlUlid, service_id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		global
			.field_by_id_loader()
			.load_one(field_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
			.map_err_gql(GqlError::NotFound("field"))?;

		let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE id = $1)")
			.bind(service_id.to_ulid())
			.fetch_one(global.db().as_ref())
			.await?;

		if !exists {
			return Err(GqlError::NotFound("service").into());
		}

		let result = sqlx::query("INSERT INTO field_services (field_id, service_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
			.bind(field_id.to_ulid())
			.bind(service_id.to_ulid())
			.execute(global.db().as_ref())
			.await?;

		Ok(result.rows_affected() > 0)
	}

	async fn detach_service(&self, ctx: &Context<'_>, field_id: GqlUlid, service_id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		let result = sqlx::query("DELETE FROM field_services WHERE field_id = $1 AND service_id = $2")
			.bind(field_id.to_ulid())
			.bind(service_id.to_ulid())
			.execute(global.db().as_ref())
			.await?;

		Ok(result.rows_affected() > 0)
	}

	async fn create_offer(&self, ctx: &Context<'_>, input: OfferInput) -> Result<Offer<G>> {
		let global = ctx.get_global::<G>();

		check_offer(&input.title, input.discount_percent, input.starts_at, input.ends_at)?;

		global
			.field_by_id_loader()
			.load_one(input.field_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
			.map_err_gql(GqlError::NotFound("field"))?;

		let offer: database::Offer = sqlx::query_as(
			r#"
			INSERT INTO offers (
				id,
				field_id,
				title,
				description,
				discount_percent,
				starts_at,
				ends_at
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5,
				$6,
				$7
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(input.field_id.to_ulid())
		.bind(input.title.trim())
		.bind(input.description.trim())
		.bind(input.discount_percent)
		.bind(input.starts_at)
		.bind(input.ends_at)
		.fetch_one(global.db().as_ref())
		.await?;

		Ok(offer.into())
	}

	async fn update_offer(&self, ctx: &Context<'_>, id: GqlUlid, input: UpdateOfferInput) -> Result<Offer<G>> {
		let global = ctx.get_global::<G>();

		let mut tx = global.db().begin().await?;

		let offer: database::Offer = sqlx::query_as("SELECT * FROM offers WHERE id = $1 FOR UPDATE")
			.bind(id.to_ulid())
			.fetch_optional(&mut *tx)
			.await?
			.map_err_gql(GqlError::NotFound("offer"))?;

		let title = input.title.as_deref().map(str::trim).unwrap_or(&offer.title);
		let description = input.description.as_deref().map(str::trim).unwrap_or(&offer.description);
		let discount_percent = input.discount_percent.unwrap_or(offer.discount_percent);
		let starts_at = input.starts_at.unwrap_or(offer.starts_at);
		let ends_at = input.ends_at.unwrap_or(offer.ends_at);

		check_offer(title, discount_percent, starts_at, ends_at)?;

		let offer: database::Offer = sqlx::query_as(
			r#"
			UPDATE
				offers
			SET
				title = $2,
				description = $3,
				discount_percent = $4,
				starts_at = $5,
				ends_at = $6
			WHERE
				id = $1
			RETURNING
				*
			"#,
		)
		.bind(offer.id)
		.bind(title)
		.bind(description)
		.bind(discount_percent)
		.bind(starts_at)
		.bind(ends_at)
		.fetch_one(&mut *tx)
		.await?;

		tx.commit().await?;

		Ok(offer.into())
	}

	/// Bookings that used the offer keep their price.
	async fn delete_offer(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		let result = sqlx::query("DELETE FROM offers WHERE id = $1")
			.bind(id.to_ulid())
			.execute(global.db().as_ref())
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Move a booking along `PENDING -> CONFIRMED | CANCELLED` or
	/// `CONFIRMED -> COMPLETED | CANCELLED`.
	async fn update_booking_status(&self, ctx: &Context<'_>, id: GqlUlid, status: BookingStatus) -> Result<Booking<G>> {
		let global = ctx.get_global::<G>();

		let mut tx = global.db().begin().await?;

		let current = lock_booking(&mut *tx, id.to_ulid()).await?;

		if !current.booking.status.can_transition_to(status) {
			return Err(invalid("status", "booking cannot move to this status").into());
		}

		let booking = set_status(&mut *tx, current.booking.id, status).await?;

		tx.commit().await?;

		tracing::info!(
			booking_id = %booking.id,
			from = ?current.booking.status,
			to = ?status,
			admin_id = %self.admin.customer_id(),
			"booking status changed"
		);

		Ok(booking.into())
	}

	async fn delete_review(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();

		Ok(review::delete_review(global.db(), id.to_ulid()).await?)
	}

	/// Apply pending migrations. Returns the versions that were applied.
	async fn setup_database(&self, ctx: &Context<'_>) -> Result<Vec<i64>> {
		let global = ctx.get_global::<G>();

		Ok(setup::migrate(global.db()).await?)
	}

	/// Insert the sample catalogue. Running it again inserts nothing.
	async fn seed_database(&self, ctx: &Context<'_>) -> Result<SeedReport> {
		let global = ctx.get_global::<G>();

		Ok(setup::seed(global.db()).await?.into())
	}

	/// Delete every catalogue and booking row. Accounts and sessions are kept.
	async fn reset_database(&self, ctx: &Context<'_>) -> Result<u64> {
		let global = ctx.get_global::<G>();

		tracing::warn!(admin_id = %self.admin.customer_id(), "database reset requested");

		Ok(setup::reset(global.db()).await?)
	}

	/// Run raw SQL. Several statements may be separated by semicolons. Returns
	/// the number of affected rows.
	async fn exec_sql(&self, ctx: &Context<'_>, sql: String) -> Result<u64> {
		let global = ctx.get_global::<G>();

		if sql.trim().is_empty() {
			return Err(invalid("sql", "sql must not be empty").into());
		}

		Ok(setup::exec_sql(global.db(), &sql, self.admin.customer_id()).await?)
	}
}
