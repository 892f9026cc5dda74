use async_graphql::{Context, Object};

use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::booking::Booking;
use crate::api::v1::gql::models::owner::Owner;
use crate::api::v1::gql::models::review::Review;
use crate::api::v1::gql::models::setup::{Dashboard, DatabaseStatus};
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database::{self, BookingStatus};
use crate::global::ApiGlobal;
use crate::setup;

pub struct AdminQuery<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for AdminQuery<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> AdminQuery<G> {
	async fn owners(&self, ctx: &Context<'_>) -> Result<Vec<Owner>> {
		let global = ctx.get_global::<G>();

		let owners: Vec<database::Owner> = sqlx::query_as("SELECT * FROM owners ORDER BY name, id")
			.fetch_all(global.db().as_ref())
			.await?;

		Ok(owners.into_iter().map(Into::into).collect())
	}

	/// Every booking, newest first.
	async fn bookings(
		&self,
		ctx: &Context<'_>,
		status: Option<BookingStatus>,
		field_id: Option<GqlUlid>,
	) -> Result<Vec<Booking<G>>> {
		let global = ctx.get_global::<G>();

		let bookings: Vec<database::Booking> = sqlx::query_as(
			r#"
			SELECT
				*
			FROM
				bookings
			WHERE
				($1::booking_status IS NULL OR status = $1)
				AND ($2::UUID IS NULL OR field_id = $2)
			ORDER BY
				created_at DESC,
				id DESC
			"#,
		)
		.bind(status)
		.bind(field_id.map(GqlUlid::to_ulid))
		.fetch_all(global.db().as_ref())
		.await?;

		Ok(bookings.into_iter().map(Into::into).collect())
	}

	/// Every review, newest first.
	async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<Review<G>>> {
		let global = ctx.get_global::<G>();

		let reviews: Vec<database::Review> = sqlx::query_as("SELECT * FROM reviews ORDER BY created_at DESC, id DESC")
			.fetch_all(global.db().as_ref())
			.await?;

		Ok(reviews.into_iter().map(Into::into).collect())
	}

	async fn dashboard(&self, ctx: &Context<'_>) -> Result<Dashboard> {
		let global = ctx.get_global::<G>();

		let dashboard = sqlx::query_as(
			r#"
			SELECT
				(SELECT COUNT(*) FROM fields) AS fields,
				(SELECT COUNT(*) FROM fields WHERE active) AS active_fields,
				(SELECT COUNT(*) FROM customers) AS customers,
				(SELECT COUNT(*) FROM bookings WHERE status = 'pending') AS pending_bookings,
				(SELECT COUNT(*) FROM bookings WHERE status = 'confirmed') AS confirmed_bookings,
				(SELECT COUNT(*) FROM bookings WHERE status = 'cancelled') AS cancelled_bookings,
				(SELECT COUNT(*) FROM bookings WHERE status = 'completed') AS completed_bookings,
				(SELECT COUNT(*) FROM reviews) AS reviews,
				(SELECT COUNT(*) FROM offers WHERE starts_at <= NOW() AND ends_at > NOW()) AS active_offers,
				(SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments WHERE status = 'paid') AS revenue_cents,
				(SELECT AVG(rating)::FLOAT8 FROM reviews) AS average_rating
			"#,
		)
		.fetch_one(global.db().as_ref())
		.await?;

		Ok(dashboard)
	}

	/// Row counts of every table and the latest applied migration.
	async fn database_status(&self, ctx: &Context<'_>) -> Result<DatabaseStatus> {
		let global = ctx.get_global::<G>();

		Ok(setup::status(global.db()).await?.into())
	}
}
