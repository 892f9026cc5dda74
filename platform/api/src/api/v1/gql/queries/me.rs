use async_graphql::{Context, Object};
use chrono::Utc;

use crate::api::auth::AuthData;
use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::booking::Booking;
use crate::api::v1::gql::models::customer::Customer;
use crate::api::v1::gql::models::payment::Payment;
use crate::api::v1::gql::models::subscription::Subscription;
use crate::database;
use crate::global::ApiGlobal;

/// Queries scoped to the logged in customer.
pub struct MeQuery<G: ApiGlobal> {
	auth: AuthData,
	_phantom: std::marker::PhantomData<G>,
}

impl<G: ApiGlobal> MeQuery<G> {
	pub fn new(auth: AuthData) -> Self {
		Self {
			auth,
			_phantom: std::marker::PhantomData,
		}
	}
}

#[Object]
impl<G: ApiGlobal> MeQuery<G> {
	async fn customer(&self) -> Customer<G> {
		self.auth.customer.clone().into()
	}

	/// Bookings placed by the customer, newest first.
	async fn bookings(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "True keeps bookings that have not ended yet, false keeps the past ones.")] upcoming: Option<bool>,
	) -> Result<Vec<Booking<G>>> {
		let global = ctx.get_global::<G>();

		let bookings: Vec<database::Booking> = sqlx::query_as(
			r#"
			SELECT
				b.*
			FROM
				bookings b
			INNER JOIN
				bookers bk ON bk.id = b.booker_id
			WHERE
				bk.customer_id = $1
				AND ($2::BOOLEAN IS NULL OR (b.ends_at > $3) = $2)
			ORDER BY
				b.created_at DESC,
				b.id DESC
			"#,
		)
		.bind(self.auth.customer_id())
		.bind(upcoming)
		.bind(Utc::now())
		.fetch_all(global.db().as_ref())
		.await?;

		Ok(bookings.into_iter().map(Into::into).collect())
	}

	/// Payments for the customer's bookings, newest first.
	async fn payments(&self, ctx: &Context<'_>) -> Result<Vec<Payment>> {
		let global = ctx.get_global::<G>();

		let payments: Vec<database::Payment> = sqlx::query_as(
			r#"
			SELECT
				p.*
			FROM
				payments p
			INNER JOIN
				bookings b ON b.id = p.booking_id
			INNER JOIN
				bookers bk ON bk.id = b.booker_id
			WHERE
				bk.customer_id = $1
			ORDER BY
				p.created_at DESC,
				p.id DESC
			"#,
		)
		.bind(self.auth.customer_id())
		.fetch_all(global.db().as_ref())
		.await?;

		Ok(payments.into_iter().map(Into::into).collect())
	}

	/// The running subscription, if any.
	async fn subscription(&self, ctx: &Context<'_>) -> Result<Option<Subscription>> {
		let global = ctx.get_global::<G>();

		let subscription = database::active_subscription(global.db().as_ref(), self.auth.customer_id(), Utc::now()).await?;

		Ok(subscription.map(Into::into))
	}
}
