use async_graphql::{Context, Object};
use chrono::Utc;

use super::error::ext::*;
use super::error::Result;
use super::ext::ContextExt;
use super::guards::{admin_guard, require_auth};
use super::models::field::{Field, FieldFilterInput, FieldPage};
use super::models::offer::Offer;
use super::models::search_result::SearchResults;
use super::models::service::Service;
use super::models::subscription::Plan;
use super::models::ulid::GqlUlid;
use crate::catalog::{self, detail, search};
use crate::database::{self, SubscriptionPlan};
use crate::global::ApiGlobal;

mod admin;
pub(super) mod booking;
mod me;

/// The root query type which contains root level fields.
pub struct Query<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for Query<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> Query<G> {
	/// Browse fields. Customers only ever see active fields.
	async fn fields(&self, ctx: &Context<'_>, filter: Option<FieldFilterInput>) -> Result<FieldPage<G>> {
		let global = ctx.get_global::<G>();
		let is_admin = ctx.get_req_context().auth().await?.is_some_and(|auth| auth.is_admin());

		let filter = filter.unwrap_or_default().into_filter(is_admin);
		let page = filter.apply(catalog::load_rated_fields(global.db()).await?);

		Ok(FieldPage {
			items: page.items.into_iter().map(|rated| rated.field.into()).collect(),
			total: page.total as u64,
		})
	}

	/// Get a field by its id. Inactive fields are only visible to admins.
	async fn field(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the field.")] id: GqlUlid) -> Result<Option<Field<G>>> {
		let global = ctx.get_global::<G>();

		let Some(field) = global
			.field_by_id_loader()
			.load_one(id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
		else {
			return Ok(None);
		};

		if !field.active && !ctx.get_req_context().auth().await?.is_some_and(|auth| auth.is_admin()) {
			return Ok(None);
		}

		Ok(Some(field.into()))
	}

	/// Offers of every field, newest first.
	async fn offers(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "Only offers running right now. Defaults to true.")] active_only: Option<bool>,
	) -> Result<Vec<Offer<G>>> {
		let global = ctx.get_global::<G>();

		let offers = detail::list_offers(global.db(), active_only.unwrap_or(true), Utc::now()).await?;

		Ok(offers.into_iter().map(Into::into).collect())
	}

	/// Every service, by name.
	async fn services(&self, ctx: &Context<'_>) -> Result<Vec<Service>> {
		let global = ctx.get_global::<G>();

		let services: Vec<database::Service> = sqlx::query_as("SELECT * FROM services ORDER BY name")
			.fetch_all(global.db().as_ref())
			.await?;

		Ok(services.into_iter().map(Into::into).collect())
	}

	/// Fuzzy search over field names and cities, services and offers.
	async fn search(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The search query.")] query: String,
		#[graphql(desc = "Results per category, 5 by default.", validator(minimum = 1, maximum = 20))] limit: Option<u32>,
	) -> Result<SearchResults<G>> {
		let global = ctx.get_global::<G>();

		let results = search::search(global.db(), &query, limit).await?;

		Ok(SearchResults {
			fields: results.fields.into_iter().map(Into::into).collect(),
			services: results.services.into_iter().map(Into::into).collect(),
			offers: results.offers.into_iter().map(Into::into).collect(),
		})
	}

	/// The subscription plan catalogue.
	async fn plans(&self) -> Vec<Plan> {
		SubscriptionPlan::ALL.into_iter().map(Into::into).collect()
	}

	async fn booking(&self) -> booking::BookingQuery<G> {
		Default::default()
	}

	/// Queries about the logged in customer.
	async fn me(&self, ctx: &Context<'_>) -> Result<me::MeQuery<G>> {
		let auth = require_auth(ctx).await?;

		Ok(me::MeQuery::new(auth))
	}

	/// Dashboard queries, admins only.
	async fn admin(&self, ctx: &Context<'_>) -> Result<admin::AdminQuery<G>> {
		admin_guard(ctx).await?;

		Ok(Default::default())
	}
}
