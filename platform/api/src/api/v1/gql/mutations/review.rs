use async_graphql::{Context, Object};
use common::database::Ulid;

use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::require_auth;
use crate::api::v1::gql::models::review::Review;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database;
use crate::global::ApiGlobal;

pub const MAX_COMMENT_LENGTH: usize = 1000;

pub struct ReviewMutation<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for ReviewMutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

/// Deletes a review. Returns false if it did not exist.
pub(super) async fn delete_review(db: &sqlx::PgPool, id: Ulid) -> sqlx::Result<bool> {
	let result = sqlx::query("DELETE FROM reviews WHERE id = $1").bind(id).execute(db).await?;

	Ok(result.rows_affected() > 0)
}

#[Object]
impl<G: ApiGlobal> ReviewMutation<G> {
	/// Review a field. Every customer reviews a field at most once.
	async fn create(
		&self,
		ctx: &Context<'_>,
		field_id: GqlUlid,
		#[graphql(validator(minimum = 1, maximum = 5))] rating: i16,
		#[graphql(desc = "At most 1000 characters.")] comment: Option<String>,
	) -> Result<Review<G>> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let comment = comment.map(|c| c.trim().to_string()).unwrap_or_default();
		if comment.chars().count() > MAX_COMMENT_LENGTH {
			return Err(GqlError::InvalidInput {
				fields: vec!["comment"],
				message: "comment is too long",
			}
			.into());
		}

		global
			.field_by_id_loader()
			.load_one(field_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
			.map_err_gql(GqlError::NotFound("field"))?;

		let review: database::Review = sqlx::query_as(
			r#"
			INSERT INTO reviews (
				id,
				customer_id,
				field_id,
				rating,
				comment
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(auth.customer_id())
		.bind(field_id.to_ulid())
		.bind(rating)
		.bind(comment)
		.fetch_one(global.db().as_ref())
		.await?;

		Ok(review.into())
	}

	/// Delete one of your reviews. Admins may delete any review.
	async fn delete(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<bool> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let review: database::Review = sqlx::query_as("SELECT * FROM reviews WHERE id = $1")
			.bind(id.to_ulid())
			.fetch_optional(global.db().as_ref())
			.await?
			.map_err_gql(GqlError::NotFound("review"))?;

		if review.customer_id != auth.customer_id() && !auth.is_admin() {
			return Err(GqlError::Unauthorized { field: "review" }.into());
		}

		Ok(delete_review(global.db(), review.id).await?)
	}
}
