use async_graphql::{Context, Object};

use crate::api::auth::AuthData;
use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::customer::Customer;
use crate::api::v1::gql::validators::{FullNameValidator, PhoneValidator};
use crate::database;
use crate::global::ApiGlobal;

pub struct MeMutation<G: ApiGlobal> {
	auth: AuthData,
	_phantom: std::marker::PhantomData<G>,
}

impl<G: ApiGlobal> MeMutation<G> {
	pub fn new(auth: AuthData) -> Self {
		Self {
			auth,
			_phantom: std::marker::PhantomData,
		}
	}
}

#[Object]
impl<G: ApiGlobal> MeMutation<G> {
	/// Change the customer's name or phone. Unset arguments are kept.
	async fn update(
		&self,
		ctx: &Context<'_>,
		#[graphql(validator(custom = "FullNameValidator"))] full_name: Option<String>,
		#[graphql(validator(custom = "PhoneValidator"))] phone: Option<String>,
	) -> Result<Customer<G>> {
		let global = ctx.get_global::<G>();
		let request_context = ctx.get_req_context();

		let customer: database::Customer = sqlx::query_as(
			r#"
			UPDATE
				customers
			SET
				full_name = COALESCE($2, full_name),
				phone = COALESCE($3, phone),
				updated_at = NOW()
			WHERE
				id = $1
			RETURNING
				*
			"#,
		)
		.bind(self.auth.customer_id())
		.bind(full_name.as_deref().map(str::trim))
		.bind(phone.as_deref().map(str::trim))
		.fetch_one(global.db().as_ref())
		.await?;

		request_context
			.set_auth(AuthData {
				session: self.auth.session.clone(),
				customer: customer.clone(),
			})
			.await;

		Ok(customer.into())
	}
}
