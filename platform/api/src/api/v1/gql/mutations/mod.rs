use async_graphql::{Context, Object};

use super::error::Result;
use super::guards::{admin_guard, require_auth};
use crate::global::ApiGlobal;

mod admin;
mod auth;
mod booking;
mod me;
mod payment;
mod review;
mod subscription;

/// The root mutation type which contains root level fields.
pub struct Mutation<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for Mutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> Mutation<G> {
	async fn auth(&self) -> auth::AuthMutation<G> {
		Default::default()
	}

	/// Profile changes of the logged in customer.
	async fn me(&self, ctx: &Context<'_>) -> Result<me::MeMutation<G>> {
		Ok(me::MeMutation::new(require_auth(ctx).await?))
	}

	async fn booking(&self) -> booking::BookingMutation<G> {
		Default::default()
	}

	async fn payment(&self) -> payment::PaymentMutation<G> {
		Default::default()
	}

	async fn review(&self) -> review::ReviewMutation<G> {
		Default::default()
	}

	async fn subscription(&self) -> subscription::SubscriptionMutation<G> {
		Default::default()
	}

	/// Dashboard mutations, admins only.
	async fn admin(&self, ctx: &Context<'_>) -> Result<admin::AdminMutation<G>> {
		Ok(admin::AdminMutation::new(admin_guard(ctx).await?))
	}
}
