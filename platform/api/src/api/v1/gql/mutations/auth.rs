use async_graphql::{Context, Object};
use chrono::{Duration, Utc};
use common::database::Ulid;

use crate::api::auth::AuthData;
use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::require_auth;
use crate::api::v1::gql::models::session::Session;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::api::v1::gql::validators::{EmailValidator, FullNameValidator, PasswordValidator, PhoneValidator};
use crate::config::JwtConfig;
use crate::database::{self, CustomerRole};
use crate::global::ApiGlobal;

pub struct AuthMutation<G>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for AuthMutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

async fn create_session(
	tx: &mut sqlx::PgConnection,
	customer_id: Ulid,
	validity_secs: u32,
) -> sqlx::Result<database::Session> {
	sqlx::query_as(
		r#"
		INSERT INTO sessions (
			id,
			customer_id,
			expires_at
		) VALUES (
			$1,
			$2,
			$3
		) RETURNING *
		"#,
	)
	.bind(Ulid::new())
	.bind(customer_id)
	.bind(Utc::now() + Duration::seconds(validity_secs as i64))
	.fetch_one(tx)
	.await
}

fn session_response(config: &JwtConfig, session: &database::Session) -> Result<Session> {
	let token = AuthJwtPayload::from(session)
		.serialize(config)
		.map_err_gql("failed to serialize JWT")?;

	Ok(Session {
		id: session.id.into(),
		token,
		customer_id: session.customer_id.into(),
		expires_at: session.expires_at,
		last_used_at: session.last_used_at,
	})
}

#[Object]
/// The mutation object for authentication
impl<G: ApiGlobal> AuthMutation<G> {
	/// Creates a customer account and logs it in.
	async fn register(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The email of the customer.", validator(custom = "EmailValidator"))] email: String,
		#[graphql(desc = "The password of the customer.", validator(custom = "PasswordValidator"))] password: String,
		#[graphql(validator(custom = "FullNameValidator"))] full_name: String,
		#[graphql(validator(custom = "PhoneValidator"))] phone: String,
	) -> Result<Session> {
		let global = ctx.get_global::<G>();
		let request_context = ctx.get_req_context();
		let config = global.config::<JwtConfig>();

		let email = email.trim().to_lowercase();

		let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)")
			.bind(&email)
			.fetch_one(global.db().as_ref())
			.await?;

		if exists {
			return Err(GqlError::InvalidInput {
				fields: vec!["email"],
				message: "email already registered",
			}
			.into());
		}

		let password_hash = database::hash_password(&password).map_err_gql("failed to hash password")?;

		let mut tx = global.db().begin().await?;

		let customer: database::Customer = sqlx::query_as(
			r#"
			INSERT INTO customers (
				id,
				email,
				password_hash,
				full_name,
				phone,
				role
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5,
				$6
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(email)
		.bind(password_hash)
		.bind(full_name.trim())
		.bind(phone.trim())
		.bind(CustomerRole::Customer)
		.fetch_one(&mut *tx)
		.await?;

		let session = create_session(&mut *tx, customer.id, config.session_ttl_secs).await?;
		let response = session_response(config, &session)?;

		tx.commit().await?;

		request_context.set_auth(AuthData { session, customer }).await;

		Ok(response)
	}

	/// Login using an email and password.
	async fn login(
		&self,
		ctx: &Context<'_>,
		email: String,
		password: String,
		#[graphql(
			desc = "The duration of the session in seconds, at most the configured session lifetime which is also the default.",
			validator(minimum = 1)
		)]
		validity: Option<u32>,
	) -> Result<Session> {
		let global = ctx.get_global::<G>();
		let request_context = ctx.get_req_context();
		let config = global.config::<JwtConfig>();

		let customer: database::Customer = sqlx::query_as("SELECT * FROM customers WHERE email = $1")
			.bind(email.trim().to_lowercase())
			.fetch_optional(global.db().as_ref())
			.await?
			.filter(|customer: &database::Customer| customer.verify_password(&password))
			.map_err_gql(GqlError::InvalidInput {
				fields: vec!["email", "password"],
				message: "invalid email or password",
			})?;

		let mut conn = global.db().acquire().await?;
		let validity = validity.map_or(config.session_ttl_secs, |v| v.min(config.session_ttl_secs));
		let session = create_session(&mut *conn, customer.id, validity).await?;
		let response = session_response(config, &session)?;

		request_context.set_auth(AuthData { session, customer }).await;

		Ok(response)
	}

	/// Expires the current session, or another session of the same customer.
	async fn logout(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "Defaults to the session of this request.")] session_id: Option<GqlUlid>,
	) -> Result<bool> {
		let global = ctx.get_global::<G>();
		let request_context = ctx.get_req_context();
		let auth = require_auth(ctx).await?;

		let session_id = session_id.map(GqlUlid::to_ulid).unwrap_or(auth.session.id);

		let result = sqlx::query(
			r#"
			UPDATE
				sessions
			SET
				expires_at = NOW()
			WHERE
				id = $1 AND customer_id = $2
			"#,
		)
		.bind(session_id)
		.bind(auth.customer_id())
		.execute(global.db().as_ref())
		.await?;

		if result.rows_affected() == 0 {
			return Err(GqlError::NotFound("session").into());
		}

		if session_id == auth.session.id {
			request_context.reset_auth().await;
		}

		Ok(true)
	}
}
