use chrono::{DateTime, TimeZone, Utc};
use common::database::Ulid;
use hmac::{Hmac, Mac};
use jwt::{Claims, Header, RegisteredClaims, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;

use crate::config::JwtConfig;
use crate::database::Session;

/// Claims of a session token. `sub` is the customer and `jti` the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthJwtPayload {
	pub customer_id: Ulid,
	pub session_id: Ulid,
	pub expiration: Option<DateTime<Utc>>,
	pub issued_at: DateTime<Utc>,
	pub not_before: Option<DateTime<Utc>>,
	pub audience: Option<String>,
}

fn timestamp(value: Option<u64>) -> Option<DateTime<Utc>> {
	value.and_then(|x| Utc.timestamp_opt(x as i64, 0).single())
}

pub trait JwtState: Sized {
	fn to_claims(&self) -> Claims;

	fn from_claims(claims: &Claims) -> Option<Self>;

	fn serialize(&self, config: &JwtConfig) -> Option<String> {
		let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
		let mut claims = self.to_claims();

		claims.registered.issuer = Some(config.issuer.clone());

		if claims.registered.issued_at.is_none() {
			claims.registered.issued_at = Some(Utc::now().timestamp() as u64);
		}

		claims.sign_with_key(&key).ok()
	}

	fn verify(config: &JwtConfig, token: &str) -> Option<Self> {
		let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
		let token: Token<Header, Claims, _> = token.verify_with_key(&key).ok()?;

		let claims = token.claims();

		if claims.registered.issuer.as_ref() != Some(&config.issuer) {
			return None;
		}

		let now = Utc::now();

		let iat = timestamp(claims.registered.issued_at)?;
		if iat > now {
			return None;
		}

		if let Some(nbf) = timestamp(claims.registered.not_before) {
			if nbf > now {
				return None;
			}
		}

		if let Some(exp) = timestamp(claims.registered.expiration) {
			if exp < now {
				return None;
			}
		}

		Self::from_claims(claims)
	}
}

impl JwtState for AuthJwtPayload {
	fn to_claims(&self) -> Claims {
		Claims {
			registered: RegisteredClaims {
				issuer: None,
				subject: Some(self.customer_id.to_string()),
				audience: self.audience.clone(),
				expiration: self.expiration.map(|x| x.timestamp() as u64),
				not_before: self.not_before.map(|x| x.timestamp() as u64),
				issued_at: Some(self.issued_at.timestamp() as u64),
				json_web_token_id: Some(self.session_id.to_string()),
			},
			private: Default::default(),
		}
	}

	fn from_claims(claims: &Claims) -> Option<Self> {
		Some(Self {
			audience: claims.registered.audience.clone(),
			expiration: timestamp(claims.registered.expiration),
			issued_at: timestamp(claims.registered.issued_at)?,
			not_before: timestamp(claims.registered.not_before),
			session_id: claims.registered.json_web_token_id.as_ref()?.parse().ok()?,
			customer_id: claims.registered.subject.as_ref()?.parse().ok()?,
		})
	}
}

impl From<&Session> for AuthJwtPayload {
	fn from(session: &Session) -> Self {
		AuthJwtPayload {
			customer_id: session.customer_id,
			session_id: session.id,
			expiration: Some(session.expires_at),
			issued_at: session.id.0.datetime().into(),
			not_before: None,
			audience: None,
		}
	}
}
