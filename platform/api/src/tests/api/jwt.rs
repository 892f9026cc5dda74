use chrono::{Duration, Utc};
use common::database::Ulid;

use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::config::JwtConfig;
use crate::database::Session;

fn session(expires_in: Duration) -> Session {
	Session {
		id: Ulid::new(),
		customer_id: Ulid::new(),
		expires_at: Utc::now() + expires_in,
		last_used_at: Utc::now(),
	}
}

#[test]
fn test_token_round_trip() {
	let config = JwtConfig::default();
	let session = session(Duration::hours(1));

	let token = AuthJwtPayload::from(&session)
		.serialize(&config)
		.expect("failed to serialize token");

	let payload = AuthJwtPayload::verify(&config, &token).expect("failed to verify token");

	assert_eq!(payload.customer_id, session.customer_id);
	assert_eq!(payload.session_id, session.id);
	assert_eq!(
		payload.expiration.map(|exp| exp.timestamp()),
		Some(session.expires_at.timestamp())
	);
	assert!(payload.audience.is_none());
}

#[test]
fn test_token_rejected_with_other_config() {
	let config = JwtConfig::default();
	let token = AuthJwtPayload::from(&session(Duration::hours(1)))
		.serialize(&config)
		.expect("failed to serialize token");

	let other_issuer = JwtConfig {
		issuer: "someone-else".to_string(),
		..JwtConfig::default()
	};
	assert!(AuthJwtPayload::verify(&other_issuer, &token).is_none());

	let other_secret = JwtConfig {
		secret: "another secret".to_string(),
		..JwtConfig::default()
	};
	assert!(AuthJwtPayload::verify(&other_secret, &token).is_none());
}

#[test]
fn test_expired_token_rejected() {
	let config = JwtConfig::default();
	let token = AuthJwtPayload::from(&session(Duration::minutes(-1)))
		.serialize(&config)
		.expect("failed to serialize token");

	assert!(AuthJwtPayload::verify(&config, &token).is_none());
}

#[test]
fn test_malformed_token_rejected() {
	let config = JwtConfig::default();
	let token = AuthJwtPayload::from(&session(Duration::hours(1)))
		.serialize(&config)
		.expect("failed to serialize token");

	let (body, _) = token.rsplit_once('.').expect("token has a signature");
	let forged = format!("{body}.c2lnbmF0dXJl");

	assert!(AuthJwtPayload::verify(&config, &forged).is_none());
	assert!(AuthJwtPayload::verify(&config, "garbage").is_none());
	assert!(AuthJwtPayload::verify(&config, "").is_none());
}
