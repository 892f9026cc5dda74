use std::ops::Deref;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::auth::{AuthData, AuthError};

#[derive(Default, Clone)]
pub struct ContextData {
	pub auth: Option<AuthData>,
}

/// Per request state shared between the middleware and the resolvers.
#[derive(Default, Clone)]
pub struct RequestContext(Arc<RwLock<ContextData>>);

impl RequestContext {
	pub async fn set_auth(&self, data: AuthData) {
		let mut guard = self.0.write().await;
		guard.auth = Some(data);
	}

	pub async fn reset_auth(&self) {
		let mut guard = self.0.write().await;
		guard.auth = None;
	}

	pub async fn auth(&self) -> Result<Option<AuthData>, AuthError> {
		let inner = self.0.read().await.deref().clone();
		match inner.auth {
			Some(auth) if !auth.session.is_valid() => Err(AuthError::SessionExpired),
			auth => Ok(auth),
		}
	}
}
