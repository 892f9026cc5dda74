use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::http::router::Router;
use common::http::RouteError;
use common::make_response;
use common::prelude::FutureTimeout;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpSocket;
use tokio::select;

use self::error::ApiError;
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

pub mod auth;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod request_context;
pub mod v1;

pub type Body = common::http::Body;

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> Router<Incoming, Body, RouteError<ApiError>> {
	let weak = Arc::downgrade(global);
	Router::builder()
		.data(weak)
		// Handlers add response headers through the request, the post middleware copies them over.
		.middleware(middleware::response_headers::pre_flight_middleware(global))
		.middleware(middleware::response_headers::post_flight_middleware(global))
		.middleware(middleware::cors::cors_middleware(global))
		// Requests without a token pass, requests with an invalid one fail here.
		.middleware(middleware::auth::auth_middleware(global))
		.scope("/v1", v1::routes(global))
		.error_handler(common::http::error_handler::<ApiError>)
		.not_found(|_| async move {
			Ok(make_response!(
				hyper::StatusCode::NOT_FOUND,
				json!({
					"error": "not_found",
				})
			))
		})
		.build()
}

async fn tls_acceptor(config: &ApiConfig) -> anyhow::Result<Option<Arc<tokio_rustls::TlsAcceptor>>> {
	let Some(tls) = &config.tls else {
		return Ok(None);
	};

	tracing::info!("TLS enabled");
	let cert = tokio::fs::read(&tls.cert).await.context("failed to read api ssl cert")?;
	let key = tokio::fs::read(&tls.key).await.context("failed to read api ssl private key")?;

	let key = rustls_pemfile::pkcs8_private_keys(&mut io::BufReader::new(io::Cursor::new(key)))
		.next()
		.ok_or_else(|| anyhow::anyhow!("failed to find private key in api private key file"))??
		.into();

	let certs = rustls_pemfile::certs(&mut io::BufReader::new(io::Cursor::new(cert))).collect::<Result<Vec<_>, _>>()?;

	Ok(Some(Arc::new(tokio_rustls::TlsAcceptor::from(Arc::new(
		rustls::ServerConfig::builder()
			.with_no_client_auth()
			.with_single_cert(certs, key)?,
	)))))
}

pub async fn run<G: ApiGlobal>(global: Arc<G>) -> anyhow::Result<()> {
	let config = global.config::<ApiConfig>();

	tracing::info!("Listening on {}", config.bind_address);
	let socket = if config.bind_address.is_ipv6() {
		TcpSocket::new_v6()?
	} else {
		TcpSocket::new_v4()?
	};

	socket.set_reuseaddr(true)?;
	socket.set_reuseport(true)?;
	socket.bind(config.bind_address)?;
	let listener = socket.listen(1024)?;

	let tls_acceptor = tls_acceptor(config).await?;

	// Connection tasks only see a weak pointer to the global state, so an
	// open keep-alive connection does not hold up shutdown.
	let router = Arc::new(routes(&global));
	let service = service_fn(move |req| {
		let this = router.clone();
		async move { this.handle(req).await }
	});

	loop {
		select! {
			_ = global.ctx().done() => {
				return Ok(());
			},
			r = listener.accept() => {
				let (socket, addr) = r?;

				let service = service.clone();
				let tls_acceptor = tls_acceptor.clone();

				tracing::debug!("Accepted connection from {}", addr);

				tokio::spawn(async move {
					let http = http1::Builder::new();

					if let Some(tls_acceptor) = tls_acceptor {
						let Ok(Ok(socket)) = tls_acceptor.accept(socket).timeout(Duration::from_secs(5)).await else {
							return;
						};
						tracing::debug!("TLS handshake complete");
						http.serve_connection(TokioIo::new(socket), service).await.ok();
					} else {
						http.serve_connection(TokioIo::new(socket), service).await.ok();
					}
				});
			},
		}
	}
}
