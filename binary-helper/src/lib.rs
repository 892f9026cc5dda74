use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use common::context::{Context, Handler};
use common::{logging, signal};
use tokio::signal::unix::SignalKind;
use tokio::{select, time};
pub use traits::{Config, Global};

pub mod config;
pub mod global;
pub mod traits;

/// Parses the config and runs its pre hook. When either fails, logging is
/// brought up at `trace` so the error is still reported.
pub fn load_config<C: Config>() -> anyhow::Result<C> {
	C::parse()
		.and_then(|mut config| {
			config.pre_hook()?;
			Ok(config)
		})
		.map_err(|err| {
			if let Err(err) = logging::init("trace", Default::default()) {
				eprintln!("failed to init logging: {err}");
			}

			err
		})
		.context("failed to parse config")
}

/// Installs logging, builds the global state and runs `process` until it
/// exits or the process receives SIGINT/SIGTERM.
pub async fn bootstrap<C: Config, G: Global<C>, F: Future<Output = anyhow::Result<()>> + Send + 'static>(
	config: C,
	process: impl FnOnce(Arc<G>) -> F,
) -> anyhow::Result<()> {
	logging::init(&config.logging().level, config.logging().mode).context("failed to init logging")?;

	tracing::info!(name = config.name(), "starting up");

	let grace = config.shutdown_grace();
	let (ctx, handler) = Context::new();

	let global = Arc::new(G::new(ctx, config).await.context("failed to create global state")?);

	tracing::debug!("global state created, starting process");

	let mut signal_handler = signal::SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.with_signal(SignalKind::terminate());

	let result = select! {
		_ = signal_handler.recv() => {
			tracing::info!("received shutdown signal");
			Ok(())
		},
		r = tokio::spawn(process(global)) => process_exit(r),
	};

	drain(handler, &mut signal_handler, grace).await;

	result
}

fn process_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) -> anyhow::Result<()> {
	let err = match result {
		Ok(Ok(())) => anyhow::anyhow!("process exited without an error"),
		Ok(Err(err)) => err,
		Err(err) => anyhow::Error::from(err).context("process panicked"),
	};

	tracing::error!("process stopped unexpectedly: {err:#}");

	Err(err)
}

/// Cancels the global context and waits for its clones to drop, for at most
/// `grace` or until a second signal arrives.
async fn drain(handler: Handler, signal_handler: &mut signal::SignalHandler, grace: std::time::Duration) {
	tracing::info!(grace_secs = grace.as_secs(), "waiting for tasks to finish");

	select! {
		_ = time::sleep(grace) => tracing::warn!("grace period elapsed, force shutting down"),
		_ = signal_handler.recv() => tracing::warn!("second signal, force shutting down"),
		_ = handler.cancel() => tracing::info!("shut down cleanly"),
	}
}

