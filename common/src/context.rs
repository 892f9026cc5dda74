use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CancelReason {
	Parent,
	Deadline,
	Cancel,
}

impl Display for CancelReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Parent => write!(f, "Parent"),
			Self::Deadline => write!(f, "Deadline"),
			Self::Cancel => write!(f, "Cancel"),
		}
	}
}

struct RawContext {
	// Dropped together with the last clone, which closes the handler's channel.
	_alive: mpsc::Sender<()>,
	token: CancellationToken,
	deadline: Option<Instant>,
	parent: Option<Context>,
}

/// A cheap, cloneable cancellation signal shared by every task of a process.
#[derive(Clone)]
pub struct Context(Arc<RawContext>);

/// The owning side of a [`Context`].
pub struct Handler {
	token: CancellationToken,
	alive: mpsc::Receiver<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		Self::build(None, None)
	}

	#[must_use]
	pub fn with_deadline(deadline: Instant) -> (Self, Handler) {
		Self::build(None, Some(deadline))
	}

	#[must_use]
	pub fn with_timeout(timeout: std::time::Duration) -> (Self, Handler) {
		Self::with_deadline(Instant::now() + timeout)
	}

	#[must_use]
	pub fn with_parent(parent: Context, deadline: Option<Instant>) -> (Self, Handler) {
		Self::build(Some(parent), deadline)
	}

	fn build(parent: Option<Context>, deadline: Option<Instant>) -> (Self, Handler) {
		let (alive_send, alive_recv) = mpsc::channel(1);
		let token = CancellationToken::new();

		(
			Self(Arc::new(RawContext {
				_alive: alive_send,
				token: token.clone(),
				deadline,
				parent,
			})),
			Handler {
				token,
				alive: alive_recv,
			},
		)
	}

	/// Resolves once the context is cancelled, its deadline passes or its
	/// parent is done.
	pub fn done(&self) -> Pin<Box<dyn Future<Output = CancelReason> + Send + '_>> {
		Box::pin(async move {
			let parent = async {
				match &self.0.parent {
					Some(parent) => {
						parent.done().await;
					}
					None => std::future::pending::<()>().await,
				}
			};

			let deadline = async {
				match self.0.deadline {
					Some(deadline) => tokio::time::sleep_until(deadline).await,
					None => std::future::pending::<()>().await,
				}
			};

			tokio::select! {
				_ = self.0.token.cancelled() => CancelReason::Cancel,
				_ = deadline => CancelReason::Deadline,
				_ = parent => CancelReason::Parent,
			}
		})
	}

	pub fn is_done(&self) -> bool {
		self.0.token.is_cancelled()
			|| self.0.deadline.is_some_and(|d| d <= Instant::now())
			|| self.0.parent.as_ref().is_some_and(Context::is_done)
	}
}

impl Handler {
	/// Waits until every clone of the context has been dropped.
	pub async fn done(&mut self) {
		while self.alive.recv().await.is_some() {}
	}

	/// Cancels the context and waits for every clone to be dropped.
	pub async fn cancel(mut self) {
		self.token.cancel();
		self.done().await;
	}
}
