use std::time::Duration;

use tokio::time::Instant;

use crate::context::{CancelReason, Context};
use crate::prelude::FutureTimeout;

const WAIT: Duration = Duration::from_millis(300);

/// Spawns a task that parks on the context and reports why it woke up.
fn watcher(ctx: Context) -> tokio::task::JoinHandle<CancelReason> {
	tokio::spawn(async move { ctx.done().await })
}

#[tokio::test]
async fn test_shutdown_wakes_every_worker() {
	let (ctx, handler) = Context::new();

	let workers = (0..3).map(|_| watcher(ctx.clone())).collect::<Vec<_>>();
	drop(ctx);

	handler.cancel().timeout(WAIT).await.expect("workers did not release the context");

	for worker in workers {
		let reason = worker.timeout(WAIT).await.expect("worker still running").expect("worker panicked");
		assert_eq!(reason, CancelReason::Cancel);
	}
}

#[tokio::test]
async fn test_deadline_ends_context_without_cancel() {
	let (ctx, mut handler) = Context::with_deadline(Instant::now() + Duration::from_millis(50));

	let reason = watcher(ctx).timeout(WAIT).await.expect("deadline ignored").expect("worker panicked");
	assert_eq!(reason, CancelReason::Deadline);

	handler.done().timeout(WAIT).await.expect("context still referenced");
}

#[tokio::test]
async fn test_timeout_flips_is_done() {
	let (ctx, _handler) = Context::with_timeout(Duration::from_millis(40));
	assert!(!ctx.is_done());

	tokio::time::sleep(Duration::from_millis(80)).await;
	assert!(ctx.is_done());
}

#[tokio::test]
async fn test_child_follows_parent() {
	let (server, server_handler) = Context::new();
	let (request, mut request_handler) = Context::with_parent(server, None);

	let worker = watcher(request);

	server_handler.cancel().timeout(WAIT).await.expect("parent cancel blocked");

	let reason = worker.timeout(WAIT).await.expect("child still running").expect("worker panicked");
	assert_eq!(reason, CancelReason::Parent);

	request_handler.done().timeout(WAIT).await.expect("child context still referenced");
}

#[tokio::test]
async fn test_cancel_blocks_on_live_clone() {
	let (ctx, handler) = Context::new();
	let held = ctx.clone();
	drop(ctx);

	handler
		.cancel()
		.timeout(Duration::from_millis(100))
		.await
		.expect_err("cancel returned while a clone was alive");

	assert!(held.is_done());
}

#[test]
fn test_reason_display() {
	let shown = [CancelReason::Cancel, CancelReason::Deadline, CancelReason::Parent].map(|r| r.to_string());
	assert_eq!(shown, ["Cancel", "Deadline", "Parent"]);
}
