use crate::catalog::search::search;
use crate::config::AppConfig;
use crate::tests::global::mock_global_state;

use common::global::GlobalDb;

#[tokio::test]
async fn test_blank_search_skips_database() {
	// The pool is lazy and never connected, any query would fail.
	let (global, _handler) = mock_global_state(AppConfig::default());

	let results = search(global.db(), "   ", None).await.expect("blank search should not query");

	assert!(results.fields.is_empty());
	assert!(results.services.is_empty());
	assert!(results.offers.is_empty());
}
