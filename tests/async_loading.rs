//! Async loading tests.
//!
//! Fixture files live in `tests/fixtures/`.

#![cfg(feature = "async")]

use subcue::{SubcueError, SubtitleLoader};

fn sample_path() -> &'static str {
    "tests/fixtures/sample.srt"
}

#[tokio::test]
async fn load_async_sample() {
    let document = SubtitleLoader::new()
        .load_async(sample_path(), None)
        .await
        .expect("Failed to load");

    assert_eq!(document.len(), 3);
    assert!(!document.is_none());
}

#[tokio::test]
async fn load_async_missing_file() {
    let result = SubtitleLoader::new().load_async("tests/fixtures/missing.srt", None).await;
    assert!(matches!(result, Err(SubcueError::IoError(_))), "Got: {result:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn load_async_concurrently() {
    let loader = SubtitleLoader::new();
    let first = loader.load_async(sample_path(), None);
    let second = loader.load_async("tests/fixtures/no_trailing_blank.srt", None);

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.expect("Failed to load first").len(), 3);
    assert_eq!(second.expect("Failed to load second").len(), 2);
}
