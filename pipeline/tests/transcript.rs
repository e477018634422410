mod common;

use common::FakeTranscripts;
use reel_scout::services::transcript::{
    extract_transcript, extract_transcript_with_segments, DEFAULT_LANGUAGES,
};

#[tokio::test]
async fn timestamped_and_plain_text() {
    let source = FakeTranscripts::default().with("abc", "first line\nsecond");

    assert_eq!(
        extract_transcript(&source, "abc", DEFAULT_LANGUAGES, true).await.as_deref(),
        Some("[00:00] first line second")
    );
    assert_eq!(
        extract_transcript(&source, "abc", DEFAULT_LANGUAGES, false).await.as_deref(),
        Some("first line second")
    );
}

#[tokio::test]
async fn segments_are_passed_through() {
    let source = FakeTranscripts::default().with("abc", "hi");

    let segments = extract_transcript_with_segments(&source, "abc", DEFAULT_LANGUAGES)
        .await
        .unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].duration, 3.0);
}

#[tokio::test]
async fn unavailable_transcript_is_none() {
    let source = FakeTranscripts::default();
    assert!(extract_transcript(&source, "nope", DEFAULT_LANGUAGES, true).await.is_none());
    assert!(extract_transcript_with_segments(&source, "nope", DEFAULT_LANGUAGES)
        .await
        .is_none());
}
