mod common;

use common::FakeNotion;
use reel_scout::models::{Hashtags, ScriptSection};
use reel_scout::services::notion::{
    build_properties, script_to_blocks, NotionWriter, RICH_TEXT_LIMIT, STATUS_DISCOVERED,
    STATUS_SCRIPT_READY,
};
use reel_scout::{ParsedVideo, ReelsScript, ScoredVideo, VideoCandidate};
use std::sync::Arc;

fn scored_video(id: &str) -> ScoredVideo {
    ScoredVideo {
        video: ParsedVideo::new(VideoCandidate {
            video_id: id.to_string(),
            title: "t".repeat(150),
            channel_name: "Channel".to_string(),
            views: 12_345,
            likes: 678,
            duration: "PT10M".to_string(),
            keyword: "zapier".to_string(),
            ..Default::default()
        }),
        score: 42.37,
    }
}

fn section(text: &str, ts: Option<&str>) -> Option<ScriptSection> {
    Some(ScriptSection {
        text: text.to_string(),
        duration: "0-3s".to_string(),
        source_timestamp: ts.map(String::from),
    })
}

fn script() -> ReelsScript {
    ReelsScript {
        hook: section("hook text", Some("01:02")),
        tip1: section(&"x".repeat(RICH_TEXT_LIMIT * 2 + 10), None),
        caption: "caption".to_string(),
        hashtags: Hashtags::List(vec!["#a".to_string(), "#b".to_string()]),
        cta_keyword: "GUIDE".to_string(),
        ..Default::default()
    }
}

#[test]
fn blocks_follow_section_order_and_chunk_long_text() {
    let blocks = script_to_blocks(&script());

    assert_eq!(
        blocks[0]["heading_3"]["rich_text"][0]["text"]["content"],
        "HOOK (0-3s) [Source: 01:02]"
    );
    assert_eq!(blocks[1]["paragraph"]["rich_text"][0]["text"]["content"], "hook text");
    assert_eq!(blocks[2]["heading_3"]["rich_text"][0]["text"]["content"], "TIP1 (0-3s)");

    let tip_chunks: Vec<usize> = blocks[3..6]
        .iter()
        .map(|b| {
            b["paragraph"]["rich_text"][0]["text"]["content"]
                .as_str()
                .unwrap()
                .chars()
                .count()
        })
        .collect();
    assert_eq!(tip_chunks, vec![RICH_TEXT_LIMIT, RICH_TEXT_LIMIT, 10]);

    let headings: Vec<&str> = blocks
        .iter()
        .filter_map(|b| b["heading_3"]["rich_text"][0]["text"]["content"].as_str())
        .collect();
    assert_eq!(
        headings,
        vec!["HOOK (0-3s) [Source: 01:02]", "TIP1 (0-3s)", "Caption", "Hashtags", "CTA Keyword"]
    );
    assert_eq!(
        blocks.last().unwrap()["paragraph"]["rich_text"][0]["text"]["content"],
        "GUIDE"
    );
}

#[test]
fn properties_without_script() {
    let props = build_properties(&scored_video("abc"), None);

    let title = props["Title"]["title"][0]["text"]["content"].as_str().unwrap();
    assert_eq!(title.chars().count(), 100);
    assert_eq!(props["Status"]["select"]["name"], STATUS_DISCOVERED);
    assert_eq!(props["YouTube URL"]["url"], "https://www.youtube.com/watch?v=abc");
    assert_eq!(props["Views"]["number"], 12_345);
    assert_eq!(props["Relevance Score"]["number"], 42.4);
    assert!(props.get("CTA Keyword").is_none());
}

#[test]
fn properties_with_script() {
    let props = build_properties(&scored_video("abc"), Some(&script()));
    assert_eq!(props["Status"]["select"]["name"], STATUS_SCRIPT_READY);
    assert_eq!(props["CTA Keyword"]["rich_text"][0]["text"]["content"], "GUIDE");
}

#[tokio::test]
async fn saves_new_video_with_blocks() {
    let api = Arc::new(FakeNotion::new());
    let writer = NotionWriter::new(api.clone());

    let page_id = writer.save_video(&scored_video("abc"), Some(&script())).await;

    assert_eq!(page_id.as_deref(), Some("page-1"));
    let created = api.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert!(created[0].1.as_ref().is_some_and(|blocks| !blocks.is_empty()));
}

#[tokio::test]
async fn skips_duplicates() {
    let api = Arc::new(FakeNotion::new());
    api.existing.lock().unwrap().push("abc".to_string());
    let writer = NotionWriter::new(api.clone());

    assert!(writer.check_duplicate("abc").await);
    assert_eq!(writer.save_video(&scored_video("abc"), None).await, None);
    assert!(api.created.lock().unwrap().is_empty());

    assert_eq!(
        writer.save_video(&scored_video("xyz"), None).await.as_deref(),
        Some("page-1")
    );
}

#[tokio::test]
async fn create_failure_returns_none() {
    let api = Arc::new(FakeNotion {
        fail_create: true,
        ..Default::default()
    });
    let writer = NotionWriter::new(api);
    assert_eq!(writer.save_video(&scored_video("abc"), None).await, None);
}

#[tokio::test]
async fn updates_status() {
    let api = Arc::new(FakeNotion::new());
    let writer = NotionWriter::new(api.clone());

    assert!(writer.update_status("page-9", STATUS_SCRIPT_READY).await);
    let updated = api.updated.lock().unwrap();
    assert_eq!(updated[0].0, "page-9");
    assert_eq!(updated[0].1["Status"]["select"]["name"], STATUS_SCRIPT_READY);
}

#[tokio::test]
async fn create_response_without_id_is_not_saved() {
    let api = Arc::new(FakeNotion {
        omit_page_id: true,
        ..Default::default()
    });
    let writer = NotionWriter::new(api.clone());

    assert_eq!(writer.save_video(&scored_video("abc"), None).await, None);
    assert_eq!(api.created.lock().unwrap().len(), 1);
}
