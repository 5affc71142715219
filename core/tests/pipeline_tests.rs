mod common;

use std::fs;

use common::{FakeIndex, FixedPalette, TextRenderer};
use recap_core::gateway::bulk_load;
use recap_core::pipeline::{build, cloud, inclusion_for_query, search};
use recap_core::{Inclusion, IndexStore, Layout, Post, RecapError, CLOUD_LIMIT};
use tempfile::tempdir;
use time::macros::datetime;

const CORPUS: &str = "New feature X
Posted On: Jan 2, 2006
Launches today
Amazon S3 adds tables
Posted On: Dec 3, 2024
Tables for analytics workloads in S3
Lambda supports Rust
Posted On: Nov 14, 2025
Write Lambda functions in Rust
Dangling title
";

fn layout_with_corpus() -> (tempfile::TempDir, Layout) {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    fs::write(layout.raw_corpus(), CORPUS).unwrap();
    fs::write(layout.font(), b"not really a font").unwrap();
    (dir, layout)
}

#[test]
fn build_writes_store_and_index() {
    let (_dir, layout) = layout_with_corpus();
    let report = build::<FakeIndex>(&layout).unwrap();
    assert_eq!(report.parsed, 4);
    assert_eq!(report.stored, 3);
    assert_eq!(report.index.indexed, 3);
    assert_eq!(report.index.skipped, 1);

    let stored = recap_core::persist::load_posts(&layout.post_store()).unwrap();
    assert_eq!(
        stored[0],
        Post { title: "New feature X".into(), date: datetime!(2006-01-02 0:00 UTC), description: "Launches today".into() }
    );

    let results = search::<FakeIndex>(&layout, "feature").unwrap();
    assert_eq!(results.hits[0].id, "New feature X");
}

#[test]
fn second_build_refuses_existing_index() {
    let (_dir, layout) = layout_with_corpus();
    build::<FakeIndex>(&layout).unwrap();
    assert!(matches!(build::<FakeIndex>(&layout), Err(RecapError::IndexCreate { .. })));
}

#[test]
fn search_without_index_asks_for_build() {
    let (_dir, layout) = layout_with_corpus();
    let err = search::<FakeIndex>(&layout, "feature").unwrap_err();
    assert!(matches!(err, RecapError::IndexNotFound { .. }));
}

#[test]
fn one_bad_document_does_not_stop_the_batch() {
    let dir = tempdir().unwrap();
    let mut store = FakeIndex::build(&dir.path().join("idx")).unwrap();
    store.fail_on = Some("B".into());
    let posts: Vec<Post> = ["A", "B", "C"].iter().map(|t| Post { title: t.to_string(), ..Post::default() }).collect();
    let report = bulk_load(&mut store, &posts).unwrap();
    assert_eq!((report.indexed, report.failed), (2, 1));
    assert_eq!(store.query("c", 10).unwrap().hits.len(), 1);
}

#[test]
fn empty_query_includes_everything_without_an_index() {
    let (_dir, layout) = layout_with_corpus();
    assert_eq!(inclusion_for_query::<FakeIndex>(&layout, "").unwrap(), Inclusion::All);
}

#[test]
fn query_inclusion_is_capped() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let mut store = FakeIndex::build(&layout.index_dir()).unwrap();
    for i in 0..(CLOUD_LIMIT + 50) {
        store.add(&format!("post {i}"), &format!("post {i}"), "shared words").unwrap();
    }
    store.commit().unwrap();
    match inclusion_for_query::<FakeIndex>(&layout, "shared").unwrap() {
        Inclusion::Subset(titles) => assert_eq!(titles.len(), CLOUD_LIMIT),
        Inclusion::All => panic!("expected a subset"),
    }
}

#[test]
fn filtered_cloud_counts_only_matching_posts() {
    let (_dir, layout) = layout_with_corpus();
    build::<FakeIndex>(&layout).unwrap();
    let report = cloud::<FakeIndex, _, _>(&layout, "lambda", &FixedPalette, &TextRenderer).unwrap();
    assert_eq!(report.posts, 1);
    let out = fs::read_to_string(&report.output).unwrap();
    assert!(out.starts_with("2048x2048 palette=8\n"));
    assert!(out.contains("lambda 2\n"));
    assert!(out.contains("rust 2\n"));
    assert!(!out.contains("tables"));
}

#[test]
fn unfiltered_cloud_uses_every_post() {
    let (_dir, layout) = layout_with_corpus();
    build::<FakeIndex>(&layout).unwrap();
    let report = cloud::<FakeIndex, _, _>(&layout, "", &FixedPalette, &TextRenderer).unwrap();
    assert_eq!(report.posts, 3);
    let out = fs::read_to_string(layout.output_image()).unwrap();
    assert!(out.contains("tables 2\n"));
    assert!(out.contains("launches 1\n"));
}

#[test]
fn cloud_without_store_asks_for_build() {
    let (_dir, layout) = layout_with_corpus();
    let err = cloud::<FakeIndex, _, _>(&layout, "", &FixedPalette, &TextRenderer).unwrap_err();
    assert!(matches!(err, RecapError::CorpusNotIndexed { .. }));
}

#[test]
fn missing_font_is_a_render_error() {
    let (_dir, layout) = layout_with_corpus();
    build::<FakeIndex>(&layout).unwrap();
    fs::remove_file(layout.font()).unwrap();
    let err = cloud::<FakeIndex, _, _>(&layout, "", &FixedPalette, &TextRenderer).unwrap_err();
    assert!(matches!(err, RecapError::Render(_)));
}
