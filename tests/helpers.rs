#![allow(dead_code)]

use axum::Router;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

use autofill::{
    api,
    app_state::AppState,
    media::{FsMediaStore, MediaStore},
    profile::Profile,
};

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut buffer, image::ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

pub fn article_page(image_src: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Solar roads tested | Campus Wire</title>
    <meta property="og:title" content="Solar roads pass first winter">
    <meta name="twitter:title" content="Solar roads tested">
    <meta property="og:description" content="Panels survived snow ploughs.">
    <meta property="og:image" content="{image_src}">
    <meta property="og:url" content="https://campuswire.example/solar-roads">
    <meta property="og:site_name" content="Campus Wire">
    <meta property="article:published_time" content="2024-11-02T08:15:00-07:00">
</head>
<body><p>Story</p></body>
</html>"#
    )
}

/// Router backed by a filesystem store in a fresh temp dir. Keep the
/// `TempDir` alive for the duration of the test.
pub fn test_app() -> (Router, Arc<FsMediaStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FsMediaStore::new(dir.path()));
    let media_store: Arc<dyn MediaStore> = store.clone();
    let state = AppState::with_store(media_store, Profile::MediaCoverage);
    (api::router(state), store, dir)
}
