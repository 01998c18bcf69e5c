mod helpers;

use autofill::fetcher::{FetchError, fetch, fetch_html, fetch_image};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>Hello World</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/test", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.body_utf8.contains("Hello World"));
    assert_eq!(result.url_final.as_str(), url);
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/notfound", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/redirect", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.body_utf8.contains("Final page"));
    assert!(result.url_final.as_str().ends_with("/final"));
}

#[tokio::test]
async fn test_fetch_gzip_compression() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let original_content = r#"<html><head><meta property="og:title" content="Compressed"></head></html>"#;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(original_content.as_bytes()).unwrap();
    let compressed_data = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gzipped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed_data)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/gzipped", mock_server.uri());
    let result = fetch(&url).await.unwrap();

    assert!(result.body_utf8.contains(r#"content="Compressed""#));
}

#[tokio::test]
async fn test_fetch_latin1_page_is_decoded() {
    let mock_server = MockServer::start().await;

    // "Café" in ISO-8859-1
    let mut body = b"<html><head><title>Caf".to_vec();
    body.push(0xE9);
    body.extend_from_slice(b"</title></head></html>");

    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/latin1", mock_server.uri());
    let result = fetch(&url).await.unwrap();
    assert!(result.body_utf8.contains("Café"));
}

#[tokio::test]
async fn test_fetch_unsupported_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF])
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/image", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/jpeg");
        }
        other => panic!("Expected UnsupportedContentType error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    // 6MB > 5MB limit
    let large_body = "x".repeat(6 * 1024 * 1024);

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(large_body.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/large", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::BodyTooLarge(size)) => assert_eq!(size, 6 * 1024 * 1024),
        other => panic!("Expected BodyTooLarge error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    assert!(matches!(
        fetch("not-a-valid-url").await,
        Err(FetchError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn test_fetch_html_is_empty_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    assert_eq!(
        fetch_html(&format!("{}/gone", mock_server.uri())).await,
        (String::new(), None)
    );
    assert_eq!(fetch_html("").await, (String::new(), None));
}

#[tokio::test]
async fn test_fetch_image_declared_type() {
    let mock_server = MockServer::start().await;
    let jpeg = helpers::jpeg(64, 48);

    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(jpeg.clone())
                .insert_header("Content-Type", "image/jpeg; charset=binary"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/photo.jpg", mock_server.uri());
    let image = fetch_image(&url).await.unwrap();

    assert_eq!(image.mime, "image/jpeg");
    assert_eq!(image.mime_subtype(), "jpeg");
    assert_eq!(image.bytes.as_ref(), jpeg.as_slice());
    assert_eq!(image.url_requested.as_str(), url);
}

#[tokio::test]
async fn test_fetch_image_sniffs_missing_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(helpers::jpeg(8, 8)))
        .mount(&mock_server)
        .await;

    let image = fetch_image(&format!("{}/photo", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(image.mime, "image/jpeg");
}

#[tokio::test]
async fn test_fetch_html_reports_final_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/news/story"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Story</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let (html, url_final) = fetch_html(&format!("{}/short", mock_server.uri())).await;
    assert!(html.contains("Story"));
    assert_eq!(
        url_final.map(String::from),
        Some(format!("{}/news/story", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_fetch_image_sniffs_octet_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(helpers::jpeg(700, 500))
                .insert_header("Content-Type", "application/octet-stream"),
        )
        .mount(&mock_server)
        .await;

    let image = fetch_image(&format!("{}/photo.jpg", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(image.mime, "image/jpeg");
    assert_eq!(image.mime_subtype(), "jpeg");
}

#[tokio::test]
async fn test_fetch_image_rejects_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/not-an-image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    match fetch_image(&format!("{}/not-an-image", mock_server.uri())).await {
        Err(FetchError::NotAnImage(content_type)) => assert_eq!(content_type, "text/html"),
        other => panic!("Expected NotAnImage error, got {other:?}"),
    }
}
