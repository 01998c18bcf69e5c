//! schema.org article blocks from `<script type="application/ld+json">`.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static JSON_LD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// Every article-typed object in the document, in document order. Top level
/// arrays and `@graph` containers are flattened. Blocks that fail to decode
/// are skipped.
pub fn article_objects(document: &Html) -> Vec<Value> {
    let mut articles = Vec::new();

    for script in document.select(&JSON_LD_SELECTOR) {
        let raw = script.text().collect::<String>();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => collect_articles(value, &mut articles),
            Err(err) => debug!(error = %err, "skipping undecodable ld+json block"),
        }
    }

    articles
}

fn collect_articles(value: Value, articles: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_articles(item, articles);
            }
        }
        Value::Object(mut object) => {
            if let Some(Value::Array(graph)) = object.remove("@graph") {
                for item in graph {
                    collect_articles(item, articles);
                }
            }
            let value = Value::Object(object);
            if is_article(&value) {
                articles.push(value);
            }
        }
        _ => {}
    }
}

/// `@type` containing "article" in any case, such as `Article` or
/// `NewsArticle`. A `BlogPosting` does not qualify.
pub fn is_article(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => mentions_article(kind),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(mentions_article),
        _ => false,
    }
}

fn mentions_article(kind: &str) -> bool {
    kind.to_ascii_lowercase().contains("article")
}

/// The typed `@type` of an object when it is a plain string.
pub fn type_of(value: &Value) -> Option<&str> {
    value.get("@type").and_then(Value::as_str)
}
