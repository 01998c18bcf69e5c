use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

use crate::extractor::{
    candidate::Candidate,
    fields::{FieldKey, FieldTable},
    jsonld,
};

static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Populate `table` with candidates found in `html`.
///
/// Discovery order is kept per field: `<meta property>` matches, then
/// `<meta name>` matches, then schema.org article data, then the `<title>`
/// and meta description fallbacks. Nothing here fails; a field with no
/// candidates is simply not found.
pub fn extract_tags(html: &str, table: &mut FieldTable) {
    let document = Html::parse_document(html);

    let metas: Vec<_> = document
        .select(&META_SELECTOR)
        .map(|meta| meta.value())
        .collect();

    for meta in &metas {
        let Some(property) = meta.attr("property") else {
            continue;
        };
        let Some(content) = meta.attr("content").filter(|c| !c.trim().is_empty()) else {
            continue;
        };
        for field in table.iter_mut() {
            if property == field.tag_name {
                field.push(Candidate::from(content));
            }
        }
    }

    let mut backup_description = None;
    for meta in &metas {
        let Some(name) = meta.attr("name") else {
            continue;
        };
        let Some(content) = meta.attr("content").filter(|c| !c.trim().is_empty()) else {
            continue;
        };
        if name == "description" {
            backup_description = Some(content.to_string());
        }
        for field in table.iter_mut() {
            if name.contains(field.key.as_str()) {
                field.push_unique(Candidate::from(content));
            }
        }
    }

    for article in jsonld::article_objects(&document) {
        apply_article(&article, table);
    }

    if let Some(description) = backup_description
        && let Some(field) = table.get_mut(FieldKey::Description)
    {
        field.push_unique(Candidate::Text(description));
    }

    let backup_title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    if let Some(title) = backup_title
        && let Some(field) = table.get_mut(FieldKey::Title)
    {
        field.push_unique(Candidate::Text(title));
    }
}

fn apply_article(article: &Value, table: &mut FieldTable) {
    let keys: Vec<FieldKey> = table.keys().collect();

    for key in keys {
        match key {
            FieldKey::Image => apply_image(article, table),
            FieldKey::Site => {
                let Some(field) = table.get_mut(key) else {
                    continue;
                };
                if let Some(site) = article.get(field.schema_name).and_then(publisher_candidate) {
                    field.push_unique(site);
                }
            }
            _ => {
                let Some(field) = table.get_mut(key) else {
                    continue;
                };
                if let Some(value) = article.get(field.schema_name).and_then(Candidate::from_json)
                    && !value.is_empty()
                {
                    field.push_unique(value);
                }
            }
        }
    }
}

/// `image` may be an `ImageObject`, a bare URL, or a list of either; only the
/// first list entry is considered.
fn apply_image(article: &Value, table: &mut FieldTable) {
    let Some(schema_name) = table.get(FieldKey::Image).map(|field| field.schema_name) else {
        return;
    };
    let image = match article.get(schema_name) {
        Some(Value::Array(images)) => images.first(),
        other => other,
    };
    let Some(image) = image else {
        return;
    };

    if jsonld::type_of(image) == Some("ImageObject") {
        if let Some(url) = image.get("url").and_then(Value::as_str)
            && let Some(field) = table.get_mut(FieldKey::Image)
        {
            field.push_unique(Candidate::from(url));
        }
        if let Some(alt) = image
            .get("name")
            .and_then(Value::as_str)
            .filter(|alt| !alt.trim().is_empty())
            && let Some(field) = table.get_mut(FieldKey::ImageAlt)
        {
            field.push_unique(Candidate::from(alt));
        }
    } else if let Some(url) = image.as_str().filter(|url| is_absolute_url(url))
        && let Some(field) = table.get_mut(FieldKey::Image)
    {
        field.push_unique(Candidate::from(url));
    }
}

fn publisher_candidate(publisher: &Value) -> Option<Candidate> {
    match publisher.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => Some(Candidate::from(name)),
        _ => Candidate::from_json(publisher).filter(|site| !site.is_empty()),
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.has_host())
}
