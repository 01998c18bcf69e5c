//! Fetch, extract, import, reconcile, respond.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;
use utoipa::ToSchema;

use crate::extractor::{Candidate, FieldKey, FieldTable, ReconciledField, extract, reconcile};
use crate::fetcher::fetch_html;
use crate::media::{ImageImporter, MediaStore, RemoteMedia};
use crate::profile::Profile;
use crate::response::{Command, build_commands};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AutofillOutcome {
    pub profile: Profile,
    pub url: String,
    pub fields: Vec<ReconciledField>,
    pub media: Option<RemoteMedia>,
    pub commands: Vec<Command>,
}

impl AutofillOutcome {
    pub fn missing(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_missing())
            .map(|field| field.key)
    }
}

pub struct Autofill {
    importer: ImageImporter,
}

impl Autofill {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            importer: ImageImporter::new(store),
        }
    }

    /// Fill one form from one page. Failures along the way only ever show up
    /// as missing fields.
    #[instrument(skip(self, profile), fields(profile = %profile))]
    pub async fn run(&self, url: &str, profile: Profile) -> AutofillOutcome {
        let (html, url_final) = fetch_html(url).await;
        let mut table = extract(&html, profile);

        // Relative references are relative to where the page actually lives.
        let page_url = url_final.map_or_else(|| url.to_string(), String::from);
        let media = self.import_image(&page_url, profile, &mut table).await;
        let fields = reconcile(&table);
        let commands = build_commands(profile, &fields, media.as_ref());

        let outcome = AutofillOutcome {
            profile,
            url: url.to_string(),
            fields,
            media,
            commands,
        };

        let missing: Vec<&str> = outcome.missing().map(|key| key.as_str()).collect();
        info!(
            imported = outcome.media.is_some(),
            commands = outcome.commands.len(),
            missing = ?missing,
            "autofill complete"
        );

        outcome
    }

    async fn import_image(
        &self,
        page_url: &str,
        profile: Profile,
        table: &mut FieldTable,
    ) -> Option<RemoteMedia> {
        let raw = table
            .get(FieldKey::Image)
            .and_then(|field| field.primary())
            .and_then(Candidate::as_text)?
            .trim()
            .to_string();

        let Some(image_url) = resolve(page_url, &raw) else {
            debug!(raw = %raw, "image reference is not a usable URL");
            return None;
        };

        let alt = table
            .get(FieldKey::ImageAlt)
            .and_then(|field| field.primary())
            .and_then(Candidate::as_text)
            .map(str::to_string);

        let media = match self
            .importer
            .import(image_url.as_str(), alt.as_deref(), &profile.import_target())
            .await
        {
            Ok(media) => media,
            Err(err) => {
                warn!(image_url = %image_url, error.kind = err.kind(), error = %err, "image import failed");
                return None;
            }
        };

        if let Some(field) = table.get_mut(FieldKey::ImageAlt)
            && field.primary().is_none_or(Candidate::is_empty)
        {
            field.values.insert(0, Candidate::from(media.alt_text.as_str()));
        }

        Some(media)
    }
}

/// Absolute URLs pass through; relative ones resolve against the page.
fn resolve(page_url: &str, raw: &str) -> Option<Url> {
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw)
        .or_else(|_| Url::parse(page_url).and_then(|base| base.join(raw)))
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
