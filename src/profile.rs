//! Form profiles.
//!
//! A profile names the node form being filled: which fields it has, the
//! selectors of their inputs, and how a downloaded image is stored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::extractor::fields::{FieldKey, FieldSpec, FieldTable};
use crate::media::importer::{ImportMode, ImportTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    MediaCoverage,
    Announcement,
}

/// Selectors used to hand an imported image to the form's image widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageWidget {
    pub value_selector: &'static str,
    pub trigger_selector: &'static str,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::MediaCoverage => "media_coverage",
            Profile::Announcement => "announcement",
        }
    }

    /// Fresh field table for one request, in response order.
    pub fn field_table(&self) -> FieldTable {
        use FieldKey::*;

        let fields = match self {
            Profile::MediaCoverage => vec![
                FieldSpec::new(Title, "og:title", "headline", "#edit-field-media-article-title-0-value"),
                FieldSpec::new(Description, "og:description", "description", "#edit-body-0-value"),
                FieldSpec::new(Date, "article:published_time", "datePublished", "#edit-field-media-article-date-0-value-date"),
                FieldSpec::new(Time, "article:published_time", "datePublished", "#edit-field-media-article-date-0-value-time"),
                FieldSpec::new(Image, "og:image", "image", r#"[data-media-library-widget-value="field_media_article_image"]"#),
                FieldSpec::new(ImageAlt, "og:image:alt", "name", ""),
                FieldSpec::new(Url, "og:url", "url", "#edit-field-media-article-url-0-uri"),
                FieldSpec::new(Site, "og:site_name", "publisher", "#edit-field-media-source-0-value"),
            ],
            Profile::Announcement => vec![
                FieldSpec::new(Title, "og:title", "headline", "#edit-title-0-value"),
                FieldSpec::new(Description, "og:description", "description", "#edit-body-0-value"),
                FieldSpec::new(Image, "og:image", "image", "#edit-field-announcement-feature-image-0-upload"),
                FieldSpec::new(ImageAlt, "og:image:alt", "name", r#"[data-drupal-selector="edit-field-announcement-feature-image-0-alt"]"#),
                FieldSpec::new(Url, "og:url", "url", "#edit-field-media-article-url-0-uri"),
                FieldSpec::new(Site, "og:site_name", "publisher", "#edit-field-media-article-url-0-title"),
            ],
        };

        FieldTable::new(fields)
    }

    pub fn import_target(&self) -> ImportTarget {
        match self {
            Profile::MediaCoverage => ImportTarget {
                dir_key: "media-coverage-images",
                mode: ImportMode::Persistent,
            },
            Profile::Announcement => ImportTarget {
                dir_key: "announcement-images",
                mode: ImportMode::Temporary,
            },
        }
    }

    pub fn image_widget(&self) -> ImageWidget {
        match self {
            Profile::MediaCoverage => ImageWidget {
                value_selector: r#"[data-media-library-widget-value="field_media_article_image"]"#,
                trigger_selector: r#"[data-media-library-widget-update="field_media_article_image"]"#,
            },
            Profile::Announcement => ImageWidget {
                value_selector: r#"[data-drupal-selector="edit-field-announcement-feature-image-0-fids"]"#,
                trigger_selector: r#"[data-drupal-selector="edit-field-announcement-feature-image-0-upload-button"]"#,
            },
        }
    }

    /// Whether the alt-text field gets its own directive. The media library
    /// widget carries alt text on the media record instead.
    pub fn fills_image_alt(&self) -> bool {
        matches!(self, Profile::Announcement)
    }

    /// Lead-in of the banner line listing a missing field.
    pub fn missing_summary_label(&self) -> &'static str {
        match self {
            Profile::MediaCoverage => "Check for missing value",
            Profile::Announcement => "Check for missing values",
        }
    }

    /// Checkbox ticked so announcements copied from elsewhere are not indexed.
    pub fn robots_noindex_selector(&self) -> Option<&'static str> {
        match self {
            Profile::MediaCoverage => None,
            Profile::Announcement => {
                Some("#edit-field-announcement-meta-tags-0-advanced-robots-robots-noindex")
            }
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "media_coverage" => Ok(Profile::MediaCoverage),
            "announcement" => Ok(Profile::Announcement),
            other => Err(format!("unknown profile '{other}'")),
        }
    }
}
