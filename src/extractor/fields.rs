use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utoipa::ToSchema;

use crate::extractor::candidate::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FieldKey {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "image:alt")]
    ImageAlt,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "site")]
    Site,
}

impl FieldKey {
    /// The key as matched against `<meta name>` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Description => "description",
            FieldKey::Date => "date",
            FieldKey::Time => "time",
            FieldKey::Image => "image",
            FieldKey::ImageAlt => "image:alt",
            FieldKey::Url => "url",
            FieldKey::Site => "site",
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target field and the candidates found for it so far.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: FieldKey,
    /// `<meta property>` value matched exactly in the first pass.
    pub tag_name: &'static str,
    /// Property read from schema.org article objects.
    pub schema_name: &'static str,
    pub selector: &'static str,
    pub values: Vec<Candidate>,
}

impl FieldSpec {
    pub fn new(
        key: FieldKey,
        tag_name: &'static str,
        schema_name: &'static str,
        selector: &'static str,
    ) -> Self {
        Self {
            key,
            tag_name,
            schema_name,
            selector,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.values.push(candidate);
    }

    /// Append unless an equal value is already present. Returns whether it
    /// was added.
    pub fn push_unique(&mut self, candidate: Candidate) -> bool {
        if self.contains(&candidate) {
            return false;
        }
        self.values.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.values.contains(candidate)
    }

    pub fn primary(&self) -> Option<&Candidate> {
        self.values.first()
    }

    pub fn alternates(&self) -> &[Candidate] {
        self.values.get(1..).unwrap_or_default()
    }
}

/// Ordered set of fields for one request.
#[derive(Debug, Clone)]
pub struct FieldTable {
    fields: Vec<FieldSpec>,
}

impl FieldTable {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn get_mut(&mut self, key: FieldKey) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|field| field.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldSpec> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when no field has any candidate.
    pub fn all_missing(&self) -> bool {
        self.fields.iter().all(|field| field.values.is_empty())
    }
}
