use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::ReconciledField;
use crate::media::RemoteMedia;
use crate::profile::Profile;
use crate::response::Command;

/// Longest URL accepted, matching the limit of the form's URL input.
pub const MAX_URL_LENGTH: usize = 2084;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AutofillRequest {
    pub url: String,
    /// Falls back to the server's default profile.
    pub profile: Option<Profile>,
}

impl AutofillRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("URL cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LENGTH {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AutofillResponse {
    pub profile: Profile,
    pub commands: Vec<Command>,
    pub fields: Vec<ReconciledField>,
    pub media: Option<RemoteMedia>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
