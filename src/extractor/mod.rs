pub mod candidate;
pub mod fields;
pub mod jsonld;
pub mod reconcile;
pub mod tags;

#[cfg(test)]
mod tests;

pub use candidate::Candidate;
pub use fields::{FieldKey, FieldSpec, FieldTable};
pub use reconcile::{ReconciledField, reconcile};
pub use tags::extract_tags;

use crate::profile::Profile;

/// Build the profile's field table and fill it from `html`.
pub fn extract(html: &str, profile: Profile) -> FieldTable {
    let mut table = profile.field_table();
    extract_tags(html, &mut table);
    table
}
