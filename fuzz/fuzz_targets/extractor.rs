#![no_main]

use libfuzzer_sys::fuzz_target;

use autofill::extractor::{extract, reconcile};
use autofill::profile::Profile;
use autofill::response::build_commands;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    for profile in [Profile::MediaCoverage, Profile::Announcement] {
        let table = extract(&html, profile);
        let fields = reconcile(&table);
        let _ = build_commands(profile, &fields, None);
    }
});
