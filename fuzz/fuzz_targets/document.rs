#![no_main]

use gettext_json_sync::{LocaleDocument, NO_CONTEXT};
use gettext_json_sync_fuzz::Entry;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fuzz_target!(|entries: Vec<Entry>| {
    // Keep one entry per (context, msgid) like a real catalog. A context
    // named like the reserved key is a known collision.
    let unique = entries
        .into_iter()
        .filter(|entry| entry.msgctxt != NO_CONTEXT)
        .map(|entry| ((entry.msgctxt.clone(), entry.msgid.clone()), entry))
        .collect::<BTreeMap<_, _>>();

    let mut forward = LocaleDocument::new();
    for entry in unique.values() {
        forward.record(&entry.msgctxt, &entry.msgid, &entry.msgstr);
    }
    let mut backward = LocaleDocument::new();
    for entry in unique.values().rev() {
        backward.record(&entry.msgctxt, &entry.msgid, &entry.msgstr);
    }
    assert_eq!(forward, backward);
});
