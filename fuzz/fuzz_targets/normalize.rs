#![no_main]

use gettext_json_sync::normalize;
use gettext_json_sync_fuzz::{render_po, Entry};
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|entries: Vec<Entry>| {
    let text = render_po(&entries);
    if let Ok(json) = normalize(&text, "xx") {
        assert!(json.ends_with('\n'));
        assert_eq!(normalize(&text, "xx").unwrap(), json);
    }
});
