use arbitrary::Arbitrary;
use gettext_json_sync::TranslationCatalog;

/// A single catalog entry for fuzzing.
#[derive(Arbitrary, Debug, Clone)]
pub struct Entry {
    pub msgctxt: String,
    pub msgid: String,
    pub msgstr: String,
}

/// Generate a random catalog for fuzzing.
pub fn create_catalog(entries: &[Entry]) -> TranslationCatalog {
    let mut catalog = TranslationCatalog::new();
    for entry in entries {
        catalog.insert(&entry.msgctxt, &entry.msgid, vec![entry.msgstr.clone()]);
    }
    catalog
}

/// Render entries as the text of a PO file.
pub fn render_po(entries: &[Entry]) -> String {
    let mut text = String::from("msgid \"\"\nmsgstr \"Language: xx\\n\"\n");
    for entry in entries {
        text.push('\n');
        if !entry.msgctxt.is_empty() {
            text.push_str(&format!("msgctxt \"{}\"\n", escape(&entry.msgctxt)));
        }
        text.push_str(&format!("msgid \"{}\"\n", escape(&entry.msgid)));
        text.push_str(&format!("msgstr \"{}\"\n", escape(&entry.msgstr)));
    }
    text
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
