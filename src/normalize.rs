// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turn a Gettext catalog into a JSON document for one locale.
//!
//! Entries which carry no information are dropped: the header entry
//! (empty `msgid`), untranslated messages and messages translated to
//! their own source text. What is left is stored under the trimmed
//! `msgid`, keeping the translation exactly as written.

use log::{debug, trace};

use crate::catalog::{parse_catalog, TranslationCatalog};
use crate::document::{Layout, LocaleDocument};
use crate::error::Result;

/// Why an entry was left out of the document.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Skip {
    /// The `msgid` is blank, such as the catalog header.
    EmptyId,
    /// There is no translation or it is blank.
    Untranslated,
    /// The translation equals the `msgid` once both are trimmed.
    Redundant,
}

/// Counts of recorded and skipped entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    pub recorded: usize,
    pub skipped_empty_id: usize,
    pub skipped_untranslated: usize,
    pub skipped_redundant: usize,
}

impl NormalizeStats {
    fn count(&mut self, skip: Skip) {
        match skip {
            Skip::EmptyId => self.skipped_empty_id += 1,
            Skip::Untranslated => self.skipped_untranslated += 1,
            Skip::Redundant => self.skipped_redundant += 1,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub layout: Layout,
}

/// Decide whether an entry goes into the document.
///
/// Returns the key (trimmed `msgid`) and the value (first plural
/// form, untrimmed) to record.
pub fn classify<'a>(
    msgid: &'a str,
    forms: &'a [String],
) -> std::result::Result<(&'a str, &'a str), Skip> {
    let msgid = msgid.trim();
    if msgid.is_empty() {
        return Err(Skip::EmptyId);
    }
    let msgstr = match forms.first() {
        Some(msgstr) if !msgstr.trim().is_empty() => msgstr.as_str(),
        _ => return Err(Skip::Untranslated),
    };
    if msgstr.trim() == msgid {
        return Err(Skip::Redundant);
    }
    Ok((msgid, msgstr))
}

/// Build the document for all entries of `catalog`.
pub fn build_document(catalog: &TranslationCatalog) -> (LocaleDocument, NormalizeStats) {
    let mut document = LocaleDocument::new();
    let mut stats = NormalizeStats::default();
    for (context, messages) in catalog.contexts() {
        for (msgid, forms) in messages {
            match classify(msgid, forms) {
                Ok((key, value)) => {
                    document.record(context, key, value);
                    stats.recorded += 1;
                }
                Err(skip) => {
                    trace!("Skipping {msgid:?} (context {context:?}): {skip:?}");
                    stats.count(skip);
                }
            }
        }
    }
    (document, stats)
}

/// Convert the text of a PO file to the JSON document for `locale`.
pub fn normalize(catalog_text: &str, locale: &str) -> Result<String> {
    normalize_with(catalog_text, locale, &NormalizeOptions::default())
}

/// Like [`normalize`], with explicit options.
pub fn normalize_with(
    catalog_text: &str,
    locale: &str,
    options: &NormalizeOptions,
) -> Result<String> {
    let catalog = parse_catalog(catalog_text)?;
    normalize_catalog(&catalog, locale, options)
}

/// Like [`normalize_with`], for an already parsed catalog.
pub fn normalize_catalog(
    catalog: &TranslationCatalog,
    locale: &str,
    options: &NormalizeOptions,
) -> Result<String> {
    let (document, stats) = build_document(catalog);
    debug!("Normalized {locale}: {stats:?}");
    document.to_canonical_json(locale, options.layout)
}
