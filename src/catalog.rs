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

//! Reading Gettext catalogs into a table of translations.
//!
//! The heavy lifting is done by [`polib`]. Before handing the text to
//! `polib`, every line is checked against the shape of a PO file so
//! that obviously broken input is reported with a line number instead
//! of being half-parsed. The checked text is then written out again in
//! the narrow form `polib` reads, with a header entry that carries all
//! the fields `polib` insists on.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{Error, Result};
use polib::catalog::Catalog;
use polib::message::MessageView;
use polib::po_file;

/// Translations grouped by `msgctxt`, then by `msgid`.
///
/// Messages without a context live under the empty string. Each
/// `msgid` maps to the `msgstr` forms in plural order; singular
/// messages have exactly one form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    language: String,
    contexts: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a parsed `polib` catalog.
    pub fn from_polib(catalog: &Catalog) -> Self {
        let mut table = Self {
            language: catalog.metadata.language.clone(),
            ..Self::default()
        };
        for message in catalog.messages() {
            let forms = if message.is_plural() {
                message.msgstr_plural().cloned().unwrap_or_default()
            } else {
                message
                    .msgstr()
                    .map(|msgstr| vec![String::from(msgstr)])
                    .unwrap_or_default()
            };
            table.insert(message.msgctxt(), message.msgid(), forms);
        }
        table
    }

    /// Add or replace the forms for `msgid` in `context`.
    pub fn insert(&mut self, context: &str, msgid: &str, forms: Vec<String>) {
        self.contexts
            .entry(String::from(context))
            .or_default()
            .insert(String::from(msgid), forms);
    }

    /// The `Language` header of the catalog, empty if not set.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Iterate over contexts and the messages recorded in each.
    pub fn contexts(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<String>>)> {
        self.contexts
            .iter()
            .map(|(context, messages)| (context.as_str(), messages))
    }

    /// The singular (first) form of a translation, if any.
    pub fn singular(&self, context: &str, msgid: &str) -> Option<&str> {
        self.contexts
            .get(context)?
            .get(msgid)?
            .first()
            .map(String::as_str)
    }

    /// Number of messages over all contexts.
    pub fn len(&self) -> usize {
        self.contexts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Header fields that `polib` requires, with the value filled in when
/// a catalog leaves one out.
const REQUIRED_HEADER_FIELDS: [(&str, &str); 9] = [
    ("Project-Id-Version", ""),
    ("POT-Creation-Date", ""),
    ("PO-Revision-Date", ""),
    ("Language-Team", ""),
    ("MIME-Version", "1.0"),
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Content-Transfer-Encoding", "8bit"),
    ("Language", ""),
    (PLURAL_FORMS, "nplurals=1; plural=0;"),
];

/// Must also be non-empty, `polib` parses its value.
const PLURAL_FORMS: &str = "Plural-Forms";

/// Parse the full text of a PO file.
///
/// The header entry is optional, and so is every field in it. Fails
/// with [`Error::MalformedCatalog`] if the text is not a Gettext
/// catalog. Nothing is returned for partially valid input.
pub fn parse_catalog(text: &str) -> Result<TranslationCatalog> {
    let canonical = canonicalize(text)?;
    let mut file = tempfile::Builder::new()
        .prefix("catalog")
        .suffix(".po")
        .tempfile()
        .map_err(|err| Error::io(std::env::temp_dir(), err))?;
    file.write_all(canonical.as_bytes())
        .map_err(|err| Error::io(file.path(), err))?;
    let catalog = po_file::parse(file.path()).map_err(|err| Error::MalformedCatalog {
        line: None,
        reason: err.to_string(),
    })?;
    Ok(TranslationCatalog::from_polib(&catalog))
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::MalformedCatalog {
        line: Some(line),
        reason: String::from(reason),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    MsgstrPlural,
}

/// The lines of one entry, plus the escaped text of the fields which
/// tell the header apart from a message.
#[derive(Debug, Default)]
struct RawEntry {
    lines: Vec<String>,
    msgctxt: Option<String>,
    msgid: Option<String>,
    msgstr: Option<String>,
    plural: bool,
    translated: bool,
}

impl RawEntry {
    fn has_keywords(&self) -> bool {
        self.msgctxt.is_some() || self.msgid.is_some() || self.plural || self.translated
    }

    fn is_header(&self) -> bool {
        self.msgctxt.is_none()
            && self.msgid.as_deref() == Some("")
            && !self.plural
            && self.msgstr.is_some()
    }

    fn field(&mut self, keyword: Keyword) -> Option<&mut String> {
        match keyword {
            Keyword::Msgctxt => self.msgctxt.as_mut(),
            Keyword::Msgid => self.msgid.as_mut(),
            Keyword::Msgstr => self.msgstr.as_mut(),
            Keyword::MsgidPlural | Keyword::MsgstrPlural => None,
        }
    }
}

/// Check that every line is a comment, a keyword with a string, or a
/// string continuing the previous keyword, and write the catalog back
/// out in the plain form `polib` reads: trimmed lines, a single space
/// after each keyword, a blank line after each entry and a complete
/// header entry first.
fn canonicalize(text: &str) -> Result<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    let mut entry = RawEntry::default();
    let mut current = None;
    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            entries.push(std::mem::take(&mut entry));
            current = None;
            continue;
        }

        if line.starts_with('#') {
            if entry.translated {
                entries.push(std::mem::take(&mut entry));
            }
            entry.lines.push(String::from(line));
            current = None;
            continue;
        }

        if line.starts_with('"') {
            let Some(keyword) = current else {
                return Err(malformed(lineno, "string without a keyword"));
            };
            let value = unquote(line)
                .ok_or_else(|| malformed(lineno, "expected a double-quoted string"))?;
            if let Some(field) = entry.field(keyword) {
                field.push_str(value);
            }
            entry.lines.push(String::from(line));
            continue;
        }

        let (word, keyword, string) = split_keyword(line, lineno)?;
        let value =
            unquote(string).ok_or_else(|| malformed(lineno, "expected a double-quoted string"))?;
        if entry.translated && matches!(keyword, Keyword::Msgctxt | Keyword::Msgid) {
            entries.push(std::mem::take(&mut entry));
        }
        match keyword {
            Keyword::Msgctxt => entry.msgctxt.get_or_insert_with(String::new).push_str(value),
            Keyword::Msgid => entry.msgid.get_or_insert_with(String::new).push_str(value),
            Keyword::MsgidPlural => entry.plural = true,
            Keyword::Msgstr => {
                entry.msgstr.get_or_insert_with(String::new).push_str(value);
                entry.translated = true;
            }
            Keyword::MsgstrPlural => entry.translated = true,
        }
        entry.lines.push(format!("{word} {string}"));
        current = Some(keyword);
    }
    entries.push(entry);

    let mut entries = entries
        .into_iter()
        .filter(RawEntry::has_keywords)
        .collect::<Vec<_>>();
    let header = match entries.iter().position(RawEntry::is_header) {
        Some(index) => entries.remove(index),
        None => RawEntry::default(),
    };

    let mut output = String::new();
    let blocks = std::iter::once(complete_header(&header))
        .chain(entries.into_iter().map(|entry| entry.lines));
    for lines in blocks {
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }
    Ok(output)
}

/// The header entry with every field from [`REQUIRED_HEADER_FIELDS`].
fn complete_header(header: &RawEntry) -> Vec<String> {
    let msgstr = header.msgstr.as_deref().unwrap_or_default();
    let (fields, mut open_line) = header_fields(msgstr);
    let mut lines = vec![String::from("msgid \"\""), format!("msgstr \"{msgstr}\"")];
    for (name, default) in REQUIRED_HEADER_FIELDS {
        let present = fields
            .get(name)
            .is_some_and(|value| name != PLURAL_FORMS || !value.is_empty());
        if present {
            continue;
        }
        let separator = if open_line { "\\n" } else { "" };
        lines.push(format!("\"{separator}{name}: {default}\\n\""));
        open_line = false;
    }
    lines
}

/// Split escaped header text into fields the way `polib` does after
/// unescaping it. Later fields replace earlier ones. The flag is set
/// when the last line has no terminating newline.
fn header_fields(escaped: &str) -> (BTreeMap<&str, &str>, bool) {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = escaped.char_indices();
    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            continue;
        }
        if let Some((_, 'n')) = chars.next() {
            lines.push(&escaped[start..pos]);
            start = pos + 2;
        }
    }
    let last = &escaped[start..];
    lines.push(last);

    let fields = lines
        .into_iter()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name, value.trim()))
        .collect();
    (fields, !last.is_empty())
}

/// Split a keyword line into the keyword as written, its kind and the
/// string which follows it.
fn split_keyword(line: &str, lineno: usize) -> Result<(&str, Keyword, &str)> {
    let end = line
        .find(|c: char| c.is_whitespace() || c == '"')
        .unwrap_or(line.len());
    let (word, rest) = line.split_at(end);
    let keyword = parse_keyword(word).ok_or_else(|| malformed(lineno, "unknown keyword"))?;
    if !rest.starts_with(char::is_whitespace) {
        return Err(malformed(lineno, "expected whitespace after the keyword"));
    }
    Ok((word, keyword, rest.trim_start()))
}

fn parse_keyword(word: &str) -> Option<Keyword> {
    match word {
        "msgctxt" => Some(Keyword::Msgctxt),
        "msgid" => Some(Keyword::Msgid),
        "msgid_plural" => Some(Keyword::MsgidPlural),
        "msgstr" => Some(Keyword::Msgstr),
        _ => is_plural_msgstr(word).then_some(Keyword::MsgstrPlural),
    }
}

/// `msgstr[0]` up to `msgstr[9]`.
fn is_plural_msgstr(word: &str) -> bool {
    word.strip_prefix("msgstr[")
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|index| matches!(index.as_bytes(), [b'0'..=b'9']))
}

/// The contents of a C-style string literal with nothing after the
/// closing quote.
fn unquote(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('"')?;
    let mut chars = inner.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next()?;
            }
            '"' => return inner[pos + 1..].trim().is_empty().then(|| &inner[..pos]),
            _ => {}
        }
    }
    None
}
