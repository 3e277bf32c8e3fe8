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

//! The per-locale JSON document.

use std::collections::BTreeMap;

use crate::error::Result;
use serde::Serialize;

/// Key used for the context-free translation once a message also has
/// translations with a context.
///
/// A real `msgctxt` with this exact value is not told apart from the
/// context-free translation.
pub const NO_CONTEXT: &str = "$$noContext";

/// The value stored for a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    /// Only a context-free translation has been seen.
    Plain(String),
    /// Translations keyed by context, with [`NO_CONTEXT`] for the
    /// context-free one.
    Contexts(BTreeMap<String, String>),
}

/// How the document is placed in the emitted JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// The messages are the top-level object.
    #[default]
    Flat,
    /// The messages are wrapped in an object keyed by the locale. An
    /// empty document is emitted as `{}` without the locale key.
    NestedUnderLocale,
}

/// Translations of a single locale keyed by `msgid`.
///
/// Keys are kept in a [`BTreeMap`] at every level, so serialization
/// always lists them in ascending code point order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleDocument(BTreeMap<String, Entry>);

impl LocaleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as the translation of `msgid` in `context`.
    ///
    /// The empty context is stored as a plain string until a message
    /// gets a translation with a context. From then on the message
    /// holds a map and the context-free translation moves to
    /// [`NO_CONTEXT`]. The final document does not depend on the order
    /// in which the contexts of a message are recorded.
    pub fn record(&mut self, context: &str, msgid: &str, value: &str) {
        let key = if context.is_empty() {
            NO_CONTEXT
        } else {
            context
        };

        match self.0.get_mut(msgid) {
            Some(Entry::Contexts(contexts)) => {
                contexts.insert(String::from(key), String::from(value));
            }
            Some(Entry::Plain(previous)) if context.is_empty() => {
                *previous = String::from(value);
            }
            Some(entry @ Entry::Plain(_)) => {
                let previous = match entry {
                    Entry::Plain(previous) => std::mem::take(previous),
                    Entry::Contexts(_) => String::new(),
                };
                *entry = Entry::Contexts(BTreeMap::from([
                    (String::from(NO_CONTEXT), previous),
                    (String::from(key), String::from(value)),
                ]));
            }
            None if context.is_empty() => {
                self.0
                    .insert(String::from(msgid), Entry::Plain(String::from(value)));
            }
            None => {
                let contexts = BTreeMap::from([(String::from(key), String::from(value))]);
                self.0.insert(String::from(msgid), Entry::Contexts(contexts));
            }
        }
    }

    pub fn get(&self, msgid: &str) -> Option<&Entry> {
        self.0.get(msgid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.0.iter().map(|(msgid, entry)| (msgid.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize as pretty-printed JSON with a trailing newline.
    ///
    /// The output is byte-for-byte stable for equal documents. `locale`
    /// is only used as the wrapping key of [`Layout::NestedUnderLocale`].
    pub fn to_canonical_json(&self, locale: &str, layout: Layout) -> Result<String> {
        let mut json = match layout {
            Layout::NestedUnderLocale if !self.is_empty() => {
                serde_json::to_string_pretty(&BTreeMap::from([(locale, self)]))?
            }
            _ => serde_json::to_string_pretty(self)?,
        };
        json.push('\n');
        Ok(json)
    }
}
