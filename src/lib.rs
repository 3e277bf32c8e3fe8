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

//! Convert Gettext catalogs into JSON documents.
//!
//! A catalog exported from a translation platform is turned into one
//! JSON object per locale, keyed by `msgid`. Messages with a
//! `msgctxt` become objects keyed by context. The output is sorted
//! and indented the same way on every run so that regenerated files
//! only differ where translations changed.
//!
//! # Examples
//!
//! ```
//! use gettext_json_sync::normalize;
//!
//! let po = "\
//! msgid \"\"
//! msgstr \"Language: fr\\n\"
//!
//! msgid \"Save\"
//! msgstr \"Enregistrer\"
//!
//! msgctxt \"menu\"
//! msgid \"Save\"
//! msgstr \"Sauver\"
//! ";
//! assert_eq!(
//!     normalize(po, "fr").unwrap(),
//!     "{\n  \"Save\": {\n    \"$$noContext\": \"Enregistrer\",\n    \"menu\": \"Sauver\"\n  }\n}\n"
//! );
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod normalize;
pub mod sync;

pub use catalog::{parse_catalog, TranslationCatalog};
pub use document::{Entry, Layout, LocaleDocument, NO_CONTEXT};
pub use error::{Error, Result};
pub use normalize::{normalize, normalize_with, NormalizeOptions};
