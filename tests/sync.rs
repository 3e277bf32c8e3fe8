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

use std::fs;
use std::path::Path;

use gettext_json_sync::sync::{sync, DirectorySource, Status, SyncConfig, Transform};
use gettext_json_sync::{Error, Layout};
use pretty_assertions::assert_eq;

const HEADER: &str = "msgid \"\"\n\
                      msgstr \"\"\n\
                      \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
                      \"Language: fr\\n\"\n\
                      \n";

const FR: &str = "#: src/app.js:1\n\
                  msgid \"Save\"\n\
                  msgstr \"Enregistrer\"\n\
                  \n\
                  msgctxt \"menu\"\n\
                  msgid \"Save\"\n\
                  msgstr \"Sauver\"\n\
                  \n\
                  msgid \"OK\"\n\
                  msgstr \"OK\"\n\
                  \n\
                  msgid \"Cancel\"\n\
                  msgstr \"\"\n";

fn write_catalog(dir: &Path, locale: &str, entries: &str) {
    fs::write(dir.join(format!("{locale}.po")), format!("{HEADER}{entries}")).unwrap();
}

fn locales(list: &[&str]) -> Vec<String> {
    list.iter().map(|locale| String::from(*locale)).collect()
}

#[test]
fn test_sync_writes_locale_files() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_catalog(catalogs.path(), "fr", FR);

    let config = SyncConfig::new(locales(&["fr"]), output.path());
    let report = sync(&config, &DirectorySource::new(catalogs.path())).unwrap();

    assert!(report.has_changes());
    assert_eq!(report.outcomes[0].status, Status::Created);
    assert_eq!(
        fs::read_to_string(output.path().join("fr.json")).unwrap(),
        "{\n  \
           \"Save\": {\n    \
             \"$$noContext\": \"Enregistrer\",\n    \
             \"menu\": \"Sauver\"\n  \
           }\n\
         }\n"
    );
}

#[test]
fn test_sync_is_stable() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_catalog(catalogs.path(), "fr", FR);
    let config = SyncConfig::new(locales(&["fr"]), output.path());
    let source = DirectorySource::new(catalogs.path());

    sync(&config, &source).unwrap();
    let first = fs::read(output.path().join("fr.json")).unwrap();
    let report = sync(&config, &source).unwrap();
    let second = fs::read(output.path().join("fr.json")).unwrap();

    assert_eq!(first, second);
    assert!(!report.has_changes());
}

#[test]
fn test_sync_missing_catalog_aborts_run() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_catalog(catalogs.path(), "fr", FR);

    let config = SyncConfig::new(locales(&["fr", "de"]), output.path());
    let result = sync(&config, &DirectorySource::new(catalogs.path()));

    match result {
        Err(Error::MissingCatalog { locale, .. }) => assert_eq!(locale, "de"),
        other => panic!("expected a missing catalog, got {other:?}"),
    }
    assert!(!output.path().join("fr.json").exists());
}

#[test]
fn test_sync_nested_layout() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_catalog(catalogs.path(), "fr", "msgid \"Yes\"\nmsgstr \"Oui\"\n");
    write_catalog(catalogs.path(), "de", "msgid \"Yes\"\nmsgstr \"Yes\"\n");

    let mut config = SyncConfig::new(locales(&["fr", "de"]), output.path());
    config.layout = Layout::NestedUnderLocale;
    sync(&config, &DirectorySource::new(catalogs.path())).unwrap();

    assert_eq!(
        fs::read_to_string(output.path().join("fr.json")).unwrap(),
        "{\n  \"fr\": {\n    \"Yes\": \"Oui\"\n  }\n}\n"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("de.json")).unwrap(),
        "{}\n"
    );
}

#[test]
fn test_sync_transform_none_copies_catalog() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_catalog(catalogs.path(), "fr", FR);

    let mut config = SyncConfig::new(locales(&["fr"]), output.path());
    config.transform = Transform::None;
    sync(&config, &DirectorySource::new(catalogs.path())).unwrap();

    assert_eq!(
        fs::read_to_string(output.path().join("fr.json")).unwrap(),
        format!("{HEADER}{FR}")
    );
}

#[test]
fn test_sync_catalog_without_header() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(catalogs.path().join("fr.po"), FR).unwrap();

    let config = SyncConfig::new(locales(&["fr"]), output.path());
    sync(&config, &DirectorySource::new(catalogs.path())).unwrap();

    assert_eq!(
        fs::read_to_string(output.path().join("fr.json")).unwrap(),
        "{\n  \
           \"Save\": {\n    \
             \"$$noContext\": \"Enregistrer\",\n    \
             \"menu\": \"Sauver\"\n  \
           }\n\
         }\n"
    );
}

#[test]
fn test_sync_transifex_export() {
    let catalogs = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let export = "# Translators:\n\
                  # Anna Schmidt <anna@example.com>, 2024\n\
                  # \n\
                  #, fuzzy\n\
                  msgid \"\"\n\
                  msgstr \"\"\n\
                  \"Project-Id-Version: web-app\\n\"\n\
                  \"Report-Msgid-Bugs-To: \\n\"\n\
                  \"POT-Creation-Date: 2024-03-01 12:00+0000\\n\"\n\
                  \"PO-Revision-Date: 2024-03-02 08:00+0000\\n\"\n\
                  \"Last-Translator: Anna Schmidt <anna@example.com>, 2024\\n\"\n\
                  \"Language-Team: German (https://app.transifex.com/acme/teams/1/de/)\\n\"\n\
                  \"MIME-Version: 1.0\\n\"\n\
                  \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
                  \"Content-Transfer-Encoding: 8bit\\n\"\n\
                  \"Language: de\\n\"\n\
                  \"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"\n\
                  \n\
                  #: src/app.js:3\n\
                  msgid \"Delete\"\n\
                  msgstr \"Löschen\"\n\
                  \n\
                  #: src/app.js:7\n\
                  msgid \"file\"\n\
                  msgid_plural \"files\"\n\
                  msgstr[0] \"Datei\"\n\
                  msgstr[1] \"Dateien\"\n";
    fs::write(catalogs.path().join("de.po"), export).unwrap();

    let config = SyncConfig::new(locales(&["de"]), output.path());
    sync(&config, &DirectorySource::new(catalogs.path())).unwrap();

    assert_eq!(
        fs::read_to_string(output.path().join("de.json")).unwrap(),
        "{\n  \"Delete\": \"Löschen\",\n  \"file\": \"Datei\"\n}\n"
    );
}
