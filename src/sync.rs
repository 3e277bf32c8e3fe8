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

//! Refresh the `<locale>.json` files of an output directory.
//!
//! Every locale is fetched and converted before the first file is
//! written. A single failing locale aborts the run and leaves the
//! output directory untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{info, warn};
use rayon::prelude::*;

use crate::catalog::parse_catalog;
use crate::document::Layout;
use crate::error::{Error, Result};
use crate::normalize::{normalize_catalog, NormalizeOptions};

/// What to do with a fetched catalog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transform {
    /// Convert the catalog to a JSON document.
    #[default]
    PoToJson,
    /// Write the catalog as fetched.
    None,
}

/// Where catalogs come from.
pub trait CatalogSource: Sync {
    /// Return the full text of the catalog for `locale`.
    fn fetch(&self, locale: &str) -> Result<String>;
}

/// Catalogs stored as `<dir>/<locale>.po`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{locale}.po"))
    }
}

impl CatalogSource for DirectorySource {
    fn fetch(&self, locale: &str) -> Result<String> {
        let path = self.path_for(locale);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::MissingCatalog {
                locale: String::from(locale),
                path,
            }),
            Err(err) => Err(Error::io(path, err)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub locales: Vec<String>,
    pub output_dir: PathBuf,
    pub transform: Transform,
    pub layout: Layout,
}

impl SyncConfig {
    pub fn new(locales: Vec<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            locales,
            output_dir: output_dir.into(),
            transform: Transform::default(),
            layout: Layout::default(),
        }
    }

    /// Path of the output file for `locale`.
    pub fn output_path(&self, locale: &str) -> PathBuf {
        self.output_dir.join(format!("{locale}.json"))
    }
}

/// Split a comma separated list of locales.
///
/// Surrounding whitespace and empty items are dropped, as are repeated
/// locales.
pub fn parse_locales(list: &str) -> Vec<String> {
    let mut locales: Vec<String> = Vec::new();
    for locale in list.split(',').map(str::trim) {
        if !locale.is_empty() && !locales.iter().any(|known| known == locale) {
            locales.push(String::from(locale));
        }
    }
    locales
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOutcome {
    pub locale: String,
    pub path: PathBuf,
    pub status: Status,
}

/// Result of a [`sync`] run, one outcome per locale in config order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<LocaleOutcome>,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }

    /// Outcomes whose file was created or rewritten.
    pub fn changed(&self) -> impl Iterator<Item = &LocaleOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status != Status::Unchanged)
    }
}

/// A locale ends up in a file name, so it may only use the characters
/// of tags such as `pt_BR`, `zh-Hant` or `sr@latin`.
fn check_locale(locale: &str) -> Result<()> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@' | '.');
    if locale.is_empty() || locale == "." || locale == ".." || !locale.chars().all(allowed) {
        return Err(Error::InvalidLocale(String::from(locale)));
    }
    Ok(())
}

/// `fr-CA`, `fr_CA` and `fr_ca` all name the same language.
fn same_language(header: &str, locale: &str) -> bool {
    let canonical = |s: &str| s.trim().replace('-', "_").to_lowercase();
    canonical(header) == canonical(locale)
}

/// Produce the file content for one locale.
pub fn convert(config: &SyncConfig, locale: &str, text: &str) -> Result<String> {
    match config.transform {
        Transform::None => Ok(String::from(text)),
        Transform::PoToJson => {
            let catalog = parse_catalog(text)?;
            if !catalog.language().is_empty() && !same_language(catalog.language(), locale) {
                warn!(
                    "Catalog for {locale} declares language {:?}",
                    catalog.language()
                );
            }
            let options = NormalizeOptions {
                layout: config.layout,
            };
            normalize_catalog(&catalog, locale, &options)
        }
    }
}

fn write_output(path: PathBuf, locale: &str, content: &str) -> Result<LocaleOutcome> {
    let status = match fs::read(&path) {
        Ok(previous) if previous == content.as_bytes() => Status::Unchanged,
        Ok(_) => Status::Updated,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Status::Created,
        Err(err) => return Err(Error::io(path, err)),
    };
    if status != Status::Unchanged {
        fs::write(&path, content).map_err(|err| Error::io(&path, err))?;
    }
    Ok(LocaleOutcome {
        locale: String::from(locale),
        path,
        status,
    })
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))
}

/// Fetch, convert and write the files of all configured locales.
pub fn sync(config: &SyncConfig, source: &dyn CatalogSource) -> Result<SyncReport> {
    if config.locales.is_empty() {
        return Err(Error::NoLocales);
    }
    for locale in &config.locales {
        check_locale(locale)?;
    }

    info!("Retrieve translations for {} locales", config.locales.len());
    let contents = config
        .locales
        .par_iter()
        .map(|locale| {
            info!("  > {locale}");
            let text = source.fetch(locale)?;
            convert(config, locale, &text)
        })
        .collect::<Result<Vec<_>>>()?;

    create_output_dir(&config.output_dir)?;
    let outcomes = config
        .locales
        .iter()
        .zip(contents)
        .map(|(locale, content)| write_output(config.output_path(locale), locale, &content))
        .collect::<Result<Vec<_>>>()?;

    Ok(SyncReport { outcomes })
}
