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

//! Refresh the JSON translation files of a project.
//!
//! The PO file of each locale is read from the catalog directory
//! (`<catalogs>/<locale>.po`) and written as `<output>/<locale>.json`.
//! When running as a CI step, every option can also be given as an
//! `INPUT_*` environment variable.
//!
//! Nothing is written unless all locales convert successfully.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gettext_json_sync::sync::{parse_locales, sync, DirectorySource, SyncConfig, Transform};
use gettext_json_sync::Layout;
use log::info;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory containing the `<locale>.po` files.
    #[arg(long, env = "INPUT_CATALOGS", value_name = "DIR")]
    catalogs: PathBuf,
    /// Directory to which the `<locale>.json` files are written.
    #[arg(short, long, env = "INPUT_OUTPUT", value_name = "DIR")]
    output: PathBuf,
    /// Comma separated list of locales, such as `fr,de,pt_BR`.
    #[arg(short, long, env = "INPUT_LOCALES")]
    locales: String,
    /// How to turn a catalog into the output file.
    #[arg(long, env = "INPUT_TRANSFORM", value_enum, default_value_t = Transform::default())]
    transform: Transform,
    /// Wrap each document in an object keyed by the locale.
    #[arg(long, env = "INPUT_NEST_UNDER_LOCALE")]
    nest_under_locale: bool,
}

impl Args {
    fn config(&self) -> SyncConfig {
        let mut config = SyncConfig::new(parse_locales(&self.locales), &self.output);
        config.transform = self.transform;
        if self.nest_under_locale {
            config.layout = Layout::NestedUnderLocale;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let args = Args::parse();
    let config = args.config();
    let source = DirectorySource::new(&args.catalogs);

    let report = sync(&config, &source)
        .with_context(|| format!("Could not update translations in {:?}", config.output_dir))?;

    if !report.has_changes() {
        info!("No changes");
        return Ok(());
    }
    for outcome in report.changed() {
        info!("{:?} {}", outcome.status, outcome.path.display());
    }

    Ok(())
}
