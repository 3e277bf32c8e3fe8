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

//! Convert a single PO file to JSON.
//!
//! This program reads a PO file and writes the JSON document for the
//! given locale, either to the output path or to standard output.
//! Untranslated messages and messages translated to themselves are
//! left out.

use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context};
use gettext_json_sync::normalize;

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let args = std::env::args().collect::<Vec<_>>();
    let (input, locale, output) = match args.as_slice() {
        [_, input, locale] => (input, locale, None),
        [_, input, locale, output] => (input, locale, Some(output)),
        [prog_name, ..] => bail!("Usage: {prog_name} <input.po> <locale> [output.json]"),
        [] => unreachable!(),
    };

    let text = fs::read_to_string(input).with_context(|| format!("Could not read {input:?}"))?;
    let json = normalize(&text, locale).with_context(|| format!("Could not convert {input:?}"))?;
    match output {
        Some(output) => {
            fs::write(output, json).with_context(|| format!("Could not write {output:?}"))?
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("Could not write to stdout")?,
    }

    Ok(())
}
