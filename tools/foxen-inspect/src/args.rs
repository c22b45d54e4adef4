// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use clap::ValueHint;
use clap_derive::Parser;
use eyre::eyre;
use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use foxen_common::Dbref;
use foxen_textdump::{EncodingMode, ImportOptions, UnknownVariantPolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(
        value_name = "dump",
        help = "Path to the Foxen9 dump to import",
        value_hint = ValueHint::FilePath
    )]
    pub path: PathBuf,

    #[arg(
        long,
        value_name = "config",
        help = "Path to configuration (YAML) file to use, if any. If not specified, defaults are used.\
                Configuration file values can be overridden by command line arguments.",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "encoding",
        help = "Encoding the dump was written in. utf8 or iso8859-1. \
          Older servers write 8-bit strings which should be read as iso8859-1."
    )]
    pub encoding: Option<EncodingMode>,

    #[arg(
        long,
        help = "Skip records with an unknown or garbage type tag instead of aborting the import"
    )]
    pub lenient: bool,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(
        long,
        value_name = "dbref",
        help = "Print the full decoded record for this object (e.g. #1) instead of a summary"
    )]
    pub show: Option<Dbref>,

    #[arg(long, help = "Also print the @tune parameter table")]
    pub configs: bool,
}

impl Args {
    fn merge_config(&self, options: &mut ImportOptions) {
        if let Some(encoding) = self.encoding {
            options.encoding = encoding;
        }
        if self.lenient {
            options.unknown_variants = UnknownVariantPolicy::Lenient;
        }
    }

    /// Load the configuration file if we have it, then let the command line override it.
    pub fn load_options(&self) -> Result<ImportOptions, eyre::Report> {
        let mut options = match &self.config_file {
            Some(config_path) => Figment::new()
                .merge(Serialized::defaults(ImportOptions::default()))
                .merge(Yaml::file(config_path))
                .extract::<ImportOptions>()
                .map_err(|e| {
                    eyre!(
                        "Failed to parse configuration from {:?}: {}",
                        config_path,
                        e
                    )
                })?,
            None => ImportOptions::default(),
        };
        self.merge_config(&mut options);
        Ok(options)
    }
}
