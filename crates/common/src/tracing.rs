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

//! Shared tracing initialization for foxen binaries

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn build_filter(debug_fallback: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if debug_fallback { "debug" } else { "info" };
        EnvFilter::new(level)
    })
}

/// Initialize tracing with environment-based configuration and fallback support
///
/// - Uses `RUST_LOG` environment variable when available
/// - Falls back to DEBUG when `debug_fallback` is set, INFO otherwise
///
/// Per-field decode traces from the importer only show up at TRACE, e.g.
/// `RUST_LOG=foxen_textdump=trace`.
pub fn init_tracing(debug_fallback: bool) -> Result<(), eyre::Report> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_span_events(fmt::format::FmtSpan::NONE),
        )
        .with(build_filter(debug_fallback))
        .try_init()
        .map_err(|e| eyre::eyre!("could not initialize tracing: {e}"))
}
