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

use crate::read::TextdumpReaderError;
use crate::{END_OF_DUMP, FOXEN9_SIGNATURE, ImportOptions, Textdump, TextdumpReader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use tracing::{error, info, span, trace, warn};

/// Open the dump at `path` and import it. The file is closed on every exit path.
pub fn textdump_load(
    path: impl AsRef<Path>,
    options: ImportOptions,
) -> Result<Textdump, TextdumpReaderError> {
    let path = path.as_ref();
    let corefile = File::open(path).map_err(|e| {
        let e = TextdumpReaderError::CouldNotOpenFile(format!("{}: {e}", path.display()));
        error!("{e}");
        e
    })?;

    read_textdump(BufReader::new(corefile), options)
}

/// Import a whole dump. Either every record is decoded and a complete snapshot is returned, or
/// the first error aborts the import and nothing is returned.
pub fn read_textdump<T: io::Read>(
    reader: BufReader<T>,
    options: ImportOptions,
) -> Result<Textdump, TextdumpReaderError> {
    let textdump_import_span = span!(tracing::Level::INFO, "foxen9_import");
    let _enter = textdump_import_span.enter();

    let mut tdr = TextdumpReader::new(reader, options);
    import(&mut tdr).inspect_err(|e| error!("Import aborted: {e}"))
}

fn import<T: io::Read>(tdr: &mut TextdumpReader<T>) -> Result<Textdump, TextdumpReaderError> {
    let version_string = tdr.read_string()?;
    if version_string != FOXEN9_SIGNATURE {
        return Err(TextdumpReaderError::StructuralError(
            format!("invalid signature: {version_string:?}"),
            tdr.line_num(),
        ));
    }
    info!("version {}", version_string);

    let top_id = tdr.read_objid("top id")?;
    info!("top id: {}", top_id);

    // Obsolete DB_PARMSINFO; its meaning is long gone.
    let parms_info = tdr.read_string()?;

    let nconfigs = tdr.read_count("config count")?;
    info!("# configs: {}", nconfigs);
    let mut configs = BTreeMap::new();
    for _ in 0..nconfigs {
        let line = tdr.read_string()?;
        let Some((key, value)) = line.split_once('=') else {
            return Err(TextdumpReaderError::StructuralError(
                format!("config line without '=': {line:?}"),
                tdr.line_num(),
            ));
        };
        trace!(key, value, "config");
        configs.insert(key.to_string(), value.to_string());
    }

    info!("Parsing objects...");
    let mut objects = BTreeMap::new();
    loop {
        let line = tdr.read_string()?;
        if line == END_OF_DUMP {
            break;
        }
        let objid = tdr.parse_objid(&line, "object reference")?;
        let Some(o) = tdr.read_object(objid)? else {
            continue;
        };
        if objects.insert(objid, o).is_some() {
            warn!(objid = %objid, "duplicate object reference; later record wins");
        }
    }
    info!("# objs: {}", objects.len());
    info!("Import complete.");

    Ok(Textdump {
        version_string,
        top_id,
        parms_info,
        configs,
        objects,
    })
}
