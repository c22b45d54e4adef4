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

//! Representation of a Foxen9 TinyMUCK database as read from its textual dump.

use foxen_common::model::{DbObject, ObjType};
use foxen_common::{Dbref, NOTHING};
pub use load_textdump::{read_textdump, textdump_load};
pub use read::{TextdumpReader, TextdumpReaderError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

mod lines;
mod load_textdump;
mod read;

/// First line of every dump this crate understands.
pub const FOXEN9_SIGNATURE: &str = "***Foxen9 TinyMUCK DUMP Format***";
/// Terminates the object section.
pub const END_OF_DUMP: &str = "***END OF DUMP***";
pub const PROPS_MARKER: &str = "*Props*";
pub const PROPS_END: &str = "*End*";

/// What mode to use for strings that contain non-ASCII characters.
///
/// Classic TinyMUCK servers write 8-bit text, which should be read as ISO-8859-1.
/// The default is UTF-8.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingMode {
    // ISO-8859-1: one byte per code point
    ISO8859_1,
    #[default]
    UTF8,
}

impl TryFrom<&str> for EncodingMode {
    type Error = &'static str;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "ISO-8859-1" | "iso-8859-1" | "iso8859-1" => Ok(EncodingMode::ISO8859_1),
            "UTF8" | "UTF-8" | "utf8" | "utf-8" => Ok(EncodingMode::UTF8),
            _ => Err("Invalid encoding mode"),
        }
    }
}

impl FromStr for EncodingMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodingMode::try_from(s)
    }
}

/// How to treat a record whose type tag isn't one of the five object variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownVariantPolicy {
    /// Abort the import with `TextdumpReaderError::UnknownVariant`.
    #[default]
    Strict,
    /// Leave the record out of the object map and log a warning.
    Lenient,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub encoding: EncodingMode,
    pub unknown_variants: UnknownVariantPolicy,
}

/// The result of one import pass.
pub struct Textdump {
    pub version_string: String,
    /// The next dbref the server would allocate. Informational only.
    pub top_id: Dbref,
    /// Obsolete DB_PARMSINFO line, kept verbatim.
    pub parms_info: String,
    /// @tune parameters, last write wins.
    pub configs: BTreeMap<String, String>,
    pub objects: BTreeMap<Dbref, DbObject>,
}

impl Textdump {
    /// Walk the contents chain held by `container`.
    pub fn contents_of(&self, container: Dbref) -> ChainIter<'_> {
        let head = self
            .objects
            .get(&container)
            .and_then(DbObject::contents_head)
            .unwrap_or(NOTHING);
        ChainIter::new(&self.objects, head)
    }

    /// Walk the exits chain attached to `source`.
    pub fn exits_of(&self, source: Dbref) -> ChainIter<'_> {
        let head = self
            .objects
            .get(&source)
            .and_then(DbObject::exits_head)
            .unwrap_or(NOTHING);
        ChainIter::new(&self.objects, head)
    }

    pub fn count_of(&self, obj_type: ObjType) -> usize {
        self.objects
            .values()
            .filter(|o| o.obj_type() == obj_type)
            .count()
    }
}

/// Follows `next` pointers from a chain head through the object map.
///
/// Stops at a sentinel, at a reference missing from the map, or once it has produced as many
/// objects as the map holds, so a corrupt (cyclic) chain still terminates.
pub struct ChainIter<'a> {
    objects: &'a BTreeMap<Dbref, DbObject>,
    cursor: Dbref,
    remaining: usize,
}

impl<'a> ChainIter<'a> {
    fn new(objects: &'a BTreeMap<Dbref, DbObject>, head: Dbref) -> Self {
        Self {
            objects,
            cursor: head,
            remaining: objects.len(),
        }
    }
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a DbObject;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.cursor.is_positive() {
            return None;
        }
        let o = self.objects.get(&self.cursor)?;
        self.remaining -= 1;
        self.cursor = o.next();
        Some(o)
    }
}
