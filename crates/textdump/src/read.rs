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

use std::io::{BufReader, Read};
use std::str::FromStr;

use foxen_common::Dbref;
use foxen_common::model::{CommonFields, DbObject, ObjType, ObjectVariant};
use tracing::{debug, trace, warn};

use crate::lines::LineReader;
use crate::{ImportOptions, PROPS_END, PROPS_MARKER, UnknownVariantPolicy};

pub struct TextdumpReader<R: Read> {
    lines: LineReader<R>,
    pub options: ImportOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum TextdumpReaderError {
    #[error("could not open file: {0}")]
    CouldNotOpenFile(String),
    #[error("io error: {0} @ line {1}")]
    IoError(std::io::Error, usize),
    #[error("structural error: {0} @ line {1}")]
    StructuralError(String, usize),
    #[error("format error: {0} @ line {1}")]
    FormatError(String, usize),
    #[error("unknown type tag {type_tag} for object {objid} @ line {line}")]
    UnknownVariant {
        objid: Dbref,
        type_tag: i32,
        line: usize,
    },
}

impl TextdumpReaderError {
    /// The line the error was detected on, if it came from decoding.
    pub fn line(&self) -> Option<usize> {
        match self {
            TextdumpReaderError::CouldNotOpenFile(_) => None,
            TextdumpReaderError::IoError(_, line)
            | TextdumpReaderError::StructuralError(_, line)
            | TextdumpReaderError::FormatError(_, line)
            | TextdumpReaderError::UnknownVariant { line, .. } => Some(*line),
        }
    }
}

impl<R: Read> TextdumpReader<R> {
    pub fn new(reader: BufReader<R>, options: ImportOptions) -> Self {
        Self {
            lines: LineReader::new(reader, options.encoding),
            options,
        }
    }

    pub fn line_num(&self) -> usize {
        self.lines.line_num()
    }

    pub(crate) fn read_string(&mut self) -> Result<String, TextdumpReaderError> {
        self.lines.next_line()
    }

    fn read_parsed<T: FromStr>(&mut self, what: &str) -> Result<T, TextdumpReaderError> {
        let buf = self.read_string()?;
        let Ok(v) = buf.parse() else {
            return Err(TextdumpReaderError::FormatError(
                format!("invalid {what}: {buf:?}"),
                self.line_num(),
            ));
        };
        Ok(v)
    }

    pub(crate) fn read_num(&mut self, what: &str) -> Result<i32, TextdumpReaderError> {
        self.read_parsed(what)
    }

    /// Counts are unsigned; a negative count is a format error, not an empty list.
    pub(crate) fn read_count(&mut self, what: &str) -> Result<u64, TextdumpReaderError> {
        self.read_parsed(what)
    }

    pub(crate) fn read_objid(&mut self, what: &str) -> Result<Dbref, TextdumpReaderError> {
        let buf = self.read_string()?;
        self.parse_objid(&buf, what)
    }

    pub(crate) fn parse_objid(&self, buf: &str, what: &str) -> Result<Dbref, TextdumpReaderError> {
        Dbref::decode(buf).map_err(|e| {
            TextdumpReaderError::FormatError(format!("invalid {what}: {e}"), self.line_num())
        })
    }

    /// The optional `*Props*` ... `*End*` block.
    ///
    /// If the next line isn't the marker it is left in place: it's the first variant field.
    fn read_props(&mut self) -> Result<Vec<String>, TextdumpReaderError> {
        if self.lines.peek_line()? != PROPS_MARKER {
            return Ok(vec![]);
        }
        self.read_string()?;
        let mut props = vec![];
        loop {
            let line = self.read_string()?;
            if line == PROPS_END {
                break;
            }
            trace!(prop = %line, "property");
            props.push(line);
        }
        Ok(props)
    }

    fn read_variant(
        &mut self,
        objid: Dbref,
        flags: i32,
    ) -> Result<Option<ObjectVariant>, TextdumpReaderError> {
        let variant = match ObjType::from_flags(flags) {
            Some(ObjType::Room) => ObjectVariant::Room {
                dropto: self.read_objid("dropto")?,
                exits: self.read_objid("exits")?,
                owner: self.read_objid("owner")?,
            },
            Some(ObjType::Thing) => ObjectVariant::Thing {
                home: self.read_objid("home")?,
                exits: self.read_objid("exits")?,
                owner: self.read_objid("owner")?,
            },
            Some(ObjType::Exit) => {
                let ndest = self.read_count("destination count")?;
                let mut destinations = vec![];
                for _ in 0..ndest {
                    destinations.push(self.read_objid("destination")?);
                }
                ObjectVariant::Exit {
                    destinations,
                    owner: self.read_objid("owner")?,
                }
            }
            Some(ObjType::Player) => ObjectVariant::Player {
                home: self.read_objid("home")?,
                exits: self.read_objid("exits")?,
                password: self.read_string()?,
            },
            Some(ObjType::Program) => ObjectVariant::Program {
                owner: self.read_objid("owner")?,
            },
            tag @ (Some(ObjType::Garbage) | None) => {
                let type_tag = flags & foxen_common::model::TYPE_MASK;
                match self.options.unknown_variants {
                    UnknownVariantPolicy::Strict => {
                        return Err(TextdumpReaderError::UnknownVariant {
                            objid,
                            type_tag,
                            line: self.line_num(),
                        });
                    }
                    UnknownVariantPolicy::Lenient if tag.is_some() => {
                        debug!(objid = %objid, "skipping garbage object");
                    }
                    UnknownVariantPolicy::Lenient => {
                        warn!(objid = %objid, type_tag, "skipping object with unknown type tag");
                    }
                }
                return Ok(None);
            }
        };
        trace!(objid = %objid, variant = ?variant, "variant fields");
        Ok(Some(variant))
    }

    /// Decode one record. The reference line has already been consumed by the caller.
    ///
    /// Returns `None` only for records skipped under [`UnknownVariantPolicy::Lenient`].
    pub fn read_object(&mut self, objid: Dbref) -> Result<Option<DbObject>, TextdumpReaderError> {
        let name = self.read_string()?;
        let location = self.read_objid("location")?;
        let contents = self.read_objid("contents")?;
        let next = self.read_objid("next")?;
        let flags = self.read_num("flags")?;
        let created = self.read_num("creation time")?;
        let last_used = self.read_num("last used time")?;
        let use_count = self.read_num("use count")?;
        let modified = self.read_num("modification time")?;
        trace!(
            objid = %objid, name, location = %location, contents = %contents, next = %next,
            flags, created, last_used, use_count, modified, "common fields"
        );

        let props = self.read_props()?;

        let Some(variant) = self.read_variant(objid, flags)? else {
            return Ok(None);
        };

        Ok(Some(DbObject {
            common: CommonFields {
                id: objid,
                name,
                location,
                contents,
                next,
                flags,
                created,
                last_used,
                use_count,
                modified,
                props,
                garbage: false,
            },
            variant,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foxen_common::{GOD, NOTHING};

    fn reader(input: &str, options: ImportOptions) -> TextdumpReader<&[u8]> {
        TextdumpReader::new(BufReader::new(input.as_bytes()), options)
    }

    const COMMON: &str = "Foyer\n#-1\n#-1\n#-1\n";

    #[test]
    fn room_without_props() {
        let input = format!("{COMMON}0\n100\n200\n3\n400\n#-1\n#-1\n#1\nrest\n");
        let mut tdr = reader(&input, ImportOptions::default());
        let room = tdr.read_object(Dbref::mk_id(0)).unwrap().unwrap();
        assert_eq!(room.name(), "Foyer");
        assert_eq!(room.common.created, 100);
        assert_eq!(room.common.use_count, 3);
        assert!(room.common.props.is_empty());
        assert_eq!(
            room.variant,
            ObjectVariant::Room {
                dropto: NOTHING,
                exits: NOTHING,
                owner: GOD
            }
        );
        // Exactly the record's lines were consumed.
        assert_eq!(tdr.read_string().unwrap(), "rest");
    }

    #[test]
    fn props_block_then_variant_fields() {
        let input =
            format!("{COMMON}1\n0\n0\n0\n0\n*Props*\n_/de:2:A box\n*End*\n#0\n#-1\n#1\n");
        let mut tdr = reader(&input, ImportOptions::default());
        let thing = tdr.read_object(Dbref::mk_id(4)).unwrap().unwrap();
        assert_eq!(thing.common.props, vec!["_/de:2:A box".to_string()]);
        assert_eq!(
            thing.variant,
            ObjectVariant::Thing {
                home: Dbref::mk_id(0),
                exits: NOTHING,
                owner: GOD
            }
        );
    }

    #[test]
    fn empty_props_block() {
        let input = format!("{COMMON}4\n0\n0\n0\n0\n*Props*\n*End*\n#1\n");
        let mut tdr = reader(&input, ImportOptions::default());
        let prog = tdr.read_object(Dbref::mk_id(9)).unwrap().unwrap();
        assert!(prog.common.props.is_empty());
        assert_eq!(prog.variant, ObjectVariant::Program { owner: GOD });
    }

    #[test]
    fn end_of_dump_inside_props_block() {
        let input = format!("{COMMON}1\n0\n0\n0\n0\n*Props*\n_/de:2:A box\n");
        let mut tdr = reader(&input, ImportOptions::default());
        assert!(matches!(
            tdr.read_object(Dbref::mk_id(4)),
            Err(TextdumpReaderError::StructuralError(_, 12))
        ));
    }

    #[test]
    fn player_password_is_opaque() {
        let input = format!("{COMMON}3\n0\n0\n0\n0\n#0\n#-1\n$1$salt:not#a:ref\n");
        let mut tdr = reader(&input, ImportOptions::default());
        let player = tdr.read_object(Dbref::mk_id(1)).unwrap().unwrap();
        let ObjectVariant::Player { password, .. } = &player.variant else {
            panic!("expected a player, got {:?}", player.variant);
        };
        assert_eq!(password, "$1$salt:not#a:ref");
    }

    #[test]
    fn negative_destination_count() {
        let input = format!("{COMMON}2\n0\n0\n0\n0\n-1\n#1\n");
        let mut tdr = reader(&input, ImportOptions::default());
        assert!(matches!(
            tdr.read_object(Dbref::mk_id(3)),
            Err(TextdumpReaderError::FormatError(_, 10))
        ));
    }

    #[test]
    fn unknown_tag_strict() {
        let input = format!("{COMMON}5\n0\n0\n0\n0\n#1\n");
        let mut tdr = reader(&input, ImportOptions::default());
        match tdr.read_object(Dbref::mk_id(3)) {
            Err(TextdumpReaderError::UnknownVariant { objid, type_tag, .. }) => {
                assert_eq!(objid, Dbref::mk_id(3));
                assert_eq!(type_tag, 5);
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    #[test]
    fn garbage_lenient_leaves_next_line() {
        let input = format!("{COMMON}6\n0\n0\n0\n0\n*Props*\n*End*\n#12\n");
        let options = ImportOptions {
            unknown_variants: UnknownVariantPolicy::Lenient,
            ..Default::default()
        };
        let mut tdr = reader(&input, options);
        assert!(tdr.read_object(Dbref::mk_id(3)).unwrap().is_none());
        assert_eq!(tdr.read_string().unwrap(), "#12");
    }
}
