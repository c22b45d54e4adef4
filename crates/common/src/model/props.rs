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

//! Decoding of the packed `path:flags:value` property lines found inside a `*Props*` block.
//!
//! This sits on top of the record model: the importer keeps property lines verbatim, and callers
//! who want typed values run them through [`decode_prop_line`].

use crate::dbref::Dbref;
use thiserror::Error;

pub const PROP_DELIMITER: char = ':';

pub const PROP_DIRTYP: i32 = 0x0;
pub const PROP_STRTYP: i32 = 0x2;
pub const PROP_INTTYP: i32 = 0x3;
pub const PROP_LOKTYP: i32 = 0x4;
pub const PROP_REFTYP: i32 = 0x5;
pub const PROP_FLTTYP: i32 = 0x6;
pub const PROP_TYPMASK: i32 = 0x7;

// Internal bookkeeping bits; a well-behaved dump has these cleared.
pub const PROP_ISUNLOADED: i32 = 0x0200;
pub const PROP_TOUCHED: i32 = 0x0400;
pub const PROP_DIRUNLOADED: i32 = 0x0800;

pub const PROP_BLESSED: i32 = 0x1000;

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Propdir entries carry no value of their own.
    Dir,
    Str(String),
    Int(i32),
    /// A boolean lock expression, kept in its unparsed textual form.
    Lock(String),
    Ref(Dbref),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropLine {
    /// Full path of the property, e.g. `_/de` or `@/sys/flags`.
    pub path: String,
    pub flags: i32,
    pub value: PropValue,
}

impl PropLine {
    pub fn is_blessed(&self) -> bool {
        self.flags & PROP_BLESSED != 0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PropDecodeError {
    #[error("flag delimiter not found in property line {0:?}")]
    MissingFlags(String),
    #[error("value delimiter not found in property line {0:?}")]
    MissingValue(String),
    #[error("corrupt property flags {1:?} on {0:?}")]
    BadFlags(String, String),
    #[error("corrupt {kind} value {value:?} on {path:?}")]
    BadValue {
        path: String,
        kind: &'static str,
        value: String,
    },
    #[error("unknown property type {1} on {0:?}")]
    UnknownType(String, i32),
}

/// Decode one property line. The path and flags are split off at the first two delimiters; the
/// value is everything after, and may itself contain `:`.
pub fn decode_prop_line(line: &str) -> Result<PropLine, PropDecodeError> {
    let Some((path, rest)) = line.split_once(PROP_DELIMITER) else {
        return Err(PropDecodeError::MissingFlags(line.to_string()));
    };
    let Some((flags, value)) = rest.split_once(PROP_DELIMITER) else {
        return Err(PropDecodeError::MissingValue(line.to_string()));
    };
    let Ok(flags) = flags.parse::<i32>() else {
        return Err(PropDecodeError::BadFlags(
            path.to_string(),
            flags.to_string(),
        ));
    };

    let bad_value = |kind: &'static str| PropDecodeError::BadValue {
        path: path.to_string(),
        kind,
        value: value.to_string(),
    };
    let value = match flags & PROP_TYPMASK {
        PROP_DIRTYP => PropValue::Dir,
        PROP_STRTYP => PropValue::Str(value.to_string()),
        PROP_INTTYP => PropValue::Int(value.parse().map_err(|_| bad_value("integer"))?),
        PROP_LOKTYP => PropValue::Lock(value.to_string()),
        PROP_REFTYP => {
            PropValue::Ref(Dbref::mk_id(value.parse().map_err(|_| bad_value("dbref"))?))
        }
        PROP_FLTTYP => PropValue::Float(value.parse().map_err(|_| bad_value("float"))?),
        other => return Err(PropDecodeError::UnknownType(path.to_string(), other)),
    };

    Ok(PropLine {
        path: path.to_string(),
        flags,
        value,
    })
}
