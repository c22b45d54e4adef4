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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The head player. Gets automatic control over everything.
pub const GOD: Dbref = Dbref::mk_id(1);
/// Used throughout to refer to a missing object value.
pub const NOTHING: Dbref = Dbref::mk_id(-1);
/// Used in matching to indicate that the match was ambiguous on multiple objects in the
/// environment.
pub const AMBIGUOUS: Dbref = Dbref::mk_id(-2);
/// Virtual room, stands in for the mover's home.
pub const HOME: Dbref = Dbref::mk_id(-3);
/// Do-nothing link, for actions.
pub const NIL: Dbref = Dbref::mk_id(-4);

/// A reference to an object in a TinyMUCK database, or one of the reserved sentinels above.
///
/// The `#` is not stored; it is added on output and tolerated (once) on input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Dbref(i64);

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DbrefParseError {
    #[error("empty dbref")]
    Empty,
    #[error("invalid dbref {0:?}: {1}")]
    InvalidNumber(String, std::num::ParseIntError),
}

impl Dbref {
    pub const fn mk_id(id: i64) -> Self {
        Self(id)
    }

    /// Decode the textual handle form: at most one leading `#`, then a signed base-10 integer.
    pub fn decode(s: &str) -> Result<Self, DbrefParseError> {
        if s.is_empty() {
            return Err(DbrefParseError::Empty);
        }
        let digits = s.strip_prefix('#').unwrap_or(s);
        let id = digits
            .parse::<i64>()
            .map_err(|e| DbrefParseError::InvalidNumber(s.to_string(), e))?;
        Ok(Self(id))
    }

    /// Canonical textual form, always `#`-prefixed.
    #[must_use]
    pub fn to_literal(&self) -> String {
        format!("#{}", self.0)
    }

    /// True for references that could name a real object (as opposed to a sentinel).
    pub fn is_positive(&self) -> bool {
        self.0 >= 0
    }
}

impl Display for Dbref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("#{}", self.0))
    }
}

impl FromStr for Dbref {
    type Err = DbrefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
