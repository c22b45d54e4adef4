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

use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The low bits of the flags word select the object type.
pub const TYPE_MASK: i32 = 0x7;

/// Internal-only bits which are never written to a dump.
pub const DUMP_MASK: u32 = (1 << ObjFlag::Interactive as u32)
    | (1 << ObjFlag::ObjectChanged as u32)
    | (1 << ObjFlag::Listener as u32)
    | (1 << ObjFlag::ReadMode as u32)
    | (1 << ObjFlag::SaneBit as u32);

/// Type tags, as stored in `flags & TYPE_MASK`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Primitive, Display, Serialize, Deserialize,
)]
pub enum ObjType {
    Room = 0,
    Thing = 1,
    Exit = 2,
    Player = 3,
    Program = 4,
    Garbage = 6,
}

impl ObjType {
    /// Resolve the tag embedded in a raw flags word. Tags 5 and 7 are unassigned.
    pub fn from_flags(flags: i32) -> Option<Self> {
        Self::from_i32(flags & TYPE_MASK)
    }

    /// The single-letter code TinyMUCK uses when unparsing flags. Things have none.
    pub fn type_code(&self) -> Option<char> {
        match self {
            ObjType::Room => Some('R'),
            ObjType::Thing => None,
            ObjType::Exit => Some('E'),
            ObjType::Player => Some('P'),
            ObjType::Program => Some('F'),
            ObjType::Garbage => Some('G'),
        }
    }
}

/// Feature & permission bits carried above the type tag. The discriminant is the bit position.
///
/// Several bits are overloaded by type (e.g. `Abode` doubles as AUTOSTART on programs, `ChownOk`
/// as COLOR on players); only the primary name is given here.
#[derive(
    Debug, Ord, PartialOrd, Copy, Clone, Eq, PartialEq, Hash, Primitive, Display, EnumIter,
)]
pub enum ObjFlag {
    Expansion0 = 3,
    Wizard = 4,
    LinkOk = 5,
    Dark = 6,
    Internal = 7,
    Sticky = 8,
    Builder = 9,
    ChownOk = 10,
    JumpOk = 11,
    Expansion1 = 12,
    Expansion2 = 13,
    KillOk = 14,
    Guest = 15,
    Haven = 16,
    Abode = 17,
    Mucker = 18,
    Quell = 19,
    Smucker = 20,
    Interactive = 21,
    ObjectChanged = 22,
    Expansion3 = 23,
    Vehicle = 24,
    Zombie = 25,
    Listener = 26,
    XForcible = 27,
    ReadMode = 28,
    SaneBit = 29,
    Yield = 30,
    Overt = 31,
}
