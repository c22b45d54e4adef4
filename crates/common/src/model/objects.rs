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

use crate::dbref::Dbref;
use crate::model::flags::{ObjFlag, ObjType, TYPE_MASK};
use crate::model::props::{PropDecodeError, PropLine, decode_prop_line};
use crate::util::BitEnum;

/// Fields every record carries, in the order they appear in the dump.
///
/// `contents` and `next` are the two slots of an intrusive singly linked list. `contents` is
/// the head of the chain of objects located *in* this one; `next` threads this object onto
/// whichever chain its container holds it in. An exit's `next` threads it onto its source's
/// exits chain instead (rooted at the variant's `exits` field), so an object is never on both a
/// contents chain and an exits chain.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommonFields {
    pub id: Dbref,
    pub name: String,
    pub location: Dbref,
    pub contents: Dbref,
    pub next: Dbref,
    pub flags: i32,
    pub created: i32,
    pub last_used: i32,
    pub use_count: i32,
    pub modified: i32,
    /// Raw, unparsed property lines from the `*Props*` block, in file order.
    pub props: Vec<String>,
    /// Reserved for recycling support; always false for decoded records.
    pub garbage: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ObjectVariant {
    Room {
        dropto: Dbref,
        exits: Dbref,
        owner: Dbref,
    },
    Thing {
        home: Dbref,
        exits: Dbref,
        owner: Dbref,
    },
    Exit {
        destinations: Vec<Dbref>,
        owner: Dbref,
    },
    Player {
        home: Dbref,
        exits: Dbref,
        /// Opaque password hash, exactly as it was stored.
        password: String,
    },
    /// The program body lives outside the dump.
    Program { owner: Dbref },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DbObject {
    pub common: CommonFields,
    pub variant: ObjectVariant,
}

impl DbObject {
    pub fn id(&self) -> Dbref {
        self.common.id
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }

    pub fn obj_type(&self) -> ObjType {
        match self.variant {
            ObjectVariant::Room { .. } => ObjType::Room,
            ObjectVariant::Thing { .. } => ObjType::Thing,
            ObjectVariant::Exit { .. } => ObjType::Exit,
            ObjectVariant::Player { .. } => ObjType::Player,
            ObjectVariant::Program { .. } => ObjType::Program,
        }
    }

    /// Players own themselves; everyone else records an owner.
    pub fn owner(&self) -> Dbref {
        match &self.variant {
            ObjectVariant::Room { owner, .. }
            | ObjectVariant::Thing { owner, .. }
            | ObjectVariant::Exit { owner, .. }
            | ObjectVariant::Program { owner } => *owner,
            ObjectVariant::Player { .. } => self.common.id,
        }
    }

    /// The feature/permission bits, with the type tag masked off.
    pub fn obj_flags(&self) -> BitEnum<ObjFlag> {
        BitEnum::from_u32((self.common.flags & !TYPE_MASK) as u32)
    }

    /// Head of the chain of objects located in this one. Only containers have one.
    pub fn contents_head(&self) -> Option<Dbref> {
        match self.variant {
            ObjectVariant::Room { .. }
            | ObjectVariant::Thing { .. }
            | ObjectVariant::Player { .. } => Some(self.common.contents),
            ObjectVariant::Exit { .. } | ObjectVariant::Program { .. } => None,
        }
    }

    /// Head of the chain of exits attached to this object.
    pub fn exits_head(&self) -> Option<Dbref> {
        match self.variant {
            ObjectVariant::Room { exits, .. }
            | ObjectVariant::Thing { exits, .. }
            | ObjectVariant::Player { exits, .. } => Some(exits),
            ObjectVariant::Exit { .. } | ObjectVariant::Program { .. } => None,
        }
    }

    pub fn next(&self) -> Dbref {
        self.common.next
    }

    /// Room dropto, or the home of a thing or player.
    pub fn link(&self) -> Option<Dbref> {
        match self.variant {
            ObjectVariant::Room { dropto, .. } => Some(dropto),
            ObjectVariant::Thing { home, .. } | ObjectVariant::Player { home, .. } => Some(home),
            ObjectVariant::Exit { .. } | ObjectVariant::Program { .. } => None,
        }
    }

    pub fn destinations(&self) -> &[Dbref] {
        match &self.variant {
            ObjectVariant::Exit { destinations, .. } => destinations,
            _ => &[],
        }
    }

    /// Decode the raw property lines, in order, leaving the stored lines untouched.
    pub fn decoded_props(&self) -> impl Iterator<Item = Result<PropLine, PropDecodeError>> + '_ {
        self.common.props.iter().map(|line| decode_prop_line(line))
    }
}
