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

pub use crate::model::flags::{DUMP_MASK, ObjFlag, ObjType, TYPE_MASK};
pub use crate::model::objects::{CommonFields, DbObject, ObjectVariant};
pub use crate::model::props::{
    PROP_BLESSED, PROP_DELIMITER, PROP_DIRTYP, PROP_DIRUNLOADED, PROP_FLTTYP, PROP_INTTYP,
    PROP_ISUNLOADED, PROP_LOKTYP, PROP_REFTYP, PROP_STRTYP, PROP_TOUCHED, PROP_TYPMASK,
    PropDecodeError, PropLine, PropValue, decode_prop_line,
};

mod flags;
mod objects;
mod props;
