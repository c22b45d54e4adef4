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

//! Shared vocabulary for Foxen9 TinyMUCK databases: object references, the decoded record model,
//! and the flag and property encodings layered on top of it.

pub use dbref::{AMBIGUOUS, Dbref, DbrefParseError, GOD, HOME, NIL, NOTHING};

mod dbref;
pub mod model;
pub mod tracing;
pub mod util;
