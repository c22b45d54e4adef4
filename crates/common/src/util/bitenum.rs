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

use std::marker::PhantomData;
use std::ops::BitOrAssign;

use num_traits::ToPrimitive;

/// A barebones bitset keyed by an enum whose discriminants are bit positions.
/// Wide enough for the full 32-bit TinyMUCK flags word.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct BitEnum<T: ToPrimitive> {
    value: u32,
    phantom: PhantomData<T>,
}

impl<T: ToPrimitive> BitEnum<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: 0,
            phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn to_u32(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        Self {
            value,
            phantom: PhantomData,
        }
    }

    pub fn new_with(value: T) -> Self {
        let mut s = Self::new();
        s.set(value);
        s
    }

    fn bit(value: &T) -> u32 {
        // Discriminants past 31 can't be represented; they simply never match.
        value
            .to_u32()
            .and_then(|pos| 1u32.checked_shl(pos))
            .unwrap_or(0)
    }

    pub fn set(&mut self, value: T) {
        self.value |= Self::bit(&value);
    }

    pub fn clear(&mut self, value: T) {
        self.value &= !Self::bit(&value);
    }

    pub fn contains(&self, value: T) -> bool {
        let bit = Self::bit(&value);
        bit != 0 && self.value & bit != 0
    }
}

impl<T: ToPrimitive> Default for BitEnum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ToPrimitive> BitOrAssign<T> for BitEnum<T> {
    fn bitor_assign(&mut self, rhs: T) {
        self.set(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::BitEnum;
    use crate::model::ObjFlag;

    #[test]
    fn set_and_clear() {
        let mut flags = BitEnum::new_with(ObjFlag::Wizard);
        flags |= ObjFlag::Dark;
        assert!(flags.contains(ObjFlag::Wizard));
        assert!(flags.contains(ObjFlag::Dark));
        assert!(!flags.contains(ObjFlag::Builder));
        assert_eq!(flags.to_u32(), 0x10 | 0x40);

        flags.clear(ObjFlag::Wizard);
        assert_eq!(flags.to_u32(), 0x40);
    }

    #[test]
    fn high_bit_fits() {
        let flags: BitEnum<ObjFlag> = BitEnum::from_u32(0x8000_0000);
        assert!(flags.contains(ObjFlag::Overt));
        assert!(!flags.contains(ObjFlag::Yield));
    }
}
