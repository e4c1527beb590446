// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    value: u64,
}

impl Address {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    /// `None` when the sum leaves the 64-bit address space.
    pub fn checked_add(&self, offset: u64) -> Option<Self> {
        self.value.checked_add(offset).map(Self::new)
    }

    pub fn saturating_add(&self, offset: u64) -> Self {
        Self { value: self.value.saturating_add(offset) }
    }

    pub fn align_up(&self, alignment: u64) -> Option<Self> {
        let mask = alignment - 1;
        self.value.checked_add(mask).map(|v| Self { value: v & !mask })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl Sub<Address> for Address {
    type Output = u64;
    fn sub(self, rhs: Address) -> Self::Output {
        self.value - rhs.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(Address::new(0x1001).align_up(0x1000), Some(Address::new(0x2000)));
        assert_eq!(Address::new(0x2000).align_up(0x1000), Some(Address::new(0x2000)));
    }

    #[test]
    fn test_arithmetic_near_top_of_address_space() {
        let top = Address::new(0xFFFF_FFFF_FFFF_F000);
        assert_eq!(top.align_up(0x10000), None);
        assert_eq!(top.checked_add(0x1000), None);
        assert_eq!(top.checked_add(0xFFF), Some(Address::new(u64::MAX)));
        assert_eq!(top.saturating_add(0x2000), Address::new(u64::MAX));
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(Address::new(0x401000).to_string(), "0x0000000000401000");
    }
}
