//! 24-bit bus addresses and the memory regions devices expose over them.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

/// Mask for the 24 address lines of the 65816.
pub const ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// A bank + offset pair forming a 24-bit linear address.
///
/// Offset arithmetic wraps inside the bank; the bank never carries. This is
/// what the 65816 does for stack and direct-page accesses.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address {
    pub bank: u8,
    pub offset: u16,
}

impl Address {
    #[inline]
    pub const fn new(bank: u8, offset: u16) -> Self {
        Self { bank, offset }
    }

    /// Build from a linear value. Bits above the 24th are dropped.
    #[inline]
    pub const fn from_linear(linear: u32) -> Self {
        let linear = linear & ADDRESS_MASK;
        Self {
            bank: (linear >> 16) as u8,
            offset: linear as u16,
        }
    }

    /// Linear 24-bit value.
    #[inline]
    pub const fn as_int(&self) -> u32 {
        ((self.bank as u32) << 16) | self.offset as u32
    }

    /// Inclusive containment test. Callers must pass `lo <= hi`; an inverted
    /// pair never contains anything.
    #[inline]
    pub fn in_range(&self, lo: Address, hi: Address) -> bool {
        debug_assert!(lo <= hi, "inverted range {lo}..={hi}");
        lo <= *self && *self <= hi
    }

    /// Same bank, offset moved by `delta` with wrap-around at the bank edge.
    #[inline]
    pub const fn with_offset(&self, delta: i32) -> Self {
        Self {
            bank: self.bank,
            offset: (self.offset as i32).wrapping_add(delta) as u16,
        }
    }
}

impl Add<u16> for Address {
    type Output = Address;

    fn add(self, rhs: u16) -> Address {
        Address::new(self.bank, self.offset.wrapping_add(rhs))
    }
}

impl Sub<u16> for Address {
    type Output = Address;

    fn sub(self, rhs: u16) -> Address {
        Address::new(self.bank, self.offset.wrapping_sub(rhs))
    }
}

impl From<u32> for Address {
    fn from(linear: u32) -> Self {
        Address::from_linear(linear)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:02X}:{:04X}", self.bank, self.offset)
    }
}

/// A named, fixed-size span of bus addresses backed by a device buffer.
///
/// `end` is inclusive. Regions are declared once by a device and never
/// resized; the bus may read and write them without going through the
/// device's register decode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryRegion {
    pub name: &'static str,
    pub start: Address,
    pub end: Address,
}

impl MemoryRegion {
    pub const fn new(name: &'static str, start: u32, end: u32) -> Self {
        Self {
            name,
            start: Address::from_linear(start),
            end: Address::from_linear(end),
        }
    }

    #[inline]
    pub fn contains(&self, addr: Address) -> bool {
        addr.in_range(self.start, self.end)
    }

    /// Byte offset of `addr` inside the region, if it falls inside it.
    #[inline]
    pub fn offset_of(&self, addr: Address) -> Option<usize> {
        self.contains(addr)
            .then(|| (addr.as_int() - self.start.as_int()) as usize)
    }

    /// Number of bytes covered, always at least one.
    #[inline]
    pub fn size(&self) -> usize {
        (self.end.as_int() - self.start.as_int()) as usize + 1
    }
}
