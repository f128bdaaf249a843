use std::fmt::Write;

use crate::address::Address;
use crate::bus::Bus;

/// Stack pointer value after reset.
pub const STACK_POINTER_DEFAULT: u16 = 0x01FF;

/// The 65816 hardware stack: a 16-bit pointer that always lives in bank 0.
///
/// The pointer references the next free slot. Pushes write then decrement,
/// pulls increment then read. Wrap-around at `$0000`/`$FFFF` is left to the
/// hardware's behaviour and is not guarded against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stack {
    address: Address,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    pub const fn new() -> Self {
        Self::with_pointer(STACK_POINTER_DEFAULT)
    }

    pub const fn with_pointer(stack_pointer: u16) -> Self {
        Self {
            address: Address::new(0x00, stack_pointer),
        }
    }

    #[inline]
    pub fn stack_pointer(&self) -> u16 {
        self.address.offset
    }

    pub fn set_stack_pointer(&mut self, stack_pointer: u16) {
        self.address.offset = stack_pointer;
    }

    pub fn push8<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.store_byte(self.address, value);
        self.address = self.address - 1;
    }

    /// The high byte lands at the old pointer and the low byte below it, so
    /// the word reads back little-endian from `sp + 1`.
    pub fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        bus.store_word(self.address - 1, value);
        self.address = self.address - 2;
    }

    pub fn pull8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.address = self.address + 1;
        bus.read_byte(self.address)
    }

    pub fn pull16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        self.address = self.address + 1;
        let value = bus.read_word(self.address);
        self.address = self.address + 1;
        value
    }

    /// Hex dump of the `count` bytes above the stack pointer, top of stack
    /// first. Does not move the pointer.
    pub fn peek<B: Bus>(&self, bus: &mut B, count: usize) -> String {
        let mut dump = String::with_capacity(count * 5);
        let mut addr = self.address + 1;
        for _ in 0..count {
            let _ = write!(dump, "0x{:02x} ", bus.read_byte(addr));
            addr = addr + 1;
        }
        dump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    fn bank0() -> Ram {
        Ram::new("bank 0", 0x00_0000, 0x1_0000)
    }

    #[test]
    fn push_pull_8bit_restores_value_and_pointer() {
        let mut bus = bank0();
        let mut stack = Stack::new();
        stack.push8(&mut bus, 0xA5);
        assert_eq!(stack.stack_pointer(), STACK_POINTER_DEFAULT - 1);
        assert_eq!(bus.as_slice()[STACK_POINTER_DEFAULT as usize], 0xA5);
        assert_eq!(stack.pull8(&mut bus), 0xA5);
        assert_eq!(stack.stack_pointer(), STACK_POINTER_DEFAULT);
    }

    #[test]
    fn push_pull_16bit_restores_value_and_pointer() {
        let mut bus = bank0();
        let mut stack = Stack::with_pointer(0x1000);
        stack.push16(&mut bus, 0xBEEF);
        assert_eq!(stack.stack_pointer(), 0x0FFE);
        // High byte at the old pointer, low byte below it.
        assert_eq!(bus.as_slice()[0x1000], 0xBE);
        assert_eq!(bus.as_slice()[0x0FFF], 0xEF);
        assert_eq!(stack.pull16(&mut bus), 0xBEEF);
        assert_eq!(stack.stack_pointer(), 0x1000);
    }

    #[test]
    fn mixed_widths_pull_in_reverse_order() {
        let mut bus = bank0();
        let mut stack = Stack::new();
        stack.push8(&mut bus, 0x01);
        stack.push16(&mut bus, 0x0302);
        stack.push8(&mut bus, 0x04);
        assert_eq!(stack.pull8(&mut bus), 0x04);
        assert_eq!(stack.pull16(&mut bus), 0x0302);
        assert_eq!(stack.pull8(&mut bus), 0x01);
        assert_eq!(stack.stack_pointer(), STACK_POINTER_DEFAULT);
    }

    #[test]
    fn pointer_wraps_within_bank_zero() {
        let mut bus = bank0();
        let mut stack = Stack::with_pointer(0x0000);
        stack.push8(&mut bus, 0x77);
        assert_eq!(stack.stack_pointer(), 0xFFFF);
        assert_eq!(bus.as_slice()[0x0000], 0x77);
        assert_eq!(stack.pull8(&mut bus), 0x77);
        assert_eq!(stack.stack_pointer(), 0x0000);
    }

    #[test]
    fn peek_dumps_without_moving_the_pointer() {
        let mut bus = bank0();
        let mut stack = Stack::new();
        stack.push8(&mut bus, 0x12);
        stack.push8(&mut bus, 0xAB);
        let sp = stack.stack_pointer();
        assert_eq!(stack.peek(&mut bus, 2), "0xab 0x12 ");
        assert_eq!(stack.peek(&mut bus, 0), "");
        assert_eq!(stack.stack_pointer(), sp);
    }
}
