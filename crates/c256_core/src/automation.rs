//! Debug and automation hooks: breakpoints, stepping and memory access.
//!
//! The CPU calls [`Automation::step`] before each instruction while debugging
//! is on. Memory access goes through the same [`Bus`] entry points the CPU
//! uses, so a poke into a Vicky register decodes exactly like a CPU store.

mod hex;

use std::path::Path;

use crate::address::Address;
use crate::bus::Bus;
use crate::error::Result;

/// A breakpoint and the name of the handler to run when it is hit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Breakpoint {
    pub address: Address,
    pub callback: String,
}

#[derive(Debug, Default)]
pub struct Automation {
    breakpoints: Vec<Breakpoint>,
    /// Steps left before halting; `None` runs freely.
    stop_steps: Option<u32>,
    /// Set by `cont` so execution can leave the breakpoint it stopped on.
    resuming: bool,
    last_hit: Option<Breakpoint>,
    trace_log: bool,
}

impl Automation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called before the instruction at `pc` executes. Returns true when the
    /// CPU should halt.
    pub fn step(&mut self, pc: Address) -> bool {
        if self.trace_log {
            log::trace!("step {pc}");
        }

        match self.stop_steps {
            Some(0) => return true,
            Some(steps) => self.stop_steps = Some(steps - 1),
            None => {}
        }

        if std::mem::take(&mut self.resuming) {
            return false;
        }

        if let Some(bp) = self.breakpoints.iter().find(|bp| bp.address == pc) {
            log::info!("breakpoint at {pc} ({})", bp.callback);
            self.last_hit = Some(bp.clone());
            self.stop_steps = Some(0);
            return true;
        }
        false
    }

    /// Add a breakpoint, replacing any existing one at `address`.
    pub fn add_breakpoint(&mut self, address: Address, callback: impl Into<String>) {
        let callback = callback.into();
        match self.breakpoints.iter_mut().find(|bp| bp.address == address) {
            Some(bp) => bp.callback = callback,
            None => self.breakpoints.push(Breakpoint { address, callback }),
        }
    }

    pub fn clear_breakpoint(&mut self, address: Address) {
        self.breakpoints.retain(|bp| bp.address != address);
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// The breakpoint that caused the most recent halt.
    pub fn last_hit(&self) -> Option<&Breakpoint> {
        self.last_hit.as_ref()
    }

    /// Halt before the next instruction.
    pub fn stop(&mut self) {
        self.stop_steps = Some(0);
    }

    /// Resume, optionally halting again after `steps` instructions.
    pub fn cont(&mut self, steps: Option<u32>) {
        self.stop_steps = steps;
        self.resuming = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_steps == Some(0)
    }

    pub fn set_trace_log(&mut self, enabled: bool) {
        self.trace_log = enabled;
    }

    pub fn peek<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address) -> u8 {
        bus.read_byte(addr)
    }

    pub fn poke<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address, value: u8) {
        if self.trace_log {
            log::trace!("poke {addr} = 0x{value:02X}");
        }
        bus.store_byte(addr, value);
    }

    pub fn peek16<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address) -> u16 {
        bus.read_word(addr)
    }

    pub fn poke16<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address, value: u16) {
        if self.trace_log {
            log::trace!("poke16 {addr} = 0x{value:04X}");
        }
        bus.store_word(addr, value);
    }

    /// `len` bytes starting at `addr`, crossing banks linearly.
    pub fn peek_buf<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address, len: usize) -> Vec<u8> {
        (0..len as u32)
            .map(|i| bus.read_byte(Address::from_linear(addr.as_int() + i)))
            .collect()
    }

    /// Copy a raw image to `addr`. Returns the number of bytes written.
    pub fn load_bin<B: Bus + ?Sized>(&self, bus: &mut B, addr: Address, bytes: &[u8]) -> usize {
        for (i, &b) in bytes.iter().enumerate() {
            bus.store_byte(Address::from_linear(addr.as_int() + i as u32), b);
        }
        log::debug!("loaded {} bytes at {addr}", bytes.len());
        bytes.len()
    }

    /// Store every data record of an Intel HEX image.
    pub fn load_hex<B: Bus + ?Sized>(&self, bus: &mut B, text: &str) -> Result<usize> {
        let stored = hex::parse(text, |linear, b| {
            bus.store_byte(Address::from_linear(linear), b)
        })?;
        log::debug!("loaded {stored} bytes from hex image");
        Ok(stored)
    }

    pub fn load_bin_file<B: Bus + ?Sized>(
        &self,
        bus: &mut B,
        addr: Address,
        path: impl AsRef<Path>,
    ) -> Result<usize> {
        let bytes = std::fs::read(path)?;
        Ok(self.load_bin(bus, addr, &bytes))
    }

    pub fn load_hex_file<B: Bus + ?Sized>(&self, bus: &mut B, path: impl AsRef<Path>) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        self.load_hex(bus, &text)
    }
}
