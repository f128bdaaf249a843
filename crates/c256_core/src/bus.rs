use crate::address::{Address, MemoryRegion};
use crate::vicky::{StorageCell, Vicky};

/// Base of system RAM on the C256.
pub const SYSTEM_RAM_START: u32 = 0x00_0000;
/// Size of system RAM (2 MiB, banks `$00`-`$1F`).
pub const SYSTEM_RAM_SIZE: usize = 0x20_0000;

/// Abstraction over the system bus as seen by the CPU and the debug layer.
///
/// Words are little-endian and built from two byte operations; the high
/// byte lives at `offset + 1` in the same bank.
pub trait Bus {
    fn read_byte(&mut self, addr: Address) -> u8;
    fn store_byte(&mut self, addr: Address, value: u8);

    fn read_word(&mut self, addr: Address) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr + 1);
        u16::from_le_bytes([lo, hi])
    }

    fn store_word(&mut self, addr: Address, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.store_byte(addr, lo);
        self.store_byte(addr + 1, hi);
    }
}

/// A peripheral that claims part of the 24-bit address space.
pub trait BusDevice {
    /// Returns the device-local address when `addr` belongs to this device.
    fn decode_address(&self, addr: Address) -> Option<Address>;
    fn read_byte(&self, addr: Address) -> u8;
    fn store_byte(&mut self, addr: Address, value: u8);
    /// Buffers the bus may access directly, bypassing register decode.
    fn memory_regions(&self) -> Vec<MemoryRegion>;
}

/// Flat, zero-initialised RAM mapped at a base address.
pub struct Ram {
    region: MemoryRegion,
    memory: Vec<u8>,
}

impl Ram {
    pub fn new(name: &'static str, start: u32, size: usize) -> Self {
        debug_assert!(size > 0);
        Self {
            region: MemoryRegion::new(name, start, start + size as u32 - 1),
            memory: vec![0; size],
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }
}

impl BusDevice for Ram {
    fn decode_address(&self, addr: Address) -> Option<Address> {
        self.region.contains(addr).then_some(addr)
    }

    fn read_byte(&self, addr: Address) -> u8 {
        self.region
            .offset_of(addr)
            .map_or(0, |offset| self.memory[offset])
    }

    fn store_byte(&mut self, addr: Address, value: u8) {
        if let Some(offset) = self.region.offset_of(addr) {
            self.memory[offset] = value;
        }
    }

    fn memory_regions(&self) -> Vec<MemoryRegion> {
        vec![self.region]
    }
}

impl Bus for Ram {
    fn read_byte(&mut self, addr: Address) -> u8 {
        BusDevice::read_byte(self, addr)
    }

    fn store_byte(&mut self, addr: Address, value: u8) {
        BusDevice::store_byte(self, addr, value)
    }
}

/// The C256 system bus: system RAM plus the Vicky video chip.
///
/// Everything runs on one thread; the CPU, the debug layer and the renderer
/// all reach device state through this single owner.
pub struct C256Bus {
    pub ram: Ram,
    pub vicky: Vicky,
}

impl Default for C256Bus {
    fn default() -> Self {
        Self::new(Vicky::default())
    }
}

impl C256Bus {
    pub fn new(vicky: Vicky) -> Self {
        Self {
            ram: Ram::new("system ram", SYSTEM_RAM_START, SYSTEM_RAM_SIZE),
            vicky,
        }
    }

    /// Store a byte and report which colour cell the video chip wrote, if any.
    pub fn store_byte_traced(&mut self, addr: Address, value: u8) -> Option<StorageCell> {
        if let Some(local) = self.vicky.decode_address(addr) {
            return self.vicky.store_byte_traced(local, value);
        }
        if let Some(local) = self.ram.decode_address(addr) {
            BusDevice::store_byte(&mut self.ram, local, value);
        } else {
            log::trace!("write to unmapped address {addr} dropped (value 0x{value:02X})");
        }
        None
    }

    /// All directly-mapped regions, RAM first.
    pub fn memory_regions(&self) -> Vec<MemoryRegion> {
        let mut regions = self.ram.memory_regions();
        regions.extend(self.vicky.memory_regions());
        regions
    }
}

impl Bus for C256Bus {
    fn read_byte(&mut self, addr: Address) -> u8 {
        if let Some(local) = self.vicky.decode_address(addr) {
            return BusDevice::read_byte(&self.vicky, local);
        }
        if let Some(local) = self.ram.decode_address(addr) {
            return BusDevice::read_byte(&self.ram, local);
        }
        log::trace!("read from unmapped address {addr}");
        0
    }

    fn store_byte(&mut self, addr: Address, value: u8) {
        self.store_byte_traced(addr, value);
    }
}
