use retroadvance_common::{Bus, Memory, WaitStates};

use super::super::registers::IO_SIZE;
use super::{AdvanceBus, IO_BASE};

/// Offset into the I/O window, if `addr` falls inside it.
#[inline]
fn io_offset(addr: u32) -> Option<u32> {
    addr.checked_sub(IO_BASE).filter(|offset| *offset < IO_SIZE)
}

impl<M: Memory> Bus for AdvanceBus<M> {
    fn read8(&mut self, addr: u32) -> u8 {
        match io_offset(addr) {
            Some(offset) => self.read_io8(offset),
            None => self.memory.read8(addr),
        }
    }

    fn read16(&mut self, addr: u32) -> u16 {
        match io_offset(addr) {
            Some(offset) => self.read_io16(offset),
            None => self.memory.read16(addr),
        }
    }

    fn read32(&mut self, addr: u32) -> u32 {
        match io_offset(addr) {
            Some(offset) => self.read_io32(offset),
            None => self.memory.read32(addr),
        }
    }

    fn write8(&mut self, addr: u32, value: u8) {
        match io_offset(addr) {
            Some(offset) => self.write_io8(offset, value),
            None => self.memory.write8(addr, value),
        }
    }

    fn write16(&mut self, addr: u32, value: u16) {
        match io_offset(addr) {
            Some(offset) => self.write_io16(offset, value),
            None => self.memory.write16(addr, value),
        }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        match io_offset(addr) {
            Some(offset) => self.write_io32(offset, value),
            None => self.memory.write32(addr, value),
        }
    }

    fn wait_states(&self) -> &WaitStates {
        &self.wait_states
    }
}
