mod read;
mod write;

use retroadvance_common::Memory;

use super::AdvanceBus;

impl<M: Memory> AdvanceBus<M> {
    pub(crate) fn read_io16(&self, offset: u32) -> u16 {
        self.read_io16_impl(offset & !1)
    }

    pub(crate) fn read_io8(&self, offset: u32) -> u8 {
        let half = self.read_io16(offset & !1);
        (half >> ((offset & 1) * 8)) as u8
    }

    pub(crate) fn read_io32(&self, offset: u32) -> u32 {
        let offset = offset & !3;
        let low = self.read_io16(offset) as u32;
        let high = self.read_io16(offset + 2) as u32;
        low | (high << 16)
    }

    /// Register dispatch: every write into the I/O window, from the CPU or
    /// from DMA, lands here.
    pub(crate) fn write_io16(&mut self, offset: u32, value: u16) {
        self.write_io16_impl(offset & !1, value)
    }

    pub(crate) fn write_io8(&mut self, offset: u32, value: u8) {
        self.write_io8_impl(offset, value)
    }

    /// Two halfword dispatches, low half first.
    pub(crate) fn write_io32(&mut self, offset: u32, value: u32) {
        let offset = offset & !3;
        self.write_io16_impl(offset, value as u16);
        self.write_io16_impl(offset + 2, (value >> 16) as u16);
    }
}
