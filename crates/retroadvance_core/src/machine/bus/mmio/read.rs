use retroadvance_common::Memory;

use super::super::super::registers::TIMER_BASE;
use super::super::AdvanceBus;

impl<M: Memory> AdvanceBus<M> {
    pub(super) fn read_io16_impl(&self, offset: u32) -> u16 {
        match offset {
            // TMxCNT_L reads the live counter, not the reload value.
            0x100 | 0x104 | 0x108 | 0x10C => {
                let index = ((offset - TIMER_BASE) / 4) as usize;
                self.timers.timers[index].counter(index)
            }

            // DMAxCNT_L and HALTCNT are write-only and were never stored;
            // everything else reads back the register file.
            _ => self.reg(offset),
        }
    }
}
