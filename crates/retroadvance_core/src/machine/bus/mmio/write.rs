use retroadvance_common::Memory;

use super::super::super::interrupt::Interrupt;
use super::super::super::registers::{
    self, DMA_BASE, DMA_STRIDE, HALTCNT, IF, POSTFLG, SIOCNT, SIODATA8, TIMER_BASE,
};
use super::super::{AdvanceBus, IO_BASE};

impl<M: Memory> AdvanceBus<M> {
    pub(super) fn write_io16_impl(&mut self, offset: u32, value: u16) {
        match offset {
            registers::DISPCNT => self.write_dispcnt(value),
            // Status bits 0-2 belong to the LCD.
            registers::DISPSTAT => {
                let status = self.reg(offset) & 0x0007;
                self.set_reg(offset, (value & 0xFF38) | status);
            }
            // VCOUNT is read-only.
            registers::VCOUNT => {}

            // BG0CNT/BG1CNT have no overflow bit.
            0x008 | 0x00A => self.set_reg(offset, value & 0xDFCF),
            0x00C | 0x00E => self.set_reg(offset, value & 0xFFCF),
            // Scroll offsets are 9 bits.
            0x010..=0x01E => self.set_reg(offset, value & 0x01FF),
            // Affine parameters and reference point low halves.
            0x020..=0x028 | 0x02C | 0x030..=0x038 | 0x03C => self.set_reg(offset, value),
            // Reference point high halves are 12 bits.
            0x02A | 0x02E | 0x03A | 0x03E => self.set_reg(offset, value & 0x0FFF),
            // Window bounds.
            0x040..=0x046 => self.set_reg(offset, value),
            0x048 | 0x04A => self.set_reg(offset, value & 0x3F3F),
            0x04C => self.set_reg(offset, value),
            0x050 => self.set_reg(offset, value & 0x3FFF),
            0x052 => self.set_reg(offset, value & 0x1F1F),
            0x054 => self.set_reg(offset, value & 0x001F),

            // Sound registers and FIFOs.
            0x060..=0x0A6 => {
                self.set_reg(offset, value);
                self.sound.register_write(IO_BASE + offset, value);
            }

            0x0B0..=0x0DE => self.write_dma_register(offset, value),
            0x100..=0x10E => self.write_timer_register(offset, value),

            SIOCNT => self.write_siocnt(value),
            SIODATA8 => self.set_reg(offset, value),
            // KEYINPUT is read-only.
            registers::KEYINPUT => {}
            registers::KEYCNT => self.set_reg(offset, value & 0xC3FF),

            registers::IE => self.write_ie(value),
            IF => self.write_if(value),
            registers::WAITCNT => {
                self.wait_states.apply_waitcnt(value);
                self.set_reg(offset, value & 0x7FFF);
            }
            registers::IME => self.write_ime(value),

            // POSTFLG in the low byte, HALTCNT in the high byte.
            POSTFLG => {
                self.set_reg(POSTFLG, value & 0x0001);
                self.enter_low_power((value >> 8) as u8);
            }

            _ => self.set_reg(offset, value),
        }
    }

    pub(super) fn write_io8_impl(&mut self, offset: u32, value: u8) {
        let shift = (offset & 1) * 8;
        match offset {
            // A byte write to IF acknowledges only that byte's bits.
            0x202 | 0x203 => self.write_io16_impl(IF, (value as u16) << shift),
            POSTFLG => self.set_reg(POSTFLG, value as u16 & 0x0001),
            HALTCNT => self.enter_low_power(value),
            _ => {
                let half = offset & !1;
                let current = self.merge_base(half);
                let merged = (current & !(0x00FF << shift)) | ((value as u16) << shift);
                self.write_io16_impl(half, merged);
            }
        }
    }

    /// Value a byte write is merged into. Registers whose written value is
    /// not what reads return merge with their shadow copy.
    fn merge_base(&self, offset: u32) -> u16 {
        match offset {
            0x100 | 0x104 | 0x108 | 0x10C => {
                self.timers.timers[((offset - TIMER_BASE) / 4) as usize].reload
            }
            0x0B8 | 0x0C4 | 0x0D0 | 0x0DC => {
                self.dma[((offset - DMA_BASE) / DMA_STRIDE) as usize].count
            }
            _ => self.reg(offset),
        }
    }

    /// Serial control. Without a link partner, a started transfer on the
    /// internal clock with its interrupt enabled completes at once and
    /// shifts in 0xFF.
    fn write_siocnt(&mut self, mut value: u16) {
        if value & 0x0080 != 0 {
            value &= 0xFF7F;
            if value & 0x0001 != 0 && value & 0x4000 != 0 {
                self.set_reg(SIODATA8, 0x00FF);
                self.raise(Interrupt::SERIAL);
                value &= 0x7F7F;
            }
        }
        self.set_reg(SIOCNT, value);
    }
}
