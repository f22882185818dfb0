use retroadvance_common::{Bus, Memory, WaitStates};

use super::super::dma::{
    effective_count, AddressStep, DmaControl, DmaTiming, CONTROL_MASK, COUNT_MASK, DAD_HIGH_MASK,
    FIFO_UNITS, SAD_HIGH_MASK,
};
use super::super::interrupt::Interrupt;
use super::super::registers::{dma_cnt_h, dma_dad, dma_sad, DMA_BASE, DMA_STRIDE};
use super::AdvanceBus;

/// Fixed overhead of a transfer on top of the per-unit cost.
const DMA_SETUP_CYCLES: i32 = 6;

impl<M: Memory> AdvanceBus<M> {
    pub(super) fn write_dma_register(&mut self, offset: u32, value: u16) {
        let channel = ((offset - DMA_BASE) / DMA_STRIDE) as usize;
        match (offset - DMA_BASE) % DMA_STRIDE {
            // SAD_L, DAD_L
            0 | 4 => self.set_reg(offset, value),
            2 => self.set_reg(offset, value & SAD_HIGH_MASK[channel]),
            6 => self.set_reg(offset, value & DAD_HIGH_MASK[channel]),
            // CNT_L is kept aside and reads back as 0.
            8 => self.dma[channel].count = value & COUNT_MASK[channel],
            _ => self.write_dma_control(channel, value),
        }
    }

    fn write_dma_control(&mut self, channel: usize, value: u16) {
        let offset = dma_cnt_h(channel);
        let value = value & CONTROL_MASK[channel];
        let starting = (self.reg(offset) ^ value) & DmaControl::ENABLE != 0
            && value & DmaControl::ENABLE != 0;
        self.set_reg(offset, value);

        if starting {
            self.dma[channel].source = self.dma_register_address(dma_sad(channel));
            self.dma[channel].dest = self.dma_register_address(dma_dad(channel));
            self.check_dma(DmaTiming::Immediate, 1 << channel);
        }
    }

    fn dma_register_address(&self, offset: u32) -> u32 {
        self.reg(offset) as u32 | (self.reg(offset + 2) as u32) << 16
    }

    /// Run every enabled channel in `mask` whose start timing is `timing`.
    pub(crate) fn check_dma(&mut self, timing: DmaTiming, mask: u8) {
        for channel in 0..4 {
            if mask & (1 << channel) == 0 {
                continue;
            }
            let control = DmaControl(self.reg(dma_cnt_h(channel)));
            if !control.enabled() || control.timing() != timing {
                continue;
            }

            let source_step = control.source_step().delta();
            let fifo = timing == DmaTiming::Special && (channel == 1 || channel == 2);
            // Sound FIFO refills ignore count, width and destination control.
            let (units, dest_step, word) = if fifo {
                (FIFO_UNITS, 0, true)
            } else {
                (
                    effective_count(channel, self.dma[channel].count),
                    control.dest_step().delta(),
                    control.word(),
                )
            };

            if self.config.dma_log_mask & (1 << channel) != 0 {
                let bytes = units << if word { 2 } else { 1 };
                log::debug!(
                    "DMA{channel}: s={:08X} d={:08X} c={:04X} count={bytes:08X}",
                    self.dma[channel].source,
                    self.dma[channel].dest,
                    control.0
                );
            }

            self.dma_transfer(channel, source_step, dest_step, units, word);

            if control.irq_on_end() {
                self.raise(Interrupt::dma(channel));
                self.event_now = true;
            }
            if control.dest_step() == AddressStep::IncrementReload {
                self.dma[channel].dest = self.dma_register_address(dma_dad(channel));
            }
            if !control.repeat() || timing == DmaTiming::Immediate {
                // Re-read: the transfer itself may have rewritten the control register.
                let current = self.reg(dma_cnt_h(channel));
                self.set_reg(dma_cnt_h(channel), current & !DmaControl::ENABLE);
            }
        }
    }

    /// Move `units` units and charge the bus cost to the DMA stall counter.
    ///
    /// A source below EWRAM while the CPU runs outside the BIOS reads open
    /// bus: zeroes are written and the source cursor stays put.
    fn dma_transfer(
        &mut self,
        channel: usize,
        source_step: i32,
        dest_step: i32,
        units: u32,
        word: bool,
    ) {
        debug_assert!(units > 0);
        let mut source = self.dma[channel].source;
        let mut dest = self.dma[channel].dest;
        let source_region = WaitStates::region(source);
        let dest_region = WaitStates::region(dest);

        let (source_step, dest_step) = if word {
            source &= !3;
            dest &= !3;
            (source_step, dest_step)
        } else {
            source &= !1;
            dest &= !1;
            (source_step >> 1, dest_step >> 1)
        };
        let open_bus = source < 0x0200_0000 && self.cpu_pc >> 24 != 0;

        for _ in 0..units {
            if word {
                let value = if open_bus { 0 } else { self.read32(source) };
                self.write32(dest, value);
            } else {
                let value = if open_bus { 0 } else { self.read16(source) };
                self.write16(dest, value);
            }
            dest = dest.wrapping_add(dest_step as u32);
            if !open_bus {
                source = source.wrapping_add(source_step as u32);
            }
        }

        self.dma[channel].source = source;
        self.dma[channel].dest = dest;

        let ws = &self.wait_states;
        let (source_wait, dest_seq, source_seq) = if word {
            (ws.wait32[source_region], ws.seq32[dest_region], ws.seq32[source_region])
        } else {
            (ws.wait[source_region], ws.seq[dest_region], ws.seq[source_region])
        };
        let per_unit = (1 + source_seq as i32) + (1 + dest_seq as i32);
        let cost = per_unit * (units as i32 - 1)
            + DMA_SETUP_CYCLES
            + source_wait as i32
            + dest_seq as i32;
        self.dma_stall += cost;
        // The CPU is blocked until the stall has been spent.
        self.event_now = true;
    }
}
