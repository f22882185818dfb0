use retroadvance_common::Memory;

use super::super::dma::DmaTiming;
use super::super::interrupt::Interrupt;
use super::super::registers::{timer_control, TIMER_BASE};
use super::AdvanceBus;

impl<M: Memory> AdvanceBus<M> {
    /// TMxCNT_L sets the reload value; TMxCNT_H is queued and applied at the
    /// end of the current scheduler pass.
    pub(super) fn write_timer_register(&mut self, offset: u32, value: u16) {
        let index = ((offset - TIMER_BASE) / 4) as usize;
        let timer = &mut self.timers.timers[index];
        if offset & 2 == 0 {
            timer.reload = value;
        } else {
            timer.queue_control(value);
            self.event_now = true;
        }
    }

    /// Apply queued control writes. Returns `true` if any timer changed.
    pub(crate) fn apply_timer_writes(&mut self) -> bool {
        if !self.timers.has_pending() {
            return false;
        }
        for index in 0..4 {
            if self.timers.timers[index].apply_pending(index) {
                let control = self.timers.timers[index].control;
                self.set_reg(timer_control(index), control);
                log::trace!(
                    "RetroAdvance: timer {index} control={control:04X} reload={:04X}",
                    self.timers.timers[index].reload
                );
            }
        }
        true
    }

    /// Overflow side effects, lowest timer first: tell the sound sink,
    /// request the timer interrupt and refill any FIFO the sink reports as
    /// running low.
    pub(super) fn timer_overflows(&mut self, overflowed: u8) {
        for index in 0..4 {
            if overflowed & (1 << index) == 0 {
                continue;
            }
            let refill = self.sound.timer_overflow(index);
            if self.timers.timers[index].irq_enabled() {
                self.raise(Interrupt::timer(index));
            }
            if refill != 0 {
                self.check_dma(DmaTiming::Special, refill & 0x06);
            }
        }
    }
}
