use retroadvance_common::Memory;

use super::super::interrupt::Interrupt;
use super::super::registers::{IE, IF, IME};
use super::super::PowerState;
use super::AdvanceBus;

impl<M: Memory> AdvanceBus<M> {
    pub(super) fn write_ie(&mut self, value: u16) {
        self.set_reg(IE, value & 0x3FFF);
        self.request_irq_check();
    }

    /// Writing 1 acknowledges a request; 0 bits leave it alone.
    pub(super) fn write_if(&mut self, value: u16) {
        let flags = self.reg(IF);
        self.set_reg(IF, flags ^ (value & flags));
    }

    pub(super) fn write_ime(&mut self, value: u16) {
        self.set_reg(IME, value & 0x0001);
        self.request_irq_check();
    }

    /// An IE or IME write that makes an interrupt deliverable must not wait
    /// for the next natural event to arm the latch.
    fn request_irq_check(&mut self) {
        if self.reg(IME) & 1 != 0 && self.reg(IE) & self.reg(IF) != 0 && self.cpu_irq_enabled {
            self.event_now = true;
        }
    }

    /// HALTCNT write. Bit 7 selects STOP over HALT.
    pub(super) fn enter_low_power(&mut self, value: u8) {
        self.power = if value & 0x80 != 0 {
            PowerState::Stopped
        } else {
            PowerState::Halted
        };
        log::debug!("RetroAdvance: CPU entering {:?} at pc={:08X}", self.power, self.cpu_pc);
    }

    /// Requests the CPU may take right now, ignoring the latch: IF & IE
    /// when IME and the CPU both allow IRQs, narrowed to the wake-up
    /// sources while stopped.
    pub(crate) fn deliverable(&self) -> Interrupt {
        let flags = self.reg(IF);
        if flags == 0 || self.reg(IME) & 1 == 0 || !self.cpu_irq_enabled {
            return Interrupt::empty();
        }
        let mut pending = Interrupt::from_bits_truncate(flags & self.reg(IE));
        if self.power == PowerState::Stopped {
            pending &= Interrupt::STOP_WAKE;
        }
        pending
    }
}
