use retroadvance_common::{Memory, WaitStates};

use super::super::dma::DmaChannel;
use super::super::interrupt::IrqLatch;
use super::super::registers::{
    BG2PA, BG2PD, BG3PA, BG3PD, DISPCNT, KEYINPUT, POSTFLG, SOUNDBIAS,
};
use super::super::timer::TimerBank;
use super::super::video::{LcdTiming, DISPCNT_FORCED_BLANK};
use super::super::PowerState;
use super::AdvanceBus;

impl<M: Memory> AdvanceBus<M> {
    /// Register values present at power-on. Everything not listed reads 0.
    pub(super) fn apply_power_on_io_state(&mut self) {
        self.io.fill(0);

        self.set_reg(DISPCNT, DISPCNT_FORCED_BLANK);
        // Identity affine matrices for BG2/BG3.
        self.set_reg(BG2PA, 0x0100);
        self.set_reg(BG2PD, 0x0100);
        self.set_reg(BG3PA, 0x0100);
        self.set_reg(BG3PD, 0x0100);
        // No key pressed.
        self.set_reg(KEYINPUT, 0x03FF);
        self.set_reg(SOUNDBIAS, 0x0200);
        self.set_reg(POSTFLG, self.config.post_boot as u16);

        self.lcd = LcdTiming::default();
        self.wait_states = WaitStates::default();
    }

    /// Return every peripheral to its power-on state. Memory contents, the
    /// renderer and the sound sink are kept.
    pub(crate) fn reset(&mut self) {
        self.irq = IrqLatch::default();
        self.power = PowerState::Running;
        self.timers = TimerBank::default();
        self.dma = [DmaChannel::default(); 4];
        self.dma_stall = 0;
        self.framebuffer.fill(0);
        self.keys_pressed = 0;
        self.frame_count = 0;
        self.event_now = false;
        self.apply_power_on_io_state();
        log::info!("RetroAdvance: peripherals reset (post_boot={})", self.config.post_boot);
    }
}
