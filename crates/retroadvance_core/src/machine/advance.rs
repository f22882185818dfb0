use retroadvance_common::{Cpu, Key, LineRenderer, Memory, SoundSink};

use super::bus::AdvanceBus;
use super::config::MachineConfig;
use super::interrupt::Interrupt;
use super::registers::{DISPSTAT, IF, VCOUNT};
use super::scheduler::RunExit;
use super::video::VideoMode;
use super::PowerState;
use crate::CYCLES_PER_FRAME;

/// The machine: an interpreter plugged into the bus and its peripherals.
///
/// `run` is the only entry point that moves time forward. Between calls the
/// host may inspect the framebuffer, feed keys or take a savestate.
pub struct Advance<C, M> {
    pub cpu: C,
    pub(crate) bus: AdvanceBus<M>,
}

impl<C: Cpu, M: Memory> Advance<C, M> {
    pub fn new(cpu: C, memory: M) -> Self {
        Self::with_config(cpu, memory, MachineConfig::default())
    }

    pub fn with_config(cpu: C, memory: M, config: MachineConfig) -> Self {
        Self {
            cpu,
            bus: AdvanceBus::new(memory, config),
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn LineRenderer>) {
        self.bus.set_renderer(renderer);
    }

    pub fn set_sound(&mut self, sound: Box<dyn SoundSink>) {
        self.bus.set_sound(sound);
    }

    /// Reset the peripherals. The interpreter is left to the caller.
    pub fn reset(&mut self) {
        self.bus.reset();
    }

    /// Run one frame's worth of cycles. The call does not stop on a frame
    /// boundary; it simply spends [`CYCLES_PER_FRAME`] cycles.
    pub fn run_frame(&mut self) -> RunExit {
        self.run(CYCLES_PER_FRAME)
    }

    /// Update keypad state. KEYINPUT picks it up at the next vblank.
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        self.bus.set_key(key.mask(), pressed);
    }

    pub fn framebuffer(&self) -> &[u16] {
        &self.bus.framebuffer
    }

    pub fn frame_count(&self) -> u64 {
        self.bus.frame_count
    }

    pub fn memory(&self) -> &M {
        &self.bus.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.bus.memory
    }

    /// Read an I/O register (offset from 0x0400_0000) the way the CPU would.
    pub fn read_register(&self, offset: u32) -> u16 {
        self.bus.read_io16(offset)
    }

    /// Write an I/O register through the normal dispatch, side effects
    /// included.
    pub fn write_register(&mut self, offset: u32, value: u16) {
        self.bus.write_io16(offset, value);
    }

    /// Current scanline (VCOUNT).
    pub fn scanline(&self) -> u16 {
        self.bus.reg(VCOUNT)
    }

    pub fn video_mode(&self) -> VideoMode {
        VideoMode::from_dispstat(self.bus.reg(DISPSTAT))
    }

    /// Requested interrupts (IF).
    pub fn pending_interrupts(&self) -> Interrupt {
        Interrupt::from_bits_truncate(self.bus.reg(IF))
    }

    pub fn power_state(&self) -> PowerState {
        self.bus.power
    }
}
