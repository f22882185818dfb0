use retroadvance_common::{LineRenderer, Memory, NullRenderer, NullSound, SoundSink, WaitStates};

use super::config::MachineConfig;
use super::dma::DmaChannel;
use super::interrupt::{Interrupt, IrqLatch};
use super::registers::{self, IO_SIZE};
use super::timer::TimerBank;
use super::video::LcdTiming;
use super::PowerState;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

mod dma;
mod init;
mod irq;
mod lcd;
mod mmio;
mod timer_io;
mod traits;

pub(crate) const IO_BASE: u32 = 0x0400_0000;
pub(crate) const IO_HALFWORDS: usize = (IO_SIZE / 2) as usize;

/// Everything the CPU reaches through the bus: the I/O register file, the
/// peripherals behind it and the memory backing store.
pub(crate) struct AdvanceBus<M> {
    pub(crate) memory: M,
    /// Register file, one entry per even I/O offset. This is the single
    /// home of every register value; peripherals only keep what a register
    /// read cannot show.
    pub(crate) io: [u16; IO_HALFWORDS],
    pub(crate) irq: IrqLatch,
    pub(crate) power: PowerState,
    pub(crate) timers: TimerBank,
    pub(crate) dma: [DmaChannel; 4],
    /// Bus cycles owed by finished DMA transfers. The scheduler drains this
    /// before the CPU runs again.
    pub(crate) dma_stall: i32,
    pub(crate) lcd: LcdTiming,
    pub(crate) wait_states: WaitStates,
    pub(crate) renderer: Box<dyn LineRenderer>,
    pub(crate) sound: Box<dyn SoundSink>,
    pub(crate) framebuffer: Vec<u16>,
    /// Pressed keys, one bit per [`Key`](retroadvance_common::Key).
    pub(crate) keys_pressed: u16,
    /// Completed frames (vblank entries) since reset.
    pub(crate) frame_count: u64,
    /// Set by register writes that want an update pass as soon as the
    /// current instruction retires.
    pub(crate) event_now: bool,
    /// PC of the instruction being executed, sampled by the scheduler.
    pub(crate) cpu_pc: u32,
    /// Whether the interpreter accepts IRQs, sampled by the scheduler.
    pub(crate) cpu_irq_enabled: bool,
    pub(crate) config: MachineConfig,
}

impl<M: Memory> AdvanceBus<M> {
    pub(crate) fn new(memory: M, config: MachineConfig) -> Self {
        let mut bus = Self {
            memory,
            io: [0; IO_HALFWORDS],
            irq: IrqLatch::default(),
            power: PowerState::Running,
            timers: TimerBank::default(),
            dma: [DmaChannel::default(); 4],
            dma_stall: 0,
            lcd: LcdTiming::default(),
            wait_states: WaitStates::default(),
            renderer: Box::new(NullRenderer),
            sound: Box::new(NullSound),
            framebuffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            keys_pressed: 0,
            frame_count: 0,
            event_now: false,
            cpu_pc: 0,
            cpu_irq_enabled: false,
            config,
        };
        bus.apply_power_on_io_state();
        bus
    }

    /// Raw register file value at an even I/O offset.
    #[inline]
    pub(crate) fn reg(&self, offset: u32) -> u16 {
        self.io[((offset & (IO_SIZE - 1)) >> 1) as usize]
    }

    #[inline]
    pub(crate) fn set_reg(&mut self, offset: u32, value: u16) {
        self.io[((offset & (IO_SIZE - 1)) >> 1) as usize] = value;
    }

    /// Set interrupt request bits in IF.
    #[inline]
    pub(crate) fn raise(&mut self, irq: Interrupt) {
        let flags = self.reg(registers::IF) | irq.bits();
        self.set_reg(registers::IF, flags);
    }

    /// Advance every peripheral by `clock` cycles, in the fixed order:
    /// interrupt latch, LCD edge (with the DMA it triggers), timers.
    pub(crate) fn advance(&mut self, clock: i32) {
        self.irq.advance(clock);
        self.lcd_advance(clock);
        if self.power != PowerState::Stopped {
            let overflowed = self.timers.advance(clock);
            if overflowed != 0 {
                self.timer_overflows(overflowed);
            }
        }
    }

    /// Cycles until the nearest peripheral event. Pending DMA stall counts
    /// as one.
    pub(crate) fn horizon(&self) -> i32 {
        let mut next = self.lcd.ticks;
        if self.dma_stall > 0 {
            next = next.min(self.dma_stall);
        }
        if self.power != PowerState::Stopped {
            if let Some(timer) = self.timers.horizon() {
                next = next.min(timer);
            }
        }
        if let Some(irq) = self.irq.horizon() {
            next = next.min(irq);
        }
        next
    }

    pub(crate) fn set_key(&mut self, mask: u16, pressed: bool) {
        if pressed {
            self.keys_pressed |= mask;
        } else {
            self.keys_pressed &= !mask;
        }
    }

    pub(crate) fn set_renderer(&mut self, renderer: Box<dyn LineRenderer>) {
        self.renderer = renderer;
    }

    pub(crate) fn set_sound(&mut self, sound: Box<dyn SoundSink>) {
        self.sound = sound;
    }
}
