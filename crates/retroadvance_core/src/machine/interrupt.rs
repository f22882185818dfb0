use bincode::{Decode, Encode};
use bitflags::bitflags;

/// Cycles between an interrupt becoming deliverable and the CPU taking it.
pub(crate) const IRQ_LATENCY: i32 = 7;

bitflags! {
    /// Interrupt sources, laid out as in IE and IF.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct Interrupt: u16 {
        const VBLANK = 1 << 0;
        const HBLANK = 1 << 1;
        const VCOUNT = 1 << 2;
        const TIMER0 = 1 << 3;
        const TIMER1 = 1 << 4;
        const TIMER2 = 1 << 5;
        const TIMER3 = 1 << 6;
        const SERIAL = 1 << 7;
        const DMA0 = 1 << 8;
        const DMA1 = 1 << 9;
        const DMA2 = 1 << 10;
        const DMA3 = 1 << 11;
        const KEYPAD = 1 << 12;
        const GAMEPAK = 1 << 13;
    }
}

impl Interrupt {
    /// Sources that can end the STOP state.
    pub const STOP_WAKE: Interrupt = Interrupt::KEYPAD
        .union(Interrupt::SERIAL)
        .union(Interrupt::GAMEPAK);

    #[inline]
    pub fn timer(index: usize) -> Interrupt {
        Interrupt::from_bits_truncate(Interrupt::TIMER0.bits() << index)
    }

    #[inline]
    pub fn dma(channel: usize) -> Interrupt {
        Interrupt::from_bits_truncate(Interrupt::DMA0.bits() << channel)
    }
}

/// Pipeline latch between "deliverable" and "delivered".
///
/// Once armed, the latch counts [`IRQ_LATENCY`] cycles down to zero. The
/// next interrupt check after it reaches zero vectors the CPU. An
/// interrupt check that finds nothing deliverable disarms it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Encode, Decode)]
pub(crate) struct IrqLatch {
    pub(crate) armed: bool,
    pub(crate) ticks: i32,
}

impl IrqLatch {
    pub(crate) fn arm(&mut self) {
        self.armed = true;
        self.ticks = IRQ_LATENCY;
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
        self.ticks = 0;
    }

    #[inline]
    pub(crate) fn advance(&mut self, clock: i32) {
        if self.ticks > 0 {
            self.ticks = (self.ticks - clock).max(0);
        }
    }

    /// Cycles until the countdown expires, if one is running.
    #[inline]
    pub(crate) fn horizon(&self) -> Option<i32> {
        (self.ticks > 0).then_some(self.ticks)
    }

    #[inline]
    pub(crate) fn expired(&self) -> bool {
        self.armed && self.ticks == 0
    }
}
