/// Receiver for sound register writes and timer overflow ticks.
pub trait SoundSink {
    /// A write to one of the sound registers (0x060..=0x0A6), after it has
    /// been stored in the register file.
    fn register_write(&mut self, addr: u32, value: u16);

    /// Timer `index` overflowed. Returns a mask of DMA channels whose FIFO
    /// ran low and needs a refill; the core triggers those channels right
    /// away with the "special" start timing.
    fn timer_overflow(&mut self, index: usize) -> u8;
}

/// Sound sink that discards everything.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn register_write(&mut self, _addr: u32, _value: u16) {}

    fn timer_overflow(&mut self, _index: usize) -> u8 {
        0
    }
}
