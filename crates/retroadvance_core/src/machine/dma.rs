use bincode::{Decode, Encode};

/// Start timing field of DMAxCNT_H (bits 12-13).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DmaTiming {
    Immediate,
    VBlank,
    HBlank,
    /// Sound FIFO refill on channels 1-2, video capture on channel 3.
    Special,
}

impl DmaTiming {
    fn from_bits(bits: u16) -> Self {
        match bits & 3 {
            0 => DmaTiming::Immediate,
            1 => DmaTiming::VBlank,
            2 => DmaTiming::HBlank,
            _ => DmaTiming::Special,
        }
    }
}

/// Address control for source (bits 7-8) and destination (bits 5-6).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum AddressStep {
    Increment,
    Decrement,
    Fixed,
    /// Increment, and reload the destination from DAD after each transfer.
    /// Behaves as `Increment` for the source.
    IncrementReload,
}

impl AddressStep {
    fn from_bits(bits: u16) -> Self {
        match bits & 3 {
            0 => AddressStep::Increment,
            1 => AddressStep::Decrement,
            2 => AddressStep::Fixed,
            _ => AddressStep::IncrementReload,
        }
    }

    /// Cursor delta in bytes for a 32-bit unit. Halfword transfers halve it.
    #[inline]
    pub(crate) fn delta(self) -> i32 {
        match self {
            AddressStep::Increment | AddressStep::IncrementReload => 4,
            AddressStep::Decrement => -4,
            AddressStep::Fixed => 0,
        }
    }
}

/// Decoded view of DMAxCNT_H.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct DmaControl(pub(crate) u16);

impl DmaControl {
    pub(crate) const ENABLE: u16 = 0x8000;

    #[inline]
    pub(crate) fn enabled(self) -> bool {
        self.0 & Self::ENABLE != 0
    }

    #[inline]
    pub(crate) fn timing(self) -> DmaTiming {
        DmaTiming::from_bits(self.0 >> 12)
    }

    #[inline]
    pub(crate) fn dest_step(self) -> AddressStep {
        AddressStep::from_bits(self.0 >> 5)
    }

    #[inline]
    pub(crate) fn source_step(self) -> AddressStep {
        AddressStep::from_bits(self.0 >> 7)
    }

    #[inline]
    pub(crate) fn repeat(self) -> bool {
        self.0 & 0x0200 != 0
    }

    #[inline]
    pub(crate) fn word(self) -> bool {
        self.0 & 0x0400 != 0
    }

    #[inline]
    pub(crate) fn irq_on_end(self) -> bool {
        self.0 & 0x4000 != 0
    }
}

/// Per-channel write masks: SAD high, DAD high, CNT_L, CNT_H.
pub(crate) const SAD_HIGH_MASK: [u16; 4] = [0x07FF, 0x0FFF, 0x0FFF, 0x0FFF];
pub(crate) const DAD_HIGH_MASK: [u16; 4] = [0x07FF, 0x07FF, 0x07FF, 0x0FFF];
pub(crate) const COUNT_MASK: [u16; 4] = [0x3FFF, 0x3FFF, 0x3FFF, 0xFFFF];
pub(crate) const CONTROL_MASK: [u16; 4] = [0xF7E0, 0xF7E0, 0xF7E0, 0xFFE0];

/// Units moved by one sound FIFO refill.
pub(crate) const FIFO_UNITS: u32 = 4;

/// Live state of one channel. Address and control registers live in the
/// register file; this holds what the register file cannot show.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Encode, Decode)]
pub(crate) struct DmaChannel {
    /// Source cursor, carried across repeated triggers.
    pub(crate) source: u32,
    /// Destination cursor, carried across repeated triggers.
    pub(crate) dest: u32,
    /// DMAxCNT_L as written. Reads of the register return 0.
    pub(crate) count: u16,
}

/// Transfer length in units, with 0 standing for the channel maximum.
#[inline]
pub(crate) fn effective_count(channel: usize, count: u16) -> u32 {
    match (count, channel) {
        (0, 3) => 0x10000,
        (0, _) => 0x4000,
        (n, _) => n as u32,
    }
}
