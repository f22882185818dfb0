//! Offsets of the I/O registers the core gives special treatment, relative
//! to the start of the I/O window.

pub(crate) const DISPCNT: u32 = 0x000;
pub(crate) const DISPSTAT: u32 = 0x004;
pub(crate) const VCOUNT: u32 = 0x006;
pub(crate) const BG2PA: u32 = 0x020;
pub(crate) const BG2PD: u32 = 0x026;
pub(crate) const BG3PA: u32 = 0x030;
pub(crate) const BG3PD: u32 = 0x036;
pub(crate) const SOUNDBIAS: u32 = 0x088;

/// First DMA register (DMA0SAD_L); each channel spans 12 bytes.
pub(crate) const DMA_BASE: u32 = 0x0B0;
pub(crate) const DMA_STRIDE: u32 = 12;

/// TM0CNT_L; each timer spans 4 bytes.
pub(crate) const TIMER_BASE: u32 = 0x100;

pub(crate) const SIOCNT: u32 = 0x128;
pub(crate) const SIODATA8: u32 = 0x12A;
pub(crate) const KEYINPUT: u32 = 0x130;
pub(crate) const KEYCNT: u32 = 0x132;

pub(crate) const IE: u32 = 0x200;
pub(crate) const IF: u32 = 0x202;
pub(crate) const WAITCNT: u32 = 0x204;
pub(crate) const IME: u32 = 0x208;
pub(crate) const POSTFLG: u32 = 0x300;
pub(crate) const HALTCNT: u32 = 0x301;

/// Size of the I/O window in bytes.
pub(crate) const IO_SIZE: u32 = 0x400;

#[inline]
pub(crate) const fn dma_sad(channel: usize) -> u32 {
    DMA_BASE + DMA_STRIDE * channel as u32
}

#[inline]
pub(crate) const fn dma_dad(channel: usize) -> u32 {
    dma_sad(channel) + 4
}

#[inline]
pub(crate) const fn dma_cnt_l(channel: usize) -> u32 {
    dma_sad(channel) + 8
}

#[inline]
pub(crate) const fn dma_cnt_h(channel: usize) -> u32 {
    dma_sad(channel) + 10
}

#[inline]
pub(crate) const fn timer_counter(index: usize) -> u32 {
    TIMER_BASE + 4 * index as u32
}

#[inline]
pub(crate) const fn timer_control(index: usize) -> u32 {
    timer_counter(index) + 2
}
