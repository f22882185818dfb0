use bincode::{Decode, Encode};

/// Drawing phase of a scanline, in CPU cycles.
pub(crate) const DRAW_CYCLES: i32 = 960;
/// Horizontal blank phase of a scanline.
pub(crate) const HBLANK_CYCLES: i32 = 272;
pub(crate) const VISIBLE_LINES: u16 = 160;
pub(crate) const TOTAL_LINES: u16 = 228;

/// DISPSTAT status and enable bits.
pub(crate) const STAT_VBLANK: u16 = 0x0001;
pub(crate) const STAT_HBLANK: u16 = 0x0002;
pub(crate) const STAT_VCOUNT: u16 = 0x0004;
pub(crate) const STAT_VBLANK_IRQ: u16 = 0x0008;
pub(crate) const STAT_HBLANK_IRQ: u16 = 0x0010;
pub(crate) const STAT_VCOUNT_IRQ: u16 = 0x0020;

/// DISPCNT bits.
pub(crate) const DISPCNT_FORCED_BLANK: u16 = 0x0080;
pub(crate) const DISPCNT_BG_LAYERS: u16 = 0x0F00;

/// Lines a newly enabled background stays hidden, plus one.
pub(crate) const LAYER_ENABLE_DELAY: u8 = 4;

/// Where the beam is, as derived from DISPSTAT.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VideoMode {
    Drawing,
    HBlank,
    VBlank,
}

impl VideoMode {
    pub(crate) fn from_dispstat(dispstat: u16) -> Self {
        if dispstat & STAT_VBLANK != 0 {
            VideoMode::VBlank
        } else if dispstat & STAT_HBLANK != 0 {
            VideoMode::HBlank
        } else {
            VideoMode::Drawing
        }
    }
}

/// LCD timing state that the register file does not hold. VCOUNT and the
/// DISPSTAT flags are the scanline and phase; this tracks the cycles left
/// in the current phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub(crate) struct LcdTiming {
    pub(crate) ticks: i32,
    /// DISPCNT as seen by the renderer.
    pub(crate) layer_enable: u16,
    pub(crate) layer_enable_delay: u8,
}

impl Default for LcdTiming {
    fn default() -> Self {
        Self {
            ticks: DRAW_CYCLES,
            layer_enable: DISPCNT_FORCED_BLANK,
            layer_enable_delay: 0,
        }
    }
}
