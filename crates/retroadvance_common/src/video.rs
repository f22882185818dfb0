/// Number of halfword registers (0x000..=0x054) that make up the display
/// snapshot handed to the renderer.
pub const DISPLAY_REGISTER_COUNT: usize = 0x56 / 2;

/// Read-only copy of the display registers taken at the end of a line's
/// drawing phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRegisters {
    /// DISPCNT with background layers still inside their enable delay
    /// masked off.
    pub layer_enable: u16,
    /// Halfwords 0x000..=0x054 as stored in the register file.
    pub io: [u16; DISPLAY_REGISTER_COUNT],
}

impl Default for DisplayRegisters {
    fn default() -> Self {
        Self {
            layer_enable: 0,
            io: [0; DISPLAY_REGISTER_COUNT],
        }
    }
}

impl DisplayRegisters {
    #[inline]
    pub fn dispcnt(&self) -> u16 {
        self.io[0x00 / 2]
    }

    /// Background mode 0-5.
    #[inline]
    pub fn mode(&self) -> u16 {
        self.dispcnt() & 7
    }

    #[inline]
    pub fn forced_blank(&self) -> bool {
        self.dispcnt() & 0x0080 != 0
    }

    #[inline]
    pub fn bg_control(&self, bg: usize) -> u16 {
        self.io[0x08 / 2 + bg]
    }

    /// (HOFS, VOFS) for a text background.
    #[inline]
    pub fn bg_offset(&self, bg: usize) -> (u16, u16) {
        let base = 0x10 / 2 + bg * 2;
        (self.io[base], self.io[base + 1])
    }

    #[inline]
    pub fn window_inside(&self) -> u16 {
        self.io[0x48 / 2]
    }

    #[inline]
    pub fn window_outside(&self) -> u16 {
        self.io[0x4A / 2]
    }

    #[inline]
    pub fn blend_control(&self) -> u16 {
        self.io[0x50 / 2]
    }

    #[inline]
    pub fn blend_alpha(&self) -> u16 {
        self.io[0x52 / 2]
    }

    #[inline]
    pub fn blend_brightness(&self) -> u16 {
        self.io[0x54 / 2]
    }
}

/// Pixel compositor. The core calls it once per visible line and once per
/// completed frame; it never inspects the pixels itself.
pub trait LineRenderer {
    /// Render `line` into `out` (one BGR555 halfword per pixel).
    fn render_scanline(&mut self, line: u16, regs: &DisplayRegisters, out: &mut [u16]);

    /// Called at the start of vblank with the finished framebuffer.
    fn frame_complete(&mut self, _frame: &[u16]) {}
}

/// Renderer that leaves the framebuffer untouched.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullRenderer;

impl LineRenderer for NullRenderer {
    fn render_scanline(&mut self, _line: u16, _regs: &DisplayRegisters, _out: &mut [u16]) {}
}
