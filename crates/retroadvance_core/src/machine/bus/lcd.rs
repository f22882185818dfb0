use retroadvance_common::video::DISPLAY_REGISTER_COUNT;
use retroadvance_common::{DisplayRegisters, Memory};

use super::super::dma::DmaTiming;
use super::super::interrupt::Interrupt;
use super::super::registers::{DISPCNT, DISPSTAT, KEYCNT, KEYINPUT, VCOUNT};
use super::super::video::{
    DISPCNT_BG_LAYERS, DISPCNT_FORCED_BLANK, DRAW_CYCLES, HBLANK_CYCLES, LAYER_ENABLE_DELAY,
    STAT_HBLANK, STAT_HBLANK_IRQ, STAT_VBLANK, STAT_VBLANK_IRQ, STAT_VCOUNT, STAT_VCOUNT_IRQ,
    TOTAL_LINES, VISIBLE_LINES,
};
use super::super::PowerState;
use super::AdvanceBus;
use crate::SCREEN_WIDTH;

impl<M: Memory> AdvanceBus<M> {
    /// Count down the current LCD phase and handle the edge when it ends.
    ///
    /// Visible lines go drawing -> hblank -> next line. Vblank lines keep the
    /// vblank flag set and still pulse hblank, but never start HBlank DMA.
    pub(super) fn lcd_advance(&mut self, clock: i32) {
        self.lcd.ticks -= clock;
        if self.lcd.ticks > 0 {
            return;
        }

        let dispstat = self.reg(DISPSTAT);
        if dispstat & STAT_VBLANK != 0 {
            self.vblank_line_edge(dispstat);
        } else if dispstat & STAT_HBLANK != 0 {
            self.hblank_end(dispstat);
        } else {
            self.drawing_end(dispstat);
        }
    }

    fn vblank_line_edge(&mut self, mut dispstat: u16) {
        if dispstat & STAT_HBLANK != 0 {
            self.lcd.ticks += DRAW_CYCLES;
            let vcount = self.reg(VCOUNT) + 1;
            self.set_reg(VCOUNT, vcount);
            dispstat &= !STAT_HBLANK;
            self.set_reg(DISPSTAT, dispstat);
            self.compare_vcount();
        } else {
            self.lcd.ticks += HBLANK_CYCLES;
            dispstat |= STAT_HBLANK;
            self.set_reg(DISPSTAT, dispstat);
            if dispstat & STAT_HBLANK_IRQ != 0 {
                self.raise(Interrupt::HBLANK);
            }
        }

        if self.reg(VCOUNT) >= TOTAL_LINES {
            let dispstat = self.reg(DISPSTAT) & !(STAT_VBLANK | STAT_HBLANK);
            self.set_reg(DISPSTAT, dispstat);
            self.set_reg(VCOUNT, 0);
            self.compare_vcount();
        }
    }

    fn hblank_end(&mut self, mut dispstat: u16) {
        let vcount = self.reg(VCOUNT) + 1;
        self.set_reg(VCOUNT, vcount);
        self.lcd.ticks += DRAW_CYCLES;
        dispstat &= !STAT_HBLANK;
        self.set_reg(DISPSTAT, dispstat);

        if vcount == VISIBLE_LINES {
            self.frame_count += 1;
            self.sample_keypad();

            dispstat |= STAT_VBLANK;
            self.set_reg(DISPSTAT, dispstat);
            if dispstat & STAT_VBLANK_IRQ != 0 {
                self.raise(Interrupt::VBLANK);
            }
            self.check_dma(DmaTiming::VBlank, 0x0F);
            self.renderer.frame_complete(&self.framebuffer);
            log::trace!("RetroAdvance: vblank, frame {}", self.frame_count);
        }

        self.compare_vcount();
    }

    fn drawing_end(&mut self, mut dispstat: u16) {
        let line = self.reg(VCOUNT);
        if line < VISIBLE_LINES {
            let regs = self.display_registers();
            let start = line as usize * SCREEN_WIDTH;
            let out = &mut self.framebuffer[start..start + SCREEN_WIDTH];
            self.renderer.render_scanline(line, &regs, out);
        }

        dispstat |= STAT_HBLANK;
        self.set_reg(DISPSTAT, dispstat);
        self.lcd.ticks += HBLANK_CYCLES;
        self.check_dma(DmaTiming::HBlank, 0x0F);
        if self.reg(DISPSTAT) & STAT_HBLANK_IRQ != 0 {
            self.raise(Interrupt::HBLANK);
        }
    }

    /// Latch KEYINPUT and evaluate KEYCNT. Runs once per frame at vblank.
    fn sample_keypad(&mut self) {
        let pressed = self.keys_pressed & 0x03FF;
        self.set_reg(KEYINPUT, 0x03FF ^ pressed);

        let keycnt = self.reg(KEYCNT);
        if keycnt & 0x4000 == 0 && self.power != PowerState::Stopped {
            return;
        }
        let selected = keycnt & 0x03FF;
        let hit = if keycnt & 0x8000 != 0 {
            pressed == selected
        } else {
            pressed & selected != 0
        };
        if hit {
            self.raise(Interrupt::KEYPAD);
        }
    }

    /// VCOUNT match check, run on every line change. Also steps the delay
    /// of freshly enabled background layers.
    pub(super) fn compare_vcount(&mut self) {
        let mut dispstat = self.reg(DISPSTAT);
        if self.reg(VCOUNT) == dispstat >> 8 {
            dispstat |= STAT_VCOUNT;
            self.set_reg(DISPSTAT, dispstat);
            if dispstat & STAT_VCOUNT_IRQ != 0 {
                self.raise(Interrupt::VCOUNT);
            }
        } else {
            dispstat &= !STAT_VCOUNT;
            self.set_reg(DISPSTAT, dispstat);
        }

        if self.lcd.layer_enable_delay > 0 {
            self.lcd.layer_enable_delay -= 1;
            if self.lcd.layer_enable_delay == 1 {
                self.lcd.layer_enable = self.reg(DISPCNT);
            }
        }
    }

    pub(super) fn write_dispcnt(&mut self, value: u16) {
        let old = self.reg(DISPCNT);
        if value & 7 > 5 {
            log::warn!("RetroAdvance: prohibited display mode {} selected", value & 7);
        }
        let blank_released = (old ^ value) & DISPCNT_FORCED_BLANK != 0
            && value & DISPCNT_FORCED_BLANK == 0;
        let layers_on = !old & value & DISPCNT_BG_LAYERS;

        // Bit 3 is reserved for the boot ROM.
        self.set_reg(DISPCNT, value & 0xFFF7);

        if layers_on != 0 {
            self.lcd.layer_enable_delay = LAYER_ENABLE_DELAY;
            self.lcd.layer_enable = value & !layers_on;
        } else {
            self.lcd.layer_enable = value;
        }

        // Leaving forced blank outside vblank restarts the current line.
        if blank_released && self.reg(DISPSTAT) & STAT_VBLANK == 0 {
            self.lcd.ticks = DRAW_CYCLES;
            let dispstat = self.reg(DISPSTAT) & !(STAT_VBLANK | STAT_HBLANK);
            self.set_reg(DISPSTAT, dispstat);
            self.compare_vcount();
        }
    }

    /// Snapshot handed to the line renderer.
    pub(crate) fn display_registers(&self) -> DisplayRegisters {
        let mut io = [0u16; DISPLAY_REGISTER_COUNT];
        io.copy_from_slice(&self.io[..DISPLAY_REGISTER_COUNT]);
        DisplayRegisters {
            layer_enable: self.lcd.layer_enable,
            io,
        }
    }
}
