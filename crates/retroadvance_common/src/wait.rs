//! Per-region memory wait states.
//!
//! Regions are indexed by the top byte of the address (clamped to 15). The
//! four tables hold the extra cycles of a non-sequential and a sequential
//! access, each for 16-bit and 32-bit transfers.

/// SRAM wait states selected by WAITCNT bits 0-1.
const GAMEPAK_RAM_WAIT: [u8; 4] = [4, 3, 2, 8];
/// First-access wait states for the three ROM windows.
const GAMEPAK_WAIT: [u8; 4] = [4, 3, 2, 8];
const GAMEPAK_SEQ_WS0: [u8; 2] = [2, 1];
const GAMEPAK_SEQ_WS1: [u8; 2] = [4, 1];
const GAMEPAK_SEQ_WS2: [u8; 2] = [8, 1];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitStates {
    pub wait: [u8; 16],
    pub wait32: [u8; 16],
    pub seq: [u8; 16],
    pub seq32: [u8; 16],
    /// Game Pak prefetch buffer (WAITCNT bit 14).
    pub prefetch: bool,
}

impl Default for WaitStates {
    fn default() -> Self {
        Self {
            wait: [0, 0, 2, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4, 4, 4, 0],
            wait32: [0, 0, 5, 0, 0, 1, 1, 0, 7, 7, 9, 9, 13, 13, 4, 0],
            seq: [0, 0, 2, 0, 0, 0, 0, 0, 2, 2, 4, 4, 8, 8, 4, 0],
            seq32: [0, 0, 5, 0, 0, 1, 1, 0, 5, 5, 9, 9, 17, 17, 4, 0],
            prefetch: false,
        }
    }
}

impl WaitStates {
    /// Table index for `addr`.
    #[inline]
    pub fn region(addr: u32) -> usize {
        ((addr >> 24) as usize).min(15)
    }

    /// Rebuild the cartridge rows (8..=14) from a WAITCNT value.
    pub fn apply_waitcnt(&mut self, value: u16) {
        let v = value as usize;

        let sram = GAMEPAK_RAM_WAIT[v & 3];
        self.wait[0x0E] = sram;
        self.seq[0x0E] = sram;

        let windows = [
            (0x08, GAMEPAK_WAIT[(v >> 2) & 3], GAMEPAK_SEQ_WS0[(v >> 4) & 1]),
            (0x0A, GAMEPAK_WAIT[(v >> 5) & 3], GAMEPAK_SEQ_WS1[(v >> 7) & 1]),
            (0x0C, GAMEPAK_WAIT[(v >> 8) & 3], GAMEPAK_SEQ_WS2[(v >> 10) & 1]),
        ];
        for (base, first, seq) in windows {
            self.wait[base] = first;
            self.wait[base + 1] = first;
            self.seq[base] = seq;
            self.seq[base + 1] = seq;
        }

        for i in 8..15 {
            self.wait32[i] = self.wait[i] + self.seq[i] + 1;
            self.seq32[i] = self.seq[i] * 2 + 1;
        }

        self.prefetch = value & 0x4000 != 0;
        log::trace!("WAITCNT {value:04X}: prefetch={}", self.prefetch);
    }

    /// Cycles of a 16-bit access, including the base cycle.
    #[inline]
    pub fn access16(&self, addr: u32, sequential: bool) -> u32 {
        let r = Self::region(addr);
        let extra = if sequential { self.seq[r] } else { self.wait[r] };
        1 + extra as u32
    }

    /// Cycles of a 32-bit access, including the base cycle.
    #[inline]
    pub fn access32(&self, addr: u32, sequential: bool) -> u32 {
        let r = Self::region(addr);
        let extra = if sequential { self.seq32[r] } else { self.wait32[r] };
        1 + extra as u32
    }
}

#[cfg(test)]
mod tests {
    use super::WaitStates;

    #[test]
    fn region_clamps_to_last_row() {
        assert_eq!(WaitStates::region(0x0800_0000), 8);
        assert_eq!(WaitStates::region(0x0E00_1234), 14);
        assert_eq!(WaitStates::region(0xFF00_0000), 15);
    }

    #[test]
    fn waitcnt_zero_gives_slowest_cartridge_timing() {
        let mut ws = WaitStates::default();
        ws.apply_waitcnt(0);

        assert_eq!(ws.wait[0x08], 4);
        assert_eq!(ws.seq[0x08], 2);
        assert_eq!(ws.wait32[0x08], 7);
        assert_eq!(ws.seq32[0x08], 5);

        assert_eq!(ws.wait[0x0C], 4);
        assert_eq!(ws.seq[0x0C], 8);
        assert_eq!(ws.wait32[0x0C], 13);
        assert_eq!(ws.seq32[0x0C], 17);

        assert_eq!(ws.wait[0x0E], 4);
        // SRAM has no sequential mode, both halves cost the same.
        assert_eq!(ws.wait32[0x0E], 9);
        assert_eq!(ws.seq32[0x0E], 9);
        assert!(!ws.prefetch);
    }

    #[test]
    fn waitcnt_common_game_setting() {
        // 0x4317: SRAM 8, WS0 3/1, WS1 4/4, WS2 8/8, prefetch on.
        let mut ws = WaitStates::default();
        ws.apply_waitcnt(0x4317);

        assert_eq!(ws.wait[0x0E], 8);
        assert_eq!(ws.seq[0x0E], 8);
        assert_eq!(ws.wait[0x08], 3);
        assert_eq!(ws.wait[0x09], 3);
        assert_eq!(ws.seq[0x08], 1);
        assert_eq!(ws.wait32[0x08], 3 + 1 + 1);
        assert_eq!(ws.seq32[0x08], 3);
        assert_eq!(ws.wait[0x0A], 4);
        assert_eq!(ws.seq[0x0A], 4);
        assert_eq!(ws.wait[0x0C], 8);
        assert_eq!(ws.seq[0x0C], 8);
        assert_eq!(ws.wait32[0x0D], 17);
        assert!(ws.prefetch);

        // Internal regions are untouched.
        assert_eq!(ws.wait32[0x02], 5);
        assert_eq!(ws.seq32[0x05], 1);
    }

    #[test]
    fn access_costs_include_the_base_cycle() {
        let ws = WaitStates::default();
        assert_eq!(ws.access16(0x0300_0000, false), 1);
        assert_eq!(ws.access32(0x0200_0000, false), 6);
        assert_eq!(ws.access32(0x0800_0000, true), 6);
    }
}
