/// Timer bank: four 16-bit up-counters.
///
/// A running timer either counts cycles through its prescaler or, for
/// timers 1-3 with the cascade bit set, counts overflows of the timer
/// below it. Cycle-counting timers keep the number of cycles left until
/// the next overflow in `ticks`; the counter visible through TMxCNT_L is
/// derived from it on demand. Cascaded and stopped timers hold their
/// counter in `value` instead.
use bincode::{Decode, Encode};

/// Prescaler selections 1, 64, 256 and 1024 cycles per tick, as shifts.
pub(crate) const PRESCALER_SHIFTS: [u8; 4] = [0, 6, 8, 10];

const CONTROL_MASK: u16 = 0x00C7;
const CONTROL_CASCADE: u16 = 0x0004;
const CONTROL_IRQ: u16 = 0x0040;
const CONTROL_ENABLE: u16 = 0x0080;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Encode, Decode)]
pub(crate) struct Timer {
    /// Counter for cascaded or stopped timers.
    pub(crate) value: u16,
    /// TMxCNT_L as last written.
    pub(crate) reload: u16,
    /// Applied TMxCNT_H, masked.
    pub(crate) control: u16,
    pub(crate) shift: u8,
    pub(crate) running: bool,
    /// Cycles left until overflow while counting cycles.
    pub(crate) ticks: i32,
    /// TMxCNT_H write waiting for the end of the current scheduler pass,
    /// valid while `pending` is set. Kept fixed width for savestates.
    pub(crate) pending_control: u16,
    pub(crate) pending: bool,
}

impl Timer {
    #[inline]
    pub(crate) fn irq_enabled(&self) -> bool {
        self.control & CONTROL_IRQ != 0
    }

    /// Cycles between two overflows at the current reload and prescaler.
    #[inline]
    pub(crate) fn period(&self) -> i32 {
        (0x10000 - self.reload as i32) << self.shift
    }

    /// Visible counter value.
    pub(crate) fn counter(&self, index: usize) -> u16 {
        if self.running && counts_cycles(index, self.control) {
            0xFFFFu16.wrapping_sub((self.ticks >> self.shift) as u16)
        } else {
            self.value
        }
    }

    /// Queue a TMxCNT_H write for the end of the pass.
    #[inline]
    pub(crate) fn queue_control(&mut self, control: u16) {
        self.pending_control = control;
        self.pending = true;
    }

    /// Apply a deferred control write. Returns `true` if one was pending.
    pub(crate) fn apply_pending(&mut self, index: usize) -> bool {
        if !std::mem::take(&mut self.pending) {
            return false;
        }
        let control = self.pending_control;

        // Freeze whatever the counter shows before the mode changes.
        self.value = self.counter(index);
        self.shift = PRESCALER_SHIFTS[(control & 3) as usize];
        let enable = control & CONTROL_ENABLE != 0;
        if !self.running && enable {
            self.value = self.reload;
            self.ticks = self.period();
        }
        self.running = enable;
        self.control = control & CONTROL_MASK;
        true
    }
}

#[inline]
fn counts_cycles(index: usize, control: u16) -> bool {
    index == 0 || control & CONTROL_CASCADE == 0
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TimerBank {
    pub(crate) timers: [Timer; 4],
}

impl TimerBank {
    /// Advance every running timer by `clock` cycles and return the mask of
    /// timers that overflowed, lowest index first in the cascade chain.
    pub(crate) fn advance(&mut self, clock: i32) -> u8 {
        let mut overflowed = 0u8;
        for (index, timer) in self.timers.iter_mut().enumerate() {
            if !timer.running {
                continue;
            }
            if counts_cycles(index, timer.control) {
                timer.ticks -= clock;
                if timer.ticks <= 0 {
                    timer.ticks += timer.period();
                    overflowed |= 1 << index;
                }
            } else if overflowed & (1 << (index - 1)) != 0 {
                timer.value = timer.value.wrapping_add(1);
                if timer.value == 0 {
                    timer.value = timer.reload;
                    overflowed |= 1 << index;
                }
            }
        }
        overflowed
    }

    /// Cycles until the nearest cycle-counting overflow.
    pub(crate) fn horizon(&self) -> Option<i32> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(index, t)| t.running && counts_cycles(*index, t.control))
            .map(|(_, t)| t.ticks)
            .min()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.timers.iter().any(|t| t.pending)
    }
}
