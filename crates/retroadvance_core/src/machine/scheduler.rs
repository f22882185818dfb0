//! Event scheduler.
//!
//! The CPU runs instruction by instruction until the cycles it has used
//! reach the next event horizon: the nearest of the LCD phase edge, a
//! cycle-counting timer overflow, the end of a DMA stall and the interrupt
//! latch expiring. Time is
//! then handed to the peripherals in passes that never cross an event, so
//! every edge, overflow and delivery lands on its exact cycle.
use retroadvance_common::{Cpu, Memory};

use super::advance::Advance;
use super::interrupt::{Interrupt, IRQ_LATENCY};
use super::PowerState;

/// Why [`Advance::run`] returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunExit {
    /// The cycle budget was spent. The call may end mid-scanline.
    BudgetExhausted,
    /// The interpreter reported a fatal trap.
    CpuTrapped,
}

impl<C: Cpu, M: Memory> Advance<C, M> {
    /// Run the machine for `cycles` CPU cycles.
    ///
    /// The last instruction or DMA transfer may overshoot the budget by a
    /// few cycles; the overshoot is accounted to peripherals before
    /// returning.
    pub fn run(&mut self, cycles: i32) -> RunExit {
        if cycles <= 0 {
            return RunExit::BudgetExhausted;
        }

        let mut budget = cycles;
        // Cycles spent since the last update pass.
        let mut elapsed = 0i32;
        let mut next_event = self.bus.horizon().min(budget);

        // A transfer started between calls still blocks the CPU.
        if self.bus.dma_stall > 0 {
            next_event = self.update_pass(0, 0, &mut budget).min(budget);
            if budget <= 0 {
                return RunExit::BudgetExhausted;
            }
        }

        loop {
            if self.bus.power == PowerState::Running {
                self.sync_cpu_view();
                let taken = self.cpu.execute_one(&mut self.bus);
                if taken == 0 {
                    log::warn!(
                        "RetroAdvance: CPU trapped at pc={:08X}, leaving run loop",
                        self.cpu.program_counter()
                    );
                    return RunExit::CpuTrapped;
                }
                // The instruction asked for an update pass at its start.
                if std::mem::take(&mut self.bus.event_now) {
                    next_event = elapsed;
                }
                elapsed += taken as i32;
            } else {
                // Nothing executes while halted: skip straight to the event.
                elapsed = elapsed.max(next_event);
            }

            if elapsed < next_event {
                continue;
            }

            let overshoot = elapsed - next_event;
            elapsed = 0;
            next_event = self.update_pass(next_event, overshoot, &mut budget);
            self.bus.event_now = false;

            // Timer control writes land one pass late.
            if self.bus.apply_timer_writes() {
                next_event = self.bus.horizon();
            }
            next_event = next_event.min(budget);

            if budget <= 0 {
                return RunExit::BudgetExhausted;
            }
        }
    }

    /// Hand `clock` cycles to the peripherals, then the DMA stall, then the
    /// `overshoot` left over from the last instruction, each in chunks that
    /// stop at the next event. Interrupts are checked once the stall has
    /// drained. Returns the new horizon.
    fn update_pass(&mut self, mut clock: i32, mut overshoot: i32, budget: &mut i32) -> i32 {
        loop {
            self.bus.advance(clock);
            *budget -= clock;
            let mut next_event = self.bus.horizon();

            if self.bus.dma_stall > 0 {
                clock = self.bus.dma_stall.min(next_event);
                self.bus.dma_stall -= clock;
                continue;
            }

            self.service_interrupts(&mut next_event);

            if overshoot > 0 {
                clock = overshoot.min(next_event);
                overshoot -= clock;
                continue;
            }

            return next_event;
        }
    }

    /// Move the interrupt controller along: arm the latch when an interrupt
    /// becomes deliverable, and vector the CPU once the latch has expired.
    /// A halted CPU takes the interrupt without waiting for the latch.
    fn service_interrupts(&mut self, next_event: &mut i32) {
        self.sync_cpu_view();
        let pending = self.bus.deliverable();
        if pending.is_empty() {
            // Nothing left to take: the next request starts a full delay.
            self.bus.irq.disarm();
            return;
        }

        if self.bus.irq.armed {
            if self.bus.irq.expired() {
                self.deliver(pending);
            }
        } else if self.bus.power == PowerState::Running {
            self.bus.irq.arm();
            *next_event = (*next_event).min(IRQ_LATENCY);
        } else {
            self.deliver(pending);
        }
    }

    fn deliver(&mut self, pending: Interrupt) {
        log::debug!(
            "RetroAdvance: IRQ {:?} delivered at pc={:08X} ({:?})",
            pending,
            self.cpu.program_counter(),
            self.bus.power
        );
        self.bus.irq.armed = false;
        self.bus.power = PowerState::Running;
        self.cpu.assert_interrupt(&mut self.bus);
    }

    fn sync_cpu_view(&mut self) {
        self.bus.cpu_pc = self.cpu.program_counter();
        self.bus.cpu_irq_enabled = self.cpu.irq_enabled();
    }
}
