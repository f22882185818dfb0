use crate::bus::Bus;

/// Instruction-set interpreter driven by the scheduler.
///
/// The core never decodes instructions itself. It only asks the
/// interpreter to run one instruction at a time and to take an interrupt
/// when one becomes deliverable.
pub trait Cpu {
    /// Execute a single instruction and return the number of cycles it
    /// consumed. Returning 0 signals a fatal trap; the scheduler stops
    /// immediately.
    fn execute_one<B: Bus>(&mut self, bus: &mut B) -> u32;

    /// Vector to the IRQ entry point.
    fn assert_interrupt<B: Bus>(&mut self, bus: &mut B);

    /// `true` while the interpreter accepts IRQs (the I bit of CPSR is
    /// clear).
    fn irq_enabled(&self) -> bool;

    /// Address of the instruction currently executing. DMA uses the top
    /// byte to decide whether a low source address reads open bus.
    fn program_counter(&self) -> u32;

    /// Size in bytes of the block written by [`Cpu::save_state`]. Must not
    /// change for the lifetime of the interpreter.
    fn state_len(&self) -> usize;

    fn save_state(&self, out: &mut Vec<u8>);

    /// Restore from a block of exactly [`Cpu::state_len`] bytes.
    fn load_state(&mut self, data: &[u8]);
}
