use crate::wait::WaitStates;

/// Abstraction over the system bus as seen by the instruction interpreter.
///
/// Reads and writes inside the I/O window (0x0400_0000..=0x0400_03FF) go
/// through the register dispatch of the core; everything else is forwarded
/// to the memory backing store.
pub trait Bus {
    fn read8(&mut self, addr: u32) -> u8;
    fn read16(&mut self, addr: u32) -> u16;
    fn read32(&mut self, addr: u32) -> u32;
    fn write8(&mut self, addr: u32, value: u8);
    fn write16(&mut self, addr: u32, value: u16);
    fn write32(&mut self, addr: u32, value: u32);

    /// Live wait-state tables. WAITCNT writes update these in place, so an
    /// interpreter that borrows them always sees the current timing.
    fn wait_states(&self) -> &WaitStates;
}
