/// Backing store for everything outside the I/O register window.
///
/// Implementations own BIOS, work RAM, palette, VRAM, OAM and the cartridge.
/// Access timing is accounted for by the caller through
/// [`WaitStates`](crate::WaitStates), so these calls only move data.
pub trait Memory {
    fn read8(&mut self, addr: u32) -> u8;
    fn read16(&mut self, addr: u32) -> u16;
    fn read32(&mut self, addr: u32) -> u32;
    fn write8(&mut self, addr: u32, value: u8);
    fn write16(&mut self, addr: u32, value: u16);
    fn write32(&mut self, addr: u32, value: u32);

    /// Identifier embedded in savestates; a state taken with a different
    /// cartridge is refused.
    fn cartridge_id(&self) -> [u8; 16];

    /// Raw blocks persisted in savestates, in a stable order. Block sizes
    /// must not change between saving and loading.
    fn state_blocks(&self) -> Vec<&[u8]>;

    /// Mutable view of the same blocks, in the same order.
    fn state_blocks_mut(&mut self) -> Vec<&mut [u8]>;
}
