pub mod machine;
pub mod memory;

pub use machine::{
    Advance, DmaTiming, Interrupt, MachineConfig, PowerState, RunExit, SaveStateError, VideoMode,
    SAVESTATE_VERSION,
};
pub use memory::FlatMemory;

/// Visible screen width in pixels.
pub const SCREEN_WIDTH: usize = 240;
/// Visible screen height in pixels.
pub const SCREEN_HEIGHT: usize = 160;
/// CPU cycles in one full frame: 228 lines of 1232 cycles.
pub const CYCLES_PER_FRAME: i32 = 280_896;
