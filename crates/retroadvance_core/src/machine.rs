mod advance;
mod bus;
mod config;
mod dma;
mod interrupt;
mod registers;
mod savestate;
mod scheduler;
mod timer;
mod video;

pub use advance::Advance;
pub use config::MachineConfig;
pub use dma::DmaTiming;
pub use interrupt::Interrupt;
pub use savestate::{SaveStateError, SAVESTATE_VERSION};
pub use scheduler::RunExit;
pub use video::VideoMode;

use bincode::{Decode, Encode};

/// Low-power state selected through HALTCNT.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Encode, Decode)]
pub enum PowerState {
    #[default]
    Running,
    /// CPU clock gated until an interrupt is deliverable.
    Halted,
    /// Like `Halted`, but timers freeze too and only keypad, serial and
    /// Game Pak interrupts wake the CPU.
    Stopped,
}
