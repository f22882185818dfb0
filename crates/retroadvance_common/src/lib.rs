//! Contracts between the RetroAdvance core and the pieces it drives but does
//! not own: the instruction interpreter, the memory backing store, the line
//! renderer and the sound mixer.

pub mod bus;
pub mod cpu;
pub mod key;
pub mod memory;
pub mod sound;
pub mod video;
pub mod wait;

pub use bus::Bus;
pub use cpu::Cpu;
pub use key::Key;
pub use memory::Memory;
pub use sound::{NullSound, SoundSink};
pub use video::{DisplayRegisters, LineRenderer, NullRenderer};
pub use wait::WaitStates;
