//! Savestates.
//!
//! Layout, all integers little-endian and fixed width:
//!
//! 1. header: format version (u32), cartridge identifier (16 bytes)
//! 2. core block: register file, interrupt latch, power state, LCD timing,
//!    timers, DMA cursors, DMA stall, keypad, frame counter
//! 3. CPU block, [`Cpu::state_len`] bytes
//! 4. memory blocks, in [`Memory::state_blocks`] order
//! 5. framebuffer, one halfword per pixel
//!
//! Loading validates everything before touching the machine, so a rejected
//! state leaves it exactly as it was.
use bincode::config::{Configuration, Fixint, LittleEndian, NoLimit};
use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use retroadvance_common::{Cpu, Memory};
use thiserror::Error;

use super::advance::Advance;
use super::bus::{AdvanceBus, IO_HALFWORDS};
use super::dma::DmaChannel;
use super::interrupt::IrqLatch;
use super::registers::WAITCNT;
use super::timer::{Timer, TimerBank};
use super::video::LcdTiming;
use super::PowerState;

/// Format version written by [`Advance::save_state`].
pub const SAVESTATE_VERSION: u32 = 1;
/// Oldest format version [`Advance::load_state`] accepts.
const MIN_SAVESTATE_VERSION: u32 = 1;

const CONFIG: Configuration<LittleEndian, Fixint, NoLimit> = bincode::config::legacy();

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("unsupported savestate version {found} (supported {min}..={max})")]
    UnsupportedVersion { found: u32, min: u32, max: u32 },
    #[error("savestate belongs to \"{found}\", loaded cartridge is \"{expected}\"")]
    WrongCartridge { expected: String, found: String },
    #[error("savestate is {found} bytes, expected {expected}")]
    Truncated { expected: usize, found: usize },
    #[error("malformed savestate: {0}")]
    Malformed(#[from] DecodeError),
    #[error("failed to encode savestate: {0}")]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Encode, Decode)]
struct Header {
    version: u32,
    cartridge: [u8; 16],
}

const HEADER_LEN: usize = 4 + 16;

/// Everything the core owns that is not raw memory.
#[derive(Clone, Debug, Eq, PartialEq, Encode, Decode)]
pub(crate) struct CoreState {
    pub(crate) io: [u16; IO_HALFWORDS],
    pub(crate) irq: IrqLatch,
    pub(crate) power: PowerState,
    pub(crate) lcd: LcdTiming,
    pub(crate) timers: [Timer; 4],
    pub(crate) dma: [DmaChannel; 4],
    pub(crate) dma_stall: i32,
    pub(crate) keys_pressed: u16,
    pub(crate) frame_count: u64,
}

impl<M: Memory> AdvanceBus<M> {
    pub(crate) fn core_state(&self) -> CoreState {
        CoreState {
            io: self.io,
            irq: self.irq,
            power: self.power,
            lcd: self.lcd,
            timers: self.timers.timers,
            dma: self.dma,
            dma_stall: self.dma_stall,
            keys_pressed: self.keys_pressed,
            frame_count: self.frame_count,
        }
    }

    fn restore_core_state(&mut self, state: CoreState) {
        self.io = state.io;
        self.irq = state.irq;
        self.power = state.power;
        self.lcd = state.lcd;
        self.timers = TimerBank { timers: state.timers };
        self.dma = state.dma;
        self.dma_stall = state.dma_stall;
        self.keys_pressed = state.keys_pressed;
        self.frame_count = state.frame_count;
        self.event_now = false;
        // The tables are derived state; rebuild them from the register.
        let waitcnt = self.reg(WAITCNT);
        self.wait_states.apply_waitcnt(waitcnt);
    }
}

/// Printable form of a cartridge identifier for error messages.
fn cartridge_name(id: &[u8; 16]) -> String {
    id.iter()
        .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { ' ' })
        .collect::<String>()
        .trim_end()
        .to_string()
}

impl<C: Cpu, M: Memory> Advance<C, M> {
    pub fn save_state(&self) -> Result<Vec<u8>, SaveStateError> {
        let header = Header {
            version: SAVESTATE_VERSION,
            cartridge: self.bus.memory.cartridge_id(),
        };
        let mut out = bincode::encode_to_vec(&header, CONFIG)?;
        out.extend(bincode::encode_to_vec(self.bus.core_state(), CONFIG)?);

        let cpu_start = out.len();
        self.cpu.save_state(&mut out);
        debug_assert_eq!(out.len() - cpu_start, self.cpu.state_len());

        for block in self.bus.memory.state_blocks() {
            out.extend_from_slice(block);
        }
        for pixel in &self.bus.framebuffer {
            out.extend_from_slice(&pixel.to_le_bytes());
        }

        log::debug!("RetroAdvance: savestate written ({} bytes)", out.len());
        Ok(out)
    }

    /// Restore a state produced by [`Advance::save_state`]. On error the
    /// machine is left untouched.
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), SaveStateError> {
        if data.len() < HEADER_LEN {
            return Err(SaveStateError::Truncated {
                expected: HEADER_LEN,
                found: data.len(),
            });
        }
        let (header, mut offset): (Header, usize) = bincode::decode_from_slice(data, CONFIG)?;
        if !(MIN_SAVESTATE_VERSION..=SAVESTATE_VERSION).contains(&header.version) {
            return Err(SaveStateError::UnsupportedVersion {
                found: header.version,
                min: MIN_SAVESTATE_VERSION,
                max: SAVESTATE_VERSION,
            });
        }
        let cartridge = self.bus.memory.cartridge_id();
        if header.cartridge != cartridge {
            return Err(SaveStateError::WrongCartridge {
                expected: cartridge_name(&cartridge),
                found: cartridge_name(&header.cartridge),
            });
        }

        let (core, used): (CoreState, usize) = bincode::decode_from_slice(&data[offset..], CONFIG)?;
        offset += used;

        let cpu_len = self.cpu.state_len();
        let block_lens: Vec<usize> =
            self.bus.memory.state_blocks().iter().map(|b| b.len()).collect();
        let framebuffer_len = self.bus.framebuffer.len() * 2;
        let expected = offset + cpu_len + block_lens.iter().sum::<usize>() + framebuffer_len;
        if data.len() != expected {
            return Err(SaveStateError::Truncated {
                expected,
                found: data.len(),
            });
        }

        // Validated; from here on nothing can fail.
        self.bus.restore_core_state(core);
        self.cpu.load_state(&data[offset..offset + cpu_len]);
        offset += cpu_len;
        for block in self.bus.memory.state_blocks_mut() {
            let len = block.len();
            block.copy_from_slice(&data[offset..offset + len]);
            offset += len;
        }
        for (pixel, bytes) in self.bus.framebuffer.iter_mut().zip(data[offset..].chunks_exact(2)) {
            *pixel = u16::from_le_bytes([bytes[0], bytes[1]]);
        }

        log::debug!(
            "RetroAdvance: savestate loaded (version {}, frame {})",
            header.version,
            self.bus.frame_count
        );
        Ok(())
    }
}
