use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{bail, Result};
use retroadvance_common::{Key, Memory, SoundSink};
use retroadvance_core::{Advance, FlatMemory, Interrupt, MachineConfig, RunExit};

mod cpu;

pub use cpu::{Instruction, ScriptedCpu};

const IO: u32 = 0x0400_0000;
const KEYINPUT: u32 = 0x130;

/// Built-in register programs the driver can run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Program {
    /// Timer 0 on prescaler 64 with timer 1 cascaded on top, both with
    /// interrupts.
    Timers,
    /// A palette upload by immediate DMA, then a per-line HBlank DMA into
    /// the BG0 scroll register.
    Dma,
    /// Halt, wake on vblank, acknowledge, halt again.
    Idle,
}

impl FromStr for Program {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "timers" => Ok(Program::Timers),
            "dma" => Ok(Program::Dma),
            "idle" | "halt" => Ok(Program::Idle),
            other => bail!("unknown program '{other}'. Supported: timers, dma, idle"),
        }
    }
}

impl Program {
    /// Setup sequence and loop body.
    pub fn instructions(self) -> (Vec<Instruction>, Vec<Instruction>) {
        use Instruction::*;

        match self {
            Program::Timers => (
                vec![
                    Write16(IO + 0x100, 0xFF00),
                    Write16(IO + 0x104, 0xFFF0),
                    Write16(IO + 0x106, 0x00C4),
                    Write16(IO + 0x102, 0x00C1),
                    Write16(IO + 0x200, (Interrupt::TIMER0 | Interrupt::TIMER1).bits()),
                    Write16(IO + 0x208, 1),
                ],
                vec![Idle(1)],
            ),
            Program::Dma => (
                vec![
                    // 1 KiB palette from EWRAM, 32-bit immediate.
                    Write32(IO + 0x0D4, 0x0200_0000),
                    Write32(IO + 0x0D8, 0x0500_0000),
                    Write16(IO + 0x0DC, 0x0100),
                    Write16(IO + 0x0DE, 0xC400),
                    // One halfword per line into BG0HOFS, repeating.
                    Write32(IO + 0x0B0, 0x0200_0400),
                    Write32(IO + 0x0B4, 0x0400_0010),
                    Write16(IO + 0x0B8, 1),
                    Write16(IO + 0x0BA, 0xA240),
                    Write16(IO + 0x004, 0x0018),
                    Write16(IO + 0x200, (Interrupt::VBLANK | Interrupt::DMA3).bits()),
                    Write16(IO + 0x208, 1),
                    Write16(IO, 0x0100),
                ],
                vec![Idle(1)],
            ),
            Program::Idle => (
                vec![
                    Write16(IO + 0x004, 0x0008),
                    Write16(IO + 0x200, Interrupt::VBLANK.bits()),
                    Write16(IO + 0x208, 1),
                ],
                vec![Write8(IO + 0x301, 0x00)],
            ),
        }
    }
}

/// Parse a comma-separated list of held buttons, e.g. `a,start`.
pub fn parse_keys(list: &str) -> Result<Vec<Key>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Key::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = Key::ALL.iter().map(|key| key.name()).collect();
                anyhow::anyhow!("unknown key '{name}'. Supported: {}", known.join(", "))
            })
        })
        .collect()
}

/// Counts timer overflows reported to the sound side.
struct OverflowCounter(Rc<RefCell<[u64; 4]>>);

impl SoundSink for OverflowCounter {
    fn register_write(&mut self, _addr: u32, _value: u16) {}

    fn timer_overflow(&mut self, index: usize) -> u8 {
        self.0.borrow_mut()[index] += 1;
        0
    }
}

/// Cartridge image with just a header, enough to identify savestates.
fn demo_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x200];
    rom[0xA0..0xAC].copy_from_slice(b"RETROADVANCE");
    rom[0xAC..0xB0].copy_from_slice(b"DEMO");
    rom
}

fn fill_ewram(memory: &mut FlatMemory) {
    for i in 0..0x400u32 {
        let color = (i & 0x1F) as u16 | ((i >> 5) as u16 & 0x1F) << 10;
        memory.write16(0x0200_0000 + i * 2, color);
    }
}

pub fn run(frames: u32, program: Program, held: &[Key]) -> Result<()> {
    let (setup, body) = program.instructions();
    let config = MachineConfig::builder()
        .dma_log_mask(if program == Program::Dma { 0b1000 } else { 0 })
        .build();
    let mut machine = Advance::with_config(
        ScriptedCpu::new(setup, body),
        FlatMemory::new(demo_rom()),
        config,
    );
    fill_ewram(machine.memory_mut());

    let overflows = Rc::new(RefCell::new([0u64; 4]));
    machine.set_sound(Box::new(OverflowCounter(overflows.clone())));

    for &key in held {
        machine.handle_key(key, true);
    }
    let names: Vec<&str> = held.iter().map(|key| key.name()).collect();
    log::info!(
        "Running program {program:?} for {frames} frame(s), holding [{}]",
        names.join(",")
    );
    for _ in 0..frames {
        let delivered = machine.cpu.delivered;
        let before = *overflows.borrow();
        if machine.run_frame() == RunExit::CpuTrapped {
            bail!("CPU trapped during frame {}", machine.frame_count());
        }
        let after = *overflows.borrow();
        let timer_overflows: Vec<u64> =
            after.iter().zip(before.iter()).map(|(a, b)| a - b).collect();
        log::info!(
            "frame {:>4}: IF={:04X} KEYINPUT={:04X} irqs={} overflows={:?} line={} {:?}",
            machine.frame_count(),
            machine.pending_interrupts().bits(),
            machine.read_register(KEYINPUT),
            machine.cpu.delivered - delivered,
            timer_overflows,
            machine.scanline(),
            machine.power_state(),
        );
    }

    let state = machine.save_state()?;
    machine.load_state(&state)?;
    log::info!("Savestate round trip OK ({} bytes)", state.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_program_names() {
        assert_eq!("timers".parse::<Program>().unwrap(), Program::Timers);
        assert_eq!("halt".parse::<Program>().unwrap(), Program::Idle);
        assert!("sprites".parse::<Program>().is_err());
    }

    #[test]
    fn parses_held_keys() {
        assert_eq!(parse_keys("a, Start").unwrap(), vec![Key::A, Key::Start]);
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("a,turbo").is_err());
    }

    #[test]
    fn held_keys_show_in_keyinput_after_vblank() {
        run(1, Program::Idle, &[Key::A, Key::Down]).unwrap();

        let (setup, body) = Program::Idle.instructions();
        let mut machine = Advance::new(ScriptedCpu::new(setup, body), FlatMemory::new(demo_rom()));
        machine.handle_key(Key::A, true);
        machine.handle_key(Key::Down, true);
        machine.run_frame();
        let held = Key::A.mask() | Key::Down.mask();
        assert_eq!(machine.read_register(KEYINPUT), 0x03FF & !held);
    }

    #[test]
    fn every_program_runs() {
        for program in [Program::Timers, Program::Dma, Program::Idle] {
            run(2, program, &[]).unwrap();
        }
    }

    #[test]
    fn idle_program_wakes_once_per_frame() {
        let (setup, body) = Program::Idle.instructions();
        let mut machine = Advance::new(ScriptedCpu::new(setup, body), FlatMemory::new(demo_rom()));
        for _ in 0..3 {
            machine.run_frame();
        }
        assert_eq!(machine.cpu.delivered, 3);
    }

    #[test]
    fn cascaded_timer_overflows_every_sixteenth_time() {
        let (setup, body) = Program::Timers.instructions();
        let mut machine = Advance::new(ScriptedCpu::new(setup, body), FlatMemory::new(demo_rom()));
        let overflows = Rc::new(RefCell::new([0u64; 4]));
        machine.set_sound(Box::new(OverflowCounter(overflows.clone())));
        for _ in 0..4 {
            machine.run_frame();
        }
        let counts = *overflows.borrow();
        assert!(counts[0] > 16);
        assert_eq!(counts[1], counts[0] / 16);
    }
}
