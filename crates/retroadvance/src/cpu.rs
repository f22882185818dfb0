use std::collections::VecDeque;

use retroadvance_common::{Bus, Cpu};

const IO: u32 = 0x0400_0000;
const IE: u32 = IO + 0x200;
const IF: u32 = IO + 0x202;

/// One step of a register program.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    /// Burn cycles without touching the bus.
    Idle(u32),
    Write8(u32, u8),
    Write16(u32, u16),
    Write32(u32, u32),
    /// Write back IE & IF to IF, the way an interrupt handler acknowledges.
    Acknowledge,
    /// Leave the interrupt handler and accept IRQs again.
    Return,
}

/// Interrupt handler every delivered IRQ runs before the program resumes.
const HANDLER: [Instruction; 2] = [Instruction::Acknowledge, Instruction::Return];

/// A stand-in interpreter that runs a setup sequence once and then loops a
/// body forever. Writes cost what the wait-state tables say they cost.
pub struct ScriptedCpu {
    setup: Vec<Instruction>,
    body: Vec<Instruction>,
    handler: VecDeque<Instruction>,
    /// Program steps retired, handler steps excluded.
    position: u64,
    irq_enabled: bool,
    pub delivered: u64,
}

impl ScriptedCpu {
    pub fn new(setup: Vec<Instruction>, body: Vec<Instruction>) -> Self {
        Self {
            setup,
            body,
            handler: VecDeque::new(),
            position: 0,
            irq_enabled: true,
            delivered: 0,
        }
    }

    fn next_instruction(&mut self) -> Option<Instruction> {
        if let Some(step) = self.handler.pop_front() {
            return Some(step);
        }
        let position = self.position as usize;
        let step = match self.setup.get(position) {
            Some(step) => *step,
            None if self.body.is_empty() => return None,
            None => self.body[(position - self.setup.len()) % self.body.len()],
        };
        self.position += 1;
        Some(step)
    }
}

impl Cpu for ScriptedCpu {
    fn execute_one<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let Some(step) = self.next_instruction() else {
            return 0;
        };

        let ws = bus.wait_states();
        let cycles = match step {
            Instruction::Idle(cycles) => return cycles.max(1),
            Instruction::Write8(addr, _) | Instruction::Write16(addr, _) => {
                ws.access16(addr, false)
            }
            Instruction::Write32(addr, _) => ws.access32(addr, false),
            Instruction::Acknowledge => 2 * ws.access16(IF, false),
            Instruction::Return => 3,
        };

        match step {
            Instruction::Write8(addr, value) => bus.write8(addr, value),
            Instruction::Write16(addr, value) => bus.write16(addr, value),
            Instruction::Write32(addr, value) => bus.write32(addr, value),
            Instruction::Acknowledge => {
                let pending = bus.read16(IE) & bus.read16(IF);
                bus.write16(IF, pending);
            }
            Instruction::Return => self.irq_enabled = true,
            Instruction::Idle(_) => {}
        }
        cycles
    }

    fn assert_interrupt<B: Bus>(&mut self, _bus: &mut B) {
        self.delivered += 1;
        self.irq_enabled = false;
        self.handler = HANDLER.into_iter().collect();
    }

    fn irq_enabled(&self) -> bool {
        self.irq_enabled
    }

    fn program_counter(&self) -> u32 {
        if self.handler.is_empty() {
            0x0800_0000 + (self.position as u32).wrapping_mul(4)
        } else {
            0x0300_7F00
        }
    }

    fn state_len(&self) -> usize {
        8 + 8 + 1 + 1
    }

    fn save_state(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.position.to_le_bytes());
        out.extend_from_slice(&self.delivered.to_le_bytes());
        out.push(self.irq_enabled as u8);
        out.push(self.handler.len() as u8);
    }

    fn load_state(&mut self, data: &[u8]) {
        let mut word = [0u8; 8];
        word.copy_from_slice(&data[0..8]);
        self.position = u64::from_le_bytes(word);
        word.copy_from_slice(&data[8..16]);
        self.delivered = u64::from_le_bytes(word);
        self.irq_enabled = data[16] != 0;
        // The handler is always a suffix of the same fixed sequence.
        let remaining = (data[17] as usize).min(HANDLER.len());
        self.handler = HANDLER[HANDLER.len() - remaining..].iter().copied().collect();
    }
}
