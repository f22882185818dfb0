//! Flat reference implementation of the memory backing store.
//!
//! Enough of the memory map for hosts and tests that do not bring their own
//! store: BIOS, both work RAMs, palette, VRAM, OAM, a ROM image and SRAM,
//! with the usual mirroring. Access timing is left to the caller.
use retroadvance_common::Memory;

const BIOS_SIZE: usize = 0x4000;
const EWRAM_SIZE: usize = 0x40000;
const IWRAM_SIZE: usize = 0x8000;
const PALETTE_SIZE: usize = 0x400;
const VRAM_SIZE: usize = 0x18000;
const OAM_SIZE: usize = 0x400;
const SRAM_SIZE: usize = 0x10000;
/// Largest ROM the 32 MiB cartridge window can map.
const ROM_WINDOW: usize = 0x0200_0000;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Region {
    Bios,
    Ewram,
    Iwram,
    Palette,
    Vram,
    Oam,
    Rom,
    Sram,
}

pub struct FlatMemory {
    bios: Vec<u8>,
    ewram: Vec<u8>,
    iwram: Vec<u8>,
    palette: Vec<u8>,
    vram: Vec<u8>,
    oam: Vec<u8>,
    rom: Vec<u8>,
    sram: Vec<u8>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FlatMemory {
    pub fn new(mut rom: Vec<u8>) -> Self {
        if rom.len() > ROM_WINDOW {
            log::warn!("FlatMemory: ROM of {} bytes truncated to 32 MiB", rom.len());
            rom.truncate(ROM_WINDOW);
        }
        Self {
            bios: vec![0; BIOS_SIZE],
            ewram: vec![0; EWRAM_SIZE],
            iwram: vec![0; IWRAM_SIZE],
            palette: vec![0; PALETTE_SIZE],
            vram: vec![0; VRAM_SIZE],
            oam: vec![0; OAM_SIZE],
            rom,
            sram: vec![0xFF; SRAM_SIZE],
        }
    }

    /// Replace the BIOS image. Shorter images are zero padded.
    pub fn load_bios(&mut self, bios: &[u8]) {
        let len = bios.len().min(BIOS_SIZE);
        self.bios.fill(0);
        self.bios[..len].copy_from_slice(&bios[..len]);
    }

    /// Resolve an address to a backing region and an offset inside it.
    fn locate(&self, addr: u32) -> Option<(Region, usize)> {
        let offset = (addr & 0x00FF_FFFF) as usize;
        match addr >> 24 {
            0x00 if offset < BIOS_SIZE => Some((Region::Bios, offset)),
            0x02 => Some((Region::Ewram, offset & (EWRAM_SIZE - 1))),
            0x03 => Some((Region::Iwram, offset & (IWRAM_SIZE - 1))),
            0x05 => Some((Region::Palette, offset & (PALETTE_SIZE - 1))),
            // 96 KiB mirrored in 128 KiB steps; the last 32 KiB repeat the
            // object tiles.
            0x06 => {
                let offset = offset & 0x1FFFF;
                let offset = if offset >= VRAM_SIZE { offset - 0x8000 } else { offset };
                Some((Region::Vram, offset))
            }
            0x07 => Some((Region::Oam, offset & (OAM_SIZE - 1))),
            0x08..=0x0D => {
                let offset = (addr & 0x01FF_FFFF) as usize;
                (offset < self.rom.len()).then_some((Region::Rom, offset))
            }
            0x0E | 0x0F => Some((Region::Sram, offset & (SRAM_SIZE - 1))),
            _ => None,
        }
    }

    fn bytes(&self, region: Region) -> &[u8] {
        match region {
            Region::Bios => self.bios.as_slice(),
            Region::Ewram => self.ewram.as_slice(),
            Region::Iwram => self.iwram.as_slice(),
            Region::Palette => self.palette.as_slice(),
            Region::Vram => self.vram.as_slice(),
            Region::Oam => self.oam.as_slice(),
            Region::Rom => self.rom.as_slice(),
            Region::Sram => self.sram.as_slice(),
        }
    }

    fn bytes_mut(&mut self, region: Region) -> Option<&mut [u8]> {
        match region {
            Region::Bios | Region::Rom => None,
            Region::Ewram => Some(self.ewram.as_mut_slice()),
            Region::Iwram => Some(self.iwram.as_mut_slice()),
            Region::Palette => Some(self.palette.as_mut_slice()),
            Region::Vram => Some(self.vram.as_mut_slice()),
            Region::Oam => Some(self.oam.as_mut_slice()),
            Region::Sram => Some(self.sram.as_mut_slice()),
        }
    }

    fn load(&self, addr: u32) -> u8 {
        match self.locate(addr) {
            Some((region, offset)) => self.bytes(region)[offset],
            None => 0,
        }
    }

    fn store(&mut self, addr: u32, value: u8) {
        if let Some((region, offset)) = self.locate(addr) {
            if let Some(bytes) = self.bytes_mut(region) {
                bytes[offset] = value;
            }
        }
    }
}

impl Memory for FlatMemory {
    fn read8(&mut self, addr: u32) -> u8 {
        self.load(addr)
    }

    fn read16(&mut self, addr: u32) -> u16 {
        let addr = addr & !1;
        u16::from_le_bytes([self.load(addr), self.load(addr + 1)])
    }

    fn read32(&mut self, addr: u32) -> u32 {
        let addr = addr & !3;
        u32::from_le_bytes([
            self.load(addr),
            self.load(addr + 1),
            self.load(addr + 2),
            self.load(addr + 3),
        ])
    }

    fn write8(&mut self, addr: u32, value: u8) {
        self.store(addr, value);
    }

    fn write16(&mut self, addr: u32, value: u16) {
        let addr = addr & !1;
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.store(addr + i as u32, byte);
        }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        let addr = addr & !3;
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.store(addr + i as u32, byte);
        }
    }

    /// Game title and game code from the cartridge header (0xA0..0xB0).
    fn cartridge_id(&self) -> [u8; 16] {
        let mut id = [0u8; 16];
        if let Some(header) = self.rom.get(0xA0..0xB0) {
            id.copy_from_slice(header);
        }
        id
    }

    fn state_blocks(&self) -> Vec<&[u8]> {
        vec![
            self.iwram.as_slice(),
            self.palette.as_slice(),
            self.ewram.as_slice(),
            self.vram.as_slice(),
            self.oam.as_slice(),
            self.sram.as_slice(),
        ]
    }

    fn state_blocks_mut(&mut self) -> Vec<&mut [u8]> {
        vec![
            self.iwram.as_mut_slice(),
            self.palette.as_mut_slice(),
            self.ewram.as_mut_slice(),
            self.vram.as_mut_slice(),
            self.oam.as_mut_slice(),
            self.sram.as_mut_slice(),
        ]
    }
}
