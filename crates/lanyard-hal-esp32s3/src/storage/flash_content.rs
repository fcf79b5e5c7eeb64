//! Flash-backed badge content store.
//!
//! The record lives in the first sector of the first writable data
//! partition, found via the bootloader partition table.

use embedded_storage::{ReadStorage, Storage};
use esp_bootloader_esp_idf::partitions::{
    DataPartitionSubType, PARTITION_TABLE_MAX_LEN, PartitionType, read_partition_table,
};
use esp_rom_sys::rom::spiflash::{
    ESP_ROM_SPIFLASH_RESULT_OK, esp_rom_spiflash_erase_sector, esp_rom_spiflash_read,
    esp_rom_spiflash_unlock, esp_rom_spiflash_write,
};
use lanyard_core::content::ContentStore;
use log::debug;

use super::record::{self, RECORD_LEN, RecordError};

const FLASH_SECTOR_SIZE: u32 = 4096;
const DEFAULT_FLASH_CAPACITY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FlashContentError {
    PartitionTable,
    ContentPartitionMissing,
    PartitionTooSmall,
    FlashOpFailed(i32),
    Record(RecordError),
    Unsupported,
}

impl From<RecordError> for FlashContentError {
    fn from(err: RecordError) -> Self {
        Self::Record(err)
    }
}

/// Word-granular access to the SPI flash via the ROM routines.
///
/// All addresses and lengths handled here are 4-byte aligned; the
/// record layout guarantees that.
#[derive(Debug)]
struct RawFlash;

impl RawFlash {
    fn new() -> Result<Self, FlashContentError> {
        let rc = unsafe { esp_rom_spiflash_unlock() };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashContentError::FlashOpFailed(rc));
        }
        Ok(Self)
    }

    fn erase_sector(&mut self, sector_addr: u32) -> Result<(), FlashContentError> {
        if !sector_addr.is_multiple_of(FLASH_SECTOR_SIZE) {
            return Err(FlashContentError::Unsupported);
        }

        let rc = unsafe { esp_rom_spiflash_erase_sector(sector_addr / FLASH_SECTOR_SIZE) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashContentError::FlashOpFailed(rc));
        }
        Ok(())
    }

    fn read_word(&mut self, addr: u32) -> Result<u32, FlashContentError> {
        if !addr.is_multiple_of(4) {
            return Err(FlashContentError::Unsupported);
        }

        let mut word = 0u32;
        let rc = unsafe { esp_rom_spiflash_read(addr, &mut word as *mut u32 as *const u32, 4) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashContentError::FlashOpFailed(rc));
        }
        Ok(word)
    }

    fn write_word(&mut self, addr: u32, word: u32) -> Result<(), FlashContentError> {
        if !addr.is_multiple_of(4) {
            return Err(FlashContentError::Unsupported);
        }

        let rc = unsafe { esp_rom_spiflash_write(addr, &word as *const u32, 4) };
        if rc != ESP_ROM_SPIFLASH_RESULT_OK {
            return Err(FlashContentError::FlashOpFailed(rc));
        }
        Ok(())
    }

    fn read_aligned(&mut self, addr: u32, out: &mut [u8]) -> Result<(), FlashContentError> {
        if !addr.is_multiple_of(4) || !out.len().is_multiple_of(4) {
            return Err(FlashContentError::Unsupported);
        }

        for (i, chunk) in out.chunks_exact_mut(4).enumerate() {
            let word = self.read_word(addr + 4 * i as u32)?;
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Ok(())
    }

    fn write_erased_aligned(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashContentError> {
        if !addr.is_multiple_of(4) || !data.len().is_multiple_of(4) {
            return Err(FlashContentError::Unsupported);
        }

        for (i, chunk) in data.chunks_exact(4).enumerate() {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            self.write_word(addr + 4 * i as u32, word)?;
        }
        Ok(())
    }
}

impl ReadStorage for RawFlash {
    type Error = FlashContentError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        // The partition table parser reads in unaligned chunks; go
        // through an aligned bounce word at the edges.
        let mut cursor = 0usize;
        while cursor < bytes.len() {
            let addr = offset + cursor as u32;
            let word_addr = addr & !0b11;
            let mut word = [0u8; 4];
            self.read_aligned(word_addr, &mut word)?;

            let skip = (addr - word_addr) as usize;
            let take = (4 - skip).min(bytes.len() - cursor);
            bytes[cursor..cursor + take].copy_from_slice(&word[skip..skip + take]);
            cursor += take;
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        DEFAULT_FLASH_CAPACITY_BYTES
    }
}

impl Storage for RawFlash {
    fn write(&mut self, _offset: u32, _bytes: &[u8]) -> Result<(), Self::Error> {
        Err(FlashContentError::Unsupported)
    }
}

/// [`ContentStore`] over one flash sector.
#[derive(Debug)]
pub struct FlashContentStore {
    flash: RawFlash,
    sector_addr: u32,
}

impl FlashContentStore {
    pub fn new() -> Result<Self, FlashContentError> {
        let mut flash = RawFlash::new()?;

        let mut table_buf = [0u8; PARTITION_TABLE_MAX_LEN];
        let table = read_partition_table(&mut flash, &mut table_buf)
            .map_err(|_| FlashContentError::PartitionTable)?;

        let mut data_undefined: Option<(u32, u32)> = None;
        let mut fallback_nvs: Option<(u32, u32)> = None;

        for entry in table.iter() {
            if entry.is_read_only() || entry.len() < FLASH_SECTOR_SIZE {
                continue;
            }

            match entry.partition_type() {
                PartitionType::Data(DataPartitionSubType::Undefined) => {
                    data_undefined = Some((entry.offset(), entry.len()));
                    break;
                }
                PartitionType::Data(DataPartitionSubType::Nvs) => {
                    if fallback_nvs.is_none() {
                        fallback_nvs = Some((entry.offset(), entry.len()));
                    }
                }
                _ => {}
            }
        }

        let (offset, len) = data_undefined
            .or(fallback_nvs)
            .ok_or(FlashContentError::ContentPartitionMissing)?;
        if len < FLASH_SECTOR_SIZE {
            return Err(FlashContentError::PartitionTooSmall);
        }

        debug!("content store at flash offset {offset:#x}");
        Ok(Self {
            flash,
            sector_addr: offset,
        })
    }
}

impl ContentStore for FlashContentStore {
    type Error = FlashContentError;

    fn read(&mut self, out: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        let mut image = [0u8; RECORD_LEN];
        self.flash.read_aligned(self.sector_addr, &mut image)?;

        match record::decode(&image)? {
            Some(payload) => {
                let len = payload.len().min(out.len());
                out[..len].copy_from_slice(&payload[..len]);
                Ok(Some(len))
            }
            None => Ok(None),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut image = [0u8; RECORD_LEN];
        record::encode(data, &mut image)?;

        self.flash.erase_sector(self.sector_addr)?;
        self.flash.write_erased_aligned(self.sector_addr, &image)
    }
}
