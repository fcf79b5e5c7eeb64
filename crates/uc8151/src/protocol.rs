//! Register-level protocol helpers for UC8151.

/// Panel width in pixels.
pub const WIDTH: usize = 296;
/// Panel height in pixels.
pub const HEIGHT: usize = 128;
/// Number of bytes in one display line.
pub const LINE_BYTES: usize = WIDTH / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

/// Panel setting.
pub const CMD_PSR: u8 = 0x00;
/// Power setting.
pub const CMD_PWR: u8 = 0x01;
/// Power off.
pub const CMD_POF: u8 = 0x02;
/// Power off sequence setting.
pub const CMD_PFS: u8 = 0x03;
/// Power on.
pub const CMD_PON: u8 = 0x04;
/// Booster soft start.
pub const CMD_BTST: u8 = 0x06;
/// Deep sleep.
pub const CMD_DSLP: u8 = 0x07;
/// Data start transmission (frame raster).
pub const CMD_DTM2: u8 = 0x13;
/// Data stop.
pub const CMD_DSP: u8 = 0x11;
/// Display refresh.
pub const CMD_DRF: u8 = 0x12;
/// PLL control (frame rate).
pub const CMD_PLL: u8 = 0x30;
/// Temperature sensor enable.
pub const CMD_TSE: u8 = 0x41;
/// Vcom and data interval setting.
pub const CMD_CDI: u8 = 0x50;
/// Gate/source non-overlap period.
pub const CMD_TCON: u8 = 0x60;

/// Magic byte required by the deep sleep command.
pub const DSLP_CHECK_CODE: u8 = 0xA5;

/// Refresh waveform selection.
///
/// The panel's OTP waveform tables are used for every speed; the speed
/// only selects the PLL frame rate and, for the faster modes, shorter
/// power-off sequencing. Custom register waveforms are not carried.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UpdateSpeed {
    /// Full-quality refresh, no ghosting cleanup shortcuts.
    #[default]
    Default,
    Medium,
    Fast,
    Turbo,
}

impl UpdateSpeed {
    /// PLL frame-rate byte for this speed.
    pub const fn pll_byte(self) -> u8 {
        match self {
            // 100 Hz
            Self::Default | Self::Medium => 0x3A,
            // 200 Hz
            Self::Fast | Self::Turbo => 0x3C,
        }
    }
}

// PSR flag bits.
const PSR_RES_128X296: u8 = 0b1000_0000;
const PSR_FORMAT_BW: u8 = 0b0001_0000;
const PSR_SCAN_UP: u8 = 0b0000_1000;
const PSR_SHIFT_RIGHT: u8 = 0b0000_0100;
const PSR_BOOSTER_ON: u8 = 0b0000_0010;
const PSR_RESET_NONE: u8 = 0b0000_0001;

/// Builds the panel setting byte.
///
/// Resolution, black/white format, and booster bits are fixed for this
/// panel; only the scan/shift orientation is selectable.
#[inline]
pub const fn psr_byte(flip_vertical: bool, flip_horizontal: bool) -> u8 {
    let mut byte = PSR_RES_128X296 | PSR_FORMAT_BW | PSR_BOOSTER_ON | PSR_RESET_NONE;
    if !flip_vertical {
        byte |= PSR_SCAN_UP;
    }
    if !flip_horizontal {
        byte |= PSR_SHIFT_RIGHT;
    }
    byte
}

/// Power setting payload: internal DC/DC, 16 V gate levels, 11 V source
/// levels.
pub const PWR_DATA: [u8; 5] = [0x03, 0x00, 0x2B, 0x2B, 0x2B];

/// Booster soft-start payload: 10 ms phase, strength 3, 6.58 us off time.
pub const BTST_DATA: [u8; 3] = [0x17, 0x17, 0x17];

/// Power-off sequence payload for a given speed (frames of hold time).
#[inline]
pub const fn pfs_byte(speed: UpdateSpeed) -> u8 {
    match speed {
        UpdateSpeed::Default | UpdateSpeed::Medium => 0x00,
        UpdateSpeed::Fast | UpdateSpeed::Turbo => 0x10,
    }
}

/// Temperature sensor payload: internal sensor, zero offset.
pub const TSE_DATA: u8 = 0x00;

/// Vcom/data interval payload: 10 interval frames, default polarity.
pub const CDI_DATA: u8 = 0x4C;

/// Gate/source non-overlap payload.
pub const TCON_DATA: u8 = 0x22;
