#![cfg_attr(not(test), no_std)]

//! UC8151 (296x128 monochrome e-ink) driver primitives.

mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;
pub use protocol::UpdateSpeed;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Refresh waveform/frame-rate selection.
    pub speed: UpdateSpeed,
    /// Scan rows bottom-up.
    pub flip_vertical: bool,
    /// Shift columns right-to-left.
    pub flip_horizontal: bool,
    /// Reset pulse width in microseconds.
    pub reset_pulse_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: UpdateSpeed::Default,
            flip_vertical: false,
            flip_horizontal: false,
            reset_pulse_us: 10_000,
        }
    }
}

impl Config {
    pub const fn with_speed(mut self, speed: UpdateSpeed) -> Self {
        self.speed = speed;
        self
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, BusyErr, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// DC pin operation failed.
    Dc(DcErr),
    /// BUSY pin read failed.
    Busy(BusyErr),
    /// RESET pin operation failed.
    Rst(RstErr),
}

pub type DriverResult<SpiErr, DcErr, BusyErr, RstErr> =
    Result<(), Error<SpiErr, DcErr, BusyErr, RstErr>>;

/// UC8151 driver.
///
/// The controller is addressed with command/data framing on a shared
/// SPI bus: DC low for the command byte, DC high for its payload. BUSY
/// is active low while a refresh or power transition is in flight.
#[derive(Debug)]
pub struct Uc8151<SPI, DC, BUSY, RST> {
    spi: SPI,
    dc: DC,
    busy: BUSY,
    rst: RST,
    config: Config,
}

impl<SPI, DC, BUSY, RST> Uc8151<SPI, DC, BUSY, RST>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    BUSY: InputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, dc: DC, busy: BUSY, rst: RST, config: Config) -> Self {
        Self {
            spi,
            dc,
            busy,
            rst,
            config,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, BUSY, RST) {
        (self.spi, self.dc, self.busy, self.rst)
    }

    fn command(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(&[command]).map_err(Error::Spi)?;

        if !data.is_empty() {
            self.dc.set_high().map_err(Error::Dc)?;
            self.spi.write(data).map_err(Error::Spi)?;
        }

        Ok(())
    }

    /// Blocks until the controller deasserts BUSY.
    pub fn wait_while_busy<D>(
        &mut self,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error>
    where
        D: DelayNs,
    {
        while self.busy.is_low().map_err(Error::Busy)? {
            delay.delay_us(100);
        }
        Ok(())
    }

    /// Pulses RESET and waits for the controller to settle.
    pub fn reset<D>(
        &mut self,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.rst.set_low().map_err(Error::Rst)?;
        delay.delay_us(self.config.reset_pulse_us);
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_us(self.config.reset_pulse_us);
        self.wait_while_busy(delay)
    }

    /// Resets and programs panel, power, booster, and timing registers.
    pub fn initialize<D>(
        &mut self,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.reset(delay)?;

        let psr = protocol::psr_byte(self.config.flip_vertical, self.config.flip_horizontal);
        self.command(protocol::CMD_PSR, &[psr])?;
        self.command(protocol::CMD_PWR, &protocol::PWR_DATA)?;
        self.command(protocol::CMD_BTST, &protocol::BTST_DATA)?;
        self.command(protocol::CMD_PFS, &[protocol::pfs_byte(self.config.speed)])?;
        self.command(protocol::CMD_TSE, &[protocol::TSE_DATA])?;
        self.command(protocol::CMD_TCON, &[protocol::TCON_DATA])?;
        self.command(protocol::CMD_CDI, &[protocol::CDI_DATA])?;
        self.command(protocol::CMD_PLL, &[self.config.speed.pll_byte()])?;

        Ok(())
    }

    /// Transfers a full frame and runs one refresh cycle.
    ///
    /// Powers the source/gate drivers on for the refresh and back off
    /// afterwards; returns once the panel is idle again.
    pub fn update_frame<D>(
        &mut self,
        frame: &FrameBuffer,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.command(protocol::CMD_PON, &[])?;
        self.wait_while_busy(delay)?;

        self.command(protocol::CMD_DTM2, frame.bytes())?;
        self.command(protocol::CMD_DSP, &[])?;

        self.command(protocol::CMD_DRF, &[])?;
        self.wait_while_busy(delay)?;

        self.command(protocol::CMD_POF, &[])?;
        self.wait_while_busy(delay)
    }

    /// Puts the controller into deep sleep; requires a reset to wake.
    pub fn deep_sleep(
        &mut self,
    ) -> DriverResult<SPI::Error, DC::Error, BUSY::Error, RST::Error> {
        self.command(protocol::CMD_DSLP, &[protocol::DSLP_CHECK_CODE])
    }
}
