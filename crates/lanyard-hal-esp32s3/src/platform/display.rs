//! Board-level e-ink panel adapter.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use uc8151::{Config, FrameBuffer, Uc8151};

use crate::render::PanelFlush;

/// UC8151 panel plus the delay source its refresh sequencing needs.
///
/// Owns the driver so the canvas can treat "flush" as a single
/// operation; a refresh blocks until the panel is idle again.
#[derive(Debug)]
pub struct EinkPanel<SPI, DC, BUSY, RST, D> {
    driver: Uc8151<SPI, DC, BUSY, RST>,
    delay: D,
}

impl<SPI, DC, BUSY, RST, D> EinkPanel<SPI, DC, BUSY, RST, D>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    BUSY: InputPin,
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, busy: BUSY, rst: RST, config: Config, delay: D) -> Self {
        Self {
            driver: Uc8151::new(spi, dc, busy, rst, config),
            delay,
        }
    }

    /// Resets and programs the controller. Must run once before the
    /// first flush.
    pub fn initialize(
        &mut self,
    ) -> Result<(), uc8151::Error<SPI::Error, DC::Error, BUSY::Error, RST::Error>> {
        self.driver.initialize(&mut self.delay)
    }

    /// Puts the controller into deep sleep for battery life; a reset
    /// pulse wakes it.
    pub fn deep_sleep(
        &mut self,
    ) -> Result<(), uc8151::Error<SPI::Error, DC::Error, BUSY::Error, RST::Error>> {
        self.driver.deep_sleep()
    }
}

impl<SPI, DC, BUSY, RST, D> PanelFlush for EinkPanel<SPI, DC, BUSY, RST, D>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    BUSY: InputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = uc8151::Error<SPI::Error, DC::Error, BUSY::Error, RST::Error>;

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.driver.update_frame(frame, &mut self.delay)
    }
}
