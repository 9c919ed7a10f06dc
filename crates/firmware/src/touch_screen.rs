//! FT5336 capacitive touch controller driver (blocking I2C).
//!
//! The RK043FN48H panel on this board carries an FT5336 at I2C address
//! 0x38. One register burst per poll is enough for the player: the point
//! count plus the first point's coordinates.
//!
//! # Register map (FT5336 datasheet §7)
//!
//! | Register | Name       | Contents                         |
//! |----------|------------|----------------------------------|
//! | 0x02     | TD_STATUS  | bits[3:0] = number of points     |
//! | 0x03     | P1_XH      | bits[3:0] = X[11:8]              |
//! | 0x04     | P1_XL      | X[7:0]                           |
//! | 0x05     | P1_YH      | bits[3:0] = Y[11:8]              |
//! | 0x06     | P1_YL      | Y[7:0]                           |
//!
//! Multi-touch is truncated to the first reported point; the transport
//! controls are single-finger targets.

use embedded_graphics::prelude::Point;
use embedded_hal::i2c::I2c;
use platform::touch::TouchPanel;

/// FT5336 7-bit I2C address.
pub const FT5336_ADDR: u8 = 0x38;

/// First register of the status + point-1 burst.
const REG_TD_STATUS: u8 = 0x02;

/// The FT5336 reports at most 5 simultaneous points; a larger count is a
/// corrupt read.
const MAX_POINTS: u8 = 5;

/// FT5336 driver over any blocking I2C bus.
pub struct Ft5336<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ft5336<I2C> {
    /// Wrap an I2C bus. The controller needs no init sequence for polled
    /// operation; it powers up reporting.
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Read the first touch point, if any.
    ///
    /// # Errors
    ///
    /// Propagates I2C bus errors.
    pub fn read_point(&mut self) -> Result<Option<Point>, I2C::Error> {
        let mut buf = [0u8; 5];
        self.i2c.write_read(FT5336_ADDR, &[REG_TD_STATUS], &mut buf)?;

        let points = buf[0] & 0x0F;
        if points == 0 || points > MAX_POINTS {
            return Ok(None);
        }
        let x = (u16::from(buf[1] & 0x0F) << 8) | u16::from(buf[2]);
        let y = (u16::from(buf[3] & 0x0F) << 8) | u16::from(buf[4]);
        Ok(Some(Point::new(i32::from(x), i32::from(y))))
    }
}

impl<I2C: I2c> TouchPanel for Ft5336<I2C> {
    fn read(&mut self) -> Option<Point> {
        // A bus error reads as "no touch": input degrades, playback
        // continues.
        self.read_point().ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    #[test]
    fn test_one_point_is_decoded() {
        let expectations = [Transaction::write_read(
            FT5336_ADDR,
            vec![REG_TD_STATUS],
            // 1 point at (0x123, 0x045)
            vec![0x01, 0x01, 0x23, 0x00, 0x45],
        )];
        let mut touch = Ft5336::new(Mock::new(&expectations));
        assert_eq!(touch.read(), Some(Point::new(0x123, 0x045)));
        touch.i2c.done();
    }

    #[test]
    fn test_no_points_reads_as_none() {
        let expectations = [Transaction::write_read(
            FT5336_ADDR,
            vec![REG_TD_STATUS],
            vec![0x00, 0x00, 0x00, 0x00, 0x00],
        )];
        let mut touch = Ft5336::new(Mock::new(&expectations));
        assert_eq!(touch.read(), None);
        touch.i2c.done();
    }

    #[test]
    fn test_corrupt_count_reads_as_none() {
        let expectations = [Transaction::write_read(
            FT5336_ADDR,
            vec![REG_TD_STATUS],
            vec![0x0F, 0x01, 0x23, 0x00, 0x45],
        )];
        let mut touch = Ft5336::new(Mock::new(&expectations));
        assert_eq!(touch.read(), None);
        touch.i2c.done();
    }

    #[test]
    fn test_multi_touch_truncates_to_first_point() {
        let expectations = [Transaction::write_read(
            FT5336_ADDR,
            vec![REG_TD_STATUS],
            // 3 points; only P1 is read.
            vec![0x03, 0x00, 0x10, 0x00, 0x20],
        )];
        let mut touch = Ft5336::new(Mock::new(&expectations));
        assert_eq!(touch.read(), Some(Point::new(0x10, 0x20)));
        touch.i2c.done();
    }

    #[test]
    fn test_bus_error_degrades_to_no_touch() {
        let expectations = [Transaction::write_read(
            FT5336_ADDR,
            vec![REG_TD_STATUS],
            vec![0x01, 0x01, 0x23, 0x00, 0x45],
        )
        .with_error(embedded_hal::i2c::ErrorKind::Bus)];
        let mut touch = Ft5336::new(Mock::new(&expectations));
        assert_eq!(touch.read(), None);
        touch.i2c.done();
    }
}
