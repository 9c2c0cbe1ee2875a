//! MAX7219 dot-matrix driver (write-only SPI)
//!
//! The MAX7219 multiplexes an 8x8 LED matrix behind a serial link.
//! Every transaction is one 16-bit frame, register address then data,
//! latched on chip-select release. The link is write-only: nothing can
//! be read back, so the only feedback channel is the LEDs themselves
//! and the driver simply trusts that accepted writes took effect.
//!
//! # Register map
//!
//! Digit registers 1-8 each hold one row of pixels. The control
//! registers set decode mode, intensity, scan limit, shutdown and
//! display test; the chip powers up in shutdown with those registers
//! in an unknown-but-benign state, which is why [`Max7219::init`] must
//! run before the first frame is written.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use pharos_core::bitmap::Bitmap;
use pharos_core::{glyphs, greeting};

/// MAX7219 register addresses
pub mod reg {
    /// No-op, for clocking through daisy-chained chips
    pub const NO_OP: u8 = 0x00;
    /// First row register; row N lives at DIGIT0 + N
    pub const DIGIT0: u8 = 0x01;
    /// BCD decode enable per digit (raw pixel data wants 0)
    pub const DECODE_MODE: u8 = 0x09;
    /// Brightness, 16 duty-cycle steps (0x00-0x0F)
    pub const INTENSITY: u8 = 0x0A;
    /// Highest scanned digit (rows 0..=N driven)
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// 0 = shutdown, 1 = normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// 1 = every LED forced on at max current
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// One 16-bit register write, the only transaction the chip accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub addr: u8,
    pub data: u8,
}

impl Command {
    pub const fn new(addr: u8, data: u8) -> Self {
        Self { addr, data }
    }

    /// Wire form: address byte shifted out first.
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.addr, self.data]
    }

    /// The write that puts `data` on matrix row `row` (0-7).
    pub const fn digit(row: usize, data: u8) -> Self {
        Self {
            addr: reg::DIGIT0 + row as u8,
            data,
        }
    }
}

/// MAX7219 driver configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Max7219Config {
    /// Brightness (0x00-0x0F); out-of-range values clamp to the top step
    pub intensity: u8,
}

impl Default for Max7219Config {
    fn default() -> Self {
        Self { intensity: 0x08 }
    }
}

impl Max7219Config {
    /// Intensity clamped to the register's 4-bit range.
    pub fn intensity_level(&self) -> u8 {
        self.intensity.min(0x0F)
    }
}

/// Build the power-up sequence for `config`.
///
/// Ordering matters: brightness and scan range are set first, then
/// display test is released, and shutdown is left last so the matrix
/// wakes directly into the configured state.
pub fn init_commands(config: &Max7219Config) -> [Command; 4] {
    [
        Command::new(reg::INTENSITY, config.intensity_level()),
        Command::new(reg::SCAN_LIMIT, 0x07),
        Command::new(reg::DISPLAY_TEST, 0x00),
        Command::new(reg::SHUTDOWN, 0x01),
    ]
}

/// Build the eight digit writes that put `frame` on the matrix,
/// row 0 first.
pub fn row_commands(frame: &Bitmap) -> [Command; 8] {
    let rows = frame.rows();
    let mut cmds = [Command::new(reg::NO_OP, 0); 8];
    for (i, cmd) in cmds.iter_mut().enumerate() {
        *cmd = Command::digit(i, rows[i]);
    }
    cmds
}

/// MAX7219 dot-matrix driver
///
/// Generic over an [`SpiDevice`] so host tests can substitute a mock
/// bus. Every operation is a burst of pure writes and surfaces the
/// bus's own error type; a failed write aborts the rest of the burst.
pub struct Max7219<SPI> {
    spi: SPI,
    config: Max7219Config,
}

impl<SPI> Max7219<SPI>
where
    SPI: SpiDevice,
{
    /// Create a driver with default configuration.
    pub fn new(spi: SPI) -> Self {
        Self::with_config(spi, Max7219Config::default())
    }

    /// Create a driver with explicit configuration.
    pub fn with_config(spi: SPI, config: Max7219Config) -> Self {
        Self { spi, config }
    }

    /// Send one register write.
    async fn command(&mut self, cmd: Command) -> Result<(), SPI::Error> {
        self.spi.write(&cmd.to_bytes()).await
    }

    /// Wake the matrix into a known state.
    ///
    /// Must complete before the first [`set_rows`](Self::set_rows):
    /// until shutdown is released the chip shows nothing, and its row
    /// registers hold power-up garbage.
    pub async fn init(&mut self) -> Result<(), SPI::Error> {
        for cmd in init_commands(&self.config) {
            self.command(cmd).await?;
        }
        Ok(())
    }

    /// Put a full frame on the matrix, row 0 first.
    pub async fn set_rows(&mut self, frame: &Bitmap) -> Result<(), SPI::Error> {
        for cmd in row_commands(frame) {
            self.command(cmd).await?;
        }
        Ok(())
    }

    /// Blank the display (every row off).
    pub async fn clear(&mut self) -> Result<(), SPI::Error> {
        self.set_rows(&glyphs::BLANK).await
    }

    /// Play the HELLO WORLD greeting to the end.
    ///
    /// Writes every phase of the script and waits out each hold on
    /// `delay`. Runs to completion once started; the final phase
    /// leaves the display dark.
    pub async fn play_greeting<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI::Error> {
        for phase in greeting::phases() {
            self.set_rows(phase.frame).await?;
            delay.delay_ms(phase.hold_ms).await;
        }
        Ok(())
    }

    /// Change brightness at runtime (clamped to the 4-bit range).
    pub async fn set_intensity(&mut self, intensity: u8) -> Result<(), SPI::Error> {
        self.config.intensity = intensity;
        self.command(Command::new(reg::INTENSITY, self.config.intensity_level()))
            .await
    }

    /// Enter or leave shutdown. In shutdown the display blanks but the
    /// row registers keep their contents.
    pub async fn set_power(&mut self, on: bool) -> Result<(), SPI::Error> {
        self.command(Command::new(reg::SHUTDOWN, on as u8)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_async::spi::{Error, ErrorKind, ErrorType, Operation};
    use futures::executor::block_on;
    use heapless::Vec;

    /// Mock bus that records every 16-bit frame the driver shifts out.
    struct BusLog {
        writes: Vec<(u8, u8), 256>,
        issued: usize,
        fail_at: Option<usize>,
    }

    impl BusLog {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                issued: 0,
                fail_at: None,
            }
        }

        /// Fail the Nth write (0-based) with a bus fault.
        fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::new()
            }
        }

        fn pairs(&self) -> &[(u8, u8)] {
            &self.writes
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for BusLog {
        type Error = BusFault;
    }

    impl SpiDevice for BusLog {
        async fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), BusFault> {
            for op in operations.iter() {
                match op {
                    Operation::Write(buf) => {
                        if self.fail_at == Some(self.issued) {
                            return Err(BusFault);
                        }
                        self.issued += 1;
                        assert_eq!(buf.len(), 2, "matrix transactions are 16-bit frames");
                        self.writes.push((buf[0], buf[1])).unwrap();
                    }
                    _ => panic!("link is write-only"),
                }
            }
            Ok(())
        }
    }

    /// Mock delay that records requested holds instead of sleeping.
    struct DelayLog {
        holds_ms: Vec<u32, 32>,
    }

    impl DelayLog {
        fn new() -> Self {
            Self { holds_ms: Vec::new() }
        }
    }

    impl DelayNs for DelayLog {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.holds_ms.push(ms).unwrap();
        }
    }

    #[test]
    fn test_command_wire_order() {
        let cmd = Command::new(reg::INTENSITY, 0x08);
        assert_eq!(cmd.to_bytes(), [0x0A, 0x08]);
        assert_eq!(Command::digit(0, 0x7F), Command::new(0x01, 0x7F));
        assert_eq!(Command::digit(7, 0x01), Command::new(0x08, 0x01));
    }

    #[test]
    fn test_init_commands_literal() {
        let cmds = init_commands(&Max7219Config::default());
        assert_eq!(cmds[0], Command::new(0x0A, 0x08));
        assert_eq!(cmds[1], Command::new(0x0B, 0x07));
        assert_eq!(cmds[2], Command::new(0x0F, 0x00));
        assert_eq!(cmds[3], Command::new(0x0C, 0x01));
    }

    #[test]
    fn test_row_commands_cover_digits() {
        let frame = Bitmap::new([0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80]);
        let cmds = row_commands(&frame);
        for (i, cmd) in cmds.iter().enumerate() {
            assert_eq!(cmd.addr, (i + 1) as u8);
            assert_eq!(cmd.data, frame.row(i));
        }
    }

    #[test]
    fn test_intensity_clamps_to_register_range() {
        let config = Max7219Config { intensity: 0x5A };
        assert_eq!(config.intensity_level(), 0x0F);
        assert_eq!(init_commands(&config)[0], Command::new(0x0A, 0x0F));
    }

    #[test]
    fn test_init_sequence_on_the_wire() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.init()).unwrap();
        assert_eq!(
            matrix.spi.pairs(),
            &[(0x0A, 0x08), (0x0B, 0x07), (0x0F, 0x00), (0x0C, 0x01)]
        );
    }

    #[test]
    fn test_init_uses_configured_intensity() {
        let config = Max7219Config { intensity: 0x03 };
        let mut matrix = Max7219::with_config(BusLog::new(), config);
        block_on(matrix.init()).unwrap();
        assert_eq!(matrix.spi.pairs()[0], (0x0A, 0x03));
    }

    #[test]
    fn test_set_rows_writes_ascending_digits() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.set_rows(&glyphs::SMILEY)).unwrap();
        let rows = glyphs::SMILEY.rows();
        assert_eq!(matrix.spi.pairs().len(), 8);
        for (i, pair) in matrix.spi.pairs().iter().enumerate() {
            assert_eq!(*pair, ((i + 1) as u8, rows[i]));
        }
    }

    #[test]
    fn test_set_rows_is_idempotent_on_the_wire() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.set_rows(&glyphs::HEART)).unwrap();
        block_on(matrix.set_rows(&glyphs::HEART)).unwrap();
        let pairs = matrix.spi.pairs();
        assert_eq!(pairs.len(), 16);
        assert_eq!(&pairs[..8], &pairs[8..]);
    }

    #[test]
    fn test_clear_blanks_every_row() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.clear()).unwrap();
        for (i, pair) in matrix.spi.pairs().iter().enumerate() {
            assert_eq!(*pair, ((i + 1) as u8, 0x00));
        }
    }

    #[test]
    fn test_greeting_script_on_the_wire() {
        let mut matrix = Max7219::new(BusLog::new());
        let mut delay = DelayLog::new();
        block_on(matrix.play_greeting(&mut delay)).unwrap();

        // 13 frames, each followed by a blank: 26 frames of 8 rows.
        let pairs = matrix.spi.pairs();
        assert_eq!(pairs.len(), 26 * 8);
        for (n, chunk) in pairs.chunks(8).enumerate() {
            let expected = if n % 2 == 0 {
                greeting::GREETING[n / 2]
            } else {
                &glyphs::BLANK
            };
            for (i, pair) in chunk.iter().enumerate() {
                assert_eq!(*pair, ((i + 1) as u8, expected.row(i)));
            }
        }

        // Holds alternate letter/gap for every frame of the script.
        assert_eq!(delay.holds_ms.len(), 26);
        for (n, hold) in delay.holds_ms.iter().enumerate() {
            let expected = if n % 2 == 0 {
                greeting::LETTER_HOLD_MS
            } else {
                greeting::BLANK_GAP_MS
            };
            assert_eq!(*hold, expected);
        }
    }

    #[test]
    fn test_greeting_ends_dark() {
        let mut matrix = Max7219::new(BusLog::new());
        let mut delay = DelayLog::new();
        block_on(matrix.play_greeting(&mut delay)).unwrap();
        let pairs = matrix.spi.pairs();
        let last_frame = &pairs[pairs.len() - 8..];
        assert!(last_frame.iter().all(|(_, data)| *data == 0x00));
    }

    #[test]
    fn test_bus_fault_aborts_burst() {
        let mut matrix = Max7219::new(BusLog::failing_at(2));
        assert_eq!(block_on(matrix.init()), Err(BusFault));
        // The two writes before the fault went out, nothing after.
        assert_eq!(matrix.spi.pairs(), &[(0x0A, 0x08), (0x0B, 0x07)]);
    }

    #[test]
    fn test_bus_fault_surfaces_from_set_rows() {
        let mut matrix = Max7219::new(BusLog::failing_at(5));
        assert_eq!(block_on(matrix.set_rows(&glyphs::HEART)), Err(BusFault));
        assert_eq!(matrix.spi.pairs().len(), 5);
    }

    #[test]
    fn test_bus_fault_surfaces_from_greeting() {
        // Fail partway into the third frame of the script.
        let mut matrix = Max7219::new(BusLog::failing_at(20));
        let mut delay = DelayLog::new();
        assert_eq!(block_on(matrix.play_greeting(&mut delay)), Err(BusFault));
        assert_eq!(matrix.spi.pairs().len(), 20);
        // The two completed frames were held; the broken one was not.
        assert_eq!(delay.holds_ms.len(), 2);
    }

    #[test]
    fn test_set_intensity_clamps_and_writes() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.set_intensity(0x04)).unwrap();
        block_on(matrix.set_intensity(0xFF)).unwrap();
        assert_eq!(matrix.spi.pairs(), &[(0x0A, 0x04), (0x0A, 0x0F)]);
    }

    #[test]
    fn test_set_power_toggles_shutdown() {
        let mut matrix = Max7219::new(BusLog::new());
        block_on(matrix.set_power(false)).unwrap();
        block_on(matrix.set_power(true)).unwrap();
        assert_eq!(matrix.spi.pairs(), &[(0x0C, 0x00), (0x0C, 0x01)]);
    }
}
