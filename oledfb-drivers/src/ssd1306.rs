//! SSD1306 display session
//!
//! Owns the transport, the canvas and the text cursor for one panel.
//! Drawing only touches the canvas; nothing reaches the panel until
//! [`Ssd1306::refresh`] serializes the whole frame.
//!
//! Bus errors are returned to the caller as they happen. There is no retry
//! and no partial-frame bookkeeping: a failed refresh leaves the panel
//! showing whatever pages made it across, and the next refresh resends
//! everything.

use oledfb_core::{
    blit, Bitmap, BlitSummary, Canvas, DecodeMode, DisplayConfig, DrawError, FlushMode,
    FontTable, Geometry, GeometryError, PageSerializer, Placement, TestPattern, TextCursor,
    TextLength,
};
use oledfb_hal::{Timeout, Transport};
use oledfb_protocol::{command, command_stream, encode, init_sequence, PacketError};

/// Errors from a display session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport rejected a write
    Transport(E),
    /// A drawing operation failed
    Draw(DrawError),
    /// The configured dimensions are not supported
    Geometry(GeometryError),
    /// A command did not fit in a packet
    Packet(PacketError),
}

impl<E> From<DrawError> for Error<E> {
    fn from(err: DrawError) -> Self {
        Error::Draw(err)
    }
}

impl<E> From<GeometryError> for Error<E> {
    fn from(err: GeometryError) -> Self {
        Error::Geometry(err)
    }
}

impl<E> From<PacketError> for Error<E> {
    fn from(err: PacketError) -> Self {
        Error::Packet(err)
    }
}

/// SSD1306 panel session
pub struct Ssd1306<T, F> {
    transport: T,
    font: F,
    config: DisplayConfig,
    canvas: Canvas,
    cursor: TextCursor,
}

impl<T, F> Ssd1306<T, F>
where
    T: Transport,
    F: FontTable,
{
    /// Create a session for the panel described by `config`
    ///
    /// Nothing is sent; call [`Ssd1306::init`] before the first refresh.
    pub fn new(transport: T, font: F, config: DisplayConfig) -> Result<Self, Error<T::Error>> {
        let geometry = config.geometry()?;
        Ok(Self {
            transport,
            font,
            config,
            canvas: Canvas::new(geometry),
            cursor: TextCursor::new(),
        })
    }

    /// Panel geometry
    pub fn geometry(&self) -> &Geometry {
        self.canvas.geometry()
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Current frame contents
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable frame access, for drawing with other tools
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Text cursor
    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    /// Tear down the session, returning the transport and font
    pub fn release(self) -> (T, F) {
        (self.transport, self.font)
    }

    fn timeout(&self) -> Timeout {
        Timeout::from_millis(self.config.timeout_ms)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        let address = self.config.address;
        let timeout = self.timeout();
        self.transport
            .write(address, bytes, timeout)
            .map_err(|err| {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "ssd1306: write of {} bytes to {=u8:#x} failed",
                    bytes.len(),
                    address
                );
                Error::Transport(err)
            })
    }

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Error<T::Error>> {
        let packet = command_stream(commands)?;
        self.send(&packet)
    }

    /// Send the power-on initialization sequence
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        let packet = init_sequence(self.canvas.geometry(), self.config.contrast);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ssd1306: init {}x{} at {=u8:#x}",
            self.canvas.geometry().width(),
            self.canvas.geometry().height(),
            self.config.address
        );

        self.send(&packet)
    }

    /// Blank the canvas and empty the cursor
    ///
    /// The panel keeps showing the old frame until the next refresh.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.cursor.reset();
    }

    /// Push the whole canvas to the panel
    pub fn refresh(&mut self) -> Result<(), Error<T::Error>> {
        let address = self.config.address;
        let timeout = self.timeout();
        let mode = self.config.flush_mode;

        for op in PageSerializer::new(&self.canvas) {
            for packet in encode(op, mode) {
                self.transport
                    .write(address, &packet, timeout)
                    .map_err(|err| {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("ssd1306: refresh aborted on {}", op);
                        Error::Transport(err)
                    })?;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("ssd1306: refreshed {} pages", self.canvas.geometry().pages());

        Ok(())
    }

    /// Light one pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        self.canvas.set_pixel(x, y)
    }

    /// Decode `source` and draw it
    ///
    /// Oversize requests are clamped to the panel the same way
    /// [`Bitmap::new`] clamps them. Pixels that still fall off the canvas
    /// are counted in the returned summary.
    pub fn draw_bitmap(
        &mut self,
        source: &[u8],
        width: usize,
        height: usize,
        mode: DecodeMode,
        placement: Placement,
    ) -> Result<BlitSummary, DrawError> {
        let bitmap = Bitmap::new(self.canvas.geometry(), source, width, height, mode)?;
        let summary = blit(&mut self.canvas, &bitmap, placement);

        #[cfg(feature = "defmt")]
        if !summary.is_complete() {
            defmt::debug!("ssd1306: bitmap clipped {} pixels", summary.clipped);
        }

        Ok(summary)
    }

    /// Draw one character at the next cursor cell
    pub fn draw_char(&mut self, code: u8) -> Result<BlitSummary, DrawError> {
        self.cursor.draw_char(&mut self.canvas, &self.font, code)
    }

    /// Draw a byte string, optionally centered on the next line
    pub fn draw_string(
        &mut self,
        text: &[u8],
        len: TextLength,
        center: bool,
    ) -> Result<BlitSummary, DrawError> {
        self.cursor
            .draw_string(&mut self.canvas, &self.font, text, len, center)
    }

    /// Draw a whole `str`
    pub fn draw_str(&mut self, text: &str, center: bool) -> Result<BlitSummary, DrawError> {
        self.draw_string(text.as_bytes(), TextLength::Explicit(text.len()), center)
    }

    /// Move the cursor to the start of the next line
    pub fn newline(&mut self) {
        let geometry = *self.canvas.geometry();
        self.cursor.newline(&geometry);
    }

    /// Invert one 8-row text line and refresh
    pub fn invert_line(&mut self, line: usize) -> Result<(), Error<T::Error>> {
        self.canvas.invert_page(line)?;
        self.refresh()
    }

    /// Fill the canvas with a diagnostic pattern and refresh
    pub fn test_pattern(&mut self, pattern: TestPattern) -> Result<(), Error<T::Error>> {
        self.canvas.fill_test_pattern(pattern);
        self.refresh()
    }

    /// Change the contrast register
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<T::Error>> {
        self.send_commands(&[command::SET_CONTRAST, contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Switch the panel on or put it to sleep
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        let cmd = if on {
            command::DISPLAY_ON
        } else {
            command::DISPLAY_OFF
        };
        self.send_commands(&[cmd])
    }

    /// Swap lit and dark pixels in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<T::Error>> {
        let cmd = if inverted {
            command::SET_INVERSE
        } else {
            command::SET_NORMAL
        };
        self.send_commands(&[cmd])
    }

    /// Change how refreshes pack page data
    pub fn set_flush_mode(&mut self, mode: FlushMode) {
        self.config.flush_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font8x8::Font8x8Basic;
    use oledfb_hal::Transaction;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// Transport that records every write, optionally failing the nth
    #[derive(Default)]
    struct Recorder {
        writes: std::vec::Vec<(u8, std::vec::Vec<u8>, Timeout)>,
        fail_at: Option<usize>,
    }

    impl Transport for Recorder {
        type Error = Nack;

        fn execute(&mut self, transaction: &Transaction<'_>) -> Result<(), Self::Error> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(Nack);
            }
            self.writes.push((
                transaction.address,
                transaction.bytes.to_vec(),
                transaction.timeout,
            ));
            Ok(())
        }
    }

    fn session(config: DisplayConfig) -> Ssd1306<Recorder, Font8x8Basic> {
        Ssd1306::new(Recorder::default(), Font8x8Basic, config).unwrap()
    }

    fn writes(display: Ssd1306<Recorder, Font8x8Basic>) -> std::vec::Vec<std::vec::Vec<u8>> {
        display
            .release()
            .0
            .writes
            .into_iter()
            .map(|(_, bytes, _)| bytes)
            .collect()
    }

    #[test]
    fn test_rejects_unsupported_geometry() {
        let config = DisplayConfig {
            height: 72,
            ..DisplayConfig::default()
        };
        let result = Ssd1306::new(Recorder::default(), Font8x8Basic, config);
        assert!(matches!(
            result,
            Err(Error::Geometry(GeometryError::TooTall))
        ));
    }

    #[test]
    fn test_init_single_transaction() {
        let mut display = session(DisplayConfig::default());
        display.init().unwrap();

        let recorder = display.release().0;
        assert_eq!(recorder.writes.len(), 1);
        let (address, bytes, timeout) = &recorder.writes[0];
        assert_eq!(*address, 0x3C);
        assert_eq!(*timeout, Timeout::from_millis(500));
        assert_eq!(bytes.len(), 30);
        assert_eq!(&bytes[..2], &[0x00, 0xAE]);
        assert_eq!(&bytes[26..], &[0xAF, 0x21, 0x00, 0x7F]);
    }

    #[test]
    fn test_checkerboard_columns_round_trip() {
        let mut display = session(DisplayConfig::default());
        display.clear();
        display
            .draw_bitmap(&[0xAA; 32], 16, 16, DecodeMode::Bmp, Placement::at(0, 0))
            .unwrap();
        display.refresh().unwrap();

        let writes = writes(display);
        assert_eq!(writes.len(), 8 * (1 + 128) + 1);

        let mut data = std::vec::Vec::new();
        for (page, chunk) in writes[..8 * 129].chunks(129).enumerate() {
            assert_eq!(chunk[0], vec![0x80, 0xB0 | page as u8]);
            for packet in &chunk[1..] {
                assert_eq!(packet[0], 0xC0);
                assert_eq!(packet.len(), 2);
                data.push(packet[1]);
            }
        }
        assert_eq!(writes[8 * 129], vec![0x00, 0x21, 0x00, 0x7F]);

        for (i, &byte) in data.iter().enumerate() {
            let (page, column) = (i / 128, i % 128);
            let expected = if page < 2 && column < 16 && column % 2 == 0 {
                0xFF
            } else {
                0x00
            };
            assert_eq!(byte, expected, "page {} column {}", page, column);
        }
    }

    #[test]
    fn test_stream_refresh_packs_pages() {
        let config = DisplayConfig {
            flush_mode: FlushMode::Stream,
            ..DisplayConfig::default()
        };
        let mut display = session(config);
        display.draw_pixel(127, 63).unwrap();
        display.refresh().unwrap();

        let writes = writes(display);
        assert_eq!(writes.len(), 8 * 2 + 1);
        assert_eq!(writes[15].len(), 129);
        assert_eq!(writes[15][0], 0x40);
        assert_eq!(writes[15][128], 0x80);
    }

    #[test]
    fn test_refresh_stops_on_first_error() {
        let mut display = Ssd1306::new(
            Recorder {
                fail_at: Some(3),
                ..Recorder::default()
            },
            Font8x8Basic,
            DisplayConfig::default(),
        )
        .unwrap();

        assert_eq!(display.refresh(), Err(Error::Transport(Nack)));
        assert_eq!(display.release().0.writes.len(), 3);
    }

    #[test]
    fn test_text_reaches_canvas() {
        let mut display = session(DisplayConfig::default());
        display.draw_str("A", false).unwrap();

        // 'A' row 0 is 0x0C: columns 2 and 3 lit, LSB leftmost
        assert_eq!(display.canvas().pixel(2, 0), Some(true));
        assert_eq!(display.canvas().pixel(3, 0), Some(true));
        assert_eq!(display.canvas().pixel(0, 0), Some(false));
        assert_eq!(display.cursor().position(), (0, 0));

        display.newline();
        display.draw_str("A", false).unwrap();
        assert_eq!(display.cursor().position(), (0, 8));
        assert_eq!(display.canvas().pixel(2, 8), Some(true));
    }

    #[test]
    fn test_centered_string() {
        let mut display = session(DisplayConfig::default());
        display.draw_str("HELLO", true).unwrap();
        // origin 64 - 2 = 62; the first glyph lands one cell past it
        assert_eq!(display.cursor().position(), (102, 0));
        assert_eq!(display.canvas().pixel(62, 1), Some(false));
        assert_eq!(display.canvas().pixel(71, 1), Some(true));
    }

    #[test]
    fn test_missing_glyph() {
        let mut display = session(DisplayConfig::default());
        assert_eq!(display.draw_char(0xC3), Err(DrawError::MissingGlyph(0xC3)));
        assert_eq!(display.cursor(), &TextCursor::new());
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut display = session(DisplayConfig::default());
        display.draw_str("AB", false).unwrap();
        display.clear();
        assert_eq!(display.cursor(), &TextCursor::new());
        assert!(display.canvas().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invert_line() {
        let mut display = session(DisplayConfig::default());
        display.invert_line(7).unwrap();
        assert_eq!(display.canvas().page(7), Some(&[0xFF; 128][..]));
        assert_eq!(display.canvas().page(6), Some(&[0x00; 128][..]));

        assert_eq!(
            display.invert_line(8),
            Err(Error::Draw(DrawError::PageOutOfRange(8)))
        );
    }

    #[test]
    fn test_panel_commands() {
        let mut display = session(DisplayConfig::default());
        display.set_contrast(0x40).unwrap();
        display.set_display_on(false).unwrap();
        display.set_inverted(true).unwrap();
        assert_eq!(display.config().contrast, 0x40);

        assert_eq!(
            writes(display),
            vec![vec![0x00, 0x81, 0x40], vec![0x00, 0xAE], vec![0x00, 0xA7]]
        );
    }

    #[test]
    fn test_pattern_is_refreshed() {
        let mut display = session(DisplayConfig::default());
        display.test_pattern(TestPattern::AlternatePages).unwrap();
        assert_eq!(writes(display).len(), 8 * (1 + 128) + 1);
    }

    #[test]
    fn test_half_height_panel() {
        let config = DisplayConfig {
            height: 32,
            ..DisplayConfig::default()
        };
        let mut display = session(config);
        display.refresh().unwrap();
        assert_eq!(writes(display).len(), 4 * (1 + 128) + 1);
    }

    proptest! {
        #[test]
        fn prop_refresh_data_matches_canvas(
            points in proptest::collection::vec((0i32..128, 0i32..64), 0..32),
        ) {
            let config = DisplayConfig {
                flush_mode: FlushMode::Stream,
                ..DisplayConfig::default()
            };
            let mut display = session(config);
            for (x, y) in points {
                display.draw_pixel(x, y).unwrap();
            }
            let expected = display.canvas().as_bytes().to_vec();
            display.refresh().unwrap();

            let data: std::vec::Vec<u8> = writes(display)
                .into_iter()
                .filter(|packet| packet[0] == 0x40)
                .flat_map(|packet| packet[1..].to_vec())
                .collect();
            prop_assert_eq!(data, expected);
        }
    }
}
