use std::io::Write;

use crate::Result;
use crate::caption::Caption;
use crate::caption_encoder::CaptionEncoder;

/// A `CaptionEncoder` that writes captions in WebVTT format.
///
/// Output is streamed straight to the writer. The `WEBVTT` header is written lazily on the first
/// note or caption, so closing an unused encoder writes nothing.
pub struct VttEncoder<W: Write> {
    /// The underlying writer we stream VTT into.
    w: W,

    /// Whether we've written the `WEBVTT` header.
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    /// Create a new VTT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            closed: false,
        }
    }

    /// Write a `NOTE` block.
    pub fn write_note(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        self.start_if_needed()?;

        write!(&mut self.w, "NOTE\n{text}\n\n")?;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write caption: encoder is already closed",
            ));
        }
        Ok(())
    }

    /// Write the WebVTT header if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"WEBVTT\n\n")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> CaptionEncoder for VttEncoder<W> {
    /// Write a single cue: timing line, text line, blank line.
    fn write_caption(&mut self, caption: &Caption) -> Result<()> {
        self.ensure_open()?;
        self.start_if_needed()?;

        let start = format_timestamp_vtt(caption.start);
        let end = format_timestamp_vtt(caption.end);

        write!(&mut self.w, "{start} --> {end}\n{}\n\n", caption.text)?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Format seconds as `H:MM:SS.mmm`.
///
/// Hours take as many digits as they need, with no zero padding (`0:00:01.000`). Minutes are
/// two digits and seconds are zero-padded to `SS.mmm`. Expects a finite, non-negative value.
pub fn format_timestamp_vtt(seconds: f64) -> String {
    let hours = seconds.div_euclid(3600.0);
    let remainder = seconds.rem_euclid(3600.0);
    let minutes = remainder.div_euclid(60.0);
    let seconds = remainder.rem_euclid(60.0);

    format!("{}:{:02}:{:06.3}", hours as u64, minutes as u64, seconds)
}
