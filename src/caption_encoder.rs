use crate::Result;
use crate::caption::Caption;

/// A streaming sink for captions.
///
/// Encoders write each caption as it arrives. `close` flushes (and finishes the document where
/// the format needs it); it is idempotent, and writes after it fail.
pub trait CaptionEncoder {
    fn write_caption(&mut self, caption: &Caption) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
