/// The supported caption-track output formats.
///
/// With the `cli` feature this doubles as a `clap` value enum, so binaries take it straight from
/// the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// WebVTT with the tape header and tail as `NOTE` blocks.
    #[default]
    Vtt,

    /// The whole tape as one JSON record, routing fields and comments included.
    Json,
}

impl OutputType {
    /// File extension for tracks written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Vtt => "vtt",
            Self::Json => "json",
        }
    }
}
