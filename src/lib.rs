//! `atc-vtt` turns hand-annotated air-traffic-control tape transcripts into WebVTT caption
//! tracks, and uses those tracks to cut the matching audio into one clip per transmission.
//!
//! This crate provides:
//! - Tokenizing and parsing the parenthesized tape notation
//! - WebVTT caption tracks, JSON tape records and the caption-track reader
//! - Caption-driven audio segmentation behind a pluggable audio backend
//! - Parallel batch drivers for whole directories

// Error type and recoverable diagnostics.
pub mod diagnostic;
pub mod error;

// Tape notation parsing.
pub mod exchange;
pub mod tokenizer;
pub mod transcript;

// Captions and their encoders.
pub mod caption;
pub mod caption_encoder;
pub mod output_type;
pub mod vtt_encoder;

// Audio decoding, clip export and segmentation.
pub mod audio;
pub mod decoder;
pub mod split;
pub mod wav;

// Batch drivers and their configuration.
pub mod batch;
pub mod convert;
pub mod files;
pub mod opts;

// Logging configuration for binaries.
#[cfg(feature = "logging")]
pub mod logging;

pub use audio::{AudioAsset, AudioBackend, ClipWindow, WavBackend};
pub use caption::Caption;
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use exchange::Exchange;
pub use opts::{ConvertOpts, SplitOpts};
pub use output_type::OutputType;
pub use transcript::Transcript;
