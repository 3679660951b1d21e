//! Decode a whole audio file into memory with Symphonia.
//!
//! Segmentation needs random access to arbitrary windows, so unlike a streaming decoder this
//! keeps every decoded frame, interleaved, at the source sample rate and channel count.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::Result;
use crate::audio::AudioAsset;

/// Load and fully decode the audio file at `path`. Errors carry the file path.
pub fn load_audio(path: &Path) -> Result<AudioAsset> {
    tracing::debug!(path = %path.display(), "decoding audio");

    let file = File::open(path).map_err(|e| crate::Error::from(e).in_file(path))?;
    let hint = path.extension().and_then(|ext| ext.to_str());

    decode_source(Box::new(file), hint).map_err(|e| crate::Error::from(e).in_file(path))
}

/// Decode every packet of the default audio track in `source`.
///
/// `hint_extension` (e.g. "wav", "mp3", "flac") helps the probe pick a container reader.
pub fn decode_source(
    source: Box<dyn MediaSource>,
    hint_extension: Option<&str>,
) -> anyhow::Result<AudioAsset> {
    let (mut format, track) = probe(source, hint_extension)?;

    let mut decoder: Box<dyn Decoder> = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")?;

    let mut samples = Vec::new();
    let mut spec: Option<SignalSpec> = None;
    let mut scratch: Option<(SampleBuffer<f32>, u64)> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // Symphonia signals end of stream as an IO error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("failed reading packet"),
        };

        if packet.track_id() != track.id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                tracing::debug!(reason, "skipping undecodable frame");
                continue;
            }
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("decoder failure"),
        };

        let decoded_spec = *decoded.spec();
        match spec {
            None => spec = Some(decoded_spec),
            Some(first) if first != decoded_spec => {
                bail!("audio format changed mid-stream ({first:?} -> {decoded_spec:?})")
            }
            Some(_) => {}
        }

        let capacity = decoded.capacity() as u64;
        let (buf, _) = match scratch.take() {
            Some((buf, frames)) if frames >= capacity => scratch.insert((buf, frames)),
            _ => scratch.insert((SampleBuffer::<f32>::new(capacity, decoded_spec), capacity)),
        };

        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    let spec = spec.ok_or_else(|| anyhow!("no audio frames decoded"))?;
    let channels = u16::try_from(spec.channels.count()).context("too many channels")?;
    if channels == 0 {
        bail!("decoded audio had zero channels");
    }

    Ok(AudioAsset {
        samples,
        sample_rate: spec.rate,
        channels,
    })
}

/// Probe the container and pick the first decodable track with a known sample rate.
fn probe(
    source: Box<dyn MediaSource>,
    hint_extension: Option<&str>,
) -> anyhow::Result<(Box<dyn FormatReader>, Track)> {
    let mss_opts = MediaSourceStreamOptions {
        // Symphonia expects a power-of-two buffer > 32KiB.
        buffer_len: 256 * 1024,
    };
    let mss = MediaSourceStream::new(source, mss_opts);

    let mut hint = Hint::new();
    if let Some(ext) = hint_extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| anyhow!(e))
        .context("failed to probe media stream")?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found"))?;

    Ok((format, track))
}
