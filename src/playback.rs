//! Single-active-playback management.
//!
//! The app plays at most one stream at a time. `PlaybackManager` owns the
//! output stream and the one live sink; starting a new clip always releases
//! the previous sink first. Stream bytes are fetched elsewhere and handed in
//! already buffered.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

/// Lower bound for speed and pitch ratios.
pub const MIN_RATIO: f32 = 0.5;
/// Upper bound for speed and pitch ratios.
pub const MAX_RATIO: f32 = 2.0;

/// Speed and pitch applied when requesting a clip's stream.
///
/// Values are clamped to `[MIN_RATIO, MAX_RATIO]` on every write. The
/// (1.0, 1.0) pair tells the server no transformation is requested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackParams {
    speed: f32,
    pitch: f32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            pitch: 1.0,
        }
    }
}

impl PlaybackParams {
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the speed ratio, clamped to the allowed range.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = clamp_ratio(speed);
    }

    /// Set the pitch ratio, clamped to the allowed range.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp_ratio(pitch);
    }

    /// True when both ratios are 1.0 and the server may pass the file through.
    pub fn is_identity(&self) -> bool {
        self.speed == 1.0 && self.pitch == 1.0
    }
}

fn clamp_ratio(value: f32) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(MIN_RATIO, MAX_RATIO)
}

/// Errors from the playback substrate.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// No audio output device could be opened.
    #[error("Audio output unavailable: {0}")]
    Output(String),
    /// The fetched stream bytes could not be decoded.
    #[error("Could not decode stream: {0}")]
    Decode(String),
}

/// Owns the single live playback handle app-wide.
pub struct PlaybackManager {
    stream: OutputStream,
    sink: Option<Sink>,
    current_clip: Option<u64>,
}

impl PlaybackManager {
    /// Open the default output device.
    pub fn new() -> Result<Self, PlaybackError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| PlaybackError::Output(err.to_string()))?;
        Ok(Self {
            stream,
            sink: None,
            current_clip: None,
        })
    }

    /// Stop and release the active sink, if any.
    pub fn stop_current(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_clip = None;
    }

    /// Play fetched stream bytes for a clip.
    ///
    /// Any previous playback is released synchronously before the new sink
    /// is created, so at most one handle is live at any instant.
    pub fn play_bytes(&mut self, clip_id: u64, bytes: Vec<u8>) -> Result<(), PlaybackError> {
        self.stop_current();

        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|err| PlaybackError::Decode(err.to_string()))?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.play();
        self.sink = Some(sink);
        self.current_clip = Some(clip_id);
        Ok(())
    }

    /// Id of the clip the live sink was started for.
    pub fn current_clip(&self) -> Option<u64> {
        self.current_clip
    }

    /// True while the sink still has queued audio.
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false)
    }
}
