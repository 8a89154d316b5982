//! Start time to `MM:SS` conversion.
//!
//! Marker start times are counted in frames of the clip. The frame count is
//! scaled with the NTSC correction of 1001/1000 for every frame rate, also for
//! integral rates like 25 or 30.

use std::fmt;

pub const DEFAULT_PAD_WIDTH: usize = 2;

/// Display timecode with whole minutes and seconds
///
/// Components are kept as `f64` so that invalid input (NaN start time, zero
/// frame rate) shows up in the output instead of being clamped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timecode {
    minutes: f64,
    seconds: f64,
}

impl Timecode {
    pub fn from_start_time(time: f64, frame_rate: f64) -> Self {
        let total_seconds = (time * (1001.0 / (frame_rate * 1000.0))).floor();
        Self {
            minutes: (total_seconds / 60.0).floor(),
            seconds: total_seconds % 60.0,
        }
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// `MM:SS` with both components zero-filled to exactly `width` characters.
    ///
    /// Wider renderings keep their rightmost `width` characters, so 116 minutes
    /// show as `16`. A width of 0 leaves the components as they are.
    pub fn format(&self, width: usize) -> String {
        format!("{}:{}", pad(self.minutes, width), pad(self.seconds, width))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_PAD_WIDTH))
    }
}

fn render(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        // + 0.0 turns -0 into 0
        (value + 0.0).to_string()
    }
}

fn pad(value: f64, width: usize) -> String {
    let digits = render(value);
    if width == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = width);
    let cut = padded.len() - width;
    padded[cut..].to_string()
}

/// Convert a start time and frame rate to a `MM:SS` string.
pub fn timecode(time: f64, frame_rate: f64) -> String {
    Timecode::from_start_time(time, frame_rate).to_string()
}
