//! Synthesized sound: four clips built from fundsp oscillator graphs,
//! rendered into rodio sample buffers. No asset files.
//!
//! Opening the output device can fail (headless machines, CI); the
//! game then simply runs silent, the same way autoplay refusal is
//! swallowed in a browser.

use fundsp::prelude::*;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, buffer::SamplesBuffer};

const SAMPLE_RATE: u32 = 44_100;

pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl Audio {
    /// `None` when no output device is available.
    pub fn open() -> Option<Audio> {
        let (stream, handle) = OutputStream::try_default().ok()?;
        Some(Audio {
            _stream: stream,
            handle,
            music: None,
        })
    }

    /// Start the looping background track. Idempotent; call it from the
    /// first input gesture.
    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.set_volume(0.5);
            sink.append(music_phrase().repeat_infinite());
            self.music = Some(sink);
        }
    }

    /// Spark caught.
    pub fn catch(&self) {
        self.play(catch_chime(), 0.8);
    }

    /// Round lost.
    pub fn lose(&self) {
        self.play(lose_sweep(), 0.9);
    }

    /// Crown reached.
    pub fn win(&self) {
        self.play(win_arpeggio(), 0.9);
    }

    fn play(&self, clip: SamplesBuffer<f32>, volume: f32) {
        // A sink that cannot be created just means this clip is skipped.
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.set_volume(volume);
            sink.append(clip);
            sink.detach();
        }
    }
}

/// Run a mono graph for `seconds` and collect the samples.
fn render_clip(mut unit: impl AudioUnit, seconds: f64) -> SamplesBuffer<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (SAMPLE_RATE as f64 * seconds) as usize;
    let samples: Vec<f32> = (0..n).map(|_| unit.get_mono()).collect();
    SamplesBuffer::new(1, SAMPLE_RATE, samples)
}

/// Two quick rising sine notes.
fn catch_chime() -> SamplesBuffer<f32> {
    let freq = lfo(|t: f32| if t < 0.07 { 880.0 } else { 1318.5 });
    let gain = lfo(|t: f32| (0.2 * (1.0 - t / 0.18)).max(0.0));
    render_clip((freq >> sine::<f32>()) * gain, 0.18)
}

/// Sawtooth falling 400 Hz to 80 Hz while fading out.
fn lose_sweep() -> SamplesBuffer<f32> {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    render_clip((freq >> saw()) * gain, 0.5)
}

/// Four ascending triangle notes with a fade on the tail.
fn win_arpeggio() -> SamplesBuffer<f32> {
    let freq = lfo(|t: f32| {
        let notes = [523.25, 659.25, 783.99, 1046.5];
        notes[std::cmp::Ord::min((t / 0.12) as usize, 3)]
    });
    let gain = lfo(|t: f32| {
        let step = t % 0.12;
        let pluck = (1.0 - step / 0.14).max(0.15);
        let tail = ((0.6 - t) / 0.15).min(1.0).max(0.0);
        0.2 * pluck * tail
    });
    render_clip((freq >> triangle()) * gain, 0.6)
}

/// A gentle eight-note loop over a low pad; repeated forever by the
/// music sink.
fn music_phrase() -> SamplesBuffer<f32> {
    let melody = lfo(|t: f32| {
        let notes = [261.63, 329.63, 392.0, 329.63, 293.66, 392.0, 349.23, 293.66];
        notes[((t / 0.5) as usize) % 8]
    }) >> triangle();
    let pluck = lfo(|t: f32| {
        let step = t % 0.5;
        0.12 * (1.0 - (step / 0.5) * 0.6)
    });
    let pad = (sine_hz::<f32>(130.81) + sine_hz::<f32>(196.0) * 0.7) * lfo(|t: f32| 0.05 + 0.015 * (t * 2.0).sin());
    render_clip(melody * pluck + pad, 4.0)
}
