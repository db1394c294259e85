use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc;
use std::time::Duration;

use chordquiz::Pitch;
use thiserror::Error;

/// Errors from the audio output path
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no output audio device available")]
    NoDevice,

    #[error("failed to get default output config: {0}")]
    Config(String),

    #[error("audio stream: {0}")]
    Stream(String),

    #[error("audio thread disconnected")]
    Disconnected,

    #[error("note length must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// A command sent to the audio thread
enum AudioCommand {
    /// Play multiple frequencies simultaneously
    PlayChord { freqs: Vec<f64>, duration_secs: f64 },
    /// Stop the stream
    Stop,
}

/// Play `pitches` one at a time, lowest first, then together.
///
/// Each arpeggiated note lasts `beat_secs`; the full chord rings for two beats.
pub fn play_chord(pitches: &[Pitch], beat_secs: f64) -> Result<(), AudioError> {
    let beat = note_duration(beat_secs)?;
    let hold = note_duration(beat_secs * 2.0)?;

    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

    let config = device
        .default_output_config()
        .map_err(|e| AudioError::Config(e.to_string()))?;

    let sample_rate = config.sample_rate() as f64;

    let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();

    // Audio generation state
    let mut phase: f64 = 0.0;
    let mut current_freqs: Vec<f64> = Vec::new();
    let mut samples_remaining: usize = 0;

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if let Ok(cmd) = cmd_rx.try_recv() {
                    match cmd {
                        AudioCommand::PlayChord {
                            freqs,
                            duration_secs,
                        } => {
                            current_freqs = freqs;
                            samples_remaining = (duration_secs * sample_rate) as usize;
                            phase = 0.0;
                        }
                        AudioCommand::Stop => {
                            current_freqs.clear();
                            samples_remaining = 0;
                        }
                    }
                }

                for sample in data.iter_mut() {
                    if samples_remaining > 0 && !current_freqs.is_empty() {
                        let mut value = 0.0_f64;
                        for freq in &current_freqs {
                            value +=
                                (phase * freq * 2.0 * std::f64::consts::PI / sample_rate).sin();
                        }
                        // equal weight per sounding voice, kept well below full scale
                        value = value / current_freqs.len() as f64 * 0.3;
                        *sample = value as f32;
                        phase += 1.0;
                        samples_remaining -= 1;
                    } else {
                        *sample = 0.0;
                    }
                }
            },
            move |err| {
                log::error!("audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    stream
        .play()
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    for pitch in pitches {
        log::debug!("playing {} ({:.1} Hz)", pitch, pitch.frequency());
        send_and_wait(&cmd_tx, vec![pitch.frequency()], beat)?;
    }

    let freqs: Vec<f64> = pitches.iter().map(|p| p.frequency()).collect();
    send_and_wait(&cmd_tx, freqs, hold)?;

    // let the held chord finish before the stream is dropped
    std::thread::sleep(Duration::from_millis(100));
    let _ = cmd_tx.send(AudioCommand::Stop);

    Ok(())
}

/// Convert a note length in seconds, rejecting zero, negative and non-finite values
fn note_duration(secs: f64) -> Result<Duration, AudioError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(AudioError::InvalidDuration(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| AudioError::InvalidDuration(secs))
}

fn send_and_wait(
    cmd_tx: &mpsc::Sender<AudioCommand>,
    freqs: Vec<f64>,
    duration: Duration,
) -> Result<(), AudioError> {
    cmd_tx
        .send(AudioCommand::PlayChord {
            freqs,
            duration_secs: duration.as_secs_f64(),
        })
        .map_err(|_| AudioError::Disconnected)?;
    std::thread::sleep(duration);
    Ok(())
}
