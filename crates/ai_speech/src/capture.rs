//! Microphone capture
//!
//! Records exactly one utterance from the default input device. Frames are
//! downmixed to mono in the stream callback and handed to an energy-gated
//! endpointer: recording starts at the first frame above the silence
//! threshold and ends after a trailing-silence window, a hard length cap, or
//! when no speech arrives within the wait window. The result is encoded as
//! 16-bit mono WAV.

use std::io::Cursor;
use std::time::Duration;

use application::ApplicationError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::RecvTimeoutError;
use domain::{AudioClip, AudioFormat, CapabilityError, CapabilityResult};
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;

/// Source of single recorded utterances
///
/// Implemented by the microphone recorder; test doubles stand in where no
/// audio device exists.
pub trait UtteranceSource: Send + Sync {
    /// Record one utterance, blocking the calling thread until the speaker
    /// falls silent or a capture window elapses
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::Device` for device and no-speech failures.
    fn record_utterance(&self) -> CapabilityResult<AudioClip>;
}

/// Recorder for the default input device
#[derive(Debug, Clone)]
pub struct MicrophoneRecorder {
    config: CaptureConfig,
}

impl MicrophoneRecorder {
    /// Create a new recorder
    ///
    /// The device is opened lazily at capture time, not here.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the capture parameters
    /// are invalid.
    pub fn new(config: CaptureConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;
        Ok(Self { config })
    }

    /// The capture configuration
    #[must_use]
    pub const fn config(&self) -> &CaptureConfig {
        &self.config
    }
}

impl UtteranceSource for MicrophoneRecorder {
    fn record_utterance(&self) -> CapabilityResult<AudioClip> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CapabilityError::Device("no input device available".to_string()))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let stream_config: cpal::StreamConfig = device
            .default_input_config()
            .map_err(|e| CapabilityError::Device(format!("failed to get input config: {e}")))?
            .into();
        let sample_rate = stream_config.sample_rate.0;
        let channels = stream_config.channels as usize;

        info!(device = %device_name, sample_rate, channels, "Listening for one utterance");

        let (tx, rx) = crossbeam_channel::bounded::<Vec<f32>>(64);

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let _ = tx.try_send(downmix(data, channels));
                },
                |err| warn!(error = %err, "Audio input stream error"),
                None,
            )
            .map_err(|e| CapabilityError::Device(format!("failed to build input stream: {e}")))?;

        stream
            .play()
            .map_err(|e| CapabilityError::Device(format!("failed to start input stream: {e}")))?;

        let mut endpointer = Endpointer::new(&self.config, sample_rate);

        loop {
            match rx.recv_timeout(Duration::from_secs(1)) {
                Ok(frame) => {
                    if endpointer.push(&frame) == EndpointStatus::Complete {
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    return Err(CapabilityError::Device(
                        "audio input stream stalled".to_string(),
                    ));
                },
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(CapabilityError::Device(
                        "audio input stream closed".to_string(),
                    ));
                },
            }
        }

        // stop capturing before encoding
        drop(stream);

        if !endpointer.has_speech() {
            return Err(CapabilityError::Device(
                "no speech detected within the capture window".to_string(),
            ));
        }

        let samples = endpointer.into_samples();
        debug!(samples = samples.len(), sample_rate, "Utterance captured");

        let wav = encode_wav(&samples, sample_rate)?;
        Ok(AudioClip::new(wav, AudioFormat::Wav))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndpointStatus {
    Listening,
    Complete,
}

/// Energy-gated utterance segmentation over mono frames
#[derive(Debug)]
struct Endpointer {
    threshold: f32,
    trailing_silence_samples: usize,
    max_utterance_samples: usize,
    max_wait_samples: usize,
    heard_speech: bool,
    silent_run: usize,
    waited: usize,
    samples: Vec<f32>,
}

impl Endpointer {
    fn new(config: &CaptureConfig, sample_rate: u32) -> Self {
        Self {
            threshold: config.silence_threshold,
            trailing_silence_samples: samples_for_ms(config.trailing_silence_ms, sample_rate),
            max_utterance_samples: samples_for_ms(config.max_utterance_ms, sample_rate),
            max_wait_samples: samples_for_ms(config.max_wait_for_speech_ms, sample_rate),
            heard_speech: false,
            silent_run: 0,
            waited: 0,
            samples: Vec::new(),
        }
    }

    /// Feed one mono frame; returns `Complete` when the utterance is over
    fn push(&mut self, frame: &[f32]) -> EndpointStatus {
        let level = rms(frame);

        if self.heard_speech {
            self.samples.extend_from_slice(frame);
            if level < self.threshold {
                self.silent_run += frame.len();
            } else {
                self.silent_run = 0;
            }

            if self.silent_run >= self.trailing_silence_samples
                || self.samples.len() >= self.max_utterance_samples
            {
                return EndpointStatus::Complete;
            }
        } else if level >= self.threshold {
            self.heard_speech = true;
            self.samples.extend_from_slice(frame);
        } else {
            self.waited += frame.len();
            if self.waited >= self.max_wait_samples {
                return EndpointStatus::Complete;
            }
        }

        EndpointStatus::Listening
    }

    const fn has_speech(&self) -> bool {
        self.heard_speech
    }

    fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[allow(clippy::cast_possible_truncation)]
fn samples_for_ms(ms: u64, sample_rate: u32) -> usize {
    (ms * u64::from(sample_rate) / 1000) as usize
}

/// Average interleaved channels down to mono
#[allow(clippy::cast_precision_loss)]
fn downmix(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Root mean square level of a frame, full scale 1.0
#[allow(clippy::cast_precision_loss)]
fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = frame.iter().map(|s| s * s).sum();
    (sum_squares / frame.len() as f32).sqrt()
}

/// Encode mono f32 samples as 16-bit PCM WAV
fn encode_wav(samples: &[f32], sample_rate: u32) -> CapabilityResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut buffer, spec)
        .map_err(|e| CapabilityError::Device(format!("failed to encode WAV: {e}")))?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(value)
            .map_err(|e| CapabilityError::Device(format!("failed to encode WAV: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| CapabilityError::Device(format!("failed to encode WAV: {e}")))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample rate of 1000 Hz makes milliseconds equal sample counts
    fn test_config() -> CaptureConfig {
        CaptureConfig {
            silence_threshold: 0.1,
            trailing_silence_ms: 100,
            max_utterance_ms: 1000,
            max_wait_for_speech_ms: 200,
        }
    }

    fn loud(n: usize) -> Vec<f32> {
        vec![0.5; n]
    }

    fn quiet(n: usize) -> Vec<f32> {
        vec![0.0; n]
    }

    #[test]
    fn recorder_new_validates_config() {
        let config = CaptureConfig {
            trailing_silence_ms: 0,
            ..Default::default()
        };
        assert!(MicrophoneRecorder::new(config).is_err());
        assert!(MicrophoneRecorder::new(CaptureConfig::default()).is_ok());
    }

    #[test]
    fn rms_of_silence_is_zero() {
        assert!(rms(&quiet(100)).abs() < f32::EPSILON);
        assert!(rms(&[]).abs() < f32::EPSILON);
    }

    #[test]
    fn rms_of_constant_signal_is_its_amplitude() {
        assert!((rms(&loud(100)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn samples_for_ms_scales_with_rate() {
        assert_eq!(samples_for_ms(1000, 16_000), 16_000);
        assert_eq!(samples_for_ms(250, 16_000), 4_000);
        assert_eq!(samples_for_ms(100, 1000), 100);
    }

    #[test]
    fn downmix_passes_mono_through() {
        let data = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix(&data, 1), data);
    }

    #[test]
    fn downmix_averages_stereo_frames() {
        let data = vec![0.2, 0.4, -0.2, -0.4];
        let mono = downmix(&data, 2);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!((mono[1] + 0.3).abs() < 1e-6);
    }

    #[test]
    fn endpointer_completes_after_trailing_silence() {
        let mut endpointer = Endpointer::new(&test_config(), 1000);

        assert_eq!(endpointer.push(&loud(500)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&quiet(50)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&quiet(60)), EndpointStatus::Complete);

        assert!(endpointer.has_speech());
        // the trailing silence is part of the recording
        assert_eq!(endpointer.into_samples().len(), 610);
    }

    #[test]
    fn endpointer_ignores_leading_silence() {
        let mut endpointer = Endpointer::new(&test_config(), 1000);

        assert_eq!(endpointer.push(&quiet(150)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&loud(300)), EndpointStatus::Listening);

        assert!(endpointer.has_speech());
        // leading silence is not recorded
        assert_eq!(endpointer.into_samples().len(), 300);
    }

    #[test]
    fn endpointer_gives_up_when_no_speech_arrives() {
        let mut endpointer = Endpointer::new(&test_config(), 1000);

        assert_eq!(endpointer.push(&quiet(150)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&quiet(100)), EndpointStatus::Complete);

        assert!(!endpointer.has_speech());
    }

    #[test]
    fn endpointer_caps_utterance_length() {
        let mut endpointer = Endpointer::new(&test_config(), 1000);

        assert_eq!(endpointer.push(&loud(600)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&loud(600)), EndpointStatus::Complete);

        assert!(endpointer.has_speech());
    }

    #[test]
    fn speech_resets_the_silence_run() {
        let mut endpointer = Endpointer::new(&test_config(), 1000);

        assert_eq!(endpointer.push(&loud(100)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&quiet(60)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&loud(10)), EndpointStatus::Listening);
        // the earlier silence no longer counts
        assert_eq!(endpointer.push(&quiet(60)), EndpointStatus::Listening);
        assert_eq!(endpointer.push(&quiet(50)), EndpointStatus::Complete);
    }

    #[test]
    fn encode_wav_produces_riff_container() {
        let wav = encode_wav(&loud(100), 16_000).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn encode_wav_roundtrips_through_reader() {
        let samples = vec![0.0_f32, 0.25, -0.25, 1.0, -1.0];
        let wav = encode_wav(&samples, 8000).unwrap();

        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);

        let decoded: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(decoded.len(), samples.len());
        assert_eq!(decoded[0], 0);
        assert_eq!(decoded[3], i16::MAX);
    }
}
