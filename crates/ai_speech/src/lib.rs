//! AI Speech - Speech synthesis and speech recognition for Ari
//!
//! Two capabilities live here:
//! - `ElevenLabsSpeechProvider` implements `SpeechSynthesisPort` against an
//!   ElevenLabs-style text-to-speech endpoint (voice id as path parameter,
//!   raw MP3 bytes back).
//! - `MicrophoneVoiceInput` implements `VoiceInputPort` by recording one
//!   utterance from the default input device (`MicrophoneRecorder`) and
//!   transcribing it through a Whisper-style endpoint
//!   (`WhisperTranscriber`).
//!
//! Recognition failures are real failures: no placeholder phrase is
//! substituted here, the presentation layer decides what to show.

pub mod capture;
pub mod config;
pub mod providers;
pub mod recognizer;

pub use capture::{MicrophoneRecorder, UtteranceSource};
pub use config::{CaptureConfig, RecognitionConfig, SynthesisConfig};
pub use providers::elevenlabs::ElevenLabsSpeechProvider;
pub use providers::whisper::WhisperTranscriber;
pub use recognizer::MicrophoneVoiceInput;
