//! Concrete speech provider adapters

pub mod elevenlabs;
pub mod whisper;
