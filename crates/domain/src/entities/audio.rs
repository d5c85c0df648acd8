//! Audio types shared between the speech providers and the session

use serde::{Deserialize, Serialize};

/// Audio formats the speech capabilities produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format (synthesis output)
    Mp3,
    /// WAV format (microphone capture)
    Wav,
}

impl AudioFormat {
    /// MIME type for this audio format
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }

    /// File extension for this audio format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

/// Raw audio bytes with their format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioClip {
    /// Create a new audio clip
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// The raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the clip is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// MIME type of the clip
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Generate a filename with the appropriate extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.extension())
    }
}
