//! Image dimensions accepted by the image generation capability

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of image dimensions the generation endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    /// 256 by 256 pixels
    #[serde(rename = "256x256")]
    Square256,
    /// 512 by 512 pixels
    #[default]
    #[serde(rename = "512x512")]
    Square512,
    /// 1024 by 1024 pixels
    #[serde(rename = "1024x1024")]
    Square1024,
}

impl ImageSize {
    /// Wire-level size string, e.g. `"512x512"`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square256 => "256x256",
            Self::Square512 => "512x512",
            Self::Square1024 => "1024x1024",
        }
    }

    /// Edge length in pixels
    #[must_use]
    pub const fn pixels(self) -> u32 {
        match self {
            Self::Square256 => 256,
            Self::Square512 => 512,
            Self::Square1024 => 1024,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "256x256" => Ok(Self::Square256),
            "512x512" => Ok(Self::Square512),
            "1024x1024" => Ok(Self::Square1024),
            _ => Err(format!(
                "invalid image size: {s}. Use 256x256, 512x512 or 1024x1024"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_512() {
        assert_eq!(ImageSize::default(), ImageSize::Square512);
    }

    #[test]
    fn wire_strings_are_dimensions() {
        assert_eq!(ImageSize::Square256.as_str(), "256x256");
        assert_eq!(ImageSize::Square512.as_str(), "512x512");
        assert_eq!(ImageSize::Square1024.as_str(), "1024x1024");
    }

    #[test]
    fn parse_roundtrips_all_sizes() {
        for size in [
            ImageSize::Square256,
            ImageSize::Square512,
            ImageSize::Square1024,
        ] {
            assert_eq!(size.as_str().parse::<ImageSize>().unwrap(), size);
        }
    }

    #[test]
    fn parse_rejects_unknown_size() {
        assert!("640x480".parse::<ImageSize>().is_err());
    }

    #[test]
    fn serde_uses_wire_string() {
        let json = serde_json::to_string(&ImageSize::Square1024).unwrap();
        assert_eq!(json, "\"1024x1024\"");
        let parsed: ImageSize = serde_json::from_str("\"256x256\"").unwrap();
        assert_eq!(parsed, ImageSize::Square256);
    }

    #[test]
    fn pixels_match_variant() {
        assert_eq!(ImageSize::Square512.pixels(), 512);
    }
}
