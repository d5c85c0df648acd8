//! Vision ports - Interfaces for image generation and image understanding

use async_trait::async_trait;
use domain::{CapabilityResult, ImageSize};
#[cfg(test)]
use mockall::automock;

/// Reference to a generated image
///
/// The provider does not download pixel data; fetching the URL is the
/// presentation layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Locator of the generated image
    pub url: String,
}

/// Port for turning a text prompt into an image reference
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    /// Generate an image for `prompt` at the requested size
    ///
    /// # Errors
    ///
    /// Returns a `CapabilityError` classifying the failure.
    async fn generate(&self, prompt: &str, size: ImageSize) -> CapabilityResult<GeneratedImage>;
}

/// Port for turning an image byte payload into a descriptive text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageUnderstandingPort: Send + Sync {
    /// Describe the image in `image` (raw encoded bytes)
    ///
    /// # Errors
    ///
    /// Returns a `CapabilityError` classifying the failure.
    async fn describe(&self, image: &[u8]) -> CapabilityResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_generation_port_returns_url() {
        let mut mock = MockImageGenerationPort::new();
        mock.expect_generate().returning(|_, _| {
            Ok(GeneratedImage {
                url: "https://img.example.com/1.png".to_string(),
            })
        });

        let image = mock
            .generate("a rainbow-haired android", ImageSize::Square512)
            .await
            .unwrap();
        assert_eq!(image.url, "https://img.example.com/1.png");
    }

    #[tokio::test]
    async fn mock_understanding_port_returns_description() {
        let mut mock = MockImageUnderstandingPort::new();
        mock.expect_describe()
            .returning(|_| Ok("A city street at night.".to_string()));

        let description = mock.describe(&[1, 2, 3]).await.unwrap();
        assert_eq!(description, "A city street at night.");
    }
}
