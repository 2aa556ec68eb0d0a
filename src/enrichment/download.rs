//! Artwork download.
//!
//! Only responses whose `Content-Type` mentions `image` are accepted; the
//! bytes themselves are validated later by the resolution evaluator.

use super::domain::EnrichmentError;

/// Raw bytes of a downloaded candidate
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub data: Vec<u8>,
    pub content_type: String,
    /// Source URL
    pub url: String,
}

/// Plain HTTP image downloader
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

/// Whether a Content-Type header value describes an image
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("image")
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// GET `url` and return the body if it is an image
    pub async fn download(&self, url: &str) -> Result<DownloadedImage, EnrichmentError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::from_status(status));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_image_content_type(&content_type) {
            return Err(EnrichmentError::NotAnImage {
                url: url.to_string(),
                content_type,
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?
            .to_vec();

        Ok(DownloadedImage {
            data,
            content_type,
            url: url.to_string(),
        })
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_content_types() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("image/png; charset=binary"));
        assert!(is_image_content_type("Image/JPEG"));
    }

    #[test]
    fn test_non_image_content_types() {
        assert!(!is_image_content_type("text/html; charset=utf-8"));
        assert!(!is_image_content_type("application/json"));
        assert!(!is_image_content_type(""));
    }
}
