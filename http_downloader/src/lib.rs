use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Fills the `{system}` placeholder of a URL template with the
/// percent-encoded system name.
pub fn fill_url_template(template: &str, system: &str) -> String {
    template.replace("{system}", &urlencoding::encode(system))
}

/// Fetch the body of `url` into memory.
///
/// # Errors
///
/// `InvalidUrl` for URLs that are not http(s), `RequestFailed` when the
/// request fails or answers with a non-success status.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, DownloadError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        tracing::warn!(url, "Refusing to fetch non-HTTP URL");
        return Err(DownloadError::InvalidUrl(url.to_string()));
    }

    let mut response = surf::get(url).await.map_err(|e| {
        tracing::warn!(url, error = %e, "Request failed");
        DownloadError::RequestFailed(format!("Failed to send request: {}", e))
    })?;

    if !response.status().is_success() {
        tracing::warn!(url, status = %response.status(), "Unexpected HTTP status");
        return Err(DownloadError::RequestFailed(format!(
            "HTTP error: {}",
            response.status()
        )));
    }

    response
        .body_bytes()
        .await
        .map_err(|e| DownloadError::RequestFailed(format!("Failed to read body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_url_template() {
        assert_eq!(
            fill_url_template(
                "https://example.com/metadat/no-intro/{system}.dat",
                "Nintendo - Super Nintendo Entertainment System"
            ),
            "https://example.com/metadat/no-intro/Nintendo%20-%20Super%20Nintendo%20Entertainment%20System.dat"
        );
        assert_eq!(
            fill_url_template("https://example.com/static.dat", "x"),
            "https://example.com/static.dat"
        );
    }

    #[async_std::test]
    async fn test_fetch_rejects_non_http_urls() {
        let result = fetch_bytes("ftp://example.com/file.dat").await;
        assert_eq!(
            result.err(),
            Some(DownloadError::InvalidUrl("ftp://example.com/file.dat".to_string()))
        );
    }
}
