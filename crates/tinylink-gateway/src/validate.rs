use crate::error::AppError;

pub const MAX_URL_LENGTH: usize = 2048;

/// Validates that the URL has a valid format (has a scheme and host).
///
/// This is the gateway's own gatekeeping; the shortener stores whatever it
/// is given, byte for byte.
pub fn validate_url(url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::InvalidUrl("URL cannot be empty".to_string()));
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(AppError::InvalidUrl(format!(
            "URL must be at most {} bytes, got {}",
            MAX_URL_LENGTH,
            url.len()
        )));
    }

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AppError::InvalidUrl(
            "URL must not contain whitespace or control characters".to_string(),
        ));
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(AppError::InvalidUrl(format!(
            "URL must have a valid scheme and host: {}",
            url
        )));
    };

    let scheme = scheme.to_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::InvalidUrl(format!(
            "URL scheme must be http or https: {}",
            scheme
        )));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(AppError::InvalidUrl(format!(
            "URL must have a valid scheme and host: {}",
            url
        )));
    }

    Ok(())
}
