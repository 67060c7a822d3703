use crate::utils::error::{EdaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> EdaError {
    EdaError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The OMDb endpoint gets `t` and `apikey` appended as query parameters, so
/// it has to be an absolute http(s) URL with a host.
pub fn validate_endpoint(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }

    Ok(())
}

/// Data and output locations: non-empty, and not an existing regular file.
pub fn validate_directory(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if std::path::Path::new(path).is_file() {
        return Err(invalid(field_name, path, "Path points to a file, not a directory"));
    }

    Ok(())
}

/// Dataset identifiers become `<name>.csv` inside the data directory, so they
/// may not climb out of it.
pub fn validate_dataset_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(invalid(
            field_name,
            name,
            "Dataset name must be a bare file stem without path separators",
        ));
    }

    Ok(())
}

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub fn validate_timeout_seconds(field_name: &str, seconds: u64) -> Result<()> {
    if !(1..=MAX_TIMEOUT_SECONDS).contains(&seconds) {
        return Err(invalid(
            field_name,
            &seconds.to_string(),
            format!("Timeout must be between 1 and {} seconds", MAX_TIMEOUT_SECONDS),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EdaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}
