use crate::utils::error::{EtlError, Result};
use std::path::{Component, Path, PathBuf};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A path that must stay inside whatever directory it is joined onto.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if Path::new(path).is_absolute() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be relative".to_string(),
        });
    }

    Ok(())
}

/// Absolute form of `path` with `.` and `..` folded lexically.
fn normalize(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// A directory the run deletes wholesale. Roots, the working directory and
/// its ancestors are refused.
pub fn validate_removable_dir(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let target = normalize(path)?;
    let working_dir = normalize(".")?;
    if target.parent().is_none() || working_dir.starts_with(&target) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Directory would be deleted but is a filesystem root or contains the working directory"
                .to_string(),
        });
    }

    Ok(())
}

/// Neither directory may equal or contain the other.
pub fn validate_disjoint_paths(
    first_field: &str,
    first: &str,
    second_field: &str,
    second: &str,
) -> Result<()> {
    let first_path = normalize(first)?;
    let second_path = normalize(second)?;

    if first_path.starts_with(&second_path) || second_path.starts_with(&first_path) {
        return Err(EtlError::ConfigValidationError {
            field: format!("{}/{}", first_field, second_field),
            message: format!("'{}' and '{}' must not overlap", first, second),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
