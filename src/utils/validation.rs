use crate::utils::error::{AdapterError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdapterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 公開讀取網域必須是純主機名稱（可帶埠號），不可含 scheme 或路徑
pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    validate_non_empty_string(field_name, domain)?;

    if domain.contains("://") || domain.contains('/') {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Domain must be a bare host name without scheme or path".to_string(),
        });
    }

    match Url::parse(&format!("http://{}/", domain)) {
        Ok(url) if url.host_str().is_some() => Ok(()),
        Ok(_) => Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Domain has no host component".to_string(),
        }),
        Err(e) => Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: format!("Invalid domain: {}", e),
        }),
    }
}

pub fn validate_bucket_name(field_name: &str, bucket: &str) -> Result<()> {
    validate_non_empty_string(field_name, bucket)?;

    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket.to_string(),
            reason: "Bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket.to_string(),
            reason: "Bucket name can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    if bucket.starts_with('-') || bucket.ends_with('-') {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket.to_string(),
            reason: "Bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| AdapterError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdapterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.rs_host", "https://rs.qiniuapi.com").is_ok());
        assert!(validate_url("endpoints.rs_host", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("endpoints.rs_host", "").is_err());
        assert!(validate_url("endpoints.rs_host", "invalid-url").is_err());
        assert!(validate_url("endpoints.rs_host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("domain", "cdn.example.com").is_ok());
        assert!(validate_domain("domain", "127.0.0.1:8080").is_ok());
        assert!(validate_domain("domain", "").is_err());
        assert!(validate_domain("domain", "http://cdn.example.com").is_err());
        assert!(validate_domain("domain", "cdn.example.com/assets").is_err());
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_bucket_name("bucket", "my-bucket-01").is_ok());
        assert!(validate_bucket_name("bucket", "ab").is_err());
        assert!(validate_bucket_name("bucket", "My_Bucket").is_err());
        assert!(validate_bucket_name("bucket", "-bucket").is_err());
        assert!(validate_bucket_name("bucket", "bucket-").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("list_limit", 1000usize, 1, 1000).is_ok());
        assert!(validate_range("list_limit", 1usize, 1, 1000).is_ok());
        assert!(validate_range("list_limit", 0usize, 1, 1000).is_err());
        assert!(validate_range("list_limit", 1001usize, 1, 1000).is_err());
        assert!(validate_range("upload_token_ttl_seconds", u64::MAX, 1, 86_400).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("bucket", &present).unwrap(), "value");
        assert!(matches!(
            validate_required_field("bucket", &missing),
            Err(AdapterError::MissingConfigError { .. })
        ));
    }
}
