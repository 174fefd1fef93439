use crate::config::QiniuConfig;
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TomlFile {
    qiniu: QiniuConfig,
}

impl QiniuConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdapterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析 `[qiniu]` 區段並驗證
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        let file: TomlFile =
            toml::from_str(&processed_content).map_err(|e| AdapterError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        file.qiniu.validate()?;
        Ok(file.qiniu)
    }
}

/// 替換環境變數 (例如 ${QINIU_SECRET_KEY})；未設定的變數原樣保留
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdapterError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}
