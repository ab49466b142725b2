//! 角色表工具設定
//!
//! 讀取 `sheet.toml`（可省略），命令列參數優先於設定檔

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 預設設定檔名稱，位於目前目錄
pub const DEFAULT_CONFIG_FILE: &str = "sheet.toml";

/// 輸出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// 資料檔路徑
    pub data_path: PathBuf,
    pub format: OutputFormat,
    /// 未設定 RUST_LOG 時使用的過濾規則
    pub log_filter: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/compendium.toml"),
            format: OutputFormat::Text,
            log_filter: "dnd_sheet=info,dnd_core=info".to_string(),
        }
    }
}

impl SheetConfig {
    /// 載入設定
    ///
    /// 明確指定的設定檔必須存在；未指定時找不到預設設定檔就用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("無法讀取設定檔 {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("設定檔格式錯誤 {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
