// ==========================================
// Starward UIGF 元数据同步 - 运行配置
// ==========================================
// 来源优先级: 环境变量 > 配置文件 > 内置默认值
// 存储: 可选 JSON 配置文件（缺省键取默认值）
// ==========================================

use crate::engine::converter::ConversionDefaults;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    /// 默认元数据库路径
    pub const STORE_PATH: &str = "STARWARD_UIGF_SYNC_STORE_PATH";
    /// 转换输出的 lang
    pub const LANG: &str = "STARWARD_UIGF_SYNC_LANG";
    /// 控制台提示语言（zh-CN / en）
    pub const UI_LOCALE: &str = "STARWARD_UIGF_SYNC_UI_LOCALE";
}

/// 默认元数据库文件名
pub const DEFAULT_STORE_FILE: &str = "starward_meta_db.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    FormatError { path: String, message: String },
}

// ==========================================
// SyncConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub default_lang: String,
    pub default_count: String,
    pub export_app_marker: String,
    pub output_file_prefix: String,
    pub ui_locale: String,
    pub store_path: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let conversion = ConversionDefaults::default();
        Self {
            default_lang: conversion.lang,
            default_count: conversion.count,
            export_app_marker: conversion.export_app,
            output_file_prefix: "Starward_UIGF_".to_string(),
            ui_locale: "zh-CN".to_string(),
            store_path: None,
        }
    }
}

impl SyncConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - config_path: 可选配置文件路径；None 时仅使用默认值与环境变量
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::FormatError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（空值忽略）
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = get(config_keys::STORE_PATH) {
            debug!(store_path = %path, "环境变量覆写元数据库路径");
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(lang) = get(config_keys::LANG) {
            self.default_lang = lang;
        }
        if let Some(locale) = get(config_keys::UI_LOCALE) {
            self.ui_locale = locale;
        }
    }

    /// 转换器默认值
    pub fn conversion_defaults(&self) -> ConversionDefaults {
        ConversionDefaults {
            lang: self.default_lang.clone(),
            count: self.default_count.clone(),
            export_app: self.export_app_marker.clone(),
        }
    }

    /// 元数据库路径
    ///
    /// # 返回
    /// - 显式配置的路径
    /// - 否则: 用户数据目录/starward-uigf-sync/starward_meta_db.json
    /// - 无法获取用户数据目录时: ./starward_meta_db.json
    pub fn resolve_store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }

        match dirs::data_dir() {
            Some(data_dir) => data_dir.join("starward-uigf-sync").join(DEFAULT_STORE_FILE),
            None => PathBuf::from(".").join(DEFAULT_STORE_FILE),
        }
    }

    /// 转换输出文件名: <前缀><YYYYmmdd_HHMMSS>.json
    pub fn output_file_name<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format!("{}{}.json", self.output_file_prefix, now.format("%Y%m%d_%H%M%S"))
    }
}
