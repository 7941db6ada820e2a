//! # 本地化类型定义
//!
//! 定义了本地化条目和服务边界相关的数据结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::constants::{MAX_CODE_LEN, MAX_LANG_LEN};
use super::error::{LocaleError, LocaleResult};

/// 本地化消息条目
///
/// (`code`, `lang`) 在所有条目中唯一；`updated_at` 在每次变更时刷新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleEntry {
    /// 存储后端分配的唯一标识
    pub id: String,
    /// 语言标签（非空，最长8字符）
    pub lang: String,
    /// 消息键（非空，最长255字符）
    pub code: String,
    /// 消息文本
    pub message: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 解析请求（前端边界调用）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolveRequest {
    /// 请求语言
    pub lang: String,
    /// 消息键
    pub code: String,
}

/// 解析响应
///
/// `message` 为解析出的文本；完全回退时为消息键本身
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub message: String,
}

/// 校验写入参数
///
/// 语言标签非空且不超过8字符；消息键非空且不超过255字符；消息文本非空
pub fn validate_put(lang: &str, code: &str, message: &str) -> LocaleResult<()> {
    if lang.trim().is_empty() {
        return Err(LocaleError::ValidationError(
            "语言标签不能为空".to_string(),
        ));
    }

    if lang.chars().count() > MAX_LANG_LEN {
        return Err(LocaleError::ValidationError(format!(
            "语言标签 '{}' 超过最大长度 {}",
            lang, MAX_LANG_LEN
        )));
    }

    if code.trim().is_empty() {
        return Err(LocaleError::ValidationError(
            "消息键不能为空".to_string(),
        ));
    }

    if code.chars().count() > MAX_CODE_LEN {
        return Err(LocaleError::ValidationError(format!(
            "消息键超过最大长度 {}",
            MAX_CODE_LEN
        )));
    }

    if message.is_empty() {
        return Err(LocaleError::ValidationError(
            "消息文本不能为空".to_string(),
        ));
    }

    Ok(())
}
