//! 錯誤處理系統
//!
//! 衍生數值計算不吞錯誤：成長表缺級數、缺少必要屬性值等資料問題
//! 一律往上拋，由呼叫端呈現為「角色資料不完整」。

use crate::abilities::Ability;
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Character(#[from] CharacterError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// 成長表錯誤（參考資料設定問題）
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("成長表 {progression} 缺少等級 {level} 的數值")]
    MissingLevel { progression: String, level: u32 },
}

/// 角色資料不完整或不一致
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum CharacterError {
    #[error("角色 {character} 缺少 {ability} 屬性值")]
    MissingAbilityScore { character: String, ability: Ability },
    #[error("角色 {character} 的 {ability} 屬性值重複")]
    DuplicateAbilityScore { character: String, ability: Ability },
    #[error("角色 {character} 的職業 {class} 重複")]
    DuplicateClass { character: String, class: String },
    #[error("角色 {character} 的職業 {class} 等級 {level} 不合法（1 ~ {max_level}）")]
    InvalidClassLevel {
        character: String,
        class: String,
        level: u32,
        max_level: u32,
    },
    #[error("{ability} 沒有對應的豁免")]
    NoSaveForAbility { ability: Ability },
    #[error("找不到{kind}: {name}")]
    UnknownReference { kind: &'static str, name: String },
    #[error("{stat} 超出數值範圍")]
    StatOverflow { stat: String },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("讀取檔案失敗 {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("{kind} 名稱重複: {name}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("參考資料引用了不存在的{kind}: {name}")]
    UnknownReference { kind: &'static str, name: String },
}

/// 角色表輸出錯誤
#[derive(Debug, ThisError)]
pub enum OutputError {
    #[error("{format} 序列化失敗: {reason}")]
    SerializeError { format: String, reason: String },
}

/// 欄位驗證錯誤
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} 必須介於 {min} 和 {max} 之間，實際為 {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{field} 不可為負數，實際為 {value}")]
    Negative { field: String, value: i64 },
    #[error("年份必須介於 1974 和 {current} 之間，實際為 {value}")]
    InvalidYear { value: i32, current: i32 },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

// Display 已包含 kind 的訊息，不再回傳 source 以免 anyhow 重複輸出
impl std::error::Error for Error {}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
