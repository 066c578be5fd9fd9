//! User Name Value Object
//!
//! ユーザー名はユーザーの**業務キー**であり、登録後は変更できない。
//! トークンの subject としても使用される。
//!
//! ## 設計方針
//! - NFC正規化 → 前後の空白を除去 → 検証 の順で処理
//! - 大文字小文字は区別する（入力どおりに保存）
//!
//! ## 不変条件
//! - 空文字列・空白のみは不可
//! - 長さ: 最大64文字（正規化後）
//! - 制御文字を含まない

use std::fmt;

use derive_more::Display;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Blank after trimming
    Empty,
    /// Longer than [`USER_NAME_MAX_LENGTH`]
    TooLong { max: usize, actual: usize },
    /// Contains a control character
    InvalidCharacter,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserNameError::Empty => write!(f, "User name cannot be empty"),
            UserNameError::TooLong { max, actual } => {
                write!(f, "User name must be at most {} characters (got {})", max, actual)
            }
            UserNameError::InvalidCharacter => {
                write!(f, "User name contains invalid control characters")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct UserName(String);

impl UserName {
    /// Normalize and validate a user name from input
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
                actual: length,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore from a stored value without re-normalizing
    pub fn from_db(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_name() {
        let name = UserName::new("alice").unwrap();
        assert_eq!(name.as_str(), "alice");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(UserName::new("  bob \n").unwrap().as_str(), "bob");
    }

    #[test]
    fn test_case_preserved() {
        assert_ne!(UserName::new("Alice").unwrap(), UserName::new("alice").unwrap());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(long),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_control_character_rejected() {
        assert_eq!(
            UserName::new("ali\u{0000}ce"),
            Err(UserNameError::InvalidCharacter)
        );
    }

    #[test]
    fn test_nfc_normalization() {
        // "é" as e + combining acute accent
        let decomposed = UserName::new("e\u{0301}mile").unwrap();
        let composed = UserName::new("\u{00e9}mile").unwrap();
        assert_eq!(decomposed, composed);
    }
}
