//! 统一错误类型模块
//!
//! 提供 hashpolicy 库中所有操作的错误类型定义。
//!
//! 验证失败（密码不匹配）不是错误，`verify` 只返回 `bool`。

use std::fmt;

/// hashpolicy 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// hashpolicy 库的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 算法名称不在 {bcrypt, argon2i, argon2id} 之内
    UnrecognizedAlgorithm(String),

    /// 未知的选项键，或类型、取值范围错误
    InvalidOption {
        /// 选项名
        key: String,
        /// 错误描述
        message: String,
    },

    /// 请求的长度非正
    InvalidLength(usize),

    /// 密码哈希错误
    PasswordHash(PasswordHashError),

    /// 加密错误
    Crypto(CryptoError),
}

impl Error {
    /// 创建一个选项错误
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidOption {
            key: key.into(),
            message: message.into(),
        }
    }

    /// 是否为算法无法识别的错误
    pub fn is_unrecognized_algorithm(&self) -> bool {
        matches!(self, Error::UnrecognizedAlgorithm(_))
    }
}

/// 密码哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    /// 哈希生成失败
    HashFailed(String),
}

/// 加密相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnrecognizedAlgorithm(name) => {
                write!(f, "could not determine the hash algorithm: {}", name)
            }
            Error::InvalidOption { key, message } => {
                write!(f, "invalid option '{}': {}", key, message)
            }
            Error::InvalidLength(len) => {
                write!(f, "invalid length {}: must be greater than zero", len)
            }
            Error::PasswordHash(e) => write!(f, "Password hash error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
        }
    }
}

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordHashError::HashFailed(msg) => write!(f, "hash generation failed: {}", msg),
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PasswordHash(e) => Some(e),
            Error::Crypto(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for PasswordHashError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<PasswordHashError> for Error {
    fn from(err: PasswordHashError) -> Self {
        Error::PasswordHash(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnrecognizedAlgorithm("md5".to_string());
        assert_eq!(
            err.to_string(),
            "could not determine the hash algorithm: md5"
        );
    }

    #[test]
    fn test_invalid_option_display() {
        let err = Error::invalid_option("cost", "must be between 4 and 31");
        assert_eq!(
            err.to_string(),
            "invalid option 'cost': must be between 4 and 31"
        );
    }

    #[test]
    fn test_error_from_password_hash() {
        let hash_err = PasswordHashError::HashFailed("test".to_string());
        let err: Error = hash_err.into();
        assert!(matches!(err, Error::PasswordHash(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_length_display() {
        assert_eq!(
            Error::InvalidLength(0).to_string(),
            "invalid length 0: must be greater than zero"
        );
    }
}
