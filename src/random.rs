//! 安全随机数生成模块
//!
//! 提供密码学安全的随机数生成功能，用于生成盐值和随机明文。

use rand::{Rng, SeedableRng, TryRngCore, distr::Alphanumeric, rngs::OsRng, rngs::StdRng};

use crate::error::{CryptoError, Error, Result};

/// 随机字符串来源
///
/// [`HashPolicy::generate`](crate::policy::HashPolicy::generate) 从这里取得随机明文。
/// 实现必须使用密码学安全的随机数生成器。
pub trait RandomSource {
    /// 生成恰好 `length` 个字符的随机字符串
    ///
    /// `length` 为 0 时返回 [`Error::InvalidLength`]。
    fn get_string(&self, length: usize) -> Result<String>;
}

/// 基于操作系统 CSPRNG 的随机来源
///
/// 生成只包含 a-z, A-Z, 0-9 的字符串。
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn get_string(&self, length: usize) -> Result<String> {
        generate_random_alphanumeric(length)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &T {
    fn get_string(&self, length: usize) -> Result<String> {
        (**self).get_string(length)
    }
}

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Example
///
/// ```rust
/// use hashpolicy::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(16).unwrap();
/// assert_eq!(bytes.len(), 16);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;
    Ok(bytes)
}

/// 生成指定长度的字母数字随机字符串
///
/// 生成器由操作系统熵源播种，长度为 0 时返回 [`Error::InvalidLength`]。
///
/// # Example
///
/// ```rust
/// use hashpolicy::random::generate_random_alphanumeric;
///
/// let token = generate_random_alphanumeric(24).unwrap();
/// assert_eq!(token.len(), 24);
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_random_alphanumeric(length: usize) -> Result<String> {
    if length == 0 {
        return Err(Error::InvalidLength(length));
    }

    let rng = StdRng::try_from_os_rng()
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;

    Ok(rng
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}
