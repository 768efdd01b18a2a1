//! bcrypt 后端
//!
//! bcrypt 只处理前 72 字节（含结尾的 NUL）。这里使用不截断的接口：
//! 超长明文哈希失败，验证返回 `false`，不会让共享前缀的不同明文互相匹配。

use ::bcrypt::HashParts;

use crate::config::{Algorithm, BCRYPT_MAX_COST, BCRYPT_MIN_COST};
use crate::error::{Error, PasswordHashError, Result};

use super::HashBackend;

/// bcrypt 后端，只使用 `cost` 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptBackend {
    cost: u32,
}

impl BcryptBackend {
    /// 创建 bcrypt 后端
    ///
    /// `cost` 必须在 4-31 之间。
    pub fn new(cost: u32) -> Result<Self> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
            return Err(Error::invalid_option(
                "cost",
                format!(
                    "must be between {} and {}, got {}",
                    BCRYPT_MIN_COST, BCRYPT_MAX_COST, cost
                ),
            ));
        }
        Ok(Self { cost })
    }

    /// 配置的 cost
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl HashBackend for BcryptBackend {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bcrypt
    }

    fn make(&self, text: &str) -> Result<String> {
        ::bcrypt::non_truncating_hash(text, self.cost).map_err(|e| {
            Error::PasswordHash(PasswordHashError::HashFailed(format!(
                "bcrypt hash failed: {}",
                e
            )))
        })
    }

    fn check(&self, text: &str, hash: &str) -> bool {
        ::bcrypt::non_truncating_verify(text, hash).unwrap_or(false)
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        let stale = match hash.parse::<HashParts>() {
            Ok(parts) => parts.get_cost() != self.cost,
            Err(_) => true,
        };
        tracing::trace!(algorithm = "bcrypt", cost = self.cost, stale, "rehash check");
        stale
    }
}
