//! 哈希后端适配器
//!
//! 每个后端包装一个外部密码学原语，对外提供统一的
//! make / check / needs_rehash 能力。后端在构造后不可变。
//!
//! ## 支持的后端
//!
//! - [`BcryptBackend`]: bcrypt，参数为 `cost`
//! - [`Argon2Backend`]: Argon2i / Argon2id，参数为 `memory_cost`、`time_cost`、`threads`
//!
//! ## Rehash 约定
//!
//! 哈希字符串不是由当前算法生成的（包括其他算法生成的哈希和无法解析的字符串）
//! 一律视为需要重新哈希；同一算法下任一参数与当前配置不同（无论更高或更低）
//! 也需要重新哈希。

mod argon2;
mod bcrypt;

pub use self::argon2::Argon2Backend;
pub use self::bcrypt::BcryptBackend;

use crate::config::{Algorithm, HashConfig};
use crate::error::Result;

/// 统一的哈希后端能力
pub trait HashBackend {
    /// 后端对应的算法
    fn algorithm(&self) -> Algorithm;

    /// 哈希明文，每次调用使用新的随机盐
    fn make(&self, text: &str) -> Result<String>;

    /// 检查明文是否匹配哈希
    ///
    /// 格式错误或由其他算法生成的哈希返回 `false`，不会返回错误。
    fn check(&self, text: &str, hash: &str) -> bool;

    /// 检查哈希是否需要按当前参数重新生成
    ///
    /// 只比较哈希中嵌入的算法与参数，不会重新验证明文。
    fn needs_rehash(&self, hash: &str) -> bool;
}

/// 按配置选定的后端
///
/// 在配置时一次性解析，之后所有调用都静态分发到具体后端。
#[derive(Debug, Clone)]
pub enum Backend {
    /// bcrypt 后端
    Bcrypt(BcryptBackend),
    /// Argon2i / Argon2id 后端
    Argon2(Argon2Backend),
}

impl Backend {
    /// 根据配置构造后端
    pub fn select(config: &HashConfig) -> Result<Self> {
        match config.algorithm {
            Algorithm::Bcrypt => Ok(Backend::Bcrypt(BcryptBackend::new(config.cost)?)),
            Algorithm::Argon2i | Algorithm::Argon2id => Ok(Backend::Argon2(Argon2Backend::new(
                config.algorithm,
                config.argon2_params()?,
            )?)),
        }
    }

    fn inner(&self) -> &dyn HashBackend {
        match self {
            Backend::Bcrypt(b) => b as &dyn HashBackend,
            Backend::Argon2(b) => b as &dyn HashBackend,
        }
    }
}

impl HashBackend for Backend {
    fn algorithm(&self) -> Algorithm {
        self.inner().algorithm()
    }

    fn make(&self, text: &str) -> Result<String> {
        self.inner().make(text)
    }

    fn check(&self, text: &str, hash: &str) -> bool {
        self.inner().check(text, hash)
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        self.inner().needs_rehash(hash)
    }
}
