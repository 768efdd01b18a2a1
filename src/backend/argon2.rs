//! Argon2i / Argon2id 后端

use ::argon2::{Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};

use crate::config::Algorithm;
use crate::error::{Error, PasswordHashError, Result};
use crate::random::generate_random_bytes;

use super::HashBackend;

/// 盐值长度（字节）
const SALT_LENGTH: usize = 16;

/// Argon2 后端，使用 `memory_cost`、`time_cost`、`threads` 参数
#[derive(Debug, Clone)]
pub struct Argon2Backend {
    algorithm: Algorithm,
    params: Params,
}

impl Argon2Backend {
    /// 创建 Argon2 后端
    ///
    /// `algorithm` 必须是 [`Algorithm::Argon2i`] 或 [`Algorithm::Argon2id`]。
    pub fn new(algorithm: Algorithm, params: Params) -> Result<Self> {
        if !algorithm.is_argon2() {
            return Err(Error::invalid_option(
                "algorithm",
                format!("{} is not an Argon2 variant", algorithm),
            ));
        }
        Ok(Self { algorithm, params })
    }

    /// 配置的 Argon2 参数
    pub fn params(&self) -> &Params {
        &self.params
    }

    fn variant(&self) -> ::argon2::Algorithm {
        match self.algorithm {
            Algorithm::Argon2i => ::argon2::Algorithm::Argon2i,
            _ => ::argon2::Algorithm::Argon2id,
        }
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(self.variant(), Version::V0x13, self.params.clone())
    }

    fn is_stale(&self, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return true;
        };
        if parsed.algorithm != self.variant().ident() {
            return true;
        }
        if parsed.version != Some(u32::from(Version::V0x13)) {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(embedded) => {
                embedded.m_cost() != self.params.m_cost()
                    || embedded.t_cost() != self.params.t_cost()
                    || embedded.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl HashBackend for Argon2Backend {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn make(&self, text: &str) -> Result<String> {
        let salt_bytes = generate_random_bytes(SALT_LENGTH)?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            Error::PasswordHash(PasswordHashError::HashFailed(format!(
                "Failed to encode salt: {}",
                e
            )))
        })?;

        self.hasher()
            .hash_password(text.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                Error::PasswordHash(PasswordHashError::HashFailed(format!(
                    "{} hash failed: {}",
                    self.algorithm, e
                )))
            })
    }

    fn check(&self, text: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        if parsed.algorithm != self.variant().ident() {
            return false;
        }
        self.hasher()
            .verify_password(text.as_bytes(), &parsed)
            .is_ok()
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        let stale = self.is_stale(hash);
        tracing::trace!(
            algorithm = %self.algorithm,
            m_cost = self.params.m_cost(),
            t_cost = self.params.t_cost(),
            p_cost = self.params.p_cost(),
            stale,
            "rehash check"
        );
        stale
    }
}
