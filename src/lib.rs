//! # hashpolicy
//!
//! 策略驱动的密码哈希库。
//!
//! ## 功能特性
//!
//! - **算法选择**: 由一份配置（算法 + 参数）决定使用 bcrypt、Argon2i 还是 Argon2id
//! - **密码验证**: 明文与存储哈希的比对，不匹配只返回 `false`
//! - **Rehash 检测**: 判断存储的哈希是否由旧的算法或参数生成
//! - **随机哈希**: 生成随机明文并只返回它的哈希，适合签发 API token
//!
//! 底层密码学原语由 `bcrypt` 与 `argon2` crate 提供。
//!
//! ## 密码哈希示例
//!
//! ```rust
//! use hashpolicy::{HashOptions, HashPolicy};
//!
//! let policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
//!
//! // 哈希密码
//! let hash = policy.create("my_secure_password").unwrap();
//!
//! // 验证密码
//! assert!(policy.verify("my_secure_password", &hash));
//! assert!(!policy.verify("wrong_password", &hash));
//! ```
//!
//! ## 策略升级
//!
//! ```rust
//! use hashpolicy::{Algorithm, HashOptions, HashPolicy};
//!
//! let mut policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
//! let hash = policy.create("my_password").unwrap();
//!
//! policy
//!     .configure(
//!         HashOptions::new()
//!             .algorithm(Algorithm::Argon2id)
//!             .memory_cost(1024)
//!             .time_cost(1),
//!     )
//!     .unwrap();
//!
//! // 旧哈希由 bcrypt 生成，需要按新策略重新哈希
//! assert!(policy.needs_rehash(&hash));
//! ```
//!
//! ## 随机哈希
//!
//! ```rust
//! use hashpolicy::{HashOptions, HashPolicy, DEFAULT_GENERATE_LENGTH};
//!
//! let policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
//! let hash = policy.generate(DEFAULT_GENERATE_LENGTH).unwrap();
//! assert!(hash.starts_with("$2"));
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod policy;
pub mod random;

pub use error::{Error, Result};

// ============================================================================
// 策略相关导出
// ============================================================================

pub use backend::{Argon2Backend, Backend, BcryptBackend, HashBackend};
pub use config::{Algorithm, HashConfig, HashOptions};
pub use policy::{DEFAULT_GENERATE_LENGTH, HashPolicy};

// ============================================================================
// 随机数生成导出
// ============================================================================

pub use random::{OsRandom, RandomSource, generate_random_alphanumeric, generate_random_bytes};
