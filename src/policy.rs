//! 哈希策略
//!
//! [`HashPolicy`] 持有一份解析后的 [`HashConfig`] 和由它构造的唯一后端，
//! 所有哈希操作都委托给该后端。
//!
//! ## 状态
//!
//! 构造成功即处于可用状态。[`HashPolicy::configure`] 先完整解析并构造新后端，
//! 全部成功后才整体替换旧配置和旧后端；失败时策略保持不变。
//!
//! ## 并发
//!
//! `configure` / `generate_with` 需要 `&mut self`，只读操作只需要 `&self`，
//! 因此借用规则保证了重新配置不会与哈希操作并发发生。
//!
//! ## 示例
//!
//! ```rust
//! use hashpolicy::{HashOptions, HashPolicy};
//!
//! let mut policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
//!
//! let hash = policy.create("Hello World!").unwrap();
//! assert!(policy.verify("Hello World!", &hash));
//! assert!(!policy.verify("Hello Tom!", &hash));
//! assert!(!policy.needs_rehash(&hash));
//!
//! policy.configure(HashOptions::new().cost(5)).unwrap();
//! assert!(policy.needs_rehash(&hash));
//! ```

use crate::backend::{Backend, HashBackend};
use crate::config::{Algorithm, HashConfig, HashOptions};
use crate::error::{Error, Result};
use crate::random::{OsRandom, RandomSource};

/// `generate` 默认的随机明文长度
pub const DEFAULT_GENERATE_LENGTH: usize = 16;

/// 策略驱动的密码哈希器
#[derive(Debug, Clone)]
pub struct HashPolicy<R: RandomSource = OsRandom> {
    config: HashConfig,
    backend: Backend,
    rand: R,
}

impl HashPolicy {
    /// 创建新的哈希策略
    ///
    /// 未设置的选项使用默认值。
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashpolicy::{Algorithm, HashOptions, HashPolicy};
    ///
    /// let policy = HashPolicy::new(HashOptions::new().algorithm(Algorithm::Argon2id)).unwrap();
    /// assert_eq!(policy.algorithm(), Algorithm::Argon2id);
    /// ```
    pub fn new(options: HashOptions) -> Result<Self> {
        Self::with_random(options, OsRandom)
    }

    /// 使用完整配置创建哈希策略
    pub fn from_config(config: HashConfig) -> Result<Self> {
        Self::new(config.into())
    }

    /// 使用默认配置（bcrypt，cost 10）创建哈希策略
    pub fn bcrypt_default() -> Result<Self> {
        Self::new(HashOptions::default())
    }

    /// 从 JSON 选项创建哈希策略
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashpolicy::HashPolicy;
    ///
    /// let err = HashPolicy::from_json(r#"{"algo": "md5"}"#).unwrap_err();
    /// assert!(err.is_unrecognized_algorithm());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(HashOptions::from_json(json)?)
    }
}

impl<R: RandomSource> HashPolicy<R> {
    /// 使用指定的随机来源创建哈希策略
    pub fn with_random(options: HashOptions, rand: R) -> Result<Self> {
        let (config, backend) = build(&options, &HashConfig::default())?;
        Ok(Self {
            config,
            backend,
            rand,
        })
    }

    /// 当前生效的配置
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// 当前生效的算法
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// 当前生效的后端
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// 将选项合并到当前配置之上并重建后端
    ///
    /// 任一步失败时返回错误，原有配置和后端保持不变。
    pub fn configure(&mut self, options: HashOptions) -> Result<&mut Self> {
        let (config, backend) = build(&options, &self.config)?;
        self.config = config;
        self.backend = backend;
        Ok(self)
    }

    /// 哈希明文
    ///
    /// 每次调用使用新的随机盐，同一明文两次哈希的结果不同。
    pub fn create(&self, text: &str) -> Result<String> {
        self.backend.make(text)
    }

    /// 验证明文是否匹配哈希
    ///
    /// 不匹配、格式错误或由其他算法生成的哈希都返回 `false`。
    pub fn verify(&self, text: &str, hash: &str) -> bool {
        self.backend.check(text, hash)
    }

    /// 检查哈希是否需要按当前配置重新生成
    ///
    /// 由其他算法生成的哈希总是需要重新生成。
    pub fn needs_rehash(&self, hash: &str) -> bool {
        self.backend.needs_rehash(hash)
    }

    /// 验证明文，并在哈希过期时返回按当前配置生成的新哈希
    ///
    /// 不匹配或不需要 rehash 时返回 `Ok(None)`。
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashpolicy::{HashOptions, HashPolicy};
    ///
    /// let old = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
    /// let hash = old.create("secret").unwrap();
    ///
    /// let current = HashPolicy::new(HashOptions::new().cost(5)).unwrap();
    /// let upgraded = current.verify_and_rehash("secret", &hash).unwrap().unwrap();
    /// assert!(!current.needs_rehash(&upgraded));
    /// assert!(current.verify_and_rehash("wrong", &hash).unwrap().is_none());
    /// ```
    pub fn verify_and_rehash(&self, text: &str, hash: &str) -> Result<Option<String>> {
        if !self.needs_rehash(hash) {
            return Ok(None);
        }
        if !self.verify_any(text, hash) {
            return Ok(None);
        }
        self.create(text).map(Some)
    }

    /// 生成 `length` 个字符的随机明文并只返回它的哈希
    ///
    /// 明文本身被丢弃，常用于生成只保存哈希的 token。
    pub fn generate(&self, length: usize) -> Result<String> {
        if length == 0 {
            return Err(Error::InvalidLength(length));
        }
        let text = self.rand.get_string(length)?;
        self.create(&text)
    }

    /// 先应用选项再生成随机哈希
    ///
    /// 长度在重新配置之前校验；空选项不会触发重新配置。
    pub fn generate_with(&mut self, length: usize, options: HashOptions) -> Result<String> {
        if length == 0 {
            return Err(Error::InvalidLength(length));
        }
        if !options.is_empty() {
            self.configure(options)?;
        }
        self.generate(length)
    }

    /// 用哈希自身的算法验证，供 rehash 升级使用
    fn verify_any(&self, text: &str, hash: &str) -> bool {
        if self.backend.check(text, hash) {
            return true;
        }
        Algorithm::ALL
            .into_iter()
            .filter(|alg| *alg != self.config.algorithm)
            .filter_map(|alg| {
                let config = HashConfig {
                    algorithm: alg,
                    ..self.config
                };
                Backend::select(&config).ok()
            })
            .any(|backend| backend.check(text, hash))
    }
}

fn build(options: &HashOptions, base: &HashConfig) -> Result<(HashConfig, Backend)> {
    let config = options.resolve_over(base)?;
    let backend = Backend::select(&config)?;
    tracing::debug!(
        algorithm = %config.algorithm,
        cost = config.cost,
        memory_cost = config.memory_cost,
        time_cost = config.time_cost,
        threads = config.threads,
        "hash policy configured"
    );
    Ok((config, backend))
}
