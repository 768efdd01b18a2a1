//! 哈希策略配置
//!
//! [`HashConfig`] 是解析后的不可变配置，[`HashOptions`] 是调用方提供的
//! 部分覆盖项。选项合并到当前配置之上并在应用前整体校验。
//!
//! ## 选项
//!
//! | 选项 | 适用算法 | 默认值 |
//! |---|---|---|
//! | `algorithm` | 全部 | `bcrypt` |
//! | `cost` | bcrypt | 10 |
//! | `memory_cost` | argon2i / argon2id | [`argon2::Params::DEFAULT_M_COST`] |
//! | `time_cost` | argon2i / argon2id | [`argon2::Params::DEFAULT_T_COST`] |
//! | `threads` | argon2i / argon2id | [`argon2::Params::DEFAULT_P_COST`] |
//!
//! ## 示例
//!
//! ```rust
//! use hashpolicy::config::{Algorithm, HashConfig, HashOptions};
//!
//! let options = HashOptions::new().algorithm(Algorithm::Bcrypt).cost(12);
//! let config = options.resolve_over(&HashConfig::default()).unwrap();
//! assert_eq!(config.cost, 12);
//!
//! let options = HashOptions::from_json(r#"{"algorithm": "argon2id", "threads": 2}"#).unwrap();
//! let config = options.resolve_over(&config).unwrap();
//! assert_eq!(config.algorithm, Algorithm::Argon2id);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use argon2::Params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// bcrypt 的最小 cost
pub const BCRYPT_MIN_COST: u32 = 4;

/// bcrypt 的最大 cost
pub const BCRYPT_MAX_COST: u32 = 31;

/// bcrypt 的默认 cost
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Argon2 内存开销上限（KiB，4 GiB）
pub const ARGON2_MAX_MEMORY_COST: u32 = 4 * 1024 * 1024;

/// 支持的哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// bcrypt - 经典算法，广泛支持
    #[default]
    Bcrypt,

    /// Argon2i - 抵抗侧信道攻击
    Argon2i,

    /// Argon2id - 结合了 Argon2i 和 Argon2d 的优点
    Argon2id,
}

impl Algorithm {
    /// 所有支持的算法
    pub const ALL: [Algorithm; 3] = [Algorithm::Bcrypt, Algorithm::Argon2i, Algorithm::Argon2id];

    /// 算法的规范名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Argon2i => "argon2i",
            Algorithm::Argon2id => "argon2id",
        }
    }

    /// 是否为 Argon2 家族
    pub fn is_argon2(&self) -> bool {
        matches!(self, Algorithm::Argon2i | Algorithm::Argon2id)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnrecognizedAlgorithm(s.to_string()))
    }
}

/// 解析后的哈希配置
///
/// 由 `algorithm` 决定哪一组参数生效：bcrypt 只看 `cost`，
/// Argon2 只看 `memory_cost` / `time_cost` / `threads`。
/// 不生效的字段同样会被校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// 使用的哈希算法
    pub algorithm: Algorithm,

    /// bcrypt 的 cost 参数 (4-31)
    pub cost: u32,

    /// Argon2 内存开销（KiB）
    pub memory_cost: u32,

    /// Argon2 迭代次数
    pub time_cost: u32,

    /// Argon2 并行度
    pub threads: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bcrypt,
            cost: DEFAULT_BCRYPT_COST,
            memory_cost: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            threads: Params::DEFAULT_P_COST,
        }
    }
}

impl HashConfig {
    /// 校验所有字段的取值范围
    pub fn validate(&self) -> Result<()> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.cost) {
            return Err(Error::invalid_option(
                "cost",
                format!(
                    "must be between {} and {}, got {}",
                    BCRYPT_MIN_COST, BCRYPT_MAX_COST, self.cost
                ),
            ));
        }

        if !(Params::MIN_P_COST..=Params::MAX_P_COST).contains(&self.threads) {
            return Err(Error::invalid_option(
                "threads",
                format!(
                    "must be between {} and {}, got {}",
                    Params::MIN_P_COST,
                    Params::MAX_P_COST,
                    self.threads
                ),
            ));
        }

        if self.time_cost < Params::MIN_T_COST {
            return Err(Error::invalid_option(
                "time_cost",
                format!("must be at least {}, got {}", Params::MIN_T_COST, self.time_cost),
            ));
        }

        // Argon2 要求每条 lane 至少 8 KiB
        let min_memory = Params::MIN_M_COST.max(self.threads.saturating_mul(8));
        if self.memory_cost < min_memory {
            return Err(Error::invalid_option(
                "memory_cost",
                format!("must be at least {}, got {}", min_memory, self.memory_cost),
            ));
        }
        if self.memory_cost > ARGON2_MAX_MEMORY_COST {
            return Err(Error::invalid_option(
                "memory_cost",
                format!(
                    "must be at most {}, got {}",
                    ARGON2_MAX_MEMORY_COST, self.memory_cost
                ),
            ));
        }

        self.argon2_params().map(|_| ())
    }

    /// 构造 Argon2 参数
    pub fn argon2_params(&self) -> Result<Params> {
        Params::new(self.memory_cost, self.time_cost, self.threads, None)
            .map_err(|e| Error::invalid_option("memory_cost", e.to_string()))
    }
}

/// 调用方提供的部分配置
///
/// 未设置的字段沿用当前配置。可以通过 builder 方法构造，
/// 也可以从 JSON 对象解析。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashOptions {
    algorithm: Option<Algorithm>,
    cost: Option<u32>,
    memory_cost: Option<u32>,
    time_cost: Option<u32>,
    threads: Option<u32>,
}

impl HashOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置算法
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// 设置 bcrypt cost
    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// 设置 Argon2 内存开销（KiB）
    ///
    /// 上限为 [`ARGON2_MAX_MEMORY_COST`]。
    pub fn memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = Some(memory_cost);
        self
    }

    /// 设置 Argon2 迭代次数
    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = Some(time_cost);
        self
    }

    /// 设置 Argon2 并行度
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// 是否没有设置任何选项
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 从 JSON 对象字符串解析选项
    ///
    /// 未知键、重复的别名或类型错误返回 [`Error::InvalidOption`]，
    /// 未知算法返回 [`Error::UnrecognizedAlgorithm`]。
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::invalid_option("options", e.to_string()))?;
        Self::try_from(value)
    }

    /// 从键值映射解析选项
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut options = Self::default();
        let mut seen = HashSet::new();

        for (key, value) in map {
            let field = match key.as_str() {
                "algorithm" | "algo" => "algorithm",
                "cost" => "cost",
                "memory_cost" | "memoryCost" => "memory_cost",
                "time_cost" | "timeCost" => "time_cost",
                "threads" => "threads",
                _ => return Err(Error::invalid_option(key.as_str(), "unknown option")),
            };
            // 同一字段的多个别名同时出现时无法确定取值
            if !seen.insert(field) {
                return Err(Error::invalid_option(
                    key.as_str(),
                    format!("duplicate option '{}'", field),
                ));
            }

            match field {
                "algorithm" => {
                    let name = value.as_str().ok_or_else(|| {
                        Error::invalid_option(key.as_str(), "expected a string")
                    })?;
                    options.algorithm = Some(name.parse()?);
                }
                "cost" => options.cost = Some(parse_u32(key, value)?),
                "memory_cost" => options.memory_cost = Some(parse_u32(key, value)?),
                "time_cost" => options.time_cost = Some(parse_u32(key, value)?),
                _ => options.threads = Some(parse_u32(key, value)?),
            }
        }

        Ok(options)
    }

    /// 将选项合并到 `base` 之上并校验
    ///
    /// 校验失败时不产生任何部分结果。
    pub fn resolve_over(&self, base: &HashConfig) -> Result<HashConfig> {
        let config = HashConfig {
            algorithm: self.algorithm.unwrap_or(base.algorithm),
            cost: self.cost.unwrap_or(base.cost),
            memory_cost: self.memory_cost.unwrap_or(base.memory_cost),
            time_cost: self.time_cost.unwrap_or(base.time_cost),
            threads: self.threads.unwrap_or(base.threads),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<Value> for HashOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Err(Error::invalid_option("options", "expected a JSON object")),
        }
    }
}

impl From<HashConfig> for HashOptions {
    fn from(config: HashConfig) -> Self {
        Self {
            algorithm: Some(config.algorithm),
            cost: Some(config.cost),
            memory_cost: Some(config.memory_cost),
            time_cost: Some(config.time_cost),
            threads: Some(config.threads),
        }
    }
}

fn parse_u32(key: &str, value: &Value) -> Result<u32> {
    u32::deserialize(value)
        .map_err(|e| Error::invalid_option(key, format!("expected a non-negative integer: {}", e)))
}
