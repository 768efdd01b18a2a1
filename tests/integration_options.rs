//! 集成测试：选项解析与校验

use hashpolicy::{Algorithm, Error, HashConfig, HashOptions, HashPolicy};
use serde_json::json;

/// 测试默认选项
#[test]
fn test_defaults() {
    let policy = HashPolicy::bcrypt_default().unwrap();
    let config = policy.config();

    assert_eq!(config.algorithm, Algorithm::Bcrypt);
    assert_eq!(config.cost, 10);
    assert_eq!(config.memory_cost, argon2::Params::DEFAULT_M_COST);
    assert_eq!(config.time_cost, argon2::Params::DEFAULT_T_COST);
    assert_eq!(config.threads, argon2::Params::DEFAULT_P_COST);
}

/// 测试 JSON 选项构造策略
#[test]
fn test_policy_from_json() {
    let policy = HashPolicy::from_json(
        r#"{"algorithm": "argon2i", "memory_cost": 1024, "time_cost": 1, "threads": 1}"#,
    )
    .unwrap();

    assert_eq!(policy.algorithm(), Algorithm::Argon2i);
    assert_eq!(policy.config().memory_cost, 1024);
}

/// 测试未知选项键
#[test]
fn test_unknown_option_key() {
    let value = json!({ "cost": 4, "pepper": "abc" });
    let err = HashOptions::try_from(value).unwrap_err();
    assert_eq!(err, Error::invalid_option("pepper", "unknown option"));
}

/// 测试类型错误的选项
#[test]
fn test_mistyped_option_values() {
    for (key, value) in [
        ("cost", json!(4.5)),
        ("memory_cost", json!("lots")),
        ("time_cost", json!(null)),
        ("threads", json!([1])),
    ] {
        let err = HashOptions::try_from(json!({ key: value })).unwrap_err();
        assert!(
            matches!(err, Error::InvalidOption { key: ref k, .. } if k == key),
            "{key}: {err}"
        );
    }
}

/// 测试取值越界的选项在配置时失败
#[test]
fn test_out_of_range_option_values() {
    let mut policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();
    let before = *policy.config();

    for options in [
        HashOptions::new().cost(2),
        HashOptions::new().cost(40),
        HashOptions::new().time_cost(0),
        HashOptions::new().threads(0),
        HashOptions::new().memory_cost(1),
    ] {
        let err = policy.configure(options).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }), "{err}");
        assert_eq!(*policy.config(), before);
    }
}

/// 测试选项按顺序叠加
#[test]
fn test_options_layer_over_current_config() {
    let mut policy = HashPolicy::new(HashOptions::new().cost(4)).unwrap();

    policy
        .configure(HashOptions::new().algorithm(Algorithm::Argon2id).memory_cost(1024).time_cost(1))
        .unwrap();
    policy.configure(HashOptions::new().time_cost(2)).unwrap();

    let config = policy.config();
    assert_eq!(config.algorithm, Algorithm::Argon2id);
    assert_eq!(config.cost, 4);
    assert_eq!(config.memory_cost, 1024);
    assert_eq!(config.time_cost, 2);
}

/// 测试配置序列化
#[test]
fn test_config_round_trips_through_options() {
    let config = HashConfig {
        algorithm: Algorithm::Argon2i,
        cost: 6,
        memory_cost: 4096,
        time_cost: 3,
        threads: 2,
    };
    let json = serde_json::to_string(&config).unwrap();

    let options = HashOptions::from_json(&json).unwrap();
    assert_eq!(options.resolve_over(&HashConfig::default()).unwrap(), config);
}
