//! 集成测试：哈希策略
//!
//! 测试策略构造、哈希验证与 rehash 检测的完整流程。

use hashpolicy::{Algorithm, Error, HashConfig, HashOptions, HashPolicy};

fn fast_options(algorithm: Algorithm) -> HashOptions {
    HashOptions::new()
        .algorithm(algorithm)
        .cost(4)
        .memory_cost(1024)
        .time_cost(1)
        .threads(1)
}

/// 测试 bcrypt cost 升级场景
#[test]
fn test_bcrypt_cost_upgrade_scenario() {
    let policy = HashPolicy::new(
        HashOptions::new()
            .algorithm(Algorithm::Bcrypt)
            .cost(10),
    )
    .expect("bcrypt policy should build");

    let hash = policy.create("Hello World!").unwrap();
    assert!(policy.verify("Hello World!", &hash));
    assert!(!policy.verify("Hello Tom!", &hash));
    assert!(!policy.needs_rehash(&hash));

    // 第二个策略使用更高的 cost，旧哈希需要 rehash
    let stronger = HashPolicy::new(
        HashOptions::new()
            .algorithm(Algorithm::Bcrypt)
            .cost(15),
    )
    .unwrap();
    assert!(stronger.needs_rehash(&hash));
}

/// 测试所有算法的哈希与验证
#[test]
fn test_round_trip_all_algorithms() {
    for alg in Algorithm::ALL {
        let policy = HashPolicy::new(fast_options(alg)).unwrap();
        let hash = policy.create("correct horse battery staple").unwrap();

        assert!(policy.verify("correct horse battery staple", &hash), "{alg}");
        assert!(!policy.verify("correct horse battery stapler", &hash), "{alg}");
    }
}

/// 测试哈希字符串携带算法标识
#[test]
fn test_hash_carries_algorithm_tag() {
    let cases = [
        (Algorithm::Bcrypt, "$2"),
        (Algorithm::Argon2i, "$argon2i$"),
        (Algorithm::Argon2id, "$argon2id$"),
    ];

    for (alg, prefix) in cases {
        let policy = HashPolicy::new(fast_options(alg)).unwrap();
        let hash = policy.create("tagged").unwrap();
        assert!(hash.starts_with(prefix), "{hash} should start with {prefix}");
    }
}

/// 测试同一明文两次哈希结果不同
#[test]
fn test_salt_randomization() {
    for alg in Algorithm::ALL {
        let policy = HashPolicy::new(fast_options(alg)).unwrap();

        let hash1 = policy.create("same_password").unwrap();
        let hash2 = policy.create("same_password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(policy.verify("same_password", &hash1));
        assert!(policy.verify("same_password", &hash2));
    }
}

/// 测试未知算法在构造时失败
#[test]
fn test_unrecognized_algorithm_at_construction() {
    let err = "md5".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, Error::UnrecognizedAlgorithm(ref name) if name == "md5"));

    let err = HashPolicy::from_json(r#"{"algo": "md5"}"#).unwrap_err();
    assert!(err.is_unrecognized_algorithm());
}

/// 测试未知算法在重新配置时失败且策略保持不变
#[test]
fn test_unrecognized_algorithm_on_reconfigure() {
    let mut policy = HashPolicy::new(fast_options(Algorithm::Bcrypt)).unwrap();
    let hash = policy.create("keep").unwrap();

    let err = HashOptions::from_json(r#"{"algorithm": "sha1"}"#)
        .and_then(|options| policy.configure(options).map(|_| ()))
        .unwrap_err();
    assert!(err.is_unrecognized_algorithm());

    assert_eq!(policy.algorithm(), Algorithm::Bcrypt);
    assert!(policy.verify("keep", &hash));
}

/// 测试参数漂移触发 rehash
#[test]
fn test_needs_rehash_after_reconfigure() {
    let mut policy = HashPolicy::new(fast_options(Algorithm::Argon2id)).unwrap();
    let hash = policy.create("drift").unwrap();
    assert!(!policy.needs_rehash(&hash));

    policy.configure(HashOptions::new().memory_cost(2048)).unwrap();
    assert!(policy.needs_rehash(&hash));

    policy.configure(HashOptions::new().memory_cost(1024)).unwrap();
    assert!(!policy.needs_rehash(&hash));

    policy.configure(HashOptions::new().threads(2)).unwrap();
    assert!(policy.needs_rehash(&hash));
}

/// 测试 bcrypt 参数变化不影响 Argon2 策略的 rehash 判断
#[test]
fn test_inactive_params_do_not_trigger_rehash() {
    let mut policy = HashPolicy::new(fast_options(Algorithm::Argon2i)).unwrap();
    let hash = policy.create("inactive").unwrap();

    policy.configure(HashOptions::new().cost(12)).unwrap();
    assert!(!policy.needs_rehash(&hash));
}

/// 测试跨算法的哈希总是需要 rehash 且验证为 false
#[test]
fn test_cross_algorithm_hashes() {
    let bcrypt = HashPolicy::new(fast_options(Algorithm::Bcrypt)).unwrap();
    let argon2id = HashPolicy::new(fast_options(Algorithm::Argon2id)).unwrap();

    let bcrypt_hash = bcrypt.create("cross").unwrap();
    let argon2_hash = argon2id.create("cross").unwrap();

    assert!(argon2id.needs_rehash(&bcrypt_hash));
    assert!(bcrypt.needs_rehash(&argon2_hash));
    assert!(!argon2id.verify("cross", &bcrypt_hash));
    assert!(!bcrypt.verify("cross", &argon2_hash));
}

/// 测试登录时的透明升级
#[test]
fn test_login_upgrade_flow() {
    let legacy = HashPolicy::new(fast_options(Algorithm::Bcrypt)).unwrap();
    let mut stored = legacy.create("user_password").unwrap();

    let current = HashPolicy::new(fast_options(Algorithm::Argon2id)).unwrap();

    // 登录成功后替换存储的哈希
    if let Some(upgraded) = current.verify_and_rehash("user_password", &stored).unwrap() {
        stored = upgraded;
    }

    assert!(current.verify("user_password", &stored));
    assert!(!current.needs_rehash(&stored));
    assert!(current.verify_and_rehash("user_password", &stored).unwrap().is_none());
}

/// 测试从完整配置构造
#[test]
fn test_from_config() {
    let config = HashConfig {
        algorithm: Algorithm::Argon2id,
        cost: 4,
        memory_cost: 1024,
        time_cost: 1,
        threads: 1,
    };
    let policy = HashPolicy::from_config(config).unwrap();
    assert_eq!(*policy.config(), config);
}

/// 测试共享 72 字节前缀的不同明文不会互相匹配
#[test]
fn test_bcrypt_long_plaintexts_are_rejected() {
    let policy = HashPolicy::new(fast_options(Algorithm::Bcrypt)).unwrap();
    let first = format!("{}x", "a".repeat(72));
    let second = format!("{}y", "a".repeat(72));

    let err = policy.create(&first).unwrap_err();
    assert!(matches!(err, Error::PasswordHash(_)));

    let short = policy.create("a").unwrap();
    assert!(!policy.verify(&second, &short));

    // Argon2 没有长度限制
    let argon2 = HashPolicy::new(fast_options(Algorithm::Argon2id)).unwrap();
    let hash = argon2.create(&first).unwrap();
    assert!(argon2.verify(&first, &hash));
    assert!(!argon2.verify(&second, &hash));
}
