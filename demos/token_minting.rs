//! 随机 token 与策略升级示例
//!
//! 展示如何签发只保存哈希的 token，以及在登录时按新策略升级旧哈希。
//!
//! 运行: RUST_LOG=hashpolicy=debug cargo run --example token_minting

use hashpolicy::{Algorithm, DEFAULT_GENERATE_LENGTH, HashOptions, HashPolicy};
use tracing_subscriber::EnvFilter;

fn main() -> hashpolicy::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. 旧策略：bcrypt
    let legacy = HashPolicy::new(HashOptions::new().algorithm(Algorithm::Bcrypt).cost(10))?;
    let stored = legacy.create("hunter2")?;
    println!("旧哈希: {}", stored);

    // 2. 新策略：Argon2id
    let current = HashPolicy::from_json(r#"{"algorithm": "argon2id"}"#)?;
    println!("需要 rehash: {}", current.needs_rehash(&stored));

    // 3. 登录时验证并升级
    match current.verify_and_rehash("hunter2", &stored)? {
        Some(upgraded) => println!("升级后的哈希: {}", upgraded),
        None => println!("无需升级"),
    }

    // 4. 签发 token，只保存它的哈希
    let token_hash = current.generate(DEFAULT_GENERATE_LENGTH)?;
    println!("token 哈希: {}", token_hash);

    // 5. 无法识别的算法
    if let Err(e) = HashPolicy::from_json(r#"{"algorithm": "md5"}"#) {
        println!("配置失败: {}", e);
    }

    Ok(())
}
