//! 密码哈希: 随机盐 + scrypt

use rand::RngCore;
use scrypt::{scrypt, Params};

use bd_core::{BrainDashError, Result};

/// 盐的字节长度
pub const SALT_LEN: usize = 16;

/// 派生密钥长度
pub const HASH_LEN: usize = 32;

/// scrypt 成本参数: N = 2^14, r = 8, p = 1
const LOG_N: u8 = 14;
const R: u32 = 8;
const P: u32 = 1;

/// 生成随机盐 (hex)
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    hex::encode(salt)
}

/// 计算 hex(scrypt(password, salt))
pub fn hash_password(salt: &str, password: &str) -> Result<String> {
    let params = Params::new(LOG_N, R, P, HASH_LEN)
        .map_err(|e| BrainDashError::PasswordHash(e.to_string()))?;

    let mut output = [0u8; HASH_LEN];
    scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut output)
        .map_err(|e| BrainDashError::PasswordHash(e.to_string()))?;

    Ok(hex::encode(output))
}

/// 校验密码
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    let Ok(actual) = hash_password(salt, password) else {
        return false;
    };
    // 长度固定，逐字节异或避免提前返回
    actual.len() == expected_hash.len()
        && actual
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_is_random_hex() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), SALT_LEN * 2);
        assert_ne!(a, b);
        assert!(hex::decode(&a).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "hunter22").unwrap();
        assert_eq!(hash.len(), HASH_LEN * 2);
        assert!(verify_password(&salt, "hunter22", &hash));
        assert!(!verify_password(&salt, "hunter23", &hash));
        assert!(!verify_password(&generate_salt(), "hunter22", &hash));
    }

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        assert_eq!(
            hash_password(&salt, "hunter22").unwrap(),
            hash_password(&salt, "hunter22").unwrap()
        );
        assert_ne!(
            hash_password(&salt, "hunter22").unwrap(),
            hash_password(&generate_salt(), "hunter22").unwrap()
        );
    }

    #[test]
    fn test_matches_scrypt_reference_vector() {
        // RFC 7914 第 12 节 (N=16384, r=8, p=1) 输出的前 32 字节
        let hash = hash_password("SodiumChloride", "pleaseletmein").unwrap();
        assert_eq!(
            hash,
            "7023bdcb3afd7348461c06cd81fd38ebfda8fbba904f8e3ea9b543f6545da1f2"
        );
    }
}
