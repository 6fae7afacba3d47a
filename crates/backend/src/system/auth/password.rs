use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

const MIN_PASSWORD_LENGTH: usize = 4;

/// Hash password with argon2 (PHC string, соль внутри)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify password against stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub fn validate_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(anyhow!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin").unwrap();
        assert_ne!(hash, "admin");
        assert!(verify_password("admin", &hash).unwrap());
        assert!(!verify_password("Admin", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_error() {
        assert!(verify_password("admin", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("abc").is_err());
        assert!(validate_password_strength("abcd").is_ok());
    }
}
