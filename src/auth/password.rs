use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::thread_rng;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }

    let salt = SaltString::generate(&mut thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::internal(format!("Password hashing failed: {err}")))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| AppError::internal(format!("Invalid password hash: {err}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};
    use crate::error::AppError;

    #[test]
    fn short_passwords_are_rejected() {
        let err = hash_password("12345").expect_err("five characters is too short");
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.message(), "Password must be at least 6 characters.");
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("pikachu").expect("hash should succeed");
        assert!(verify_password("pikachu", &hash).expect("verify should run"));
        assert!(!verify_password("raichu!", &hash).expect("verify should run"));
    }
}
