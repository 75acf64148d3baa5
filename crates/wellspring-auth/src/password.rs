//! Password verification using Argon2id.

use std::borrow::Cow;

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Prepend the server-side pepper, if any.
fn peppered<'a>(password: &'a str, pepper: Option<&str>) -> Cow<'a, [u8]> {
    match pepper {
        Some(p) => Cow::Owned(format!("{p}{password}").into_bytes()),
        None => Cow::Borrowed(password.as_bytes()),
    }
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// The pepper must match the one used when the hash was created.
/// Hash parameters are read from the PHC string itself.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(&peppered(password, pepper), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    fn hash_password(password: &str, pepper: Option<&str>) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(&peppered(password, pepper), &salt)
            .expect("hashing failed")
            .to_string()
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("secret1", None);
        assert!(verify_password("secret1", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("secret1", None);
        assert!(!verify_password("secret2", &hash, None).unwrap());
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("secret1", Some("pepper!"));
        assert!(verify_password("secret1", &hash, Some("pepper!")).unwrap());
        assert!(!verify_password("secret1", &hash, None).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        let result = verify_password("pw", "not-a-hash", None);
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }
}
