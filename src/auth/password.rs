use crate::auth::AuthError;
use crate::config;

/// Hash a plaintext password with the configured bcrypt cost.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let cost = config::config().auth.bcrypt_cost;
    bcrypt::hash(plain, cost).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plain, hash).map_err(|e| AuthError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        // Low cost keeps the test fast; production cost comes from config
        let hash = bcrypt::hash("nith@123", 4).unwrap();
        assert!(verify_password("nith@123", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("nith@123", "not-a-bcrypt-hash").is_err());
    }
}
