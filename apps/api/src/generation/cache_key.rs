//! Cache key derivation for the generation cache.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derives the deterministic cache key for a (profile, job description) pair:
/// lowercase hex SHA-256 of `"{profile_id}::{job_description}"`.
///
/// No salt, no timestamp — identical inputs MUST yield identical keys, since
/// this is what makes repeat generations idempotent and cost-free.
pub fn cache_key(profile_id: Uuid, job_description: &str) -> String {
    let digest = Sha256::digest(format!("{profile_id}::{job_description}").as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        let profile_id = Uuid::new_v4();
        let jd = "Senior Rust Engineer working on distributed storage systems.";
        assert_eq!(cache_key(profile_id, jd), cache_key(profile_id, jd));
    }

    #[test]
    fn test_cache_key_is_64_lowercase_hex_chars() {
        let key = cache_key(Uuid::nil(), "any job description");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_cache_key_varies_with_job_description() {
        let profile_id = Uuid::new_v4();
        assert_ne!(
            cache_key(profile_id, "backend role"),
            cache_key(profile_id, "frontend role")
        );
    }

    #[test]
    fn test_cache_key_varies_with_profile() {
        let jd = "backend role";
        assert_ne!(cache_key(Uuid::new_v4(), jd), cache_key(Uuid::new_v4(), jd));
    }

    #[test]
    fn test_known_vector() {
        // sha256("00000000-0000-0000-0000-000000000000::jd")
        assert_eq!(
            cache_key(Uuid::nil(), "jd"),
            "389e694a83cbd931617ff35f861080b9bf0dceda5e599cb9e0a505e79836e615"
        );
    }
}
