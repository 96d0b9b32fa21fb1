//! Object-storage helpers for exported CV documents.
//!
//! The bucket is private: downloads only happen through time-limited
//! presigned URLs, never direct object access.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Presigned download URLs stay valid for 1 hour.
const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Storage key for an exported CV: per-user, per-CV, per-template.
/// Re-exporting the same (cv, template) pair overwrites the previous object.
pub fn export_key(user_id: Uuid, cv_id: Uuid, template: &str) -> String {
    format!("{user_id}/{cv_id}_{template}.txt")
}

/// Prefix covering every exported file of one CV, used for cleanup.
fn export_prefix(user_id: Uuid, cv_id: Uuid) -> String {
    format!("{user_id}/{cv_id}_")
}

pub async fn upload_export(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("upload of {key} failed: {e}")))?;

    info!("Uploaded export to s3://{bucket}/{key}");
    Ok(())
}

/// Generates a presigned GET URL valid for one hour.
pub async fn presign_download(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<String, AppError> {
    let config = PresigningConfig::expires_in(SIGNED_URL_TTL)
        .map_err(|e| AppError::Storage(format!("presigning config: {e}")))?;

    let presigned = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(config)
        .await
        .map_err(|e| AppError::Storage(format!("presigning {key} failed: {e}")))?;

    Ok(presigned.uri().to_string())
}

/// Best-effort removal of every exported file belonging to a CV.
/// Failures are logged and swallowed — cleanup must never block or fail the
/// deletion of the CV record itself.
pub async fn delete_exports(s3: &aws_sdk_s3::Client, bucket: &str, user_id: Uuid, cv_id: Uuid) {
    let prefix = export_prefix(user_id, cv_id);

    let listing = match s3
        .list_objects_v2()
        .bucket(bucket)
        .prefix(&prefix)
        .send()
        .await
    {
        Ok(l) => l,
        Err(e) => {
            warn!("Export cleanup: listing {prefix} failed: {e}");
            return;
        }
    };

    for object in listing.contents() {
        let Some(key) = object.key() else { continue };
        if let Err(e) = s3.delete_object().bucket(bucket).key(key).send().await {
            warn!("Export cleanup: deleting {key} failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_key_layout() {
        let user_id = Uuid::nil();
        let cv_id = Uuid::nil();
        assert_eq!(
            export_key(user_id, cv_id, "modern"),
            format!("{user_id}/{cv_id}_modern.txt")
        );
    }

    #[test]
    fn test_export_prefix_covers_all_templates() {
        let user_id = Uuid::new_v4();
        let cv_id = Uuid::new_v4();
        let prefix = export_prefix(user_id, cv_id);
        for template in ["classic", "modern", "minimalist"] {
            assert!(export_key(user_id, cv_id, template).starts_with(&prefix));
        }
    }
}
