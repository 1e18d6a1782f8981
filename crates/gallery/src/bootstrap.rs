//! Best-effort storage bootstrap.
//!
//! Runs exactly once per process start, before the router begins serving.
//! Ensures the avatars bucket and its four access policies exist. Every
//! step independently swallows and logs its own failure - the application
//! starts regardless, and nothing here retries.

use serde_json::json;

use crate::backend::BackendClient;

/// Bucket holding profile avatars.
pub const AVATARS_BUCKET: &str = "avatars";

/// Object size ceiling for the avatars bucket (5 MiB).
pub const AVATAR_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

struct PolicySpec {
    name: &'static str,
    definition: &'static str,
    operation: &'static str,
}

/// The four access policies: writes restricted to the owning identity,
/// reads unrestricted.
const POLICIES: [PolicySpec; 4] = [
    PolicySpec {
        name: "avatar_insert_policy",
        definition: "auth.uid() = owner",
        operation: "INSERT",
    },
    PolicySpec {
        name: "avatar_update_policy",
        definition: "auth.uid() = owner",
        operation: "UPDATE",
    },
    PolicySpec {
        name: "avatar_delete_policy",
        definition: "auth.uid() = owner",
        operation: "DELETE",
    },
    PolicySpec {
        name: "avatar_read_policy",
        definition: "bucket_id = 'avatars'",
        operation: "SELECT",
    },
];

/// Ensure the avatars bucket and its policies exist. Idempotent,
/// best-effort: failures are logged and swallowed.
pub async fn ensure_storage_ready(backend: &BackendClient) {
    let buckets = match backend.list_buckets().await {
        Ok(buckets) => buckets,
        Err(err) => {
            tracing::error!("error listing buckets: {err}");
            return;
        }
    };

    if buckets.iter().any(|b| b.name == AVATARS_BUCKET) {
        tracing::info!("avatars bucket already exists");
    } else {
        match backend
            .create_bucket(AVATARS_BUCKET, true, AVATAR_SIZE_LIMIT)
            .await
        {
            Ok(()) => tracing::info!("avatars bucket created"),
            Err(err) => {
                tracing::error!("error creating avatars bucket: {err}");
                return;
            }
        }
    }

    declare_policies(backend).await;
    tracing::info!("storage setup completed");
}

/// (Re-)declare the avatar access policies.
///
/// "Already exists" from the policy RPC is informational, not a failure.
async fn declare_policies(backend: &BackendClient) {
    for policy in &POLICIES {
        let needs_check = matches!(policy.operation, "INSERT" | "UPDATE");
        let args = json!({
            "policy_name": policy.name,
            "table_name": "objects",
            "definition": policy.definition,
            "check_expression": if needs_check { Some(policy.definition) } else { None },
            "operation": policy.operation,
        });

        match backend.rpc("create_storage_policy", &args).await {
            Ok(_) => tracing::info!(policy = policy.name, "storage policy created"),
            Err(err) if err.to_string().contains("already exists") => {
                tracing::info!(policy = policy.name, "storage policy already exists");
            }
            Err(err) => {
                tracing::error!(policy = policy.name, "error creating storage policy: {err}");
            }
        }
    }
}
