//! Hostname lookup for the system info block.

/// Resolve the name of the host serving the request.
///
/// Uses `HOSTNAME` when set, then `/etc/hostname`, then `"unknown"`.
///
/// Shells set `HOSTNAME` without exporting it, so a daemon rarely inherits
/// it; on Linux `/etc/hostname` is the effective source. Containers do
/// export it, and `APP_HOSTNAME` in the server config overrides both.
pub async fn resolve_hostname() -> String {
    if let Some(name) = std::env::var("HOSTNAME").ok().as_deref().and_then(non_blank) {
        return name;
    }

    match tokio::fs::read_to_string("/etc/hostname").await {
        Ok(contents) => non_blank(&contents).unwrap_or_else(unknown),
        Err(error) => {
            tracing::debug!(%error, "No /etc/hostname");
            unknown()
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn unknown() -> String {
    "unknown".to_string()
}
