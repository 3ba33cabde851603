//! URL helpers that respect the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g. `/ops` behind the game
/// server's web root), asset and router paths are prefixed with it.
const PUBLIC_URL: &str = match option_env!("PUBLIC_URL") {
    Some(base) => base,
    None => "",
};

/// Looping alarm played while a core is critical.
pub const ALARM_ASSET: &str = "reactorBreach.mp3";

#[must_use]
pub fn asset_path(relative: &str) -> String {
    join_base(PUBLIC_URL, relative)
}

#[must_use]
pub fn alarm_url() -> String {
    asset_path(ALARM_ASSET)
}

/// Base path for the router, `None` when served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    trimmed_base(PUBLIC_URL)
}

fn join_base(base: &str, relative: &str) -> String {
    let rel = relative.trim_start_matches('/');
    trimmed_base(base).map_or_else(|| format!("/{rel}"), |base| format!("{base}/{rel}"))
}

fn trimmed_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    (!base.is_empty()).then(|| base.to_string())
}
