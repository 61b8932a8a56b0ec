pub mod audit;
pub mod users;

/// Clamp a page size: zero falls back to the default, anything above the
/// cap is cut down to it.
pub(crate) fn normalize_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    match limit {
        None | Some(0) => default,
        Some(limit) => limit.min(max),
    }
}
