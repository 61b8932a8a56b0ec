/// Mask all but the last `visible` characters, e.g. for phone numbers in
/// audit details. Short values are fully masked.
pub fn mask_sensitive(value: &str, visible: usize) -> String {
    let len = value.chars().count();
    if len <= visible {
        return "****".to_string();
    }
    let tail: String = value.chars().skip(len - visible).collect();
    format!("{}{tail}", "*".repeat(len - visible))
}
