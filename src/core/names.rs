//! Party-name prefix normalization.

/// Known spellings of the registration prefix, longest first within each family
/// so that `UNR - ` wins over `UNR `.
const PREFIX_VARIANTS: &[&str] = &[
    "UNREGISTERED - ",
    "UNREGISTERED-",
    "UNREGISTERED",
    "U.N.R-",
    "U.N.R",
    "U N R-",
    "U N R",
    "UNR - ",
    "UNR-",
    "UNR_",
    "UNR.",
    "UNR ",
];

/// Strip any known prefix variant from `name` and prepend `prefix`.
///
/// Matching is case-insensitive. Only the first matching variant is removed.
pub fn normalize_party_name(name: &str, prefix: &str) -> String {
    let trimmed = name.trim();
    let upper = trimmed.to_ascii_uppercase();

    let rest = PREFIX_VARIANTS
        .iter()
        .find(|variant| upper.starts_with(*variant))
        // ASCII uppercasing keeps byte offsets aligned with `trimmed`.
        .map(|variant| trimmed[variant.len()..].trim())
        .unwrap_or(trimmed);

    format!("{prefix}{rest}")
}
