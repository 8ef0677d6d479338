//! Download filename derivation for generated contact documents.

/// Derives the `.vcf` download filename from a profile display name.
///
/// Runs of whitespace collapse to a single underscore. A blank name falls
/// back to "contact".
///
/// Examples:
/// - "Ada Lovelace" -> "`Ada_Lovelace.vcf`"
/// - "  Grace   Hopper " -> "`Grace_Hopper.vcf`"
#[must_use]
pub fn vcf_filename(full_name: &str) -> String {
    let base = full_name.split_whitespace().collect::<Vec<_>>().join("_");

    if base.is_empty() {
        "contact.vcf".to_string()
    } else {
        format!("{base}.vcf")
    }
}
