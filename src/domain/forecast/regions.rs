/// Selectable regions, in display order.
pub const REGIONS: &[&str] = &[
    "Maharashtra",
    "Uttar Pradesh",
    "Karnataka",
    "Tamil Nadu",
    "Delhi",
    "Gujarat",
    "West Bengal",
    "Madhya Pradesh",
    "Rajasthan",
    "Bihar",
];

/// Case-insensitive lookup returning the catalog spelling
pub fn canonical_region(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    REGIONS
        .iter()
        .copied()
        .find(|region| region.eq_ignore_ascii_case(needle))
}
