use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use unicode_normalization::UnicodeNormalization;

/// Capability alias → canonical tag. Bare words such as `van` or `flat`
/// stay unmapped.
static CAPABILITY_ALIASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        (
            "refrigerated",
            &[
                "refrigerated",
                "reefer",
                "refrigeration",
                "temperature-controlled",
                "temp-controlled",
                "cold-chain",
            ],
        ),
        (
            "hazmat",
            &[
                "hazmat",
                "haz-mat",
                "hazardous",
                "hazardous-materials",
                "hazmat-certified",
                "dangerous-goods",
            ],
        ),
        (
            "expedited",
            &["expedited", "expedite", "hot-shot", "hotshot", "rush"],
        ),
        ("flatbed", &["flatbed", "flat-bed"]),
        ("dry-van", &["dry-van", "dryvan", "dry-van-trailer"]),
        (
            "team-driving",
            &["team-driving", "team-drivers", "team-driver"],
        ),
        ("tanker", &["tanker", "tank-truck", "bulk-liquid"]),
        ("intermodal", &["intermodal", "rail-intermodal"]),
        ("ltl", &["ltl", "less-than-truckload"]),
        ("ftl", &["ftl", "full-truckload", "truckload"]),
        ("oversized", &["oversized", "oversize", "heavy-haul", "wide-load"]),
        ("white-glove", &["white-glove", "whiteglove", "inside-delivery"]),
    ];

    build_alias_map(aliases)
});

/// Region alias → canonical tag. Compass words (`west`, `central`) stay
/// unmapped.
static REGION_ALIASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        ("midwest", &["midwest", "mid-west"]),
        ("northeast", &["northeast", "north-east", "new-england"]),
        ("southeast", &["southeast", "south-east"]),
        ("southwest", &["southwest", "south-west"]),
        ("northwest", &["northwest", "north-west", "pacific-northwest", "pnw"]),
        ("west-coast", &["west-coast", "westcoast", "pacific-coast"]),
        ("east-coast", &["east-coast", "eastcoast", "atlantic-coast"]),
        ("south", &["south", "gulf-coast"]),
        ("canada", &["canada", "ca-cross-border"]),
        ("mexico", &["mexico", "mx-cross-border"]),
    ];

    build_alias_map(aliases)
});

fn build_alias_map(aliases: &[(&'static str, &[&str])]) -> HashMap<String, &'static str> {
    let mut map = HashMap::new();
    for (canonical, variants) in aliases {
        for variant in variants.iter() {
            map.insert(compact_key(variant), *canonical);
        }
    }
    map
}

/// NFKC → lowercase → trim, then collapse whitespace/underscores/slashes into `-`.
fn slug(input: &str) -> String {
    let lowered = input.nfkc().collect::<String>().trim().to_lowercase();
    lowered
        .split(|c: char| c.is_whitespace() || matches!(c, '_' | '/' | '-'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn compact_key(input: &str) -> String {
    slug(input).chars().filter(|c| *c != '-').collect()
}

fn normalize_with(aliases: &HashMap<String, &'static str>, raw: &str) -> String {
    match aliases.get(&compact_key(raw)) {
        Some(canonical) => (*canonical).to_string(),
        None => slug(raw),
    }
}

/// Capability tag to its canonical form.
pub fn normalize_capability(raw: &str) -> String {
    normalize_with(&CAPABILITY_ALIASES, raw)
}

/// Region tag to its canonical form.
pub fn normalize_region(raw: &str) -> String {
    normalize_with(&REGION_ALIASES, raw)
}

/// Normalized, deduplicated capability set. Blank tags are dropped.
pub fn normalize_capability_set(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| normalize_capability(t))
        .collect()
}

/// Normalized, deduplicated region set. Blank tags are dropped.
pub fn normalize_region_set(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| normalize_region(t))
        .collect()
}
