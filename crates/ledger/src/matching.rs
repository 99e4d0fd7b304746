//! Deterministic ingredient-name matching.
//!
//! Restocking must reuse the names already present in the pantry, otherwise
//! `tomato`, `tomatoes` and `cherry tomatoes` end up as three separate stock
//! lines. Resolution order: exact (after normalization and synonyms),
//! singular/plural variants, whole-word containment, then Jaro-Winkler
//! similarity.

/// Normalized spellings mapped to the canonical pantry spelling.
const SYNONYMS: &[(&str, &str)] = &[
    ("feta", "feta_cheese"),
    ("parmesan_cheese", "parmesan"),
    ("parmigiano", "parmesan"),
    ("romaine", "romaine_lettuce"),
    ("extra_virgin_olive_oil", "olive_oil"),
    ("evoo", "olive_oil"),
    ("salmon_fillet", "salmon"),
    ("salmon_fillets", "salmon"),
    ("broccoli_floret", "broccoli"),
    ("broccoli_florets", "broccoli"),
    ("bell_pepper", "bell_peppers"),
    ("egg", "eggs"),
    ("chocolate_chip", "chocolate_chips"),
    ("chickpea", "chickpeas"),
    ("garbanzo_beans", "chickpeas"),
    ("mixed_berries", "berries"),
];

const SIMILARITY_THRESHOLD: f64 = 0.92;

/// Lowercase, trim, and join words with `_`.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Find the existing key that `name` most plausibly refers to.
pub fn resolve<'a>(name: &str, existing: &[&'a str]) -> Option<&'a str> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    let keys: Vec<(String, &'a str)> = existing.iter().map(|k| (normalize(k), *k)).collect();

    let mut candidates = vec![wanted.clone()];
    if let Some((_, canonical)) = SYNONYMS.iter().find(|(from, _)| *from == wanted) {
        candidates.push(canonical.to_string());
    }

    for candidate in &candidates {
        if let Some((_, key)) = keys.iter().find(|(norm, _)| norm == candidate) {
            return Some(key);
        }
    }

    for candidate in &candidates {
        let variants = number_variants(candidate);
        if let Some((_, key)) = keys.iter().find(|(norm, _)| variants.contains(norm)) {
            return Some(key);
        }
    }

    let contained = keys
        .iter()
        .filter(|(norm, _)| contains_words(norm, &wanted) || contains_words(&wanted, norm))
        .min_by_key(|(norm, _)| norm.len().abs_diff(wanted.len()));
    if let Some((_, key)) = contained {
        return Some(key);
    }

    keys.iter()
        .map(|(norm, key)| (strsim::jaro_winkler(norm, &wanted), *key))
        .filter(|(score, _)| *score >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key)
}

/// Singular and plural spellings of the last word.
fn number_variants(name: &str) -> Vec<String> {
    let mut variants = Vec::new();
    if let Some(stem) = name.strip_suffix("ies") {
        variants.push(format!("{stem}y"));
    } else if let Some(stem) = name.strip_suffix("oes") {
        variants.push(format!("{stem}o"));
    } else if let Some(stem) = name.strip_suffix("es") {
        variants.push(stem.to_string());
        variants.push(format!("{stem}e"));
    } else if let Some(stem) = name.strip_suffix('s') {
        variants.push(stem.to_string());
    }

    if let Some(stem) = name.strip_suffix('y') {
        variants.push(format!("{stem}ies"));
    }
    if name.ends_with('o') {
        variants.push(format!("{name}es"));
    }
    if !name.ends_with('s') {
        variants.push(format!("{name}s"));
    }
    variants
}

/// Whether `needle`'s words appear as a contiguous run inside `haystack`.
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!("_{haystack}_").contains(&format!("_{needle}_"))
}
