use std::collections::HashSet;

/// True if any accession of the match is listed as a contaminant.
///
/// `None` disables contaminant filtering entirely.
pub fn is_contaminant(contaminants: Option<&HashSet<String>>, accessions: &[String]) -> bool {
    match contaminants {
        Some(set) => accessions.iter().any(|acc| set.contains(acc)),
        None => false,
    }
}

/// True only if every accession of the match is in the seed set.
///
/// With no seed set (or an empty one) no match ever qualifies, which makes
/// the aggregation fall back to the full ratio pools.
pub fn is_seed(seeds: Option<&HashSet<String>>, accessions: &[String]) -> bool {
    match seeds {
        Some(set) if !set.is_empty() => accessions.iter().all(|acc| set.contains(acc)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn accs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_contaminant_set_excludes_nothing() {
        assert!(!is_contaminant(None, &accs(&["P1", "P2"])));
    }

    #[test]
    fn test_any_contaminant_accession_excludes() {
        let contaminants = set(&["KERATIN"]);
        assert!(is_contaminant(
            Some(&contaminants),
            &accs(&["P1", "KERATIN"])
        ));
        assert!(!is_contaminant(Some(&contaminants), &accs(&["P1", "P2"])));
    }

    #[test]
    fn test_no_seed_set_means_no_seed_matches() {
        assert!(!is_seed(None, &accs(&["P1"])));
        assert!(!is_seed(Some(&HashSet::new()), &accs(&["P1"])));
    }

    #[test]
    fn test_seed_requires_full_containment() {
        let seeds = set(&["P1", "P2"]);
        assert!(!is_seed(Some(&seeds), &accs(&["P1", "P3"])));
        assert!(is_seed(Some(&seeds), &accs(&["P1", "P2"])));
        assert!(is_seed(Some(&seeds), &accs(&["P2"])));
    }
}
