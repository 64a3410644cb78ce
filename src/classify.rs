/*
 * ZeepScout - Zeepkist Bug-Report Log Scout
 * File Path: src/classify.rs
 * Responsibility: Partition discovered mods into current vs. known-incompatible.
 */

use std::collections::BTreeSet;

/// Display-ready view of the discovered mods: deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Mods with no match in the reference list.
    pub current: Vec<String>,
    /// Mods matched by at least one reference entry.
    pub outdated: Vec<String>,
}

/// A mod counts as outdated when any reference entry is a case-sensitive
/// substring of its name. Every mod lands in exactly one of the two sets.
pub fn classify(mods: &[String], outdated_reference: &[String]) -> Classification {
    let mut current = BTreeSet::new();
    let mut outdated = BTreeSet::new();

    for mod_name in mods {
        if outdated_reference.iter().any(|id| mod_name.contains(id.as_str())) {
            outdated.insert(mod_name.clone());
        } else {
            current.insert(mod_name.clone());
        }
    }

    Classification {
        current: current.into_iter().collect(),
        outdated: outdated.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_classify_is_a_true_partition() {
        let mods = owned(&["Hotbar", "SomeMod", "Blueprints", "Another"]);
        let reference = owned(&["Hotbar", "Blueprints"]);
        let result = classify(&mods, &reference);

        let union: BTreeSet<_> = result.current.iter().chain(result.outdated.iter()).collect();
        let all: BTreeSet<_> = mods.iter().collect();
        assert_eq!(union, all);
        assert!(result.current.iter().all(|m| !result.outdated.contains(m)));
    }

    #[test]
    fn test_classify_matches_on_substring() {
        let mods = owned(&["com.metalted.zeepkist.hotbar"]);
        let reference = owned(&["zeepkist.hotbar"]);
        let result = classify(&mods, &reference);
        assert_eq!(result.outdated, vec!["com.metalted.zeepkist.hotbar"]);
        assert!(result.current.is_empty());
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        let mods = owned(&["hotbar"]);
        let reference = owned(&["Hotbar"]);
        let result = classify(&mods, &reference);
        assert_eq!(result.current, vec!["hotbar"]);
        assert!(result.outdated.is_empty());
    }

    #[test]
    fn test_classify_dedupes_and_sorts_for_display() {
        let mods = owned(&["Zulu", "Alpha", "Zulu", "Mike"]);
        let result = classify(&mods, &[]);
        assert_eq!(result.current, vec!["Alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn test_classify_empty_input_yields_empty_outputs() {
        let result = classify(&[], &owned(&["Hotbar"]));
        assert!(result.current.is_empty());
        assert!(result.outdated.is_empty());
    }
}
