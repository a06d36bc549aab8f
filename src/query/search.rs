// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{ConceptTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSearchMode {
    Substring,
    Regex,
    Fuzzy,
}

/// Fuzzy hits below this similarity are noise, not matches.
const FUZZY_MIN_RATIO: f64 = 60.0;

/// Finds nodes by label, for "jump to concept" integrations.
///
/// Substring and regex hits come back in depth-first source order; fuzzy hits
/// come back best-first (ties broken by id).
pub fn label_search(
    tree: &ConceptTree,
    needle: &str,
    mode: LabelSearchMode,
    case_insensitive: bool,
) -> Result<Vec<NodeId>, regex::Error> {
    match mode {
        LabelSearchMode::Substring => {
            if case_insensitive {
                let needle_lower = needle.to_lowercase();
                Ok(tree
                    .depth_first_ids()
                    .into_iter()
                    .filter(|node_id| {
                        tree.node(node_id)
                            .map(|node| node.label().to_lowercase().contains(&needle_lower))
                            .unwrap_or(false)
                    })
                    .collect())
            } else {
                Ok(tree
                    .depth_first_ids()
                    .into_iter()
                    .filter(|node_id| {
                        tree.node(node_id)
                            .map(|node| node.label().contains(needle))
                            .unwrap_or(false)
                    })
                    .collect())
            }
        }
        LabelSearchMode::Regex => {
            let regex = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            Ok(tree
                .depth_first_ids()
                .into_iter()
                .filter(|node_id| {
                    tree.node(node_id)
                        .map(|node| regex.is_match(node.label()))
                        .unwrap_or(false)
                })
                .collect())
        }
        LabelSearchMode::Fuzzy => {
            let needle = if case_insensitive { needle.to_lowercase() } else { needle.to_owned() };
            let mut scored: Vec<(NodeId, f64)> = tree
                .depth_first_ids()
                .into_iter()
                .filter_map(|node_id| {
                    let node = tree.node(&node_id)?;
                    let label = if case_insensitive {
                        node.label().to_lowercase()
                    } else {
                        node.label().to_owned()
                    };
                    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), label.chars());
                    (ratio >= FUZZY_MIN_RATIO).then_some((node_id, ratio))
                })
                .collect();
            scored.sort_by(|(a_id, a_ratio), (b_id, b_ratio)| {
                b_ratio
                    .partial_cmp(a_ratio)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a_id.cmp(b_id))
            });
            Ok(scored.into_iter().map(|(node_id, _)| node_id).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::fixtures;

    use super::{label_search, LabelSearchMode};

    fn labels(tree: &crate::model::ConceptTree, ids: &[crate::model::NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| tree.node(id).map(|node| node.label().to_owned()))
            .collect()
    }

    #[test]
    fn substring_search_respects_case_flag() {
        let tree = fixtures::learning_tree();

        let hits = label_search(&tree, "own", LabelSearchMode::Substring, false).expect("search");
        assert!(hits.is_empty());

        let hits = label_search(&tree, "own", LabelSearchMode::Substring, true).expect("search");
        assert_eq!(labels(&tree, &hits), ["Ownership"]);
    }

    #[test]
    fn substring_hits_follow_depth_first_order() {
        let tree = fixtures::learning_tree();
        let hits = label_search(&tree, "o", LabelSearchMode::Substring, true).expect("search");
        assert_eq!(
            labels(&tree, &hits),
            ["Ownership", "Borrowing", "Concurrency", "Tooling"]
        );
    }

    #[test]
    fn regex_search_matches_anchored_patterns() {
        let tree = fixtures::learning_tree();
        let hits = label_search(&tree, "^Conc", LabelSearchMode::Regex, false).expect("search");
        assert_eq!(labels(&tree, &hits), ["Concurrency"]);
    }

    #[test]
    fn invalid_regex_surfaces_the_error() {
        let tree = fixtures::learning_tree();
        assert!(label_search(&tree, "(unclosed", LabelSearchMode::Regex, false).is_err());
    }

    #[test]
    fn fuzzy_search_tolerates_typos() {
        let tree = fixtures::learning_tree();
        let hits = label_search(&tree, "Concurency", LabelSearchMode::Fuzzy, true).expect("search");
        assert_eq!(labels(&tree, &hits).first().map(String::as_str), Some("Concurrency"));
    }

    #[test]
    fn fuzzy_search_drops_weak_matches() {
        let tree = fixtures::learning_tree();
        let hits = label_search(&tree, "zzzzzz", LabelSearchMode::Fuzzy, true).expect("search");
        assert!(hits.is_empty());
    }
}
