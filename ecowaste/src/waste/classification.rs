//! Maps free-text classifier labels onto waste categories.
//!
//! Lookup is substring based and order sensitive: the first keyword contained in the label wins,
//! not the longest or best one. Multi-word phrases are listed ahead of the single words they
//! contain, which is what sends "wine bottle" to glass instead of matching "bottle". Reordering
//! the table changes results.

use super::category::WasteCategory;
use WasteCategory::*;

/// Returned when neither the dictionary nor the fallback chain matches.
pub const DEFAULT_CATEGORY: WasteCategory = Plastic;

/// Ordered keyword dictionary. First substring match wins.
const CLASSIFICATION_KEYWORDS: &[(&str, WasteCategory)] = &[
    // phrases
    ("cardboard box", Paper),
    ("paper bag", Paper),
    ("plastic bag", Plastic),
    ("water bottle", Plastic),
    ("soda can", Metal),
    ("beer can", Metal),
    ("aluminum foil", Metal),
    ("metal container", Metal),
    ("wine bottle", Glass),
    ("beer bottle", Glass),
    ("glass bottle", Glass),
    // paper
    ("book", Paper),
    ("notebook", Paper),
    ("envelope", Paper),
    ("newspaper", Paper),
    ("magazine", Paper),
    ("tissue", Paper),
    // plastic
    ("bottle", Plastic),
    ("container", Plastic),
    ("cup", Plastic),
    ("plate", Plastic),
    ("toy", Plastic),
    ("packaging", Plastic),
    // metal
    ("can", Metal),
    ("tin", Metal),
    ("cutlery", Metal),
    ("knife", Metal),
    ("fork", Metal),
    ("spoon", Metal),
    // glass
    ("jar", Glass),
    ("glass", Glass),
    ("mirror", Glass),
    ("window", Glass),
    // e-waste
    ("laptop", EWaste),
    ("computer", EWaste),
    ("phone", EWaste),
    ("tablet", EWaste),
    ("keyboard", EWaste),
    ("mouse", EWaste),
    ("monitor", EWaste),
    ("television", EWaste),
    ("radio", EWaste),
    ("battery", EWaste),
    ("cable", EWaste),
    ("charger", EWaste),
    // textile
    ("shirt", Textile),
    ("pants", Textile),
    ("dress", Textile),
    ("jacket", Textile),
    ("shoe", Textile),
    ("sock", Textile),
    ("hat", Textile),
    ("bag", Textile),
    // organic
    ("apple", Organic),
    ("banana", Organic),
    ("orange", Organic),
    ("vegetable", Organic),
    ("fruit", Organic),
    ("food", Organic),
    ("bread", Organic),
    ("meat", Organic),
];

/// Broader checks applied in order when no dictionary keyword matched.
const FALLBACK_CHAIN: &[(&[&str], WasteCategory)] = &[
    (&["bottle"], Plastic),
    (&["can"], Metal),
    (&["paper", "book"], Paper),
    (&["phone", "electronic"], EWaste),
    (&["clothes", "fabric"], Textile),
    (&["food", "fruit"], Organic),
    (&["glass", "jar"], Glass),
];

/// Map a classifier label to a waste category.
///
/// Total over all strings: unrecognised or empty input yields [`DEFAULT_CATEGORY`].
pub fn map_label_to_category(label: &str) -> WasteCategory {
    let label = label.to_lowercase();

    if let Some((_, category)) = CLASSIFICATION_KEYWORDS.iter().find(|(keyword, _)| label.contains(keyword)) {
        return *category;
    }

    FALLBACK_CHAIN
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| label.contains(needle)))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(map_label_to_category("water bottle"), Plastic);
        assert_eq!(map_label_to_category("newspaper"), Paper);
        assert_eq!(map_label_to_category("aluminum foil"), Metal);
        assert_eq!(map_label_to_category("wine bottle"), Glass);
    }

    #[test]
    fn test_unknown_label_defaults_to_plastic() {
        assert_eq!(map_label_to_category("xyzzy-unknown-object"), Plastic);
        assert_eq!(map_label_to_category(""), DEFAULT_CATEGORY);
        assert_eq!(map_label_to_category("   "), DEFAULT_CATEGORY);
        assert_eq!(map_label_to_category("ÆØÅ 🦀"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(map_label_to_category("Soda CAN"), Metal);
        assert_eq!(map_label_to_category("SMARTPHONE"), EWaste);
    }

    #[test]
    fn test_mock_scenario_top_labels() {
        assert_eq!(map_label_to_category("plastic bottle"), Plastic);
        assert_eq!(map_label_to_category("aluminum can"), Metal);
        assert_eq!(map_label_to_category("glass bottle"), Glass);
        assert_eq!(map_label_to_category("smartphone"), EWaste);
        assert_eq!(map_label_to_category("apple"), Organic);
    }

    #[test]
    fn test_first_match_wins_over_later_entries() {
        // "paper bag" is listed before the textile keyword "bag".
        assert_eq!(map_label_to_category("brown paper bag"), Paper);
        // "plastic bag" likewise.
        assert_eq!(map_label_to_category("plastic bag"), Plastic);
        // "book" precedes "notebook", both paper.
        assert_eq!(map_label_to_category("notebook"), Paper);
    }

    #[test]
    fn test_fallback_chain() {
        // None of these contain a dictionary keyword.
        assert_eq!(map_label_to_category("old paperback"), Paper);
        assert_eq!(map_label_to_category("electronic gadget"), EWaste);
        assert_eq!(map_label_to_category("pile of clothes"), Textile);
        assert_eq!(map_label_to_category("fabric scraps"), Textile);
    }

    #[test]
    fn test_every_keyword_maps_to_some_category() {
        for (keyword, _) in CLASSIFICATION_KEYWORDS {
            // A keyword always hits the dictionary, possibly an earlier phrase.
            let mapped = map_label_to_category(keyword);
            assert!(WasteCategory::ALL.contains(&mapped), "{keyword}");
        }
    }
}
