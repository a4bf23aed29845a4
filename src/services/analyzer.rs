//! Rule-based understanding of free-text marketplace search queries.
//!
//! The pipeline is strictly linear: raw string -> corrected string ->
//! entity set -> (intent, filters, expansions), packaged into one
//! [`QueryAnalysis`]. Every stage is a pure function over the static
//! dictionaries; there is no I/O and no cross-query state, so `analyze`
//! may be called concurrently without coordination.

use crate::services::dictionaries::{
    brand_entry, PricePatternKind, BRAND_KEYWORDS, CATEGORY_HINTS, CATEGORY_IDS,
    COMPARISON_TERMS, LOCATIONS, NEW_TERMS, PRICE_PATTERNS, PROXIMITY_PHRASES, SPELLING_RULES,
    USED_SHORTHAND_PATTERN, USED_TERMS, YEAR_PATTERN,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Listing condition extracted from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

/// A price bound mentioned in the query. `mentioned` keeps the literal
/// substring that matched, for display back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    pub mentioned: String,
}

/// Entities extracted from a single query.
///
/// Each field holds the first match found during the fixed detection scan;
/// later matches for the same field are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// A recognized place name, or the sentinel `"nearby"` for proximity
    /// phrases like "ใกล้ฉัน" / "near me".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Search intent labels, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    ProductSearch,
    CategoryBrowse,
    BrandSearch,
    PriceCheck,
    Comparison,
}

/// Classified intent with a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    pub confidence: f32,
}

/// Filters derived from the extracted entities, shaped for the listing
/// query executor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

/// Complete analysis of one search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub corrected_query: String,
    pub did_correct: bool,
    pub entities: QueryEntity,
    pub intent: Intent,
    pub suggested_filters: SuggestedFilters,
    pub expanded_queries: Vec<String>,
}

/// Maximum number of expanded query variants returned.
const MAX_EXPANSIONS: usize = 5;

/// Analyze a raw search query.
///
/// Total over any input: an empty or unrecognized query yields no entities
/// and the default `product_search` intent.
pub fn analyze(query: &str) -> QueryAnalysis {
    let original = query.trim().to_string();

    let corrected = correct_spelling(&original);
    let did_correct = corrected != original.to_lowercase();

    let entities = extract_entities(&corrected);
    let intent = detect_intent(&corrected, &entities);
    let suggested_filters = suggest_filters(&entities);
    let expanded_queries = expand_query(&corrected, &entities);

    QueryAnalysis {
        original_query: original,
        corrected_query: corrected,
        did_correct,
        entities,
        intent,
        suggested_filters,
        expanded_queries,
    }
}

/// Correct common spelling mistakes using whole-word replacement.
///
/// A rule is skipped once its corrected form is already present, which
/// both avoids redundant work and makes the function idempotent.
pub fn correct_spelling(query: &str) -> String {
    let mut corrected = query.trim().to_lowercase();

    for (pattern, fix) in SPELLING_RULES.iter() {
        if corrected.contains(fix) {
            continue;
        }
        if pattern.is_match(&corrected) {
            corrected = pattern.replace_all(&corrected, *fix).into_owned();
        }
    }

    corrected
}

/// Run all entity sub-detectors over the corrected query.
pub fn extract_entities(query: &str) -> QueryEntity {
    let lower = query.to_lowercase();

    QueryEntity {
        brand: None,
        brand_category: None,
        price_range: detect_price(query),
        location: detect_location(&lower),
        condition: detect_condition(&lower),
        category: detect_category(&lower),
        year: detect_year(query),
    }
    .with_brand(detect_brand(&lower))
}

impl QueryEntity {
    fn with_brand(mut self, brand: Option<&'static str>) -> Self {
        if let Some(brand) = brand {
            self.brand = Some(brand.to_string());
            self.brand_category = brand_entry(brand).map(|e| e.category.to_string());
        }
        self
    }
}

/// First brand (in dictionary order) with any matching term wins.
fn detect_brand(lower: &str) -> Option<&'static str> {
    for entry in BRAND_KEYWORDS {
        let matched = std::iter::once(entry.brand)
            .chain(entry.aliases.iter().copied())
            .any(|term| lower.contains(&term.to_lowercase()));
        if matched {
            return Some(entry.brand);
        }
    }
    None
}

/// First price pattern to match decides whether this is a max-only bound
/// or a min/max range.
fn detect_price(query: &str) -> Option<PriceRange> {
    for (pattern, kind) in PRICE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(query) {
            let mentioned = captures.get(0).map(|m| m.as_str().to_string())?;
            return match kind {
                PricePatternKind::Max => Some(PriceRange {
                    min: None,
                    max: captures.get(1).map(|m| parse_price(m.as_str())),
                    mentioned,
                }),
                PricePatternKind::Range => Some(PriceRange {
                    min: captures.get(1).map(|m| parse_price(m.as_str())),
                    max: captures.get(2).map(|m| parse_price(m.as_str())),
                    mentioned,
                }),
            };
        }
    }
    None
}

/// Parse a numeric price token: commas are stripped, a trailing `k` means
/// thousands.
fn parse_price(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let value = digits.parse::<u64>().unwrap_or(0);
    if raw.to_lowercase().contains('k') {
        value * 1000
    } else {
        value
    }
}

/// Proximity phrases normalize to the "nearby" sentinel; everything else
/// keeps its literal place name.
fn detect_location(lower: &str) -> Option<String> {
    for loc in LOCATIONS {
        if lower.contains(&loc.to_lowercase()) {
            if PROXIMITY_PHRASES.contains(loc) {
                return Some("nearby".to_string());
            }
            return Some(loc.to_string());
        }
    }
    None
}

/// Used terms are checked before new terms, so a query carrying both
/// signals resolves to used.
fn detect_condition(lower: &str) -> Option<Condition> {
    if USED_TERMS.iter().any(|term| lower.contains(term)) {
        return Some(Condition::Used);
    }
    if NEW_TERMS.iter().any(|term| lower.contains(term)) {
        return Some(Condition::New);
    }
    None
}

/// A bare 4-digit token is accepted as a model year only inside
/// [1990, current year + 1].
fn detect_year(query: &str) -> Option<i32> {
    let token = YEAR_PATTERN.find(query)?;
    let year = token.as_str().parse::<i32>().ok()?;
    if (1990..=Utc::now().year() + 1).contains(&year) {
        Some(year)
    } else {
        None
    }
}

/// First category (in hint-table order) with any matching hint word wins.
fn detect_category(lower: &str) -> Option<String> {
    for (category, hints) in CATEGORY_HINTS {
        if hints.iter().any(|hint| lower.contains(hint)) {
            return Some(category.to_string());
        }
    }
    None
}

/// Classify search intent with a fixed decision list; the first matching
/// rule wins.
pub fn detect_intent(query: &str, entities: &QueryEntity) -> Intent {
    let lower = query.to_lowercase();

    // Brand search - high intent for a specific brand, unless a price
    // bound pulls the query towards price checking.
    if entities.brand.is_some() && entities.price_range.is_none() {
        return Intent {
            intent_type: IntentType::BrandSearch,
            confidence: 0.85,
        };
    }

    if entities.price_range.is_some() || lower.contains("ราคา") || lower.contains("price") {
        return Intent {
            intent_type: IntentType::PriceCheck,
            confidence: 0.8,
        };
    }

    if COMPARISON_TERMS.iter().any(|term| lower.contains(term)) {
        return Intent {
            intent_type: IntentType::Comparison,
            confidence: 0.75,
        };
    }

    if entities.category.is_some() && entities.brand.is_none() {
        return Intent {
            intent_type: IntentType::CategoryBrowse,
            confidence: 0.7,
        };
    }

    Intent {
        intent_type: IntentType::ProductSearch,
        confidence: 0.6,
    }
}

/// Map extracted entities onto listing filters.
pub fn suggest_filters(entities: &QueryEntity) -> SuggestedFilters {
    let mut filters = SuggestedFilters::default();

    // Explicit category hints take precedence over the brand's grouping.
    // An unknown key simply emits no category_id.
    let category_key = entities
        .category
        .as_deref()
        .or(entities.brand_category.as_deref());
    if let Some(key) = category_key {
        filters.category_id = CATEGORY_IDS.get(key).copied();
    }

    filters.brand = entities.brand.clone();

    if let Some(range) = &entities.price_range {
        filters.min_price = range.min;
        filters.max_price = range.max;
    }

    filters.condition = entities.condition;

    // Proximity is a geo-search concern, not a province filter.
    if let Some(location) = &entities.location {
        if location != "nearby" {
            filters.province = Some(location.clone());
        }
    }

    filters
}

/// Expand the corrected query with brand aliases and condition shorthand,
/// deduplicated and capped at [`MAX_EXPANSIONS`].
pub fn expand_query(query: &str, entities: &QueryEntity) -> Vec<String> {
    let mut expanded = vec![query.to_string()];

    if let Some(brand) = &entities.brand {
        if let Some(entry) = brand_entry(brand) {
            expanded.extend(entry.aliases.iter().take(2).map(|s| s.to_string()));
        }
    }

    if entities.condition == Some(Condition::Used) {
        expanded.push(USED_SHORTHAND_PATTERN.replace_all(query, "มือ2").into_owned());
    }

    let mut unique: Vec<String> = Vec::with_capacity(expanded.len());
    for candidate in expanded {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique.truncate(MAX_EXPANSIONS);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_fixes_known_typos() {
        assert_eq!(correct_spelling("iphne 13"), "iphone 13");
        assert_eq!(correct_spelling("Samsug Galaxy"), "samsung galaxy");
        assert_eq!(correct_spelling("ไอโพน 12"), "ไอโฟน 12");
    }

    #[test]
    fn correction_is_idempotent() {
        for query in ["iphne มือสอง", "samsun note", "ไอโพน", "honda civic 2020", ""] {
            let once = correct_spelling(query);
            assert_eq!(correct_spelling(&once), once);
        }
    }

    #[test]
    fn correction_respects_word_boundaries() {
        // "iphon" as a whole word is fixed...
        assert_eq!(correct_spelling("iphon pro"), "iphone pro");
        // ...but an already-correct "iphone" is left alone.
        assert_eq!(correct_spelling("iphone pro"), "iphone pro");
        // A rule targeting a substring of a valid word must not corrupt it.
        assert_eq!(correct_spelling("airpods pro"), "airpods pro");
    }

    #[test]
    fn correction_of_generic_text_is_identity() {
        assert_eq!(correct_spelling("  Vintage Camera Lens  "), "vintage camera lens");
    }

    #[test]
    fn brand_detection_uses_dictionary_order() {
        // Both apple ("iphone") and samsung ("galaxy") terms appear; apple
        // is declared first, so it wins regardless of text position.
        let entities = extract_entities("galaxy s23 หรือ iphone 14");
        assert_eq!(entities.brand.as_deref(), Some("apple"));
        assert_eq!(entities.brand_category.as_deref(), Some("mobile"));
    }

    #[test]
    fn brand_detection_matches_thai_aliases() {
        let entities = extract_entities("ขาย โตโยต้า vios");
        assert_eq!(entities.brand.as_deref(), Some("toyota"));
        assert_eq!(entities.brand_category.as_deref(), Some("car"));
    }

    #[test]
    fn price_thai_max_bound() {
        let range = detect_price("ไม่เกิน 5000").expect("price detected");
        assert_eq!(range.max, Some(5000));
        assert_eq!(range.min, None);
        assert_eq!(range.mentioned, "ไม่เกิน 5000");
    }

    #[test]
    fn price_english_k_suffix() {
        let range = detect_price("under 10k").expect("price detected");
        assert_eq!(range.max, Some(10000));
        assert_eq!(range.min, None);
    }

    #[test]
    fn price_thai_range_with_commas() {
        let range = detect_price("ราคา 1,000-2,000").expect("price detected");
        assert_eq!(range.min, Some(1000));
        assert_eq!(range.max, Some(2000));
    }

    #[test]
    fn price_english_range_with_to() {
        let range = detect_price("5000 to 8000").expect("price detected");
        assert_eq!(range.min, Some(5000));
        assert_eq!(range.max, Some(8000));
    }

    #[test]
    fn price_absent_for_plain_query() {
        assert_eq!(detect_price("honda wave"), None);
    }

    #[test]
    fn condition_used_wins_over_new() {
        let entities = extract_entities("iphone มือสอง สภาพเหมือนใหม่");
        assert_eq!(entities.condition, Some(Condition::Used));
    }

    #[test]
    fn condition_new_detected_alone() {
        let entities = extract_entities("macbook มือ1");
        assert_eq!(entities.condition, Some(Condition::New));
    }

    #[test]
    fn year_below_lower_bound_is_ignored() {
        let entities = extract_entities("honda wave 1985");
        assert_eq!(entities.year, None);
    }

    #[test]
    fn year_within_bounds_is_kept() {
        let entities = extract_entities("toyota vios 2020");
        assert_eq!(entities.year, Some(2020));
    }

    #[test]
    fn year_adjacent_to_thai_text_is_detected() {
        // Thai is written without spaces, so the year often touches the
        // surrounding words.
        let entities = extract_entities("รถปี2020 เชียงใหม่");
        assert_eq!(entities.year, Some(2020));
    }

    #[test]
    fn location_proximity_normalizes_to_nearby() {
        let entities = extract_entities("ps5 ใกล้ฉัน");
        assert_eq!(entities.location.as_deref(), Some("nearby"));
    }

    #[test]
    fn category_hint_first_match_wins() {
        let entities = extract_entities("ขายบ้าน พร้อมกล้องวงจรปิด");
        assert_eq!(entities.category.as_deref(), Some("real_estate"));
    }

    #[test]
    fn intent_price_check_beats_brand_search() {
        let analysis = analyze("iphone under 10000");
        assert_eq!(analysis.intent.intent_type, IntentType::PriceCheck);
        assert!((analysis.intent.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn intent_brand_search_without_price() {
        let analysis = analyze("iphone 14 pro max");
        assert_eq!(analysis.intent.intent_type, IntentType::BrandSearch);
    }

    #[test]
    fn intent_comparison_detected() {
        let analysis = analyze("เทียบ ps5 ps4");
        // Brand "sony" matches via "ps5" with no price, so brand_search
        // outranks comparison here; a brandless comparison classifies as one.
        assert_eq!(analysis.intent.intent_type, IntentType::BrandSearch);

        let brandless = analyze("เทียบ รุ่นไหน ดีกว่า");
        assert_eq!(brandless.intent.intent_type, IntentType::Comparison);
    }

    #[test]
    fn intent_category_browse_without_brand() {
        let analysis = analyze("หาบ้านเดี่ยว");
        assert_eq!(analysis.intent.intent_type, IntentType::CategoryBrowse);
    }

    #[test]
    fn intent_defaults_to_product_search() {
        let analysis = analyze("ของสะสม หายาก");
        assert_eq!(analysis.intent.intent_type, IntentType::ProductSearch);
        assert!((analysis.intent.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn filters_skip_province_for_nearby() {
        let analysis = analyze("ps5 near me");
        assert_eq!(analysis.entities.location.as_deref(), Some("nearby"));
        assert_eq!(analysis.suggested_filters.province, None);
    }

    #[test]
    fn filters_tolerate_unknown_category_key() {
        let entities = QueryEntity {
            category: Some("hovercraft".to_string()),
            ..QueryEntity::default()
        };
        let filters = suggest_filters(&entities);
        assert_eq!(filters.category_id, None);
    }

    #[test]
    fn expansion_is_deduplicated_and_capped() {
        for query in [
            "iphone มือสอง used secondhand",
            "samsung galaxy note fold flip",
            "รถยนต์",
            "",
        ] {
            let analysis = analyze(query);
            assert!(analysis.expanded_queries.len() <= 5);
            let mut seen = analysis.expanded_queries.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), analysis.expanded_queries.len());
        }
    }

    #[test]
    fn expansion_starts_with_corrected_query() {
        let analysis = analyze("iphne 13");
        assert_eq!(analysis.expanded_queries[0], "iphone 13");
    }

    #[test]
    fn expansion_substitutes_used_shorthand() {
        let analysis = analyze("iphone มือสอง");
        assert!(analysis
            .expanded_queries
            .iter()
            .any(|q| q == "iphone มือ2"));
    }

    #[test]
    fn empty_query_yields_default_analysis() {
        let analysis = analyze("");
        assert_eq!(analysis.corrected_query, "");
        assert!(!analysis.did_correct);
        assert_eq!(analysis.entities, QueryEntity::default());
        assert_eq!(analysis.intent.intent_type, IntentType::ProductSearch);
        assert_eq!(analysis.suggested_filters, SuggestedFilters::default());
        assert_eq!(analysis.expanded_queries, vec![String::new()]);
    }

    #[test]
    fn adversarial_input_produces_no_matches() {
        let long = "ก้".repeat(5000) + &"a".repeat(5000);
        let analysis = analyze(&long);
        assert_eq!(analysis.entities.price_range, None);
        assert_eq!(analysis.entities.year, None);
    }

    #[test]
    fn end_to_end_thai_scenario() {
        let analysis = analyze("iphne มือสอง ไม่เกิน 15000 กรุงเทพ");

        assert!(analysis.did_correct);
        assert!(analysis.corrected_query.contains("iphone"));

        let entities = &analysis.entities;
        assert_eq!(entities.brand.as_deref(), Some("apple"));
        assert_eq!(entities.brand_category.as_deref(), Some("mobile"));
        assert_eq!(entities.condition, Some(Condition::Used));
        assert_eq!(entities.location.as_deref(), Some("กรุงเทพ"));
        let range = entities.price_range.as_ref().expect("price detected");
        assert_eq!(range.max, Some(15000));

        assert_eq!(analysis.intent.intent_type, IntentType::PriceCheck);

        let filters = &analysis.suggested_filters;
        assert_eq!(filters.category_id, Some(3));
        assert_eq!(filters.max_price, Some(15000));
        assert_eq!(filters.condition, Some(Condition::Used));
        assert_eq!(filters.province.as_deref(), Some("กรุงเทพ"));
    }
}
