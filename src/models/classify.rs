//! Rule-based item classification used when the predictor omits a stream's
//! category or hazard class.

use crate::models::domain::HazardClass;

/// Category assigned to item types that match no keyword
pub const FALLBACK_CATEGORY: &str = "mixed";

/// First matching row wins
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("metal", &["steel", "aluminum", "shavings", "slag", "dross"]),
    ("chemical", &["coolant", "lubricant", "solvent", "chemical", "paint"]),
    ("plastic", &["plastic", "packaging"]),
    ("electronic", &["pcb", "electronic", "component"]),
    ("organic", &["organic", "food"]),
    ("textile", &["fabric", "thread"]),
    ("liquid", &["wastewater", "water"]),
];

const HAZARDOUS_KEYWORDS: &[&str] = &["chemical", "solvent", "paint", "dye", "coolant", "lubricant"];

/// Contamination above this level escalates a hazardous item to class 3
const CLASS_3_CONTAMINATION_PCT: f64 = 15.0;

/// Derive a material category from an item type
pub fn category_for(item_type: &str) -> &'static str {
    let lower = item_type.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Derive a hazard class from an item type and its contamination level
pub fn hazard_for(item_type: &str, contamination_pct: f64) -> HazardClass {
    let lower = item_type.to_lowercase();
    if !HAZARDOUS_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return HazardClass::NonHazardous;
    }

    let class = if contamination_pct > CLASS_3_CONTAMINATION_PCT { 3 } else { 2 };
    HazardClass::Hazardous { class: Some(class) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(category_for("Steel_Scrap"), "metal");
        assert_eq!(category_for("used_coolant"), "chemical");
        assert_eq!(category_for("pcb_offcuts"), "electronic");
        assert_eq!(category_for("process_wastewater"), "liquid");
        assert_eq!(category_for("wood_pallets"), "mixed");
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "paint" is chemical even though "packaging" would be plastic
        assert_eq!(category_for("paint_packaging"), "chemical");
    }

    #[test]
    fn test_hazard_classes() {
        assert_eq!(hazard_for("steel_scrap", 50.0), HazardClass::NonHazardous);
        assert_eq!(hazard_for("spent_solvent", 10.0), HazardClass::Hazardous { class: Some(2) });
        assert_eq!(hazard_for("spent_solvent", 15.5), HazardClass::Hazardous { class: Some(3) });
        assert_eq!(hazard_for("textile_dye_residue", 0.0), HazardClass::Hazardous { class: Some(2) });
    }
}
