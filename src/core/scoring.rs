use crate::models::{Consumer, DimensionScores, Stream};

/// Stream grade rank assumed for labels outside the ranking table (Grade B)
const UNKNOWN_STREAM_RANK: u8 = 2;

/// Required grade rank assumed for labels outside the ranking table (Grade C)
const UNKNOWN_REQUIRED_RANK: u8 = 1;

/// Material score when only the category is accepted
const CATEGORY_MATCH_SCORE: f64 = 0.7;

/// Quality score when the stream sits exactly one grade below the minimum
const ONE_GRADE_BELOW_SCORE: f64 = 0.6;

/// Quality score when the stream sits two or more grades below the minimum
const FAR_BELOW_GRADE_SCORE: f64 = 0.3;

/// Lowest score for a stream below the buyer's minimum volume
const UNDER_VOLUME_FLOOR: f64 = 0.3;

/// Score for a stream above the buyer's maximum; the volume can be split
const OVER_VOLUME_SCORE: f64 = 0.7;

/// Upper distance bound (km) and score of each logistics tier
const DISTANCE_TIERS: [(f64, f64); 5] = [
    (50.0, 1.0),
    (150.0, 0.85),
    (300.0, 0.65),
    (500.0, 0.45),
    (800.0, 0.25),
];

const BEYOND_LAST_TIER_SCORE: f64 = 0.1;

/// Certifications that authorise handling of hazardous material, in
/// normalised form (uppercase, separators removed)
const HAZMAT_CERTIFICATIONS: [&str; 4] = ["CPCB", "SPCB", "MOEFCC", "HAZARDOUSWASTEAUTHORIZATION"];

/// Compliance score of a hazardous stream sent to an uncertified buyer
const UNCERTIFIED_HAZMAT_SCORE: f64 = 0.2;

/// Score every dimension of a (stream, consumer) pair
///
/// `distance_km` is computed once by the caller since the impact
/// calculations need it too.
pub fn score_dimensions(stream: &Stream, consumer: &Consumer, distance_km: f64) -> DimensionScores {
    DimensionScores {
        material: score_material(stream, consumer),
        quality: score_quality(stream, consumer),
        volume: score_volume(stream, consumer),
        distance: score_distance(distance_km),
        compliance: score_compliance(stream, consumer),
    }
}

/// Material compatibility (0-1)
/// An exact item type match always beats a category match
#[inline]
pub fn score_material(stream: &Stream, consumer: &Consumer) -> f64 {
    if consumer.accepts_item_type(&stream.item_type) {
        1.0
    } else if consumer.accepts_category(&stream.category) {
        CATEGORY_MATCH_SCORE
    } else {
        0.0
    }
}

/// Quality fit (0-1) of the stream's grade against the buyer's minimum
#[inline]
pub fn score_quality(stream: &Stream, consumer: &Consumer) -> f64 {
    let stream_rank = stream.quality_grade.rank().unwrap_or(UNKNOWN_STREAM_RANK);
    let required_rank = consumer
        .min_quality_grade
        .rank()
        .unwrap_or(UNKNOWN_REQUIRED_RANK);

    if stream_rank >= required_rank {
        1.0
    } else if stream_rank + 1 == required_rank {
        ONE_GRADE_BELOW_SCORE
    } else {
        FAR_BELOW_GRADE_SCORE
    }
}

/// Volume fit (0-1) of the stream's midpoint quantity against the buyer's
/// monthly bounds
#[inline]
pub fn score_volume(stream: &Stream, consumer: &Consumer) -> f64 {
    let quantity = stream.midpoint_tons();
    let min_volume = consumer.min_monthly_volume_tons;
    let max_volume = consumer.max_monthly_volume_tons.unwrap_or(f64::INFINITY);

    if quantity >= min_volume && quantity <= max_volume {
        1.0
    } else if quantity < min_volume {
        let ratio = if min_volume > 0.0 { quantity / min_volume } else { 0.0 };
        ratio.min(1.0).max(UNDER_VOLUME_FLOOR)
    } else {
        OVER_VOLUME_SCORE
    }
}

/// Logistics score (0-1), a step function that never increases with distance
#[inline]
pub fn score_distance(distance_km: f64) -> f64 {
    DISTANCE_TIERS
        .iter()
        .find(|(limit, _)| distance_km <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(BEYOND_LAST_TIER_SCORE)
}

/// Regulatory compliance (0-1)
/// Hazardous streams need a buyer holding a recognised authorisation
#[inline]
pub fn score_compliance(stream: &Stream, consumer: &Consumer) -> f64 {
    if !stream.hazard_class.is_hazardous() {
        return 1.0;
    }

    if holds_hazmat_certification(consumer) {
        1.0
    } else {
        UNCERTIFIED_HAZMAT_SCORE
    }
}

/// Case-insensitive match ignoring `_`, `-` and spaces, so
/// "Hazardous Waste Authorization" and "moefcc" both count
pub fn holds_hazmat_certification(consumer: &Consumer) -> bool {
    consumer.certifications.iter().any(|cert| {
        let normalized = normalize_certification(cert);
        HAZMAT_CERTIFICATIONS
            .iter()
            .any(|recognised| normalized.contains(recognised))
    })
}

fn normalize_certification(cert: &str) -> String {
    cert.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HazardClass, Location, QualityGrade};

    fn create_test_stream(item_type: &str, category: &str) -> Stream {
        Stream {
            item_type: item_type.to_string(),
            category: category.to_string(),
            quantity_min_tons: 10.0,
            quantity_max_tons: 20.0,
            quality_grade: QualityGrade::GradeB,
            contamination_pct: 5.0,
            hazard_class: HazardClass::NonHazardous,
            confidence: None,
        }
    }

    fn create_test_consumer() -> Consumer {
        Consumer {
            consumer_id: "B001".to_string(),
            name: "Metro Metals".to_string(),
            consumer_type: "Recycler".to_string(),
            accepted_item_types: ["steel_scrap".to_string()].into_iter().collect(),
            accepted_categories: ["metal".to_string()].into_iter().collect(),
            min_quality_grade: QualityGrade::GradeC,
            min_monthly_volume_tons: 5.0,
            max_monthly_volume_tons: Some(50.0),
            location: Location::new(19.0760, 72.8777),
            pricing_model: Default::default(),
            certifications: Default::default(),
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_material_score() {
        let consumer = create_test_consumer();

        assert_eq!(score_material(&create_test_stream("steel_scrap", "metal"), &consumer), 1.0);
        assert_eq!(score_material(&create_test_stream("aluminum_dross", "metal"), &consumer), 0.7);
        assert_eq!(score_material(&create_test_stream("pet_bottles", "plastic"), &consumer), 0.0);
    }

    #[test]
    fn test_quality_score_steps() {
        let mut stream = create_test_stream("steel_scrap", "metal");
        let mut consumer = create_test_consumer();

        consumer.min_quality_grade = QualityGrade::GradeA;
        stream.quality_grade = QualityGrade::Clean;
        assert_eq!(score_quality(&stream, &consumer), 0.6);

        stream.quality_grade = QualityGrade::GradeB;
        assert_eq!(score_quality(&stream, &consumer), 0.3);

        stream.quality_grade = QualityGrade::GradeA;
        assert_eq!(score_quality(&stream, &consumer), 1.0);
    }

    #[test]
    fn test_quality_unknown_grades() {
        let mut stream = create_test_stream("steel_scrap", "metal");
        let mut consumer = create_test_consumer();

        // Unknown stream grade ranks as Grade B, one below Clean
        stream.quality_grade = QualityGrade::parse("Premium");
        consumer.min_quality_grade = QualityGrade::Clean;
        assert_eq!(score_quality(&stream, &consumer), 0.6);

        // Unknown requirement ranks as Grade C
        stream.quality_grade = QualityGrade::Mixed;
        consumer.min_quality_grade = QualityGrade::parse("Food grade");
        assert_eq!(score_quality(&stream, &consumer), 1.0);
    }

    #[test]
    fn test_volume_score() {
        let mut stream = create_test_stream("steel_scrap", "metal");
        let mut consumer = create_test_consumer();

        // Midpoint 15 within 5..=50
        assert_eq!(score_volume(&stream, &consumer), 1.0);

        // Midpoint 15 against min 20 -> 0.75
        consumer.min_monthly_volume_tons = 20.0;
        assert_eq!(score_volume(&stream, &consumer), 0.75);

        // Far below min is floored
        consumer.min_monthly_volume_tons = 300.0;
        assert_eq!(score_volume(&stream, &consumer), 0.3);

        // Above max can be split across shipments
        consumer.min_monthly_volume_tons = 0.0;
        consumer.max_monthly_volume_tons = Some(12.0);
        assert_eq!(score_volume(&stream, &consumer), 0.7);

        // Unbounded max always fits
        consumer.max_monthly_volume_tons = None;
        stream.quantity_max_tons = 10_000.0;
        assert_eq!(score_volume(&stream, &consumer), 1.0);
    }

    #[test]
    fn test_distance_tiers() {
        assert_eq!(score_distance(0.0), 1.0);
        assert_eq!(score_distance(50.0), 1.0);
        assert_eq!(score_distance(50.1), 0.85);
        assert_eq!(score_distance(150.0), 0.85);
        assert_eq!(score_distance(300.0), 0.65);
        assert_eq!(score_distance(500.0), 0.45);
        assert_eq!(score_distance(800.0), 0.25);
        assert_eq!(score_distance(800.1), 0.1);
        assert_eq!(score_distance(20_000.0), 0.1);
    }

    #[test]
    fn test_compliance_score() {
        let mut stream = create_test_stream("spent_solvent", "chemical");
        let mut consumer = create_test_consumer();

        assert_eq!(score_compliance(&stream, &consumer), 1.0);

        stream.hazard_class = HazardClass::Hazardous { class: Some(2) };
        assert_eq!(score_compliance(&stream, &consumer), 0.2);

        consumer.certifications.insert("hazardous-waste authorization".to_string());
        assert_eq!(score_compliance(&stream, &consumer), 1.0);
    }

    #[test]
    fn test_certification_normalization() {
        let mut consumer = create_test_consumer();
        consumer.certifications.insert("ISO_14001".to_string());
        assert!(!holds_hazmat_certification(&consumer));

        consumer.certifications.insert("MoEF_CC".to_string());
        assert!(holds_hazmat_certification(&consumer));
    }

    #[test]
    fn test_all_dimensions_in_unit_range() {
        let stream = create_test_stream("aluminum_dross", "metal");
        let consumer = create_test_consumer();
        let scores = score_dimensions(&stream, &consumer, 420.0);

        for score in [scores.material, scores.quality, scores.volume, scores.distance, scores.compliance] {
            assert!((0.0..=1.0).contains(&score));
        }
        assert_eq!(scores.distance, 0.45);
    }
}
