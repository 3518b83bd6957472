use crate::core::{
    distance::distance_between,
    impact::{calculate_economics, calculate_environmental},
    round_to,
    scoring::score_dimensions,
};
use crate::models::{ComplianceStatus, Consumer, Location, MatchRecord, ScoringWeights, Stream};

/// Compliance scores above this are reported as compliant
const COMPLIANT_SCORE: f64 = 0.5;

/// A scored pair together with the unscaled total used for admission
#[derive(Debug, Clone)]
pub struct ScoredPair {
    /// Weighted total in [0, 1], rounded to 3 decimals
    pub total: f64,
    pub record: MatchRecord,
}

/// Scores one (stream, consumer) pair
///
/// Combines the five dimension scores into a weighted total and attaches the
/// economic and environmental projections for the pairing.
#[derive(Debug, Clone, Copy)]
pub struct PairScorer {
    weights: ScoringWeights,
}

impl PairScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a pair and package it as a match record
    pub fn score(&self, stream: &Stream, consumer: &Consumer, facility: &Location) -> MatchRecord {
        self.evaluate(stream, consumer, facility).record
    }

    pub fn evaluate(&self, stream: &Stream, consumer: &Consumer, facility: &Location) -> ScoredPair {
        let distance_km = distance_between(facility, &consumer.location);
        let dimensions = score_dimensions(stream, consumer, distance_km);
        let total = round_to(dimensions.weighted_total(&self.weights), 3);

        let compliance_status = if dimensions.compliance > COMPLIANT_SCORE {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::ReviewRequired
        };

        let record = MatchRecord {
            consumer_id: consumer.consumer_id.clone(),
            consumer_name: consumer.name.clone(),
            consumer_type: consumer.consumer_type.clone(),
            item_type: stream.item_type.clone(),
            scores: dimensions.as_percentages(),
            overall_score: round_to(total * 100.0, 1),
            distance_km: round_to(distance_km, 1),
            economics: calculate_economics(stream, consumer, distance_km),
            environmental: calculate_environmental(stream, distance_km),
            compliance_status,
            requirements: consumer.requirements(),
            pricing: consumer.pricing_model.to_string(),
        };

        ScoredPair { total, record }
    }
}

impl Default for PairScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HazardClass, QualityGrade};

    fn create_test_stream(hazard_class: HazardClass) -> Stream {
        Stream {
            item_type: "steel_scrap".to_string(),
            category: "metal".to_string(),
            quantity_min_tons: 10.0,
            quantity_max_tons: 20.0,
            quality_grade: QualityGrade::GradeB,
            contamination_pct: 5.0,
            hazard_class,
            confidence: None,
        }
    }

    fn create_test_consumer(location: Location) -> Consumer {
        Consumer {
            consumer_id: "B001".to_string(),
            name: "Metro Metals".to_string(),
            consumer_type: "Recycler".to_string(),
            accepted_item_types: ["steel_scrap".to_string()].into_iter().collect(),
            accepted_categories: Default::default(),
            min_quality_grade: QualityGrade::GradeC,
            min_monthly_volume_tons: 5.0,
            max_monthly_volume_tons: Some(50.0),
            location,
            pricing_model: "Market_Rate".into(),
            certifications: Default::default(),
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_perfect_pair_scores_100() {
        let facility = Location::new(19.0, 72.8);
        // ~40 km due north
        let consumer = create_test_consumer(Location::new(19.36, 72.8));
        let pair = PairScorer::default().evaluate(
            &create_test_stream(HazardClass::NonHazardous),
            &consumer,
            &facility,
        );

        assert_eq!(pair.total, 1.0);
        assert_eq!(pair.record.overall_score, 100.0);
        assert_eq!(pair.record.scores.material, 100.0);
        assert_eq!(pair.record.compliance_status, ComplianceStatus::Compliant);
        assert!((pair.record.distance_km - 40.0).abs() < 0.5);
        assert_eq!(pair.record.pricing, "Market_Rate");
        assert_eq!(pair.record.requirements, "Min 5 tons/month");
    }

    #[test]
    fn test_hazardous_pair_needs_review() {
        let facility = Location::new(19.0, 72.8);
        let consumer = create_test_consumer(Location::new(19.36, 72.8));
        let record = PairScorer::default().score(
            &create_test_stream(HazardClass::Hazardous { class: Some(2) }),
            &consumer,
            &facility,
        );

        assert_eq!(record.scores.compliance, 20.0);
        assert_eq!(record.overall_score, 92.0);
        assert_eq!(record.compliance_status, ComplianceStatus::ReviewRequired);
    }

    #[test]
    fn test_total_is_weighted_sum() {
        let facility = Location::new(19.0, 72.8);
        // ~200 km away, category-only match
        let mut consumer = create_test_consumer(Location::new(20.8, 72.8));
        consumer.accepted_item_types.clear();
        consumer.accepted_categories.insert("metal".to_string());

        let pair = PairScorer::default().evaluate(
            &create_test_stream(HazardClass::NonHazardous),
            &consumer,
            &facility,
        );

        let expected = 0.35 * 0.7 + 0.20 * 1.0 + 0.15 * 1.0 + 0.20 * 0.65 + 0.10 * 1.0;
        assert!((pair.total - expected).abs() < 1e-3);
        assert_eq!(pair.record.scores.distance, 65.0);
    }
}
