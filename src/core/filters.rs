use crate::core::distance::{calculate_bounding_box, distance_between, is_within_bounding_box};
use crate::models::{Consumer, ConsumerQuery, Location};

/// Check if a consumer satisfies every populated constraint of a catalog query
///
/// Radius constraints are checked against a bounding box first and only
/// confirmed with an exact great-circle distance for sites inside it.
#[inline]
pub fn matches_consumer_query(consumer: &Consumer, query: &ConsumerQuery) -> bool {
    if let Some(item_type) = &query.item_type {
        if !consumer.accepts_item_type(item_type) {
            return false;
        }
    }

    if let Some(category) = &query.category {
        if !consumer.accepts_category(category) {
            return false;
        }
    }

    if let Some((center, radius_km)) = &query.near {
        if !is_within_radius(consumer, center, *radius_km) {
            return false;
        }
    }

    true
}

/// Check if a consumer's site lies within `radius_km` of `center`
#[inline]
pub fn is_within_radius(consumer: &Consumer, center: &Location, radius_km: f64) -> bool {
    let bbox = calculate_bounding_box(center.lat, center.lng, radius_km);
    if !is_within_bounding_box(consumer.location.lat, consumer.location.lng, &bbox) {
        return false;
    }

    distance_between(center, &consumer.location) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QualityGrade;

    fn create_test_consumer(lat: f64, lng: f64) -> Consumer {
        Consumer {
            consumer_id: "B001".to_string(),
            name: "Metro Metals".to_string(),
            consumer_type: "Recycler".to_string(),
            accepted_item_types: ["steel_scrap".to_string()].into_iter().collect(),
            accepted_categories: ["metal".to_string()].into_iter().collect(),
            min_quality_grade: QualityGrade::GradeC,
            min_monthly_volume_tons: 0.0,
            max_monthly_volume_tons: None,
            location: Location::new(lat, lng),
            pricing_model: Default::default(),
            certifications: Default::default(),
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let consumer = create_test_consumer(19.0760, 72.8777);
        assert!(matches_consumer_query(&consumer, &ConsumerQuery::default()));
    }

    #[test]
    fn test_item_type_and_category_filters() {
        let consumer = create_test_consumer(19.0760, 72.8777);

        let by_type = ConsumerQuery {
            item_type: Some("steel_scrap".to_string()),
            ..Default::default()
        };
        assert!(matches_consumer_query(&consumer, &by_type));

        let wrong_category = ConsumerQuery {
            item_type: Some("steel_scrap".to_string()),
            category: Some("plastic".to_string()),
            ..Default::default()
        };
        assert!(!matches_consumer_query(&consumer, &wrong_category));
    }

    #[test]
    fn test_radius_filter() {
        let mumbai = Location::new(19.0760, 72.8777);
        let pune_site = create_test_consumer(18.5204, 73.8567);

        assert!(is_within_radius(&pune_site, &mumbai, 150.0));
        assert!(!is_within_radius(&pune_site, &mumbai, 100.0));

        // Inside the bounding box corner but outside the circle
        let corner = create_test_consumer(19.0760 + 0.85, 72.8777 + 0.85);
        assert!(!is_within_radius(&corner, &mumbai, 100.0));
    }
}
