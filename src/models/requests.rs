use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::MatchError;
use crate::models::domain::{Consumer, ItemProfile, Location, Stream};

/// Request to rank consumers for one producer's streams
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    /// Predictor output; its fields sit at the top level of the request
    #[serde(flatten)]
    pub profile: ItemProfile,
    pub consumers: Vec<Consumer>,
    pub facility_location: Location,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    /// Only consider consumers within this many kilometers of the facility
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub region_radius_km: Option<f64>,
}

impl FindMatchesRequest {
    /// Reject malformed input before it reaches the engine
    pub fn check(&self) -> Result<(), MatchError> {
        self.validate()
            .map_err(|e| MatchError::InvalidInput(format!("request: {}", e)))?;

        if !self.facility_location.is_finite() {
            return Err(MatchError::InvalidInput(
                "facility location must have finite coordinates".to_string(),
            ));
        }

        for stream in &self.profile.streams {
            check_stream(stream)?;
        }

        let mut seen_ids = HashSet::with_capacity(self.consumers.len());
        for consumer in &self.consumers {
            check_consumer(consumer)?;
            if !seen_ids.insert(consumer.consumer_id.as_str()) {
                return Err(MatchError::InvalidInput(format!(
                    "duplicate consumer id {}",
                    consumer.consumer_id
                )));
            }
        }

        Ok(())
    }
}

fn check_stream(stream: &Stream) -> Result<(), MatchError> {
    stream
        .validate()
        .map_err(|e| MatchError::InvalidInput(format!("stream {}: {}", stream.item_type, e)))?;

    if stream.quantity_min_tons > stream.quantity_max_tons {
        return Err(MatchError::InvalidInput(format!(
            "stream {}: quantityMinTons {} exceeds quantityMaxTons {}",
            stream.item_type, stream.quantity_min_tons, stream.quantity_max_tons
        )));
    }

    Ok(())
}

fn check_consumer(consumer: &Consumer) -> Result<(), MatchError> {
    consumer.validate().map_err(|e| {
        MatchError::InvalidInput(format!("consumer {}: {}", consumer.consumer_id, e))
    })?;

    if let Some(max) = consumer.max_monthly_volume_tons {
        if max < consumer.min_monthly_volume_tons {
            return Err(MatchError::InvalidInput(format!(
                "consumer {}: maxMonthlyVolumeTons {} is below minMonthlyVolumeTons {}",
                consumer.consumer_id, max, consumer.min_monthly_volume_tons
            )));
        }
    }

    if !consumer.location.is_finite() {
        return Err(MatchError::InvalidInput(format!(
            "consumer {}: location must have finite coordinates",
            consumer.consumer_id
        )));
    }

    Ok(())
}
