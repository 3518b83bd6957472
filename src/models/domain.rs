use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::core::distance::distance_between;
use crate::core::round_to;
use crate::error::MatchError;
use crate::models::classify::{category_for, hazard_for};
use crate::models::pricing::PricingModel;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another location in kilometers
    pub fn distance_km(&self, other: &Location) -> f64 {
        distance_between(self, other)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Ordinal cleanliness classification of a material stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityGrade {
    GradeA,
    Clean,
    GradeB,
    GradeC,
    Mixed,
    AsIs,
    /// A grade label the ranking table does not know about
    Other(String),
}

impl QualityGrade {
    /// Position on the ordinal scale, `None` for unrecognised labels
    pub fn rank(&self) -> Option<u8> {
        match self {
            QualityGrade::GradeA => Some(4),
            QualityGrade::Clean => Some(3),
            QualityGrade::GradeB => Some(2),
            QualityGrade::GradeC | QualityGrade::Mixed => Some(1),
            QualityGrade::AsIs => Some(0),
            QualityGrade::Other(_) => None,
        }
    }

    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "grade a" => QualityGrade::GradeA,
            "clean" => QualityGrade::Clean,
            "grade b" => QualityGrade::GradeB,
            "grade c" => QualityGrade::GradeC,
            "mixed" => QualityGrade::Mixed,
            "as-is" | "as is" => QualityGrade::AsIs,
            _ => QualityGrade::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for QualityGrade {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for QualityGrade {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<QualityGrade> for String {
    fn from(grade: QualityGrade) -> Self {
        grade.to_string()
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityGrade::GradeA => f.write_str("Grade A"),
            QualityGrade::Clean => f.write_str("Clean"),
            QualityGrade::GradeB => f.write_str("Grade B"),
            QualityGrade::GradeC => f.write_str("Grade C"),
            QualityGrade::Mixed => f.write_str("Mixed"),
            QualityGrade::AsIs => f.write_str("As-Is"),
            QualityGrade::Other(label) => f.write_str(label),
        }
    }
}

fn default_stream_grade() -> QualityGrade {
    QualityGrade::GradeB
}

fn default_required_grade() -> QualityGrade {
    QualityGrade::GradeC
}

/// Regulatory danger classification of a material stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HazardClass {
    NonHazardous,
    Hazardous { class: Option<u8> },
}

impl HazardClass {
    pub fn is_hazardous(&self) -> bool {
        matches!(self, HazardClass::Hazardous { .. })
    }

    /// Accepts labels such as `Non-hazardous`, `Hazardous - Class 3` or
    /// `Hazardous-Class2`. Anything without a hazardous marker is treated as
    /// non-hazardous.
    pub fn parse(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("non") || !lower.contains("hazardous") {
            return HazardClass::NonHazardous;
        }

        let digits: String = lower.chars().filter(char::is_ascii_digit).collect();
        HazardClass::Hazardous {
            class: digits.parse().ok(),
        }
    }
}

impl From<String> for HazardClass {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for HazardClass {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<HazardClass> for String {
    fn from(hazard: HazardClass) -> Self {
        hazard.to_string()
    }
}

impl fmt::Display for HazardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardClass::NonHazardous => f.write_str("Non-hazardous"),
            HazardClass::Hazardous { class: Some(class) } => write!(f, "Hazardous - Class {}", class),
            HazardClass::Hazardous { class: None } => f.write_str("Hazardous"),
        }
    }
}

/// One unit of producer output material awaiting a buyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", from = "StreamRecord")]
pub struct Stream {
    #[validate(length(min = 1))]
    pub item_type: String,
    pub category: String,
    #[validate(range(min = 0.0))]
    pub quantity_min_tons: f64,
    #[validate(range(min = 0.0))]
    pub quantity_max_tons: f64,
    pub quality_grade: QualityGrade,
    #[validate(range(min = 0.0, max = 100.0))]
    pub contamination_pct: f64,
    pub hazard_class: HazardClass,
    /// Predictor confidence for this item, carried through untouched
    pub confidence: Option<f64>,
}

impl Stream {
    /// Midpoint of the monthly quantity range
    #[inline]
    pub fn midpoint_tons(&self) -> f64 {
        (self.quantity_min_tons + self.quantity_max_tons) / 2.0
    }

    #[inline]
    pub fn annual_quantity_tons(&self) -> f64 {
        self.midpoint_tons() * 12.0
    }
}

/// Wire shape of a stream; category and hazard class are derived from the
/// item type when the predictor leaves them out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamRecord {
    #[serde(alias = "type")]
    item_type: String,
    #[serde(default)]
    category: Option<String>,
    quantity_min_tons: f64,
    quantity_max_tons: f64,
    #[serde(default = "default_stream_grade")]
    quality_grade: QualityGrade,
    #[serde(default)]
    contamination_pct: f64,
    #[serde(default)]
    hazard_class: Option<HazardClass>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl From<StreamRecord> for Stream {
    fn from(record: StreamRecord) -> Self {
        let category = record
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| category_for(&record.item_type).to_string());
        let hazard_class = record
            .hazard_class
            .unwrap_or_else(|| hazard_for(&record.item_type, record.contamination_pct));

        Self {
            item_type: record.item_type,
            category,
            quantity_min_tons: record.quantity_min_tons,
            quantity_max_tons: record.quantity_max_tons,
            quality_grade: record.quality_grade,
            contamination_pct: record.contamination_pct,
            hazard_class,
            confidence: record.confidence,
        }
    }
}

/// Output of the upstream item predictor, the stream half of a match request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProfile {
    pub streams: Vec<Stream>,
    #[serde(default)]
    pub overall_confidence: Option<f64>,
}

/// A cataloged buyer willing to accept certain materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    #[validate(length(min = 1))]
    pub consumer_id: String,
    pub name: String,
    #[serde(default)]
    pub consumer_type: String,
    #[serde(default, deserialize_with = "deserialize_set")]
    pub accepted_item_types: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_set")]
    pub accepted_categories: BTreeSet<String>,
    #[serde(default = "default_required_grade")]
    pub min_quality_grade: QualityGrade,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_monthly_volume_tons: f64,
    /// `None` means the buyer takes any volume
    #[serde(default)]
    pub max_monthly_volume_tons: Option<f64>,
    pub location: Location,
    #[serde(default)]
    pub pricing_model: PricingModel,
    #[serde(default, deserialize_with = "deserialize_set")]
    pub certifications: BTreeSet<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Consumer {
    pub fn accepts_item_type(&self, item_type: &str) -> bool {
        self.accepted_item_types.contains(item_type)
    }

    pub fn accepts_category(&self, category: &str) -> bool {
        self.accepted_categories.contains(category)
    }

    /// Display text for the buyer's volume requirement
    pub fn requirements(&self) -> String {
        format!("Min {} tons/month", self.min_monthly_volume_tons)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SetInput {
    List(Vec<String>),
    Delimited(String),
}

/// Accepts either a JSON array or a comma-delimited string and stores the
/// trimmed, non-empty entries as a set.
fn deserialize_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match SetInput::deserialize(deserializer)? {
        SetInput::List(items) => items,
        SetInput::Delimited(text) => text.split(',').map(str::to_string).collect(),
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Per-dimension scores of one (stream, consumer) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub material: f64,
    pub quality: f64,
    pub volume: f64,
    pub distance: f64,
    pub compliance: f64,
}

impl DimensionScores {
    pub fn weighted_total(&self, weights: &ScoringWeights) -> f64 {
        self.material * weights.material
            + self.quality * weights.quality
            + self.volume * weights.volume
            + self.distance * weights.distance
            + self.compliance * weights.compliance
    }

    /// Rescale unit scores to the 0-100 display range
    pub fn as_percentages(&self) -> Self {
        let pct = |score: f64| round_to(round_to(score, 3) * 100.0, 1);
        Self {
            material: pct(self.material),
            quality: pct(self.quality),
            volume: pct(self.volume),
            distance: pct(self.distance),
            compliance: pct(self.compliance),
        }
    }
}

/// Annual economic projection of a pairing, monetary values in `currency`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economics {
    pub annual_revenue: f64,
    pub annual_transport_cost: f64,
    pub disposal_cost_avoided: f64,
    pub net_annual_benefit: f64,
    pub price_per_ton: f64,
    pub annual_quantity_tons: f64,
    pub currency: String,
}

/// Annual environmental projection of a pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environmental {
    pub co2_saved_tons_annual: f64,
    pub landfill_diverted_tons_annual: f64,
    pub virgin_material_avoided_tons: f64,
    pub recycling_efficiency_pct: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    ReviewRequired,
}

/// Scored match between one stream and one consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub consumer_id: String,
    pub consumer_name: String,
    pub consumer_type: String,
    pub item_type: String,
    /// Dimension scores on the 0-100 scale
    pub scores: DimensionScores,
    pub overall_score: f64,
    pub distance_km: f64,
    pub economics: Economics,
    pub environmental: Environmental,
    pub compliance_status: ComplianceStatus,
    pub requirements: String,
    pub pricing: String,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Catalog lookup parameters; every populated field must match
#[derive(Debug, Clone, Default)]
pub struct ConsumerQuery {
    pub item_type: Option<String>,
    pub category: Option<String>,
    pub near: Option<(Location, f64)>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub material: f64,
    pub quality: f64,
    pub volume: f64,
    pub distance: f64,
    pub compliance: f64,
}

impl ScoringWeights {
    const SUM_TOLERANCE: f64 = 1e-6;

    /// Weights must be non-negative and form a convex combination
    pub fn validate(&self) -> Result<(), MatchError> {
        let parts = [
            ("material", self.material),
            ("quality", self.quality),
            ("volume", self.volume),
            ("distance", self.distance),
            ("compliance", self.compliance),
        ];

        if let Some((name, value)) = parts.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(MatchError::InvalidWeights(format!(
                "{} weight must be a non-negative number, got {}",
                name, value
            )));
        }

        let sum: f64 = parts.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(MatchError::InvalidWeights(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            material: 0.35,
            quality: 0.20,
            volume: 0.15,
            distance: 0.20,
            compliance: 0.10,
        }
    }
}
