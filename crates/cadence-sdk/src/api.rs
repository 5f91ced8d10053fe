//! Wire types and paths for the clones API.

use crate::error::SdkError;
use cadence_domain::{CategoryWeights, CloneId, MergePlan, SourceProfile, ValidationError, WeightMatrix};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// `GET` the clone list
pub const CLONES_PATH: &str = "/api/clones";

/// `POST` a merge request
pub const MERGE_PATH: &str = "/api/clones/merge";

/// `GET` one clone's DNA
pub fn dna_path(clone_id: &CloneId) -> String {
    format!("/api/clones/{}/dna", clone_id)
}

/// A voice clone as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneResponse {
    /// Clone ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// `"original"`, `"merged"`, ...
    #[serde(rename = "type")]
    pub clone_type: String,
    /// Seeded demo clone
    #[serde(default)]
    pub is_demo: bool,
    /// Hidden from pickers
    #[serde(default)]
    pub is_hidden: bool,
    /// Avatar image path
    #[serde(default)]
    pub avatar_path: Option<String>,
    /// Analysis confidence (0-100)
    #[serde(default)]
    pub confidence_score: i64,
    /// Number of writing samples
    #[serde(default)]
    pub sample_count: i64,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Response of `GET /api/clones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneList {
    /// Clones on this page
    pub items: Vec<CloneResponse>,
    /// Total number of clones
    pub total: u64,
}

/// One source row of a merge request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSourceClone {
    /// Source clone ID
    pub clone_id: String,
    /// Weights keyed by category wire key
    #[serde(serialize_with = "serialize_weights")]
    pub weights: CategoryWeights,
}

/// Body of `POST /api/clones/merge`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRequest {
    /// Name for the merged clone
    pub name: String,
    /// Source rows in selection order
    pub source_clones: Vec<MergeSourceClone>,
}

impl MergeRequest {
    /// Validate a matrix and copy its rows into a request
    pub fn build(name: &str, matrix: &WeightMatrix) -> Result<Self, ValidationError> {
        MergePlan::new(name, matrix).map(Self::from)
    }
}

impl From<MergePlan> for MergeRequest {
    fn from(plan: MergePlan) -> Self {
        Self {
            name: plan.name().to_string(),
            source_clones: plan
                .sources()
                .iter()
                .map(|(clone_id, weights)| MergeSourceClone {
                    clone_id: clone_id.to_string(),
                    weights: *weights,
                })
                .collect(),
        }
    }
}

fn serialize_weights<S: Serializer>(weights: &CategoryWeights, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(cadence_domain::Category::COUNT))?;
    for (category, weight) in weights.iter() {
        map.serialize_entry(category.as_str(), &weight.value())?;
    }
    map.end()
}

/// Whether a successful DNA body says the clone has no DNA yet
///
/// True for a `null` body and for an envelope whose `prominence_scores` is
/// `null`.
pub fn is_missing_dna(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(object) => matches!(object.get("prominence_scores"), Some(Value::Null)),
        _ => false,
    }
}

/// Decode a DNA body into a profile
///
/// Accepts a flat `{ <category>: number }` map or the backend's DNA
/// envelope carrying `prominence_scores`. Check [`is_missing_dna`] first.
pub fn decode_profile(clone_id: CloneId, body: &Value) -> Result<SourceProfile, SdkError> {
    let object = body
        .as_object()
        .ok_or_else(|| SdkError::DecodeError(format!("DNA body for '{}' is not an object", clone_id)))?;

    let scores = match object.get("prominence_scores") {
        None => object,
        Some(Value::Object(scores)) => scores,
        Some(other) => {
            return Err(SdkError::DecodeError(format!(
                "prominence_scores for '{}' is not an object: {}",
                clone_id, other
            )))
        }
    };

    let numeric = scores
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|score| (key.as_str(), score)));
    Ok(SourceProfile::from_scores(clone_id, numeric))
}
