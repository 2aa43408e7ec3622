//! Seed data for replaying a recorded attempt in review mode.
//!
//! The host opens the content with `cmi.mode = "review"` and the learner's
//! recorded state, so the content can show what was submitted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runtime::{CmiValue, DataModel, ScormApi};
use crate::Result;

/// The learner an attempt belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Learner {
    pub username: String,
    pub full_name: String,
}

/// One objective (question) recorded in an attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveRecord {
    pub id: String,
    pub description: Option<String>,
    pub scaled_score: f64,
    pub raw_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub success_status: String,
    pub completion_status: String,
    pub progress_measure: f64,
}

/// One interaction (answered part) recorded in an attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionRecord {
    pub id: String,
    pub interaction_type: String,
    pub weighting: Option<String>,
    pub learner_response: Option<String>,
    pub result: Option<String>,
    pub description: Option<String>,
}

/// A recorded learner attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptRecord {
    pub learner: Learner,
    pub location: Option<String>,
    /// Arbitrary JSON the content stored; replayed as a JSON string.
    pub suspend_data: serde_json::Value,
    pub raw_score: f64,
    pub scaled_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub total_time: f64,
    pub completion_status: String,
    pub success_status: String,
    pub objectives: Vec<ObjectiveRecord>,
    pub interactions: Vec<InteractionRecord>,
}

impl AttemptRecord {
    /// Load an attempt record from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Build the review-mode data model for an attempt.
pub fn review_data(attempt: &AttemptRecord) -> Result<DataModel> {
    let mut cmi = DataModel::new();
    let mut put = |key: String, value: CmiValue| {
        cmi.insert(key, value);
    };

    put("cmi.mode".into(), "review".into());
    put("cmi.entry".into(), "resume".into());
    put(
        "cmi.suspend_data".into(),
        serde_json::to_string(&attempt.suspend_data)?.into(),
    );
    put(
        "cmi.objectives._count".into(),
        attempt.objectives.len().into(),
    );
    put(
        "cmi.interactions._count".into(),
        attempt.interactions.len().into(),
    );
    put(
        "cmi.learner_name".into(),
        attempt.learner.full_name.as_str().into(),
    );
    put(
        "cmi.learner_id".into(),
        attempt.learner.username.as_str().into(),
    );
    put("cmi.location".into(), attempt.location.clone().into());
    put("cmi.score.raw".into(), attempt.raw_score.into());
    put("cmi.score.scaled".into(), attempt.scaled_score.into());
    put("cmi.score.min".into(), attempt.min_score.into());
    put("cmi.score.max".into(), attempt.max_score.into());
    put("cmi.total_time".into(), attempt.total_time.into());
    put(
        "cmi.completion_status".into(),
        attempt.completion_status.as_str().into(),
    );
    put(
        "cmi.success_status".into(),
        attempt.success_status.as_str().into(),
    );

    for (i, objective) in attempt.objectives.iter().enumerate() {
        let fields: [(&str, CmiValue); 9] = [
            ("id", objective.id.as_str().into()),
            ("score.scaled", objective.scaled_score.into()),
            ("score.raw", objective.raw_score.into()),
            ("score.min", objective.min_score.into()),
            ("score.max", objective.max_score.into()),
            ("success_status", objective.success_status.as_str().into()),
            (
                "completion_status",
                objective.completion_status.as_str().into(),
            ),
            ("progress_measure", objective.progress_measure.into()),
            ("description", objective.description.clone().into()),
        ];
        for (field, value) in fields {
            put(format!("cmi.objectives.{}.{}", i, field), value);
        }
    }

    for (i, interaction) in attempt.interactions.iter().enumerate() {
        let fields: [(&str, CmiValue); 6] = [
            ("id", interaction.id.as_str().into()),
            ("type", interaction.interaction_type.as_str().into()),
            ("weighting", interaction.weighting.clone().into()),
            (
                "learner_response",
                interaction.learner_response.clone().into(),
            ),
            ("result", interaction.result.clone().into()),
            ("description", interaction.description.clone().into()),
        ];
        for (field, value) in fields {
            put(format!("cmi.interactions.{}.{}", i, field), value);
        }
    }

    debug!(
        learner = %attempt.learner.username,
        elements = cmi.len(),
        "review data built"
    );
    Ok(cmi)
}

impl ScormApi {
    /// A fresh session seeded with an attempt's review-mode data.
    pub fn for_review(attempt: &AttemptRecord) -> Result<Self> {
        Ok(ScormApi::new(review_data(attempt)?))
    }
}
