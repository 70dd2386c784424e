//! AI-suggested candidates and the working copy derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Edited,
}

/// One accept/reject-able suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    pub id: String,
    /// Free-form kind tag from the analysis step ("BO", "Role", "Action", ...)
    #[serde(rename = "type")]
    pub item_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_name: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<BTreeMap<String, serde_json::Value>>,
}

impl CandidateItem {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            label: label.into(),
            normalized_name: None,
            confidence: 0.0,
            status: CandidateStatus::Pending,
            mapping: None,
        }
    }

    /// Empty stand-in for a primary object that has not been accepted
    pub fn placeholder() -> Self {
        Self::new("", "", "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_accepted(&self) -> bool {
        self.status == CandidateStatus::Accepted
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateArtifacts {
    #[serde(default)]
    pub materials: Vec<CandidateItem>,
    #[serde(default)]
    pub data_checks: Vec<CandidateItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransition {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachineCandidate {
    #[serde(default)]
    pub states: Vec<StateNode>,
    #[serde(default)]
    pub transitions: Vec<StateTransition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateConstraints {
    #[serde(default)]
    pub rules: Vec<CandidateItem>,
}

/// Suggested link between two candidate objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRelation {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub relation_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,
}

/// Suggested field for a candidate object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSuggestion {
    pub object_id: String,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_field_type() -> String {
    "string".to_string()
}

/// Everything one analysis run suggested for a scenario
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_business_object: Option<CandidateItem>,
    #[serde(default)]
    pub related_business_objects: Vec<CandidateItem>,
    #[serde(default)]
    pub roles: Vec<CandidateItem>,
    #[serde(default)]
    pub actions: Vec<CandidateItem>,
    #[serde(default)]
    pub artifacts: CandidateArtifacts,
    #[serde(default)]
    pub state_machine: StateMachineCandidate,
    #[serde(default)]
    pub constraints: CandidateConstraints,
    #[serde(default)]
    pub relations: Vec<CandidateRelation>,
    #[serde(default)]
    pub field_suggestions: Vec<FieldSuggestion>,
}

/// Payload handed over by the analysis step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionRun {
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub created_at: DateTime<Utc>,
    pub candidates: CandidateSet,
}

/// Accepted subset of a candidate set, the modeling editor's input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCopy {
    pub primary_business_object: CandidateItem,
    pub business_objects: Vec<CandidateItem>,
    pub roles: Vec<CandidateItem>,
    pub actions: Vec<CandidateItem>,
    pub artifacts: CandidateArtifacts,
    pub state_machine: StateMachineCandidate,
    pub rules: Vec<CandidateItem>,
    pub relations: Vec<CandidateRelation>,
    pub field_suggestions: Vec<FieldSuggestion>,
}

impl Default for WorkingCopy {
    fn default() -> Self {
        Self {
            primary_business_object: CandidateItem::placeholder(),
            business_objects: Vec::new(),
            roles: Vec::new(),
            actions: Vec::new(),
            artifacts: CandidateArtifacts::default(),
            state_machine: StateMachineCandidate::default(),
            rules: Vec::new(),
            relations: Vec::new(),
            field_suggestions: Vec::new(),
        }
    }
}
