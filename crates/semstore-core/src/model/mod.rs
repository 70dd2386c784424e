pub mod candidate;
pub mod snapshot;
pub mod version;

pub use candidate::{
    CandidateArtifacts, CandidateConstraints, CandidateItem, CandidateRelation, CandidateSet,
    CandidateStatus, FieldSuggestion, RecognitionRun, StateMachineCandidate, StateNode,
    StateTransition, WorkingCopy,
};
pub use snapshot::{
    BoType, BusinessObjectSnapshot, Cardinality, FieldSemanticSnapshot, FieldSnapshot,
    PrivacyLevel, RelationSnapshot, RelationType, SemanticSnapshot,
};
pub use version::{SemanticVersion, VersionNumber, VersionStats, VersionStatus};
