use crate::model::{
    CandidateArtifacts, CandidateItem, CandidateSet, CandidateStatus, RecognitionRun, WorkingCopy,
};

/// Holds one recognition run's candidates and the working copy derived from them
///
/// The working copy is recomputed after every status change, so
/// [`working_copy`](Self::working_copy) is always current.
#[derive(Debug, Clone)]
pub struct CandidateReducer {
    run: RecognitionRun,
    working_copy: WorkingCopy,
}

impl CandidateReducer {
    pub fn new(run: RecognitionRun) -> Self {
        let working_copy = derive_working_copy(&run.candidates);
        Self { run, working_copy }
    }

    pub fn run(&self) -> &RecognitionRun {
        &self.run
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.run.candidates
    }

    pub fn working_copy(&self) -> &WorkingCopy {
        &self.working_copy
    }

    /// Mark a candidate accepted; returns whether the id was found
    pub fn accept(&mut self, id: &str) -> bool {
        self.set_status(id, CandidateStatus::Accepted)
    }

    /// Mark a candidate rejected; returns whether the id was found
    pub fn reject(&mut self, id: &str) -> bool {
        self.set_status(id, CandidateStatus::Rejected)
    }

    /// Record that the user edited a candidate before deciding on it
    pub fn mark_edited(&mut self, id: &str) -> bool {
        self.set_status(id, CandidateStatus::Edited)
    }

    fn set_status(&mut self, id: &str, status: CandidateStatus) -> bool {
        match find_item_mut(&mut self.run.candidates, id) {
            Some(item) => {
                item.status = status;
                self.working_copy = derive_working_copy(&self.run.candidates);
                true
            }
            None => {
                tracing::debug!(candidate_id = id, ?status, "unknown candidate id ignored");
                false
            }
        }
    }
}

/// Locate a decidable candidate by id
///
/// Searched in order: primary object, related objects, roles, actions,
/// materials, data checks. Rules are not individually decidable.
fn find_item_mut<'a>(set: &'a mut CandidateSet, id: &str) -> Option<&'a mut CandidateItem> {
    set.primary_business_object
        .iter_mut()
        .chain(set.related_business_objects.iter_mut())
        .chain(set.roles.iter_mut())
        .chain(set.actions.iter_mut())
        .chain(set.artifacts.materials.iter_mut())
        .chain(set.artifacts.data_checks.iter_mut())
        .find(|item| item.id == id)
}

fn accepted(items: &[CandidateItem]) -> Vec<CandidateItem> {
    items.iter().filter(|i| i.is_accepted()).cloned().collect()
}

/// Derive the working copy from a candidate set
///
/// Business objects, roles, actions, materials, data checks and rules are
/// filtered to accepted items; the primary object is kept only if accepted
/// (else an empty placeholder). Relations, field suggestions and the state
/// machine are copied through unfiltered.
pub fn derive_working_copy(set: &CandidateSet) -> WorkingCopy {
    WorkingCopy {
        primary_business_object: set
            .primary_business_object
            .as_ref()
            .filter(|p| p.is_accepted())
            .cloned()
            .unwrap_or_else(CandidateItem::placeholder),
        business_objects: accepted(&set.related_business_objects),
        roles: accepted(&set.roles),
        actions: accepted(&set.actions),
        artifacts: CandidateArtifacts {
            materials: accepted(&set.artifacts.materials),
            data_checks: accepted(&set.artifacts.data_checks),
        },
        state_machine: set.state_machine.clone(),
        rules: accepted(&set.constraints.rules),
        relations: set.relations.clone(),
        field_suggestions: set.field_suggestions.clone(),
    }
}
