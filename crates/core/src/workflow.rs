//! Workflow wire types and payload shaping.
//!
//! [`WorkflowDraft`] is the loosely-structured object a UI form
//! produces. [`build_workflow_payload`] shapes it into the
//! [`WorkflowPayload`] the service accepts: approver ids are normalized
//! to a sequence, the approval threshold is suppressed outside
//! percentage-approval workflows, and the workflow plus every step are
//! marked active. [`Workflow`], [`ApprovalStep`], and [`Page`] mirror
//! the service's response DTOs.

use serde::{Deserialize, Serialize};

use crate::types::Id;

// ---------------------------------------------------------------------------
// Workflow type
// ---------------------------------------------------------------------------

/// Approval strategy of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowType {
    /// A single designated approver.
    SingleApprover,
    /// Multiple approvers acting in sequence.
    SequentialMultiLevel,
    /// Multiple approvers acting in parallel.
    ParallelMultiLevel,
    /// A percentage of a step's approvers must approve.
    PercentageApproval,
    /// Every approver of a step must approve.
    UnanimousApproval,
}

impl WorkflowType {
    /// Wire name of this type, as used in the by-type listing path.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::SingleApprover => "SINGLE_APPROVER",
            WorkflowType::SequentialMultiLevel => "SEQUENTIAL_MULTI_LEVEL",
            WorkflowType::ParallelMultiLevel => "PARALLEL_MULTI_LEVEL",
            WorkflowType::PercentageApproval => "PERCENTAGE_APPROVAL",
            WorkflowType::UnanimousApproval => "UNANIMOUS_APPROVAL",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft types (UI input)
// ---------------------------------------------------------------------------

/// Approver ids as a UI form supplies them: a bare id for
/// single-approver steps, an array otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApproverIds {
    /// A single approver id.
    One(Id),
    /// An ordered list of approver ids.
    Many(Vec<Id>),
}

impl ApproverIds {
    /// Normalize to an ordered sequence. A bare id becomes a
    /// one-element vec; a list passes through unchanged.
    pub fn into_vec(self) -> Vec<Id> {
        match self {
            ApproverIds::One(id) => vec![id],
            ApproverIds::Many(ids) => ids,
        }
    }
}

/// A workflow as assembled by UI code, prior to shaping.
///
/// Content is not validated here; the service owns validation and
/// rejects malformed definitions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDraft {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Approval strategy.
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    /// Ordered approval steps. Absent means no steps yet.
    pub steps: Option<Vec<StepDraft>>,
}

/// A single approval step as assembled by UI code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    /// Position within the workflow. Absent defaults to 0.
    pub step_order: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    /// Percentage of approvers required. Only meaningful on
    /// percentage-approval workflows; suppressed for every other type.
    pub approval_threshold: Option<i32>,
    /// One id or a list of ids.
    pub approver_ids: ApproverIds,
}

// ---------------------------------------------------------------------------
// Creation payload (wire)
// ---------------------------------------------------------------------------

/// JSON body for `POST /workflows`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    /// New workflows are always created active.
    pub active: bool,
    /// Always present; empty when the draft carried no steps.
    pub steps: Vec<StepPayload>,
}

/// One step within a creation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub step_order: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sent as an explicit `null` when suppressed, never omitted.
    pub approval_threshold: Option<i32>,
    /// Always a sequence, never a bare id.
    pub approver_ids: Vec<Id>,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Payload shaping
// ---------------------------------------------------------------------------

/// Shape a UI draft into the creation payload the service accepts.
///
/// - `name`, `description`, and the type are copied verbatim.
/// - Steps keep their original order; an absent step list becomes `[]`.
/// - The workflow and every step are marked active.
///
/// Per-step rules are documented on [`build_step_payload`].
pub fn build_workflow_payload(draft: WorkflowDraft) -> WorkflowPayload {
    let workflow_type = draft.workflow_type;
    let steps = draft
        .steps
        .unwrap_or_default()
        .into_iter()
        .map(|step| build_step_payload(workflow_type, step))
        .collect();

    WorkflowPayload {
        name: draft.name,
        description: draft.description,
        workflow_type,
        active: true,
        steps,
    }
}

/// Shape a single draft step.
///
/// - `step_order` defaults to 0 when absent.
/// - The approval threshold survives only when `workflow_type` is
///   [`WorkflowType::PercentageApproval`]; otherwise it is `None` and
///   serializes as an explicit `null`.
/// - Approver ids are normalized to a sequence.
pub fn build_step_payload(workflow_type: WorkflowType, step: StepDraft) -> StepPayload {
    let approval_threshold = if workflow_type == WorkflowType::PercentageApproval {
        step.approval_threshold
    } else {
        None
    };

    StepPayload {
        step_order: step.step_order.unwrap_or(0),
        name: step.name,
        description: step.description,
        approval_threshold,
        approver_ids: step.approver_ids.into_vec(),
        active: true,
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A workflow as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub steps: Vec<ApprovalStep>,
    pub active: bool,
    /// Audit fields, preformatted by the service.
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// An approval step as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStep {
    pub id: Id,
    pub step_order: i32,
    pub name: String,
    pub description: Option<String>,
    pub approval_threshold: Option<i32>,
    #[serde(default)]
    pub approver_ids: Vec<Id>,
    pub active: bool,
    /// Present on step-scoped responses.
    pub workflow_id: Option<Id>,
    pub workflow_name: Option<String>,
}

/// One page of a paged listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_elements: i64,
    pub total_pages: i32,
    pub first: bool,
    pub last: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn step(approver_ids: ApproverIds) -> StepDraft {
        StepDraft {
            step_order: Some(1),
            name: "S1".to_string(),
            description: None,
            approval_threshold: Some(50),
            approver_ids,
        }
    }

    fn draft(workflow_type: WorkflowType, steps: Option<Vec<StepDraft>>) -> WorkflowDraft {
        WorkflowDraft {
            name: "Budget".to_string(),
            description: Some("d".to_string()),
            workflow_type,
            steps,
        }
    }

    // -- Approver normalization --

    #[test]
    fn single_approver_id_is_wrapped_in_sequence() {
        let payload = build_workflow_payload(draft(
            WorkflowType::PercentageApproval,
            Some(vec![step(ApproverIds::One(7))]),
        ));
        assert_eq!(payload.steps[0].approver_ids, vec![7]);
    }

    #[test]
    fn approver_id_sequence_passes_through_unchanged() {
        let payload = build_workflow_payload(draft(
            WorkflowType::PercentageApproval,
            Some(vec![step(ApproverIds::Many(vec![3, 1, 2]))]),
        ));
        assert_eq!(payload.steps[0].approver_ids, vec![3, 1, 2]);
    }

    // -- Threshold gating --

    #[test]
    fn threshold_kept_for_percentage_approval() {
        let payload = build_workflow_payload(draft(
            WorkflowType::PercentageApproval,
            Some(vec![step(ApproverIds::One(7))]),
        ));
        assert_eq!(payload.steps[0].approval_threshold, Some(50));
    }

    #[test]
    fn threshold_suppressed_for_other_types() {
        for workflow_type in [
            WorkflowType::SingleApprover,
            WorkflowType::SequentialMultiLevel,
            WorkflowType::ParallelMultiLevel,
            WorkflowType::UnanimousApproval,
        ] {
            let payload =
                build_workflow_payload(draft(workflow_type, Some(vec![step(ApproverIds::One(7))])));
            assert_eq!(
                payload.steps[0].approval_threshold, None,
                "threshold should be suppressed for {workflow_type:?}"
            );
        }
    }

    // -- Step order defaulting --

    #[test]
    fn absent_step_order_defaults_to_zero() {
        let mut s = step(ApproverIds::One(7));
        s.step_order = None;
        let payload =
            build_workflow_payload(draft(WorkflowType::UnanimousApproval, Some(vec![s])));
        assert_eq!(payload.steps[0].step_order, 0);
    }

    #[test]
    fn explicit_zero_step_order_stays_zero() {
        let mut s = step(ApproverIds::One(7));
        s.step_order = Some(0);
        let payload =
            build_workflow_payload(draft(WorkflowType::UnanimousApproval, Some(vec![s])));
        assert_eq!(payload.steps[0].step_order, 0);
    }

    #[test]
    fn explicit_step_order_is_kept() {
        let payload = build_workflow_payload(draft(
            WorkflowType::UnanimousApproval,
            Some(vec![step(ApproverIds::One(7))]),
        ));
        assert_eq!(payload.steps[0].step_order, 1);
    }

    // -- Active flags and step list --

    #[test]
    fn workflow_and_steps_are_always_active() {
        let payload = build_workflow_payload(draft(
            WorkflowType::SingleApprover,
            Some(vec![step(ApproverIds::One(7)), step(ApproverIds::One(8))]),
        ));
        assert!(payload.active);
        assert!(payload.steps.iter().all(|s| s.active));
    }

    #[test]
    fn absent_steps_become_empty_sequence() {
        let payload = build_workflow_payload(draft(WorkflowType::SingleApprover, None));
        assert!(payload.steps.is_empty());
    }

    #[test]
    fn step_order_is_preserved() {
        let mut first = step(ApproverIds::One(1));
        first.name = "first".to_string();
        let mut second = step(ApproverIds::One(2));
        second.name = "second".to_string();

        let payload = build_workflow_payload(draft(
            WorkflowType::SequentialMultiLevel,
            Some(vec![first, second]),
        ));
        assert_eq!(payload.steps[0].name, "first");
        assert_eq!(payload.steps[1].name, "second");
    }

    // -- Wire shape --

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = build_workflow_payload(draft(
            WorkflowType::PercentageApproval,
            Some(vec![step(ApproverIds::One(7))]),
        ));
        let json = serde_json::to_value(&payload).expect("payload serializes");

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Budget",
                "description": "d",
                "type": "PERCENTAGE_APPROVAL",
                "active": true,
                "steps": [{
                    "stepOrder": 1,
                    "name": "S1",
                    "approvalThreshold": 50,
                    "approverIds": [7],
                    "active": true,
                }],
            })
        );
    }

    #[test]
    fn suppressed_threshold_serializes_as_explicit_null() {
        let payload = build_workflow_payload(draft(
            WorkflowType::UnanimousApproval,
            Some(vec![step(ApproverIds::One(7))]),
        ));
        let json = serde_json::to_value(&payload).expect("payload serializes");

        let step_json = &json["steps"][0];
        assert!(step_json["approvalThreshold"].is_null());
        assert!(
            step_json.as_object().unwrap().contains_key("approvalThreshold"),
            "approvalThreshold must be present with a null value, not omitted"
        );
    }

    #[test]
    fn absent_descriptions_are_omitted() {
        let mut d = draft(WorkflowType::SingleApprover, Some(vec![step(ApproverIds::One(7))]));
        d.description = None;
        let json = serde_json::to_value(build_workflow_payload(d)).expect("payload serializes");

        assert!(!json.as_object().unwrap().contains_key("description"));
        assert!(!json["steps"][0]
            .as_object()
            .unwrap()
            .contains_key("description"));
    }

    // -- Draft deserialization --

    #[test]
    fn draft_accepts_bare_approver_id() {
        let draft: WorkflowDraft = serde_json::from_value(serde_json::json!({
            "name": "Budget",
            "type": "PERCENTAGE_APPROVAL",
            "steps": [{"name": "S1", "approverIds": 7}],
        }))
        .expect("draft deserializes");

        let steps = draft.steps.expect("steps present");
        assert!(matches!(steps[0].approver_ids, ApproverIds::One(7)));
    }

    #[test]
    fn draft_accepts_approver_id_array() {
        let draft: WorkflowDraft = serde_json::from_value(serde_json::json!({
            "name": "Budget",
            "type": "UNANIMOUS_APPROVAL",
            "steps": [{"name": "S1", "approverIds": [7, 8]}],
        }))
        .expect("draft deserializes");

        let steps = draft.steps.expect("steps present");
        assert!(matches!(&steps[0].approver_ids, ApproverIds::Many(ids) if *ids == vec![7, 8]));
    }

    // -- Response deserialization --

    #[test]
    fn workflow_response_deserializes() {
        let workflow: Workflow = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Budget",
            "description": "d",
            "type": "PERCENTAGE_APPROVAL",
            "active": true,
            "steps": [{
                "id": 1,
                "stepOrder": 1,
                "name": "S1",
                "approvalThreshold": 50,
                "approverIds": [7],
                "active": true,
            }],
            "createdBy": "admin",
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .expect("workflow deserializes");

        assert_eq!(workflow.id, 42);
        assert_eq!(workflow.workflow_type, WorkflowType::PercentageApproval);
        assert_eq!(workflow.steps.len(), 1);
        assert_eq!(workflow.steps[0].approver_ids, vec![7]);
        assert_eq!(workflow.created_by.as_deref(), Some("admin"));
        assert_eq!(workflow.updated_by, None);
    }

    #[test]
    fn page_response_deserializes() {
        let page: Page<Workflow> = serde_json::from_value(serde_json::json!({
            "content": [{
                "id": 1,
                "name": "Budget",
                "type": "SINGLE_APPROVER",
                "active": true,
            }],
            "pageNumber": 0,
            "pageSize": 20,
            "totalElements": 1,
            "totalPages": 1,
            "first": true,
            "last": true,
        }))
        .expect("page deserializes");

        assert_eq!(page.content.len(), 1);
        assert!(page.first && page.last);
        assert_eq!(page.total_elements, 1);
    }

    #[test]
    fn workflow_type_wire_names_round_trip() {
        for (workflow_type, name) in [
            (WorkflowType::SingleApprover, "SINGLE_APPROVER"),
            (WorkflowType::SequentialMultiLevel, "SEQUENTIAL_MULTI_LEVEL"),
            (WorkflowType::ParallelMultiLevel, "PARALLEL_MULTI_LEVEL"),
            (WorkflowType::PercentageApproval, "PERCENTAGE_APPROVAL"),
            (WorkflowType::UnanimousApproval, "UNANIMOUS_APPROVAL"),
        ] {
            assert_eq!(workflow_type.as_str(), name);
            assert_eq!(
                serde_json::to_value(workflow_type).unwrap(),
                serde_json::Value::String(name.to_string())
            );
            let parsed: WorkflowType =
                serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap();
            assert_eq!(parsed, workflow_type);
        }
    }
}
