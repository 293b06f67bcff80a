//! REST API client for the workflow service HTTP endpoints.
//!
//! Wraps the `/workflows` surface (workflow CRUD, step management,
//! resource assignment, approval actions) using [`reqwest`].
//!
//! [`WorkflowsApi::create_workflow`] shapes the caller's draft via
//! [`build_workflow_payload`] before sending, logs the constructed
//! payload, and on failure logs the status and response body before
//! propagating the error value unchanged.

use stagegate_core::approval::ApprovalAction;
use stagegate_core::types::Id;
use stagegate_core::workflow::{
    build_step_payload, build_workflow_payload, ApprovalStep, Page, StepDraft, Workflow,
    WorkflowDraft, WorkflowType,
};

/// HTTP client for a single workflow service deployment.
pub struct WorkflowsApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the workflow REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Workflow service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A reject or request-changes decision was attempted without the
    /// reviewer comment the service requires. No request is issued.
    #[error("{} requires a reviewer comment", .0.path_segment())]
    MissingComment(ApprovalAction),
}

impl WorkflowsApi {
    /// Create a new API client for a workflow service deployment.
    ///
    /// * `base_url` - Base HTTP URL including the API prefix,
    ///   e.g. `http://host:8080/api/v1`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    ///
    /// The shared client carries connection pooling and any default
    /// headers -- this is where the bearer credential lives (see
    /// [`crate::auth::authenticated_client`]).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Base HTTP URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- workflow CRUD ----

    /// Create a workflow from a UI draft.
    ///
    /// The draft is shaped into the service's DTO (approver ids
    /// normalized to a sequence, the threshold suppressed outside
    /// percentage-approval workflows, everything marked active) and sent
    /// as `POST /workflows`. Failures are logged with their status and
    /// response body, then returned to the caller unchanged.
    pub async fn create_workflow(
        &self,
        draft: WorkflowDraft,
    ) -> Result<Workflow, WorkflowApiError> {
        let payload = build_workflow_payload(draft);

        tracing::debug!(payload = ?payload, "Creating workflow");

        let result = async {
            let response = self
                .client
                .post(format!("{}/workflows", self.base_url))
                .json(&payload)
                .send()
                .await?;
            Self::parse_response(response).await
        }
        .await;

        result.map_err(|e| {
            match &e {
                WorkflowApiError::Api { status, body } => {
                    tracing::error!(
                        status = *status,
                        body = %body,
                        message = %e,
                        "Workflow creation failed"
                    );
                }
                other => {
                    tracing::error!(message = %other, "Workflow creation failed");
                }
            }
            e
        })
    }

    /// Replace an existing workflow definition.
    ///
    /// The draft is shaped with the same rules as
    /// [`create_workflow`](Self::create_workflow) and sent as
    /// `PUT /workflows/{id}`.
    pub async fn update_workflow(
        &self,
        id: Id,
        draft: WorkflowDraft,
    ) -> Result<Workflow, WorkflowApiError> {
        let payload = build_workflow_payload(draft);

        let response = self
            .client
            .put(format!("{}/workflows/{id}", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Delete a workflow.
    pub async fn delete_workflow(&self, id: Id) -> Result<(), WorkflowApiError> {
        let response = self
            .client
            .delete(format!("{}/workflows/{id}", self.base_url))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Fetch a single workflow by id.
    pub async fn get_workflow(&self, id: Id) -> Result<Workflow, WorkflowApiError> {
        let response = self
            .client
            .get(format!("{}/workflows/{id}", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List workflows one page at a time.
    pub async fn list_workflows(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Workflow>, WorkflowApiError> {
        let response = self
            .client
            .get(format!("{}/workflows", self.base_url))
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List all workflows of one approval strategy.
    pub async fn workflows_by_type(
        &self,
        workflow_type: WorkflowType,
    ) -> Result<Vec<Workflow>, WorkflowApiError> {
        let response = self
            .client
            .get(format!(
                "{}/workflows/type/{}",
                self.base_url,
                workflow_type.as_str()
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- step management ----

    /// Append a step to a workflow.
    ///
    /// `workflow_type` is the parent workflow's strategy; it decides
    /// whether the step's approval threshold is kept or suppressed.
    pub async fn add_step(
        &self,
        workflow_id: Id,
        workflow_type: WorkflowType,
        step: StepDraft,
    ) -> Result<ApprovalStep, WorkflowApiError> {
        let payload = build_step_payload(workflow_type, step);

        let response = self
            .client
            .post(format!("{}/workflows/{workflow_id}/steps", self.base_url))
            .json(&payload)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Replace a single step of a workflow.
    pub async fn update_step(
        &self,
        workflow_id: Id,
        step_id: Id,
        workflow_type: WorkflowType,
        step: StepDraft,
    ) -> Result<ApprovalStep, WorkflowApiError> {
        let payload = build_step_payload(workflow_type, step);

        let response = self
            .client
            .put(format!(
                "{}/workflows/{workflow_id}/steps/{step_id}",
                self.base_url
            ))
            .json(&payload)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Remove a step from a workflow.
    pub async fn delete_step(
        &self,
        workflow_id: Id,
        step_id: Id,
    ) -> Result<(), WorkflowApiError> {
        let response = self
            .client
            .delete(format!(
                "{}/workflows/{workflow_id}/steps/{step_id}",
                self.base_url
            ))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Reorder the steps of a workflow.
    ///
    /// `step_ids` is the complete step id list in its new order.
    pub async fn reorder_steps(
        &self,
        workflow_id: Id,
        step_ids: &[Id],
    ) -> Result<(), WorkflowApiError> {
        let response = self
            .client
            .put(format!(
                "{}/workflows/{workflow_id}/steps/reorder",
                self.base_url
            ))
            .json(&step_ids)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- resource assignment ----

    /// Attach a workflow to a resource so that access requests for the
    /// resource run through it.
    pub async fn assign_workflow(
        &self,
        resource_id: Id,
        workflow_id: Id,
    ) -> Result<(), WorkflowApiError> {
        let response = self
            .client
            .post(format!("{}/workflows/assign", self.base_url))
            .query(&[("resourceId", resource_id), ("workflowId", workflow_id)])
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Detach whatever workflow is assigned to a resource.
    pub async fn unassign_workflow(&self, resource_id: Id) -> Result<(), WorkflowApiError> {
        let response = self
            .client
            .delete(format!("{}/workflows/assign/{resource_id}", self.base_url))
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- approval actions ----

    /// Record a reviewer decision on a pending step execution.
    ///
    /// Reject and request-changes require a comment; when it is missing
    /// the call fails with [`WorkflowApiError::MissingComment`] without
    /// issuing a request.
    pub async fn record_approval_action(
        &self,
        execution_id: Id,
        action: ApprovalAction,
        comment: Option<&str>,
    ) -> Result<(), WorkflowApiError> {
        if action.requires_comment() && comment.is_none() {
            return Err(WorkflowApiError::MissingComment(action));
        }

        let mut request = self.client.post(format!(
            "{}/workflows/steps/{execution_id}/{}",
            self.base_url,
            action.path_segment()
        ));
        if let Some(comment) = comment {
            request = request.query(&[("comment", comment)]);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Approve a pending step execution, with an optional comment.
    pub async fn approve_step(
        &self,
        execution_id: Id,
        comment: Option<&str>,
    ) -> Result<(), WorkflowApiError> {
        self.record_approval_action(execution_id, ApprovalAction::Approve, comment)
            .await
    }

    /// Reject a pending step execution.
    pub async fn reject_step(
        &self,
        execution_id: Id,
        comment: &str,
    ) -> Result<(), WorkflowApiError> {
        self.record_approval_action(execution_id, ApprovalAction::Reject, Some(comment))
            .await
    }

    /// Send a pending step execution back to its submitter for changes.
    pub async fn request_changes(
        &self,
        execution_id: Id,
        comment: &str,
    ) -> Result<(), WorkflowApiError> {
        self.record_approval_action(execution_id, ApprovalAction::RequestChanges, Some(comment))
            .await
    }

    /// Whether the current user may act on a pending step execution.
    pub async fn can_approve(&self, execution_id: Id) -> Result<bool, WorkflowApiError> {
        let response = self
            .client
            .get(format!(
                "{}/workflows/steps/{execution_id}/can-approve",
                self.base_url
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`WorkflowApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WorkflowApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WorkflowApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WorkflowApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), WorkflowApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
