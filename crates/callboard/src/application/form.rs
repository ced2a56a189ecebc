//! Call Submission Form
//!
//! Holds the input state of the "new call" form and runs the submit flow:
//! validate locally, send the creation request, report the outcome.

use crate::domain::{validate, ApiError, Call, CreateCallRequest, SubmitError, Workflow};
use crate::ports::CallsApi;

const SUBMIT_LABEL: &str = "Start Call";
const SUBMITTING_LABEL: &str = "Submitting...";

/// Form state for creating a call
#[derive(Debug, Clone, Default)]
pub struct CallForm {
    pub customer_name: String,
    pub phone_number: String,
    pub workflow: Workflow,
    loading: bool,
    error: Option<String>,
}

impl CallForm {
    /// Empty form with the default workflow
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The submit control is disabled while a request is outstanding
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Inline error from the last attempt, if it failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// First half of a submission: guard, validate, and mark as loading.
    ///
    /// On success the returned request must be passed to
    /// [`CallForm::finish_submit`] together with the backend result.
    pub fn begin_submit(&mut self) -> Result<CreateCallRequest, SubmitError> {
        if self.loading {
            return Err(SubmitError::InFlight);
        }

        if let Err(e) = validate(&self.customer_name, &self.phone_number) {
            tracing::debug!(error = %e, "Call form rejected locally");
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        self.loading = true;
        self.error = None;

        // Sent as entered; trimming only applies to validation.
        Ok(CreateCallRequest {
            customer_name: self.customer_name.clone(),
            phone_number: self.phone_number.clone(),
            workflow: self.workflow,
        })
    }

    /// Second half of a submission: apply the backend result.
    ///
    /// On success the name and phone are cleared (workflow is kept) and
    /// `on_created` runs before loading ends.
    pub fn finish_submit<F>(
        &mut self,
        result: Result<Call, ApiError>,
        on_created: F,
    ) -> Result<Call, SubmitError>
    where
        F: FnOnce(),
    {
        let outcome = match result {
            Ok(call) => {
                self.customer_name.clear();
                self.phone_number.clear();
                on_created();
                Ok(call)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create call");
                let err = SubmitError::Request(e);
                self.error = Some(err.user_message());
                Err(err)
            }
        };
        self.loading = false;
        outcome
    }

    /// Validate and submit the form. No retries on failure.
    pub async fn submit<F>(&mut self, api: &dyn CallsApi, on_created: F) -> Result<Call, SubmitError>
    where
        F: FnOnce(),
    {
        let request = self.begin_submit()?;
        let result = api.create_call(&request).await;
        self.finish_submit(result, on_created)
    }
}
