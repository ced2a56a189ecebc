//! Page Container
//!
//! Composes the form and the list around one refresh signal. A successful
//! submission bumps the signal, which makes the list refetch right away
//! instead of waiting for the next tick.

use std::sync::Arc;

use crate::application::{CallForm, CallListView, ListConfig, RefreshSignal};
use crate::domain::{Call, SubmitError};
use crate::ports::CallsApi;

/// The call manager page: submission form plus history list
pub struct CallPage {
    api: Arc<dyn CallsApi>,
    signal: RefreshSignal,
    form: CallForm,
    list: CallListView,
}

impl CallPage {
    /// Mount the page. The list starts polling immediately.
    pub fn mount(api: Arc<dyn CallsApi>, config: ListConfig) -> Self {
        let signal = RefreshSignal::new();
        let list = CallListView::mount(Arc::clone(&api), signal.subscribe(), config);
        Self {
            api,
            signal,
            form: CallForm::new(),
            list,
        }
    }

    pub fn form(&self) -> &CallForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CallForm {
        &mut self.form
    }

    pub fn list(&self) -> &CallListView {
        &self.list
    }

    pub fn refresh_signal(&self) -> &RefreshSignal {
        &self.signal
    }

    /// Submit the form; on success the refresh signal goes up by one
    pub async fn submit(&mut self) -> Result<Call, SubmitError> {
        let signal = self.signal.clone();
        self.form
            .submit(self.api.as_ref(), move || {
                signal.bump();
            })
            .await
    }

    /// Stop the list and drop the page state
    pub async fn unmount(self) {
        self.list.unmount().await;
    }
}
