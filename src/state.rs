use crate::{
    domain::ContactEmail, email_client::EmailTransport, metrics::ContactMetrics,
    projects::ProjectCatalog,
};
use axum::extract::FromRef;
use derive_getters::Getters;
use duplicate::duplicate_item;
use std::sync::Arc;

/// Mailbox receiving every relayed contact submission.
#[derive(Debug, Clone)]
pub struct OwnerAddress(pub ContactEmail);

/// Process-wide, read-only after start-up apart from the metric counters.
#[derive(Debug, Clone, Getters)]
pub struct AppState {
    owner: Arc<OwnerAddress>,
    email_transport: Arc<dyn EmailTransport>,
    metrics: Arc<ContactMetrics>,
    projects: Arc<ProjectCatalog>,
}

impl AppState {
    pub fn create(
        owner: ContactEmail,
        email_transport: Arc<dyn EmailTransport>,
        metrics: ContactMetrics,
        projects: ProjectCatalog,
    ) -> Self {
        Self {
            owner: Arc::new(OwnerAddress(owner)),
            email_transport,
            metrics: Arc::new(metrics),
            projects: Arc::new(projects),
        }
    }
}

#[duplicate_item(
    service_type            field;
    [ OwnerAddress ]        [ owner ];
    [ dyn EmailTransport ]  [ email_transport ];
    [ ContactMetrics ]      [ metrics ];
    [ ProjectCatalog ]      [ projects ];
)]
impl FromRef<AppState> for Arc<service_type> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.field.clone()
    }
}
