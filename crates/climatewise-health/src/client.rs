//! Health-advisor API client.

use parking_lot::Mutex;
use tracing::instrument;

use climatewise_api::{ApiTransport, Envelope, Paginated, QueryBuilder};

use crate::error::HealthError;
use crate::types::{HealthForm, HealthResultSummary};

pub struct HealthClient {
    transport: ApiTransport,
    /// Echo of the last successful submission, for synchronous re-read
    /// by the result screen.
    last_submitted: Mutex<Option<HealthForm>>,
}

impl HealthClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            last_submitted: Mutex::new(None),
        }
    }

    /// Submits the form. The backend echoes the persisted form back;
    /// the echo becomes `last_submitted_form`.
    #[instrument(skip(self, form), level = "info")]
    pub async fn submit(&self, form: &HealthForm) -> Result<HealthForm, HealthError> {
        let body = self
            .transport
            .post("health-advisor/store", &form.to_json())
            .await?;
        let env = Envelope::parse(body)?.check()?;
        let echoed = env
            .field("data")
            .and_then(|value| HealthForm::from_json(value).ok())
            // a success without a decodable echo keeps the local copy
            .unwrap_or_else(|| form.clone());
        *self.last_submitted.lock() = Some(echoed.clone());
        Ok(echoed)
    }

    /// The echo of the most recent successful submission.
    pub fn last_submitted_form(&self) -> Option<HealthForm> {
        self.last_submitted.lock().clone()
    }

    /// Prior submissions, newest first, paginated.
    #[instrument(skip(self), level = "info")]
    pub async fn submissions(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<HealthResultSummary>, HealthError> {
        let path = QueryBuilder::new("health-advisor/index")
            .param("page", page)
            .param("per_page", per_page)
            .build();
        let body = self.transport.get(&path).await?;
        let env = Envelope::parse(body)?.check()?;
        let items = env
            .items("data")
            .iter()
            .map(HealthResultSummary::from_value)
            .collect();
        Ok(Paginated {
            items,
            meta: env.meta(),
        })
    }

    /// Deletes one prior submission by id.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: &str) -> Result<(), HealthError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(HealthError::InvalidRequest("id must not be empty".into()));
        }
        let body = self
            .transport
            .delete(&format!("health-advisor/destroy/{id}"))
            .await?;
        Envelope::parse(body)?.check()?;
        Ok(())
    }
}
