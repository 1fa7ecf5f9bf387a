use crate::error::ReportError;
use crate::ingredient::{IngredientKey, NO_CHOICE};
use crate::session::Session;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where and under which field names session reports are submitted.
///
/// The defaults target the original Google Form sink; the `entry.*` ids are
/// the form's own field identifiers.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub endpoint: String,
    pub user_field: String,
    pub base_field: String,
    pub acidity_field: String,
    pub carbonation_field: String,
    pub flavor_field: String,
    pub garnish_field: String,
    pub ice_field: String,
    pub stars_field: String,
    pub name_field: String,
    pub recognized_field: String,
    pub confidence_field: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://docs.google.com/forms/d/e/1FAIpQLSd_CrHBSjGD64DgThdFicrvaNsEiAA4LIhGsyF2XI6vTzgv4A/formResponse".to_string(),
            user_field: "entry.2132530962".to_string(),
            base_field: "entry.1990997538".to_string(),
            acidity_field: "entry.16139639".to_string(),
            carbonation_field: "entry.2105822215".to_string(),
            flavor_field: "entry.1291148248".to_string(),
            garnish_field: "entry.1589469551".to_string(),
            ice_field: "entry.1876026105".to_string(),
            stars_field: "entry.1381809100".to_string(),
            name_field: "entry.5840647".to_string(),
            recognized_field: "entry.1131561254".to_string(),
            confidence_field: "entry.297429417".to_string(),
        }
    }
}

impl ReportConfig {
    /// The default field mapping pointed at a different endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    fn choice_field(&self, key: IngredientKey) -> &str {
        match key {
            IngredientKey::Base => &self.base_field,
            IngredientKey::Acidity => &self.acidity_field,
            IngredientKey::Carbonation => &self.carbonation_field,
            IngredientKey::Flavor => &self.flavor_field,
            IngredientKey::Garnish => &self.garnish_field,
            IngredientKey::Ice => &self.ice_field,
        }
    }
}

/// Flattens a session into the submitted field set.
///
/// Kept pure so the payload can be asserted on without a network: user id,
/// the six choices (or the `"none"` placeholder), the result's stars and
/// name, and the recognition label and two-decimal confidence percentage (or
/// `"none"` each while no recognition is attached).
pub fn form_fields(
    session: &Session,
    config: &ReportConfig,
) -> Result<Vec<(String, String)>, ReportError> {
    let user_id = session.user_id().ok_or(ReportError::MissingUserId)?;

    let mut fields = vec![(config.user_field.clone(), user_id.to_string())];
    for key in IngredientKey::ALL {
        fields.push((
            config.choice_field(key).to_string(),
            session.selection().choice(key).to_string(),
        ));
    }

    let (stars, name) = match session.evaluation() {
        Some(evaluation) => (
            evaluation.outcome.stars.to_string(),
            evaluation.outcome.name.clone(),
        ),
        None => (NO_CHOICE.to_string(), NO_CHOICE.to_string()),
    };
    fields.push((config.stars_field.clone(), stars));
    fields.push((config.name_field.clone(), name));

    let (recognized, confidence) = match session.recognition() {
        Some(recognition) => (recognition.label.clone(), recognition.confidence_percent()),
        None => (NO_CHOICE.to_string(), NO_CHOICE.to_string()),
    };
    fields.push((config.recognized_field.clone(), recognized));
    fields.push((config.confidence_field.clone(), confidence));

    Ok(fields)
}

/// Relays session data to the external collection sink.
///
/// Strictly fire-and-forget: submission runs on a spawned task, the response
/// body and status are never read, delivery failures are logged and
/// swallowed, and nothing is retried. A report in flight is never awaited by
/// a state transition. The sink has append-only semantics, so calling this
/// more than once per session (at serve, again after recognition) is
/// expected.
pub struct SessionReporter {
    http: Client,
    config: ReportConfig,
}

impl SessionReporter {
    /// Must be created and used within a tokio runtime.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Submits the current session state without blocking the caller.
    ///
    /// Returns the spawned submission task's handle, or `None` when the
    /// session is not reportable yet. No state transition ever awaits the
    /// handle; it exists so a driver that is about to shut its runtime down
    /// can give in-flight submissions a chance to finish. On a
    /// current-thread runtime the task only makes progress while the root
    /// future is at an await point, so a driver that never awaits would
    /// otherwise drop the submission unexecuted.
    pub fn report(&self, session: &Session) -> Option<JoinHandle<()>> {
        let fields = match form_fields(session, &self.config) {
            Ok(fields) => fields,
            Err(e) => {
                warn!(error = %e, "skipping session report");
                return None;
            }
        };
        let http = self.http.clone();
        let endpoint = self.config.endpoint.clone();
        Some(tokio::spawn(async move {
            match http.post(&endpoint).form(&fields).send().await {
                Ok(_) => debug!("session report submitted"),
                Err(e) => warn!(error = %e, "session report delivery failed"),
            }
        }))
    }
}
