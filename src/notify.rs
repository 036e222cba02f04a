//! Operator notification for new training plans
//!
//! Every accepted questionnaire is rendered into an HTML summary and sent to
//! the operator inbox through the Resend email API. Without an API key the
//! plan is written to the log instead, which is what local development uses.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use html_escape::encode_text;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::info;

use crate::config::EmailConfig;
use crate::models::CalculatedTrainingPlan;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const RESEND_API_URL: &str = "https://api.resend.com";

/// Mexico City has stayed on UTC-6 year-round since 2022
const CDMX_UTC_OFFSET_HOURS: i64 = -6;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Email API error: {0}")]
  Api(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
  async fn send_plan(&self, plan: &CalculatedTrainingPlan) -> Result<(), NotifyError>;
}

/// ---------------------------------------------------------------------------
/// Email Rendering
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEmail {
  pub subject: String,
  pub html: String,
}

pub fn plan_subject(plan: &CalculatedTrainingPlan) -> String {
  format!("🏔️ Nuevo Registro: {} - {}", plan.user_name, plan.target_hike_name)
}

fn weekday_es(weekday: Weekday) -> &'static str {
  match weekday {
    Weekday::Mon => "lunes",
    Weekday::Tue => "martes",
    Weekday::Wed => "miércoles",
    Weekday::Thu => "jueves",
    Weekday::Fri => "viernes",
    Weekday::Sat => "sábado",
    Weekday::Sun => "domingo",
  }
}

const MONTHS_ES: [&str; 12] = [
  "enero",
  "febrero",
  "marzo",
  "abril",
  "mayo",
  "junio",
  "julio",
  "agosto",
  "septiembre",
  "octubre",
  "noviembre",
  "diciembre",
];

/// Long Spanish date, e.g. "sábado, 24 de octubre de 2026"
pub fn format_date_es(date: NaiveDate) -> String {
  format!(
    "{}, {} de {} de {}",
    weekday_es(date.weekday()),
    date.day(),
    MONTHS_ES[date.month0() as usize],
    date.year()
  )
}

fn info_item(label: &str, value: &str) -> String {
  format!(
    r#"<div class="info-item"><div class="info-label">{}</div><div class="info-value">{}</div></div>"#,
    label, value
  )
}

fn list_items(items: &[String]) -> String {
  items
    .iter()
    .map(|item| format!("<li>{}</li>", encode_text(item)))
    .collect()
}

const EMAIL_STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #1a1a1a; background-color: #f5f5f5; margin: 0; padding: 20px; }
    .container { max-width: 600px; margin: 0 auto; background: white; border-radius: 12px; overflow: hidden; }
    .header { background: linear-gradient(135deg, #0a1929 0%, #102a43 100%); color: white; padding: 30px; text-align: center; }
    .content { padding: 30px; }
    .section { margin-bottom: 25px; padding-bottom: 25px; border-bottom: 1px solid #eee; }
    .section-title { font-size: 14px; font-weight: 600; color: #14532d; text-transform: uppercase; margin-bottom: 15px; }
    .info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
    .info-item { background: #f8f9fa; padding: 12px; border-radius: 8px; }
    .info-label { font-size: 12px; color: #666; }
    .info-value { font-size: 16px; font-weight: 600; }
    .highlight-box { background: #f0fdf4; border: 1px solid #86efac; border-radius: 8px; padding: 20px; margin: 20px 0; }
    .phase-item { display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #eee; }
    .tag { background: #e5e7eb; padding: 4px 12px; border-radius: 20px; font-size: 12px; margin-right: 8px; }
    .footer { background: #f8f9fa; padding: 20px 30px; text-align: center; font-size: 12px; color: #666; }
"#;

/// Render the operator email. `generated_at` only feeds the footer timestamp.
pub fn render_plan_email(plan: &CalculatedTrainingPlan, generated_at: DateTime<Utc>) -> PlanEmail {
  let name = encode_text(&plan.user_name);
  let email = encode_text(&plan.user_email);
  let pace = encode_text(&plan.comfortable_pace);
  let hike_name = encode_text(&plan.target_hike_name);

  let mut html = String::new();
  let _ = write!(
    html,
    r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Nuevo Registro - Plan de Entrenamiento</title>
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>🏔️ Mountain Goats CDMX</h1>
      <p>Nuevo Registro de Entrenamiento</p>
    </div>
    <div class="content">
"#,
    style = EMAIL_STYLE
  );

  let _ = write!(
    html,
    r#"      <div class="section">
        <div class="section-title">👤 Información del Usuario</div>
        <div class="info-grid">{}{}{}{}</div>
      </div>
"#,
    info_item("Nombre", &name),
    info_item("Email", &email),
    info_item("Edad", &format!("{} años", plan.user_age)),
    info_item("Nivel de Condición", plan.fitness_level.label_es()),
  );

  let _ = write!(
    html,
    r#"      <div class="section">
        <div class="section-title">🏃 Condición Física Actual</div>
        <div class="info-grid">{}{}{}{}</div>
      </div>
"#,
    info_item("Max Distancia Corriendo", &format!("{} km", plan.max_running_distance_km)),
    info_item("Ritmo Cómodo", &format!("{} min/km", pace)),
    info_item("Hikes (últimos 3 meses)", &plan.hikes_last_3_months.to_string()),
    info_item("Entren. Fuerza/Semana", &format!("{} días", plan.strength_frequency)),
  );

  let _ = write!(
    html,
    r#"      <div class="section">
        <div class="section-title">🎯 Hike Meta</div>
        <div class="highlight-box"><h3>{}</h3><p>{}</p></div>
        <div class="info-grid">{}{}{}{}</div>
      </div>
"#,
    hike_name,
    plan.target_hike_level.description_es(),
    info_item("Distancia", &format!("{} km", plan.target_hike_distance_km)),
    info_item("Desnivel", &format!("{} m", plan.target_hike_elevation_m)),
    info_item("Fecha del Hike", &format_date_es(plan.target_hike_date)),
    info_item("Semanas Disponibles", &format!("{} semanas", plan.weeks_until_hike)),
  );

  let phases: String = plan
    .phases
    .ordered()
    .iter()
    .map(|(phase, range)| {
      format!(
        r#"<div class="phase-item"><span class="phase-name">{}</span><span class="phase-weeks">Semanas {}-{}</span></div>"#,
        phase.label(),
        range.start_week,
        range.end_week
      )
    })
    .collect();

  let _ = write!(
    html,
    r#"      <div class="section">
        <div class="section-title">📅 Plan de Entrenamiento Calculado</div>
        <div class="info-grid">{}{}{}{}</div>
        <div class="phase-list">{}</div>
      </div>
"#,
    info_item("Inicio del Entrenamiento", &format_date_es(plan.training_start_date)),
    info_item("Semanas Recomendadas", &format!("{} semanas", plan.recommended_training_weeks)),
    info_item("Primer Herd Run", &format_date_es(plan.first_herd_run_date)),
    info_item("Duración por Sesión", plan.session_duration.label_es()),
    phases,
  );

  let days: String = plan
    .available_days
    .iter()
    .map(|day| format!(r#"<span class="tag">{}</span>"#, day.label_es()))
    .collect();

  let local_time = generated_at.naive_utc() + Duration::hours(CDMX_UTC_OFFSET_HOURS);

  let _ = write!(
    html,
    r#"      <div class="section">
        <div class="section-title">📆 Días Preferidos</div>
        <div class="tags">{}</div>
      </div>
      <div class="section">
        <div class="section-title">💡 Recomendaciones Personalizadas</div>
        <ul class="recommendations">{}</ul>
      </div>
      <div class="section">
        <div class="section-title">🔄 Notas de Recuperación</div>
        <ul class="recommendations">{}</ul>
      </div>
    </div>
    <div class="footer">
      <p>Este email fue generado automáticamente por el sistema de Mountain Goats CDMX</p>
      <p>{} (hora de la Ciudad de México)</p>
    </div>
  </div>
</body>
</html>
"#,
    days,
    list_items(&plan.recommendations),
    list_items(&plan.recovery_notes),
    local_time.format("%d/%m/%Y %H:%M"),
  );

  PlanEmail {
    subject: plan_subject(plan),
    html,
  }
}

/// ---------------------------------------------------------------------------
/// Resend Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
  from: &'a str,
  to: Vec<&'a str>,
  subject: &'a str,
  html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
  id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
  message: String,
}

pub struct ResendNotifier {
  client: Client,
  api_base: String,
  api_key: String,
  from: String,
  to: String,
}

impl ResendNotifier {
  pub fn new(config: &EmailConfig, to: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_base: RESEND_API_URL.to_string(),
      api_key: config.api_key.clone(),
      from: config.from.clone(),
      to: to.into(),
    }
  }

  /// Point the client at a different API host (used against mock servers)
  pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
    self.api_base = api_base.into();
    self
  }

  /// Send one email, returning the provider's message id
  pub async fn send(&self, email: &PlanEmail) -> Result<String, NotifyError> {
    let request = SendEmailRequest {
      from: &self.from,
      to: vec![self.to.as_str()],
      subject: &email.subject,
      html: &email.html,
    };

    let response = self
      .client
      .post(format!("{}/emails", self.api_base.trim_end_matches('/')))
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      if let Ok(error_resp) = serde_json::from_str::<ResendErrorResponse>(&body) {
        return Err(NotifyError::Api(error_resp.message));
      }
      return Err(NotifyError::Api(format!("HTTP {}: {}", status, body)));
    }

    let sent: SendEmailResponse =
      serde_json::from_str(&body).map_err(|e| NotifyError::Api(format!("Unexpected response: {}", e)))?;
    Ok(sent.id)
  }
}

#[async_trait]
impl Notifier for ResendNotifier {
  async fn send_plan(&self, plan: &CalculatedTrainingPlan) -> Result<(), NotifyError> {
    let email = render_plan_email(plan, Utc::now());
    info!(to = %self.to, subject = %email.subject, "Sending training plan email");

    let id = self.send(&email).await?;
    info!(email_id = %id, "Training plan email sent");
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Log-only Notifier
/// ---------------------------------------------------------------------------

/// Stand-in when no email API key is configured
pub struct LogNotifier {
  to: String,
}

impl LogNotifier {
  pub fn new(to: impl Into<String>) -> Self {
    Self { to: to.into() }
  }
}

#[async_trait]
impl Notifier for LogNotifier {
  async fn send_plan(&self, plan: &CalculatedTrainingPlan) -> Result<(), NotifyError> {
    let summary = serde_json::to_string_pretty(plan).unwrap_or_default();
    info!(
      to = %self.to,
      subject = %plan_subject(plan),
      "Training plan summary:\n{}",
      summary
    );
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
