//! CHD risk REST API server binary.
//!
//! ## Purpose
//! Serves the single-page prediction form at `/` and the inference endpoint
//! at `/predict`, with OpenAPI/Swagger documentation.
//!
//! The model artifact is loaded lazily on the first prediction and memoized
//! for the lifetime of the process. A load failure is reported to the caller
//! as `503` and never crashes the server; a later request retries the load.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use api_rest::page::FORM_PAGE;
use chd_core::{
    config::model_path_from_env_value, evaluate, format_percent, CoreConfig, ModelCell, RecordForm,
};
use chd_types::FamilyHistory;

/// Process-wide memoized model holder.
///
/// Initialized at most once; read-only and freely shared across concurrent
/// requests afterwards.
static MODEL: ModelCell = ModelCell::new();

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request
/// handlers, currently the startup-resolved core configuration.
#[derive(Clone)]
struct AppState {
    cfg: Arc<CoreConfig>,
}

/// Health check response.
#[derive(serde::Serialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

/// One prediction request: the six clinical form fields.
#[derive(serde::Deserialize, ToSchema)]
struct PredictReq {
    /// Systolic blood pressure, clamped into [80, 250].
    sbp: i64,
    /// LDL cholesterol.
    ldl: f64,
    /// Adiposity index.
    adiposity: f64,
    /// Family history of heart disease: "Present" or "Absent".
    famhist: String,
    /// Obesity index.
    obesity: f64,
    /// Age in years, clamped into [15, 100].
    age: i64,
}

/// One prediction outcome.
#[derive(serde::Serialize, ToSchema)]
struct PredictRes {
    /// "Elevated Risk" or "Low Risk".
    verdict: String,
    /// "high" or "normal".
    severity: String,
    /// Binary label: 0 no elevated risk, 1 elevated risk.
    label: u8,
    /// Estimated probability of the positive class, in [0, 1].
    probability: f64,
    /// The probability as a display percentage, e.g. "12.0%".
    probability_pct: String,
    /// Advisory message, present only for elevated risk.
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<String>,
}

/// User-visible error payload.
#[derive(serde::Serialize, ToSchema)]
struct ErrorRes {
    message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, predict),
    components(schemas(HealthRes, PredictReq, PredictRes, ErrorRes))
)]
struct ApiDoc;

/// Main entry point for the CHD risk REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000) and serves the embedded form page, the prediction
/// endpoint, and OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `CHD_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CHD_MODEL_PATH`: Model artifact path (default: "model/chd-model.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("chd_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CHD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting CHD risk REST API on {}", addr);

    let model_path = model_path_from_env_value(std::env::var("CHD_MODEL_PATH").ok());
    let cfg = Arc::new(CoreConfig::new(model_path)?);

    let state = AppState { cfg };

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The single-page prediction form.
#[axum::debug_handler]
async fn index() -> Html<&'static str> {
    Html(FORM_PAGE)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the CHD risk API service.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "CHD risk API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Prediction outcome", body = PredictRes),
        (status = 422, description = "Invalid input or prediction failure", body = ErrorRes),
        (status = 503, description = "Model artifact unavailable", body = ErrorRes)
    )
)]
/// Run one risk prediction
///
/// Assembles the clinical record from the submitted fields (clamping `sbp`
/// and `age` at their bounds), evaluates it against the memoized model, and
/// returns the verdict with its probability.
///
/// # Errors
/// Returns `503 Service Unavailable` when the model artifact cannot be
/// loaded, and `422 Unprocessable Entity` when the input is invalid or the
/// model fails on this record. Both carry a user-visible message.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictReq>,
) -> Result<Json<PredictRes>, (StatusCode, Json<ErrorRes>)> {
    let form = match build_form(&req) {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Invalid prediction input: {}", e);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            ));
        }
    };
    let record = form.collect();

    let model = match MODEL.get_or_load(state.cfg.model_path()) {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Model load error: {}", e);
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            ));
        }
    };

    match evaluate(&record, model.as_ref()) {
        Ok(result) => {
            let verdict = result.verdict();
            Ok(Json(PredictRes {
                verdict: verdict.as_str().to_string(),
                severity: verdict.severity().as_str().to_string(),
                label: result.label,
                probability: result.probability,
                probability_pct: format_percent(result.probability),
                advice: verdict.advice().map(str::to_string),
            }))
        }
        Err(e) => {
            tracing::error!("Prediction error: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            ))
        }
    }
}

// Helper function
fn build_form(req: &PredictReq) -> Result<RecordForm, chd_types::FieldError> {
    let famhist: FamilyHistory = req.famhist.parse()?;
    Ok(RecordForm {
        sbp: req.sbp,
        ldl: req.ldl,
        adiposity: req.adiposity,
        famhist,
        obesity: req.obesity,
        age: req.age,
    })
}
