//! HTTP request handlers for the Payroll Anomaly Detection Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashSet;
use std::io::Cursor;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::detection::run_detection;
use crate::loader::load_payroll_csv;
use crate::models::{DetectionReport, DetectionTotals, PayrollRecord, Period};

use super::request::{CsvDetectionParams, DetectionRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/detect", post(detect_handler))
        .route("/detect/csv", post(detect_csv_handler))
        .with_state(state)
}

/// Handler for the POST /detect endpoint.
///
/// Accepts a detection request with normalized records and returns the
/// detection report.
async fn detect_handler(
    State(state): State<AppState>,
    payload: Result<Json<DetectionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing detection request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let reference: Period = request.reference_period.into();
    let records: Vec<PayrollRecord> = request.records.into_iter().map(Into::into).collect();

    respond_with_report(&state, correlation_id, reference, &records)
}

/// Handler for the POST /detect/csv endpoint.
///
/// Accepts a raw payroll CSV export as the request body, with the reference
/// period in `year`/`month` query parameters, and returns the detection
/// report.
async fn detect_csv_handler(
    State(state): State<AppState>,
    params: Result<Query<CsvDetectionParams>, QueryRejection>,
    body: String,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV detection request");

    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection,
                "Query parameter error"
            );
            let error = ApiError::new(
                "VALIDATION_ERROR",
                format!("Invalid query parameters: {}", rejection),
            );
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let loaded = match load_payroll_csv(Cursor::new(body)) {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll CSV rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let reference = Period::new(params.year, params.month);
    respond_with_report(&state, correlation_id, reference, &loaded.records)
}

/// Runs detection and converts the result into an HTTP response.
fn respond_with_report(
    state: &AppState,
    correlation_id: Uuid,
    reference: Period,
    records: &[PayrollRecord],
) -> axum::response::Response {
    match perform_detection(records, reference, state) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                reference_period = %reference,
                employees = report.totals.employees_evaluated,
                records = report.totals.records_evaluated,
                unusual_income = report.totals.unusual_income_anomalies,
                discount_drift = report.totals.discount_drift_anomalies,
                duration_us = report.duration_us,
                "Detection completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Detection failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Runs the detection pass and wraps the outcome in a report envelope.
fn perform_detection(
    records: &[PayrollRecord],
    reference: Period,
    state: &AppState,
) -> Result<DetectionReport, crate::error::EngineError> {
    let start_time = Instant::now();

    let outcome = run_detection(records, reference, state.config().settings())?;

    let employees: HashSet<&str> = records.iter().map(|r| r.employee_id.as_str()).collect();
    let totals = DetectionTotals {
        employees_evaluated: employees.len(),
        records_evaluated: records.len(),
        unusual_income_anomalies: outcome.unusual_income.len(),
        discount_drift_anomalies: outcome.discount_drift.len(),
        indeterminate_notices: outcome.indeterminate.len(),
    };

    Ok(DetectionReport {
        detection_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        reference_period: reference,
        totals,
        outcome,
        duration_us: start_time.elapsed().as_micros() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{PeriodRequest, RecordRequest};
    use crate::config::ConfigLoader;
    use crate::models::RubricType;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::default())
    }

    fn record_request(
        employee_id: &str,
        code: &str,
        rubric_type: RubricType,
        value: &str,
        month: u32,
    ) -> RecordRequest {
        RecordRequest {
            employee_id: employee_id.to_string(),
            rubric_code: code.to_string(),
            rubric_type,
            value: Decimal::from_str(value).unwrap(),
            year: 2024,
            month,
        }
    }

    fn create_valid_request() -> DetectionRequest {
        DetectionRequest {
            reference_period: PeriodRequest {
                year: 2024,
                month: 8,
            },
            records: vec![
                record_request("E1", "SALARIO", RubricType::Income, "4200.00", 7),
                record_request("E1", "SALARIO", RubricType::Income, "4200.00", 8),
                record_request("E1", "BONUS_ANUAL", RubricType::Income, "1500.00", 8),
            ],
        }
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let request = create_valid_request();
        let body = serde_json::to_string(&request).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Verify Content-Type header
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        // Verify response body is a valid DetectionReport
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: DetectionReport = serde_json::from_slice(&body).unwrap();

        assert_eq!(report.totals.employees_evaluated, 1);
        assert_eq!(report.outcome.unusual_income.len(), 1);
        assert!(
            report.outcome.unusual_income[0]
                .new_income_codes
                .contains("BONUS_ANUAL")
        );
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_reference_period_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{"records": []}"#;

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert!(
            error.message.contains("missing field")
                || error.message.to_lowercase().contains("reference_period"),
            "Expected error message to mention the missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_invalid_reference_month_returns_400() {
        let router = create_router(create_test_state());

        let mut request = create_valid_request();
        request.reference_period.month = 13;
        let body = serde_json::to_string(&request).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_csv_endpoint_runs_detection() {
        let router = create_router(create_test_state());

        let csv = "\
nome,matricula,cpf,sexo,cargo,cargo_nivel,dataadmissao,datarescisao,datanascimento,tipo_rubrica,codigo_rubrica,valor,ano_calculo,mes_calculo
Maria,E1,1,F,Analista,I,,,,RENDIMENTO,SALARIO,4200.00,2024,7
Maria,E1,1,F,Analista,I,,,,RENDIMENTO,SALARIO,4200.00,2024,8
Maria,E1,1,F,Analista,I,,,,RENDIMENTO,BONUS_ANUAL,1500.00,2024,8
";

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect/csv?year=2024&month=8")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: DetectionReport = serde_json::from_slice(&body).unwrap();

        assert_eq!(report.totals.records_evaluated, 3);
        assert_eq!(report.outcome.unusual_income.len(), 1);
    }

    #[tokio::test]
    async fn test_csv_endpoint_rejects_malformed_rows() {
        let router = create_router(create_test_state());

        let csv = "\
nome,matricula,cpf,sexo,cargo,cargo_nivel,dataadmissao,datarescisao,datanascimento,tipo_rubrica,codigo_rubrica,valor,ano_calculo,mes_calculo
Maria,E1,1,F,Analista,I,,,,RENDIMENTO,SALARIO,not_a_number,2024,8
";

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect/csv?year=2024&month=8")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_RECORD");
    }

    #[tokio::test]
    async fn test_csv_endpoint_missing_params_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/detect/csv")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(""))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
