//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{
        AppendResponse, CheckDigitRequest, CheckDigitResponse, DecryptFieldRequest,
        DecryptFieldResponse, EncryptFieldRequest, EncryptFieldResponse, ErrorResponse,
        HealthResponse, IndexedRecord, KeyExport, KeyExportRequest, RecordPage, RecordQuery,
        RecordSubmission, ValidateRequest, ValidateResponse,
    },
    VaultError,
};
use tracing::{info, warn};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::state::AppState;
use crate::checksum;
use crate::crypto::{self, keyfile};
use crate::ledger::{CustomAttributes, IdentityRecord};

/// `GET /health` — liveness check with the current record count.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        records: state.ledger.len().await,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /identifiers/validate` — run the checksum over a raw identifier.
pub async fn validate_identifier(ApiJson(req): ApiJson<ValidateRequest>) -> Response {
    let body = ValidateResponse {
        valid: checksum::is_valid(&req.identifier),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /identifiers/check-digit` — compute the twelfth digit.
pub async fn check_digit(ApiJson(req): ApiJson<CheckDigitRequest>) -> Response {
    match checksum::check_digit(&req.partial) {
        Some(digit) => (StatusCode::OK, Json(CheckDigitResponse { digit })).into_response(),
        None => error_response(VaultError::ValidationFailure(
            "partial identifier must be exactly 11 digits".into(),
        )),
    }
}

/// `POST /fields/encrypt` — encrypt one text field under the caller's key.
pub async fn encrypt_field(ApiJson(req): ApiJson<EncryptFieldRequest>) -> Response {
    match crypto::encrypt_text(&req.plaintext, &req.key) {
        Ok(ciphertext) => {
            (StatusCode::OK, Json(EncryptFieldResponse { ciphertext })).into_response()
        }
        Err(e) => error_response(crypto::cipher_error(e)),
    }
}

/// `POST /fields/decrypt` — recover one text field.
///
/// A wrong key or malformed ciphertext is not an error: the response carries
/// `plaintext: null` so the caller can show the field as unavailable.
pub async fn decrypt_field(ApiJson(req): ApiJson<DecryptFieldRequest>) -> Response {
    let plaintext = crypto::decrypt_text(&req.ciphertext, &req.key);
    (StatusCode::OK, Json(DecryptFieldResponse { plaintext })).into_response()
}

/// `GET /records?q=&page=` — one page of the filtered ledger view.
///
/// Supplying `q` replaces the stored filter (and resets to page 1 unless
/// `page` is also given).
pub async fn list_records(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> Response {
    let snapshot = state.ledger.view(query.q, query.page).await;

    let items = match snapshot
        .items
        .iter()
        .map(|(index, rec)| {
            rec.to_wire().map(|record| IndexedRecord {
                index: *index,
                record,
            })
        })
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(items) => items,
        Err(e) => return error_response(e.into()),
    };

    let body = RecordPage {
        page: snapshot.page,
        total_pages: snapshot.total_pages,
        items,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /records` — validate, seal, and append a new record.
pub async fn create_record(
    State(state): State<AppState>,
    ApiJson(sub): ApiJson<RecordSubmission>,
) -> Response {
    let record = match record_from_submission(sub) {
        Ok(r) => r,
        Err(e) => return error_response(e),
    };
    let index = state.ledger.append(record).await;
    info!(index, "identity record created");
    (StatusCode::CREATED, Json(AppendResponse { index })).into_response()
}

/// `PUT /records/{index}` — replace the record at `index` in place.
pub async fn update_record(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<usize>,
    ApiJson(sub): ApiJson<RecordSubmission>,
) -> Response {
    let record = match record_from_submission(sub) {
        Ok(r) => r,
        Err(e) => return error_response(e),
    };
    match state.ledger.update_at(index, record).await {
        Ok(()) => {
            info!(index, "identity record updated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// `DELETE /records/{index}` — remove the record at `index`.
pub async fn delete_record(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<usize>,
) -> Response {
    match state.ledger.remove_at(index).await {
        Ok(_) => {
            info!(index, "identity record deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// `GET /export` — the whole ledger in export format.
pub async fn export_ledger(State(state): State<AppState>) -> Response {
    match state.ledger.export_all().await {
        Ok(text) => json_text(text),
        Err(e) => error_response(e.into()),
    }
}

/// `POST /import` — replace the whole ledger with an export document.
pub async fn import_ledger(State(state): State<AppState>, body: String) -> Response {
    match state.ledger.import_replace(&body).await {
        Ok(()) => {
            let records = state.ledger.len().await;
            info!(records, "ledger imported");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e.into()),
    }
}

/// `POST /keys/export` — wrap a session key in the key-export format.
pub async fn export_key(ApiJson(req): ApiJson<KeyExportRequest>) -> Response {
    match keyfile::export_key(&req.key) {
        Ok(text) => json_text(text),
        Err(e) => error_response(e),
    }
}

/// `POST /keys/import` — read a session key back from a key-export document.
pub async fn import_key(body: String) -> Response {
    match keyfile::import_key(&body) {
        Ok(encryption_key) => (StatusCode::OK, Json(KeyExport { encryption_key })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seal the submitted identifier and assemble a full replacement record.
///
/// Fails with `ValidationFailure` if the identifier is invalid or a required
/// text field is empty.
fn record_from_submission(sub: RecordSubmission) -> Result<IdentityRecord, VaultError> {
    let sealed = crypto::seal_identifier(&sub.national_id, &sub.key)?;
    let attrs = CustomAttributes::from_pairs(sub.custom.into_iter().map(|p| (p.key, p.value)));

    let mut record = IdentityRecord::new(sub.name, sub.email, sub.dob, sealed)?
        .with_attributes(attrs)
        .with_status(sub.status);
    if let Some(gender) = sub.gender {
        record = record.with_gender(gender);
    }
    if let Some(note) = sub.note {
        record = record.with_note(note);
    }
    if let Some(tx_hash) = sub.tx_hash {
        record = record.with_external_ref(tx_hash);
    }
    Ok(record)
}

fn json_text(text: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        text,
    )
        .into_response()
}

pub(super) fn error_response(err: VaultError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warn!(code = err.code(), "request failed");
    (status, Json(ErrorResponse::from(&err))).into_response()
}
