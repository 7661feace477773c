use axum::{
    Extension,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    assembler::{MeetFile, MeetFileExporter},
    errors::AppError,
    models::{Meet, RelayTeam, Swimmer},
};

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn attachment(file: MeetFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.suggested_file_name),
            ),
        ],
        file.content,
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/meets/{id}/export",
    tag = "exports",
    params(("id" = String, Path, description = "Meet id")),
    responses(
        (status = 200, description = "Meet entries file", content_type = "text/plain"),
        (status = 404, description = "Meet not found")
    )
)]
/// Download the entries file for a stored meet.
pub async fn export_meet_file(
    Extension(exporter): Extension<MeetFileExporter>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let file = exporter.export_meet(&id).await?.ok_or(AppError::NotFound)?;
    Ok(attachment(file))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub file_name: String,
    pub meets: usize,
    pub teams: usize,
    pub individual_entries: usize,
    pub relay_entries: usize,
    pub relay_legs: usize,
    pub swimmers: usize,
}

impl From<&MeetFile> for ExportSummary {
    fn from(file: &MeetFile) -> Self {
        let c = &file.counts;
        ExportSummary {
            file_name: file.suggested_file_name.clone(),
            meets: c.meets,
            teams: c.teams,
            individual_entries: c.d_records,
            relay_entries: c.e_records,
            relay_legs: c.f_records,
            swimmers: c.swimmers,
        }
    }
}

#[utoipa::path(
    get,
    path = "/meets/{id}/export/summary",
    tag = "exports",
    params(("id" = String, Path, description = "Meet id")),
    responses(
        (status = 200, description = "Record counts of the meet file", body = ExportSummary),
        (status = 404, description = "Meet not found")
    )
)]
/// Preview what the entries file for a meet would contain.
pub async fn export_summary(
    Extension(exporter): Extension<MeetFileExporter>,
    Path(id): Path<String>,
) -> Result<Json<ExportSummary>, AppError> {
    let file = exporter.export_meet(&id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(ExportSummary::from(&file)))
}

/// An export over caller-supplied entrants.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub meet: Option<Meet>,
    #[serde(default)]
    pub swimmers: Vec<Swimmer>,
    #[serde(default)]
    pub relay_teams: Vec<RelayTeam>,
}

#[utoipa::path(
    post,
    path = "/exports",
    tag = "exports",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Meet entries file", content_type = "text/plain"),
        (status = 400, description = "No meet selected")
    )
)]
/// Build an entries file from a caller-supplied meet and entrants.
pub async fn create_export(
    Extension(exporter): Extension<MeetFileExporter>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let file = exporter
        .generate_meet_file(req.meet.as_ref(), &req.swimmers, &req.relay_teams)
        .await?;
    Ok(attachment(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn test_export_request_schema() {
        assert_eq!(ExportRequest::name(), "ExportRequest");
        let schema = serde_json::to_value(ExportRequest::schema()).unwrap();
        assert!(schema["properties"]["meet"].is_object());
        assert!(schema["properties"]["relayTeams"].is_object());
    }
}
