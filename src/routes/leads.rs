use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::forms::fields::{FieldDescriptor, LeadField};
use crate::forms::lead_form::{LeadForm, LeadFormValues, SubmitError};
use crate::models::lead::{Choice, ServiceType};
use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::validation::enum_message;

const INVALID_LEAD: &str = "Please correct the highlighted fields.";

#[derive(Deserialize)]
pub struct FieldsQuery {
    pub service_type: Option<String>,
}

/// Field set a frontend should render for the selected service type.
pub async fn handle_lead_fields(Query(query): Query<FieldsQuery>) -> Response {
    let mut form = LeadForm::new();
    if let Some(tag) = query.service_type.as_deref() {
        if ServiceType::parse(tag).is_none() {
            return JsonResponse::bad_request(&enum_message(&ServiceType::tags(), tag)).into_response();
        }
        form.set_field(LeadField::ServiceType, tag);
    }

    let fields: Vec<FieldDescriptor> = form
        .visible_fields()
        .into_iter()
        .map(LeadField::descriptor)
        .collect();

    Json(json!({
        "success": true,
        "service_type": form.branch(),
        "fields": fields,
        "defaults": form.values()
    }))
    .into_response()
}

fn unreadable_body(rejection: JsonRejection) -> Response {
    JsonResponse::error(rejection.status(), &rejection.body_text()).into_response()
}

pub async fn handle_validate_lead(payload: Result<Json<LeadFormValues>, JsonRejection>) -> Response {
    let Json(values) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return unreadable_body(rejection),
    };
    match LeadForm::from(values).validate() {
        Ok(lead) => Json(json!({ "success": true, "lead": lead })).into_response(),
        Err(errors) => {
            JsonResponse::invalid_fields(StatusCode::UNPROCESSABLE_ENTITY, INVALID_LEAD, errors)
                .into_response()
        }
    }
}

pub async fn handle_submit_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadFormValues>, JsonRejection>,
) -> Response {
    let Json(values) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return unreadable_body(rejection),
    };
    let form = LeadForm::from(values);

    match form.submit(state.leads.as_ref()).await {
        Ok(lead) => {
            info!(service_type = lead.service_type().as_str(), "lead received");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "lead": lead })),
            )
                .into_response()
        }
        Err(SubmitError::Invalid(errors)) => {
            JsonResponse::invalid_fields(StatusCode::UNPROCESSABLE_ENTITY, INVALID_LEAD, errors)
                .into_response()
        }
        Err(SubmitError::Sink(e)) => {
            error!("Failed to deliver lead: {}", e);
            JsonResponse::bad_gateway("We could not record your request. Please try again.")
                .into_response()
        }
    }
}
