use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::forms::fields::{fields_for, LeadField};
use crate::models::lead::{
    Choice, ContactDetails, LeadSubmission, MaintenanceRequest, NewProjectRequest, ServiceType,
    SupportLevel, Technology, UpdateFrequency,
};
use crate::services::lead_sink::{LeadSink, SinkError};
use crate::utils::validation::{enum_message, is_email, is_url, min_chars, non_blank, FieldErrors};

/// Raw values of every field in both branches, exactly as entered.
/// `null` text reads as empty; `core_features` takes a list or
/// newline-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFormValues {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone_number: String,
    pub service_type: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub project_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub project_description: String,
    pub technology: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub target_audience: String,
    #[serde(deserialize_with = "feature_list")]
    pub core_features: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub reference_links: String,
    pub launch_date: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub website_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub current_issues: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub maintenance_scope: String,
    pub frequency_of_updates: Option<String>,
    pub support_level: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub maintenance_budget: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn feature_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<FieldValue>::deserialize(deserializer)?
        .map(FieldValue::into_list)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::List(items) => items.join("\n"),
        }
    }

    fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Text(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            FieldValue::List(items) => items,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("lead form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Lead intake form state. The branch selector decides which fields are
/// shown and validated; values typed into the other branch are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadForm {
    values: LeadFormValues,
    branch: ServiceType,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl From<LeadFormValues> for LeadForm {
    fn from(mut values: LeadFormValues) -> Self {
        for choice in [
            &mut values.service_type,
            &mut values.technology,
            &mut values.launch_date,
            &mut values.frequency_of_updates,
            &mut values.support_level,
        ] {
            *choice = choice.as_deref().and_then(non_blank);
        }
        let branch = values
            .service_type
            .as_deref()
            .and_then(ServiceType::parse)
            .unwrap_or_default();
        Self { values, branch }
    }
}

impl LeadForm {
    /// A blank form with the select inputs preset.
    pub fn new() -> Self {
        Self::from(LeadFormValues {
            service_type: Some(ServiceType::NewProject.as_str().to_string()),
            technology: Some(Technology::Wordpress.as_str().to_string()),
            frequency_of_updates: Some(UpdateFrequency::Weekly.as_str().to_string()),
            support_level: Some(SupportLevel::OnCall.as_str().to_string()),
            ..LeadFormValues::default()
        })
    }

    pub fn values(&self) -> &LeadFormValues {
        &self.values
    }

    pub fn branch(&self) -> ServiceType {
        self.branch
    }

    pub fn visible_fields(&self) -> Vec<LeadField> {
        fields_for(self.branch)
    }

    pub fn set_field(&mut self, field: LeadField, value: impl Into<FieldValue>) {
        let value = value.into();
        let v = &mut self.values;
        match field {
            LeadField::Name => v.name = value.into_text(),
            LeadField::Email => v.email = value.into_text(),
            LeadField::PhoneNumber => v.phone_number = value.into_text(),
            LeadField::ServiceType => {
                let tag = value.into_text();
                if let Some(branch) = ServiceType::parse(&tag) {
                    self.branch = branch;
                }
                v.service_type = Some(tag);
            }
            LeadField::ProjectName => v.project_name = value.into_text(),
            LeadField::ProjectDescription => v.project_description = value.into_text(),
            LeadField::Technology => v.technology = non_blank(&value.into_text()),
            LeadField::TargetAudience => v.target_audience = value.into_text(),
            LeadField::CoreFeatures => v.core_features = value.into_list(),
            LeadField::ReferenceLinks => v.reference_links = value.into_text(),
            LeadField::LaunchDate => v.launch_date = non_blank(&value.into_text()),
            LeadField::WebsiteUrl => v.website_url = value.into_text(),
            LeadField::CurrentIssues => v.current_issues = value.into_text(),
            LeadField::MaintenanceScope => v.maintenance_scope = value.into_text(),
            LeadField::FrequencyOfUpdates => v.frequency_of_updates = non_blank(&value.into_text()),
            LeadField::SupportLevel => v.support_level = non_blank(&value.into_text()),
            LeadField::MaintenanceBudget => v.maintenance_budget = value.into_text(),
        }
    }

    /// Validates against the local calendar date.
    pub fn validate(&self) -> Result<LeadSubmission, FieldErrors> {
        self.validate_on(Local::now().date_naive())
    }

    pub fn validate_on(&self, today: NaiveDate) -> Result<LeadSubmission, FieldErrors> {
        let v = &self.values;
        let mut errors = FieldErrors::new();

        errors.check(
            "name",
            min_chars(&v.name, 2, "Name must be at least 2 characters long."),
        );
        if !is_email(&v.email) {
            errors.push("email", "Invalid email address.");
        }
        errors.check(
            "phone_number",
            min_chars(&v.phone_number, 10, "Phone number must be at least 10 digits."),
        );

        let service_type = match v.service_type.as_deref() {
            None => {
                errors.push("service_type", "Select a service type.");
                None
            }
            Some(tag) => {
                let parsed = ServiceType::parse(tag);
                if parsed.is_none() {
                    errors.push("service_type", enum_message(&ServiceType::tags(), tag));
                }
                parsed
            }
        };

        let contact = ContactDetails {
            name: v.name.clone(),
            email: v.email.clone(),
            phone_number: v.phone_number.clone(),
        };

        match service_type {
            Some(ServiceType::NewProject) => {
                let request = self.new_project_request(contact, today, &mut errors);
                errors.into_result(|| LeadSubmission::NewProject(request))
            }
            Some(ServiceType::Maintenance) => {
                let request = self.maintenance_request(contact, &mut errors);
                errors.into_result(|| LeadSubmission::Maintenance(request))
            }
            None => Err(errors),
        }
    }

    /// Validates, then hands the typed lead to `sink`. The sink is not
    /// touched when any field is invalid.
    pub async fn submit(&self, sink: &dyn LeadSink) -> Result<LeadSubmission, SubmitError> {
        let submission = self.validate().map_err(SubmitError::Invalid)?;
        sink.deliver(&submission).await?;
        Ok(submission)
    }

    fn new_project_request(
        &self,
        contact: ContactDetails,
        today: NaiveDate,
        errors: &mut FieldErrors,
    ) -> NewProjectRequest {
        let v = &self.values;

        errors.check(
            "project_name",
            min_chars(&v.project_name, 2, "Project name must be at least 2 characters long."),
        );

        let launch_date = v.launch_date.as_deref().and_then(|raw| match parse_date(raw) {
            Some(date) if date < today => {
                errors.push("launch_date", "Launch date cannot be in the past.");
                None
            }
            Some(date) => Some(date),
            None => {
                errors.push("launch_date", "Invalid date");
                None
            }
        });

        NewProjectRequest {
            contact,
            project_name: v.project_name.clone(),
            project_description: non_blank(&v.project_description),
            technology: choice("technology", v.technology.as_deref(), errors),
            target_audience: non_blank(&v.target_audience),
            core_features: v
                .core_features
                .iter()
                .filter(|f| !f.trim().is_empty())
                .cloned()
                .collect(),
            reference_links: non_blank(&v.reference_links),
            launch_date,
        }
    }

    fn maintenance_request(
        &self,
        contact: ContactDetails,
        errors: &mut FieldErrors,
    ) -> MaintenanceRequest {
        let v = &self.values;

        let website_url = non_blank(&v.website_url);
        if let Some(url) = &website_url {
            if !is_url(url) {
                errors.push("website_url", "Invalid url");
            }
        }

        MaintenanceRequest {
            contact,
            website_url,
            current_issues: non_blank(&v.current_issues),
            maintenance_scope: non_blank(&v.maintenance_scope),
            frequency_of_updates: choice("frequency_of_updates", v.frequency_of_updates.as_deref(), errors),
            support_level: choice("support_level", v.support_level.as_deref(), errors),
            maintenance_budget: non_blank(&v.maintenance_budget),
        }
    }
}

fn choice<C: Choice>(field: &'static str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<C> {
    let raw = raw?;
    let parsed = C::parse(raw);
    if parsed.is_none() {
        errors.push(field, enum_message(&C::tags(), raw));
    }
    parsed
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lead_sink::MockLeadSink;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn filled_new_project() -> LeadForm {
        let mut form = LeadForm::new();
        form.set_field(LeadField::Name, "Jo");
        form.set_field(LeadField::Email, "a@b.com");
        form.set_field(LeadField::PhoneNumber, "1234567890");
        form.set_field(LeadField::ProjectName, "Si");
        form
    }

    #[test]
    fn new_form_starts_on_new_project_with_select_defaults() {
        let form = LeadForm::new();
        assert_eq!(form.branch(), ServiceType::NewProject);
        assert_eq!(form.values().service_type.as_deref(), Some("new_project"));
        assert_eq!(form.values().technology.as_deref(), Some("wordpress"));
        assert_eq!(form.values().frequency_of_updates.as_deref(), Some("weekly"));
        assert_eq!(form.values().support_level.as_deref(), Some("on_call"));
    }

    #[test]
    fn one_character_name_is_the_only_error() {
        let mut form = filled_new_project();
        form.set_field(LeadField::Name, "J");

        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.messages_for("name"),
            vec!["Name must be at least 2 characters long."]
        );
    }

    #[test]
    fn corrected_name_yields_typed_new_project_payload() {
        let form = filled_new_project();

        match form.validate_on(today()).unwrap() {
            LeadSubmission::NewProject(req) => {
                assert_eq!(req.contact.name, "Jo");
                assert_eq!(req.project_name, "Si");
                assert_eq!(req.technology, Some(Technology::Wordpress));
                assert_eq!(req.launch_date, None);
            }
            other => panic!("expected new project, got {:?}", other),
        }
    }

    #[test]
    fn bad_email_fails_even_when_everything_else_is_valid() {
        let mut form = filled_new_project();
        form.set_field(LeadField::Email, "not-an-email");

        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.messages_for("email"), vec!["Invalid email address."]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn maintenance_never_requires_project_name() {
        for project_name in ["", "x", "A proper name"] {
            let mut form = filled_new_project();
            form.set_field(LeadField::ProjectName, project_name);
            form.set_field(LeadField::ServiceType, "maintenance");

            let lead = form.validate_on(today()).unwrap();
            assert_eq!(lead.service_type(), ServiceType::Maintenance);
        }
    }

    #[test]
    fn new_project_requires_project_name() {
        let mut form = filled_new_project();
        form.set_field(LeadField::ProjectName, "");

        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.messages_for("project_name"),
            vec!["Project name must be at least 2 characters long."]
        );
    }

    #[test]
    fn past_launch_date_is_rejected_and_today_is_accepted() {
        let mut form = filled_new_project();
        form.set_field(LeadField::LaunchDate, "2026-10-17");
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.messages_for("launch_date"),
            vec!["Launch date cannot be in the past."]
        );

        form.set_field(LeadField::LaunchDate, "2026-10-18");
        assert!(form.validate_on(today()).is_ok());

        form.set_field(LeadField::LaunchDate, "2027-01-01T09:00:00Z");
        match form.validate_on(today()).unwrap() {
            LeadSubmission::NewProject(req) => {
                assert_eq!(req.launch_date, NaiveDate::from_ymd_opt(2027, 1, 1));
            }
            other => panic!("expected new project, got {:?}", other),
        }
    }

    #[test]
    fn past_launch_date_is_ignored_on_maintenance() {
        let mut form = filled_new_project();
        form.set_field(LeadField::LaunchDate, "2020-01-01");
        form.set_field(LeadField::ServiceType, "maintenance");

        let lead = form.validate_on(today()).unwrap();
        assert_eq!(lead.service_type(), ServiceType::Maintenance);
    }

    #[test]
    fn unparseable_launch_date_is_reported() {
        let mut form = filled_new_project();
        form.set_field(LeadField::LaunchDate, "next tuesday");
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.messages_for("launch_date"), vec!["Invalid date"]);
    }

    #[test]
    fn toggling_branch_keeps_off_branch_values() {
        let mut form = filled_new_project();
        form.set_field(LeadField::TargetAudience, "Small bakeries");
        form.set_field(LeadField::CoreFeatures, "Online orders\n\nLoyalty cards\n");

        form.set_field(LeadField::ServiceType, "maintenance");
        assert_eq!(form.branch(), ServiceType::Maintenance);
        assert!(!form.visible_fields().contains(&LeadField::ProjectName));

        form.set_field(LeadField::ServiceType, "new_project");
        assert_eq!(form.branch(), ServiceType::NewProject);
        assert_eq!(form.values().project_name, "Si");
        assert_eq!(form.values().target_audience, "Small bakeries");
        assert_eq!(
            form.values().core_features,
            vec!["Online orders".to_string(), "Loyalty cards".to_string()]
        );
    }

    #[test]
    fn maintenance_payload_drops_new_project_values() {
        let mut form = filled_new_project();
        form.set_field(LeadField::TargetAudience, "Small bakeries");
        form.set_field(LeadField::ServiceType, "maintenance");
        form.set_field(LeadField::WebsiteUrl, "https://bakery.example.com");

        let value = serde_json::to_value(form.validate_on(today()).unwrap()).unwrap();
        assert_eq!(value["service_type"], "maintenance");
        assert_eq!(value["website_url"], "https://bakery.example.com");
        assert!(value.get("project_name").is_none());
        assert!(value.get("target_audience").is_none());
    }

    #[test]
    fn off_branch_values_are_not_validated() {
        let mut form = filled_new_project();
        form.set_field(LeadField::WebsiteUrl, "definitely not a url");
        form.set_field(LeadField::SupportLevel, "sometimes");
        assert!(form.validate_on(today()).is_ok());

        form.set_field(LeadField::ServiceType, "maintenance");
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.messages_for("website_url"), vec!["Invalid url"]);
        assert_eq!(
            errors.messages_for("support_level"),
            vec!["Invalid enum value. Expected 'on_call' | 'scheduled' | 'emergency', received 'sometimes'"]
        );
    }

    #[test]
    fn unknown_service_type_keeps_branch_and_checks_common_fields_only() {
        let mut form = filled_new_project();
        form.set_field(LeadField::ProjectName, "");
        form.set_field(LeadField::ServiceType, "redesign");

        assert_eq!(form.branch(), ServiceType::NewProject);
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.messages_for("service_type"),
            vec!["Invalid enum value. Expected 'new_project' | 'maintenance', received 'redesign'"]
        );
        assert!(!errors.has("project_name"));
    }

    #[test]
    fn missing_service_type_asks_for_one() {
        let form = LeadForm::from(LeadFormValues {
            name: "Jo".into(),
            email: "a@b.com".into(),
            phone_number: "1234567890".into(),
            ..LeadFormValues::default()
        });
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.messages_for("service_type"), vec!["Select a service type."]);
    }

    #[test]
    fn invalid_technology_reports_enum_message() {
        let mut form = filled_new_project();
        form.set_field(LeadField::Technology, "flutter");
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.messages_for("technology"),
            vec!["Invalid enum value. Expected 'wordpress' | 'react' | 'nextjs' | 'android' | 'ios' | 'shopify', received 'flutter'"]
        );
    }

    #[test]
    fn phone_length_is_not_digit_checked() {
        let mut form = filled_new_project();
        form.set_field(LeadField::PhoneNumber, "+1 (555) 01");
        assert!(form.validate_on(today()).is_ok());

        form.set_field(LeadField::PhoneNumber, "555-0100");
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(
            errors.messages_for("phone_number"),
            vec!["Phone number must be at least 10 digits."]
        );
    }

    #[test]
    fn validating_twice_gives_the_same_result() {
        let form = filled_new_project();
        assert_eq!(form.validate_on(today()), form.validate_on(today()));

        let mut broken = form.clone();
        broken.set_field(LeadField::Name, "J");
        assert_eq!(broken.validate_on(today()), broken.validate_on(today()));
    }

    #[test]
    fn values_built_from_json_select_the_branch() {
        let values: LeadFormValues = serde_json::from_value(serde_json::json!({
            "name": "Jo",
            "email": "a@b.com",
            "phone_number": "1234567890",
            "service_type": "maintenance"
        }))
        .unwrap();
        let form = LeadForm::from(values);
        assert_eq!(form.branch(), ServiceType::Maintenance);
        assert!(form.validate_on(today()).is_ok());
    }

    #[test]
    fn blank_json_selects_read_as_absent() {
        let values: LeadFormValues = serde_json::from_value(serde_json::json!({
            "name": "Jo",
            "email": "a@b.com",
            "phone_number": "1234567890",
            "service_type": "new_project",
            "project_name": "Si",
            "technology": "",
            "launch_date": "  "
        }))
        .unwrap();
        let form = LeadForm::from(values);
        assert_eq!(form.values().technology, None);
        assert_eq!(form.values().launch_date, None);

        match form.validate_on(today()).unwrap() {
            LeadSubmission::NewProject(req) => {
                assert_eq!(req.technology, None);
                assert_eq!(req.launch_date, None);
            }
            other => panic!("expected new project, got {:?}", other),
        }
    }

    #[test]
    fn blank_service_type_asks_for_a_selection() {
        let values = LeadFormValues {
            service_type: Some(String::new()),
            ..filled_new_project().values().clone()
        };
        let errors = LeadForm::from(values).validate_on(today()).unwrap_err();
        assert_eq!(errors.messages_for("service_type"), vec!["Select a service type."]);
    }

    #[test]
    fn json_nulls_and_text_features_are_accepted() {
        let values: LeadFormValues = serde_json::from_value(serde_json::json!({
            "name": "Jo",
            "email": "a@b.com",
            "phone_number": "1234567890",
            "service_type": "new_project",
            "project_name": "Si",
            "project_description": null,
            "core_features": "Booking\n  \n Payments "
        }))
        .unwrap();
        assert_eq!(values.project_description, "");
        assert_eq!(values.core_features, vec!["Booking", "Payments"]);

        let values: LeadFormValues =
            serde_json::from_value(serde_json::json!({ "core_features": ["a", "b"] })).unwrap();
        assert_eq!(values.core_features, vec!["a", "b"]);

        let values: LeadFormValues =
            serde_json::from_value(serde_json::json!({ "core_features": null })).unwrap();
        assert!(values.core_features.is_empty());
    }

    #[tokio::test]
    async fn invalid_submit_never_reaches_the_sink() {
        let mut sink = MockLeadSink::new();
        sink.expect_deliver().times(0);

        let mut form = filled_new_project();
        form.set_field(LeadField::Name, "J");

        match form.submit(&sink).await {
            Err(SubmitError::Invalid(errors)) => assert!(errors.has("name")),
            other => panic!("expected invalid submit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn valid_submit_delivers_once() {
        let mut sink = MockLeadSink::new();
        sink.expect_deliver()
            .withf(|lead| lead.service_type() == ServiceType::NewProject && lead.contact().name == "Jo")
            .times(1)
            .returning(|_| Ok(()));

        let lead = filled_new_project().submit(&sink).await.unwrap();
        assert_eq!(lead.contact().email, "a@b.com");
    }

    #[tokio::test]
    async fn sink_failure_is_surfaced() {
        let mut sink = MockLeadSink::new();
        sink.expect_deliver().times(1).returning(|_| {
            Err(SinkError::Rejected {
                status: 503,
                body: "down".into(),
            })
        });

        let err = filled_new_project().submit(&sink).await.unwrap_err();
        assert!(matches!(err, SubmitError::Sink(SinkError::Rejected { status: 503, .. })));
    }
}
