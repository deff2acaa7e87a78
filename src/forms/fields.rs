//! Field catalog for the lead intake form: names, labels and input kinds,
//! plus the per-branch field order a frontend renders.

use serde::Serialize;

use crate::models::lead::{Choice, ServiceType, SupportLevel, Technology, UpdateFrequency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    Name,
    Email,
    PhoneNumber,
    ServiceType,
    ProjectName,
    ProjectDescription,
    Technology,
    TargetAudience,
    CoreFeatures,
    ReferenceLinks,
    LaunchDate,
    WebsiteUrl,
    CurrentIssues,
    MaintenanceScope,
    FrequencyOfUpdates,
    SupportLevel,
    MaintenanceBudget,
}

const COMMON_FIELDS: &[LeadField] = &[
    LeadField::Name,
    LeadField::Email,
    LeadField::PhoneNumber,
    LeadField::ServiceType,
];

const NEW_PROJECT_FIELDS: &[LeadField] = &[
    LeadField::ProjectName,
    LeadField::ProjectDescription,
    LeadField::Technology,
    LeadField::TargetAudience,
    LeadField::CoreFeatures,
    LeadField::ReferenceLinks,
    LeadField::LaunchDate,
];

const MAINTENANCE_FIELDS: &[LeadField] = &[
    LeadField::WebsiteUrl,
    LeadField::CurrentIssues,
    LeadField::MaintenanceScope,
    LeadField::FrequencyOfUpdates,
    LeadField::SupportLevel,
    LeadField::MaintenanceBudget,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Url,
    Textarea,
    Select,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

fn options<C: Choice>() -> Vec<SelectOption> {
    C::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.as_str(),
            label: c.label(),
        })
        .collect()
}

impl LeadField {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::PhoneNumber => "phone_number",
            LeadField::ServiceType => "service_type",
            LeadField::ProjectName => "project_name",
            LeadField::ProjectDescription => "project_description",
            LeadField::Technology => "technology",
            LeadField::TargetAudience => "target_audience",
            LeadField::CoreFeatures => "core_features",
            LeadField::ReferenceLinks => "reference_links",
            LeadField::LaunchDate => "launch_date",
            LeadField::WebsiteUrl => "website_url",
            LeadField::CurrentIssues => "current_issues",
            LeadField::MaintenanceScope => "maintenance_scope",
            LeadField::FrequencyOfUpdates => "frequency_of_updates",
            LeadField::SupportLevel => "support_level",
            LeadField::MaintenanceBudget => "maintenance_budget",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadField::Name => "Full Name",
            LeadField::Email => "Email",
            LeadField::PhoneNumber => "Phone Number",
            LeadField::ServiceType => "Service Type",
            LeadField::ProjectName => "Project Name",
            LeadField::ProjectDescription => "Project Description",
            LeadField::Technology => "Technology",
            LeadField::TargetAudience => "Target Audience",
            LeadField::CoreFeatures => "Core Features",
            LeadField::ReferenceLinks => "Reference Websites/Links",
            LeadField::LaunchDate => "Launch Date",
            LeadField::WebsiteUrl => "Website URL",
            LeadField::CurrentIssues => "Current Issues",
            LeadField::MaintenanceScope => "Scope of Maintenance",
            LeadField::FrequencyOfUpdates => "Frequency of Updates",
            LeadField::SupportLevel => "Preferred Support Level",
            LeadField::MaintenanceBudget => "Estimated Monthly Budget",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            LeadField::Name => "Enter full name",
            LeadField::Email => "Enter email address",
            LeadField::PhoneNumber => "Enter phone number",
            LeadField::ServiceType => "Select service type",
            LeadField::ProjectName => "Enter project name",
            LeadField::ProjectDescription => "Describe the project",
            LeadField::Technology => "Select technology",
            LeadField::TargetAudience => "Describe the target audience",
            LeadField::CoreFeatures => "List required core features",
            LeadField::ReferenceLinks => "Provide reference websites or links",
            LeadField::LaunchDate => "Pick a date",
            LeadField::WebsiteUrl => "Enter website URL",
            LeadField::CurrentIssues => "Describe any current issues",
            LeadField::MaintenanceScope => "E.g., Bug Fixes, Security Updates",
            LeadField::FrequencyOfUpdates => "Select frequency",
            LeadField::SupportLevel => "Select support level",
            LeadField::MaintenanceBudget => "Enter budget range",
        }
    }

    fn kind(self) -> InputKind {
        match self {
            LeadField::Email => InputKind::Email,
            LeadField::PhoneNumber => InputKind::Tel,
            LeadField::WebsiteUrl => InputKind::Url,
            LeadField::LaunchDate => InputKind::Date,
            LeadField::ServiceType
            | LeadField::Technology
            | LeadField::FrequencyOfUpdates
            | LeadField::SupportLevel => InputKind::Select,
            LeadField::ProjectDescription
            | LeadField::TargetAudience
            | LeadField::CoreFeatures
            | LeadField::ReferenceLinks
            | LeadField::CurrentIssues => InputKind::Textarea,
            _ => InputKind::Text,
        }
    }

    fn required(self) -> bool {
        matches!(
            self,
            LeadField::Name
                | LeadField::Email
                | LeadField::PhoneNumber
                | LeadField::ServiceType
                | LeadField::ProjectName
        )
    }

    pub fn descriptor(self) -> FieldDescriptor {
        let options = match self {
            LeadField::ServiceType => options::<ServiceType>(),
            LeadField::Technology => options::<Technology>(),
            LeadField::FrequencyOfUpdates => options::<UpdateFrequency>(),
            LeadField::SupportLevel => options::<SupportLevel>(),
            _ => Vec::new(),
        };

        FieldDescriptor {
            name: self.as_str(),
            label: self.label(),
            placeholder: self.placeholder(),
            kind: self.kind(),
            required: self.required(),
            options,
        }
    }
}

/// Fields shown for a branch: the common block followed by the branch block.
pub fn fields_for(branch: ServiceType) -> Vec<LeadField> {
    let branch_fields = match branch {
        ServiceType::NewProject => NEW_PROJECT_FIELDS,
        ServiceType::Maintenance => MAINTENANCE_FIELDS,
    };
    COMMON_FIELDS.iter().chain(branch_fields).copied().collect()
}
