use chrono::NaiveDate;
use serde::Serialize;

/// A fixed set of string tags offered by a select input.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    fn tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    NewProject,
    Maintenance,
}

impl Choice for ServiceType {
    const ALL: &'static [Self] = &[ServiceType::NewProject, ServiceType::Maintenance];

    fn as_str(self) -> &'static str {
        match self {
            ServiceType::NewProject => "new_project",
            ServiceType::Maintenance => "maintenance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ServiceType::NewProject => "New Project",
            ServiceType::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Wordpress,
    React,
    Nextjs,
    Android,
    Ios,
    Shopify,
}

impl Choice for Technology {
    const ALL: &'static [Self] = &[
        Technology::Wordpress,
        Technology::React,
        Technology::Nextjs,
        Technology::Android,
        Technology::Ios,
        Technology::Shopify,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Technology::Wordpress => "wordpress",
            Technology::React => "react",
            Technology::Nextjs => "nextjs",
            Technology::Android => "android",
            Technology::Ios => "ios",
            Technology::Shopify => "shopify",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Technology::Wordpress => "WordPress",
            Technology::React => "React",
            Technology::Nextjs => "Next.js",
            Technology::Android => "Android",
            Technology::Ios => "iOS",
            Technology::Shopify => "Shopify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateFrequency {
    Weekly,
    Monthly,
    AsNeeded,
}

impl Choice for UpdateFrequency {
    const ALL: &'static [Self] = &[
        UpdateFrequency::Weekly,
        UpdateFrequency::Monthly,
        UpdateFrequency::AsNeeded,
    ];

    fn as_str(self) -> &'static str {
        match self {
            UpdateFrequency::Weekly => "weekly",
            UpdateFrequency::Monthly => "monthly",
            UpdateFrequency::AsNeeded => "as_needed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            UpdateFrequency::Weekly => "Weekly",
            UpdateFrequency::Monthly => "Monthly",
            UpdateFrequency::AsNeeded => "As Needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    OnCall,
    Scheduled,
    Emergency,
}

impl Choice for SupportLevel {
    const ALL: &'static [Self] = &[
        SupportLevel::OnCall,
        SupportLevel::Scheduled,
        SupportLevel::Emergency,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SupportLevel::OnCall => "on_call",
            SupportLevel::Scheduled => "scheduled",
            SupportLevel::Emergency => "emergency",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SupportLevel::OnCall => "On-call Support",
            SupportLevel::Scheduled => "Scheduled Updates",
            SupportLevel::Emergency => "Emergency Only",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProjectRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<Technology>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub core_features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_links: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_issues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_of_updates: Option<UpdateFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_level: Option<SupportLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_budget: Option<String>,
}

/// A validated lead. The variant is the service type, so a payload only
/// ever carries the fields of its own branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "service_type", rename_all = "snake_case")]
pub enum LeadSubmission {
    NewProject(NewProjectRequest),
    Maintenance(MaintenanceRequest),
}

impl LeadSubmission {
    pub fn service_type(&self) -> ServiceType {
        match self {
            LeadSubmission::NewProject(_) => ServiceType::NewProject,
            LeadSubmission::Maintenance(_) => ServiceType::Maintenance,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            LeadSubmission::NewProject(req) => &req.contact,
            LeadSubmission::Maintenance(req) => &req.contact,
        }
    }
}
