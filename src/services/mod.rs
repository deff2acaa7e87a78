pub mod lead_sink;
pub mod postgres_lead_sink;
pub mod webhook_lead_sink;
