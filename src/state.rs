use crate::db::user_repository::UserRepository;
use crate::services::lead_sink::LeadSink;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn UserRepository>,
    pub leads: Arc<dyn LeadSink>,
}
