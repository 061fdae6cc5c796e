use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{storage::ObjectStorage, vision::VisionProvider};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub storage: Arc<dyn ObjectStorage>,
    pub vision: Arc<dyn VisionProvider>,
}
