pub mod ai_service;
pub mod booking_service;
pub mod car_service;
pub mod dashboard_service;
pub mod storage;
pub mod vision;
