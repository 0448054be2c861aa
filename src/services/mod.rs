pub mod ai_service;
pub mod exam_service;
pub mod export_service;
pub mod extraction_service;
pub mod prompt;
