pub mod chat_service;
pub mod model_selector;
