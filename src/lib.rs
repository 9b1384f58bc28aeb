pub mod api_router;
pub mod config;
pub mod core;
pub mod crm;
pub mod embedded_ui;
pub mod insights;
pub mod llm;
pub mod main_module;
pub mod security;
pub mod ui;
