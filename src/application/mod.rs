// Application layer - Dashboard use cases and the collaborator traits they need
pub mod chart_renderer;
pub mod dashboard_component;
pub mod dashboard_service;
pub mod dashboard_source;
pub mod errors;
pub mod navigation_service;
