// Domain layer - Pure models and transformations, no I/O
pub mod chart;
pub mod dashboard;
pub mod membership;
pub mod navigation;
