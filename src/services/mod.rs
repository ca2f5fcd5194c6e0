pub mod returns_service;
pub mod distribution_service;
pub mod chart_service;
pub mod analysis_service;
