pub mod errors;
pub mod display;
pub mod logging;
