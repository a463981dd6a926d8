pub mod accelerometer;
pub mod classifier;
pub mod location_filter;
pub mod pedometer;
pub mod route;
pub mod session_recorder;
pub mod session_store;
pub mod tracker;
