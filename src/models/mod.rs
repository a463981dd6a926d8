pub mod activity;
pub mod classifier_config;
pub mod location;
pub mod session;

pub use activity::*;
pub use classifier_config::*;
pub use location::*;
pub use session::*;
