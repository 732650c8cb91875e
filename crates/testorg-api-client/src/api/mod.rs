//! Request and response shapes of the TestOrg API, with one client per resource

pub mod resources;

pub use resources::*;
