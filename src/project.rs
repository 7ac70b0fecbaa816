pub mod model;
pub mod persist;
pub mod placement;
pub mod state;
