pub mod anchor;
pub mod controller;
pub mod viewport;
