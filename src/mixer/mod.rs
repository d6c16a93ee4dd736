pub mod catalog;
pub mod persistence;
pub mod presets;
pub mod state;
pub mod timer;
