pub mod input;
pub mod theme;
pub mod view;
