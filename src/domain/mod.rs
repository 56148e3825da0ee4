//! Domain types shared by the view pipeline and the dashboard controller.

pub mod lead;
pub mod stage;
pub mod types;
pub mod view;
