pub mod app;
pub mod commit_panel;
pub mod controls_panel;
pub mod knob;
