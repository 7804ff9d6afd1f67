pub mod date_input;
pub mod filter_panel;
pub mod ui;
