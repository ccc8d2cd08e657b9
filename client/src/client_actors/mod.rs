pub mod location;
pub mod map_view;
pub mod registration_view;
pub mod ui_handler;
