mod bonus_controller;

pub use bonus_controller::configure;
