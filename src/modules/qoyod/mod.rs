// Qoyod accounting API client module

pub mod services;

pub use services::QoyodClient;
