mod qoyod_client;

pub use qoyod_client::QoyodClient;
