pub mod bonus;
pub mod health;
pub mod qoyod;
