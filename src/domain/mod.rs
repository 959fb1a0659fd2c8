pub mod baker;
pub mod cancel;
pub mod catalog;
pub mod disruption;
pub mod held;
pub mod ingredient;
pub mod monitor;
pub mod pool;
pub mod resource;
pub mod simulation;
