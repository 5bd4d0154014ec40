pub mod identifier;
pub mod setting;
