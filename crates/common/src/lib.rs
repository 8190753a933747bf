pub mod env;
pub mod utils;
