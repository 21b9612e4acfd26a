pub mod check;
pub mod cli;
pub mod decode;
pub mod error;
pub mod show;
pub mod utils;
