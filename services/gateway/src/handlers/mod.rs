pub mod tokens;
pub mod ws;
