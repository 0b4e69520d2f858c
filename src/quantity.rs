#[macro_use]
mod macros;

pub mod discharge;
pub mod flow;
pub mod height;
pub mod time;
