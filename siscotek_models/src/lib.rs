pub mod contact;
mod macros;
pub mod theme;
