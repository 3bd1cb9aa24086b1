pub mod grammar;
pub mod path;
