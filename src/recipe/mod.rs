pub mod book;
pub mod rule;

pub use book::*;
pub use rule::*;
