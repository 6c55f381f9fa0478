pub mod fragment;
pub mod symbol;

pub use fragment::*;
pub use symbol::*;
