// Utils compartidos

pub mod constants;
pub mod format;
pub mod validate;

pub use constants::*;
pub use format::*;
pub use validate::*;
