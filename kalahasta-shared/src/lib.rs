pub mod keys;
pub mod pii;

pub use pii::Masked;
