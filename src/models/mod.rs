pub mod clock;
pub mod crypto;
