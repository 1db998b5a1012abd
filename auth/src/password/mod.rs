pub mod encoded;
pub mod errors;
pub mod hasher;

pub use encoded::PasswordHash;
pub use encoded::SaltLength;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
