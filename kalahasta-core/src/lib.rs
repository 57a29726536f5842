pub mod identity;
pub mod repository;
pub mod user;

pub use identity::{FixedOtp, IdentityError, IdentityStore, OtpGenerator, OtpReceipt, PasswordChange, RandomOtp};
pub use repository::{KeyedStore, StoreError};
pub use user::{IdentityProvider, NewUser, ProfileUpdate, Session, User};
