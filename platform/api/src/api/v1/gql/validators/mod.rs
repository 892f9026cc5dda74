mod contact;
mod password;

pub use contact::{EmailValidator, FullNameValidator, PhoneValidator};
pub use password::PasswordValidator;
