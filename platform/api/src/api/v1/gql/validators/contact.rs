use std::str::FromStr;

use async_graphql::{CustomValidator, InputValueError};
use email_address::EmailAddress;

pub struct EmailValidator;

impl CustomValidator<String> for EmailValidator {
	fn check(&self, value: &String) -> Result<(), InputValueError<String>> {
		if value.len() > 255 {
			return Err(InputValueError::custom("Email must be at most 255 characters long"));
		}

		EmailAddress::from_str(value.trim()).map_err(|_| InputValueError::custom("Email is not valid"))?;

		Ok(())
	}
}

/// 7 to 20 characters of digits, spaces, `+` and `-`, with at least 7 digits.
pub struct PhoneValidator;

impl CustomValidator<String> for PhoneValidator {
	fn check(&self, value: &String) -> Result<(), InputValueError<String>> {
		let value = value.trim();

		if value.len() < 7 || value.len() > 20 {
			return Err(InputValueError::custom("Phone number must be between 7 and 20 characters long"));
		}

		if !value.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-') {
			return Err(InputValueError::custom(
				"Phone number must only contain digits, spaces, '+' and '-'",
			));
		}

		if value.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
			return Err(InputValueError::custom("Phone number must contain at least 7 digits"));
		}

		Ok(())
	}
}

pub struct FullNameValidator;

impl CustomValidator<String> for FullNameValidator {
	fn check(&self, value: &String) -> Result<(), InputValueError<String>> {
		let length = value.trim().chars().count();

		if length < 2 {
			return Err(InputValueError::custom("Name must be at least 2 characters long"));
		}

		if length > 100 {
			return Err(InputValueError::custom("Name must be at most 100 characters long"));
		}

		if value.chars().any(char::is_control) {
			return Err(InputValueError::custom("Name must not contain control characters"));
		}

		Ok(())
	}
}
