use async_graphql::CustomValidator;

use crate::api::v1::gql::validators::{EmailValidator, FullNameValidator, PasswordValidator, PhoneValidator};

fn check(validator: &impl CustomValidator<String>, value: &str) -> bool {
	validator.check(&value.to_string()).is_ok()
}

#[test]
fn test_email_validator() {
	assert!(check(&EmailValidator, "jane@example.com"));
	assert!(check(&EmailValidator, " jane@example.com "));
	assert!(!check(&EmailValidator, "jane"));
	assert!(!check(&EmailValidator, "jane@"));
	assert!(!check(&EmailValidator, &format!("{}@example.com", "a".repeat(250))));
}

#[test]
fn test_password_validator() {
	assert!(check(&PasswordValidator, "Secret-123"));
	assert!(!check(&PasswordValidator, "Sh0rt!"));
	assert!(!check(&PasswordValidator, "nouppercase-123"));
	assert!(!check(&PasswordValidator, "NOLOWERCASE-123"));
	assert!(!check(&PasswordValidator, "NoDigits-here"));
	assert!(!check(&PasswordValidator, "NoSpecial123"));
	assert!(!check(&PasswordValidator, &format!("Aa1-{}", "x".repeat(100))));
}

#[test]
fn test_phone_validator() {
	assert!(check(&PhoneValidator, "+1 555-010-0199"));
	assert!(check(&PhoneValidator, "5550100"));
	assert!(!check(&PhoneValidator, "555"));
	assert!(!check(&PhoneValidator, "555-CALL-NOW"));
	assert!(!check(&PhoneValidator, "+- -- -- -- --"));
	assert!(!check(&PhoneValidator, &"1".repeat(21)));
}

#[test]
fn test_full_name_validator() {
	assert!(check(&FullNameValidator, "Jane Doe"));
	assert!(check(&FullNameValidator, "Zoë"));
	assert!(!check(&FullNameValidator, " J "));
	assert!(!check(&FullNameValidator, "Jane\nDoe"));
	assert!(!check(&FullNameValidator, &"a".repeat(101)));
}
