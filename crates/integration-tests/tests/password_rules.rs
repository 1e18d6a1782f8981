//! Cross-crate checks for the registration password policy.
//!
//! These run hermetically (no server needed): the policy that the gallery
//! enforces before any backend call is pure.

use litart_core::PasswordStrength;

#[test]
fn test_strong_examples() {
    for candidate in ["Abc123!@", "Tr0ub4dor&Xy", "P@ssw0rdP@ssw0rd"] {
        assert_eq!(
            PasswordStrength::classify(candidate),
            PasswordStrength::Strong,
            "expected strong: {candidate}"
        );
    }
}

#[test]
fn test_medium_examples() {
    // Two character classes and at least six characters
    for candidate in ["abc123", "Abc123", "Abcdef", "Abcd1234"] {
        assert_eq!(
            PasswordStrength::classify(candidate),
            PasswordStrength::Medium,
            "expected medium: {candidate}"
        );
    }
}

#[test]
fn test_weak_examples() {
    for candidate in ["", "aB1", "abcdef", "12345678", "!!!!!!!!"] {
        assert_eq!(
            PasswordStrength::classify(candidate),
            PasswordStrength::Weak,
            "expected weak: {candidate}"
        );
    }
}

#[test]
fn test_only_strong_is_acceptable_for_registration() {
    assert!(PasswordStrength::Strong.is_strong());
    assert!(!PasswordStrength::Medium.is_strong());
    assert!(!PasswordStrength::Weak.is_strong());
}
