use cyberaware_backend_lib::auth::{
    hash_password, is_valid_password, validate_password_strength, verify_password,
    PasswordRequirements, SPECIAL_CHARACTERS,
};
use scrypt::Params;

#[test]
fn test_password_hashing_and_verification() {
    let params = Params::new(4, 8, 1, Params::RECOMMENDED_LEN).unwrap();
    let password = "SecureP@ssw0rd!";
    let hash = hash_password(password, &params).unwrap();

    // Hash should be different than the original password
    assert_ne!(password, hash);
    assert!(verify_password(&hash, password));
    assert!(!verify_password(&hash, "SecureP@ssw0rd?"));
}

#[test]
fn test_password_strength_validation() {
    // Valid password
    assert!(is_valid_password("Abcdef1!2345"));

    // Too short
    assert!(!is_valid_password("Short1!"));

    // Missing uppercase
    assert!(!is_valid_password("abcdefghijk1!"));

    // Missing lowercase
    assert!(!is_valid_password("ABCDEFGHIJK1!"));

    // Missing digit
    assert!(!is_valid_password("Abcdefghijk!!"));

    // Missing special character
    assert!(!is_valid_password("Abcdefghijk12"));

    // A weak but common password
    assert!(!is_valid_password("password"));
}

#[test]
fn test_every_special_character_counts() {
    for special in SPECIAL_CHARACTERS.chars() {
        let password = format!("Abcdefghij1{special}");
        assert!(is_valid_password(&password), "{special:?} should count");
    }

    for other in ['_', '.', '?', ' ', '~'] {
        let password = format!("Abcdefghij1{other}");
        assert!(!is_valid_password(&password), "{other:?} should not count");
    }
}

#[test]
fn test_custom_requirements() {
    let custom_requirements = PasswordRequirements {
        min_length: 16,
        require_special: false,
        ..PasswordRequirements::default()
    };

    assert!(!validate_password_strength("Abcdef1!2345", &custom_requirements));
    assert!(validate_password_strength("Abcdefghijklmno1", &custom_requirements));
}
