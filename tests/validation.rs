use roster::error::AppError;
use roster::validation::{validate_email, validate_name, validate_project_name};

#[test]
fn non_blank_names_are_valid() {
    for name in ["a", "Ada Lovelace", "  padded  ", "名前"] {
        assert!(validate_name(name).is_ok(), "{name:?} should be valid");
    }
}

#[test]
fn blank_names_fail_with_field_name() {
    for name in ["", " ", "\t\n", "   "] {
        match validate_name(name) {
            Err(AppError::FieldNotValid(field)) => assert_eq!(field, "name"),
            other => panic!("{name:?}: expected FieldNotValid, got {other:?}"),
        }
    }
}

#[test]
fn valid_emails() {
    for email in [
        "a@b.com",
        "john.doe@example.com",
        "first-last_1@mail.co.uk",
        "x@my-domain.museum",
    ] {
        assert!(validate_email(email).is_ok(), "{email:?} should be valid");
    }
}

#[test]
fn invalid_emails() {
    for email in [
        "",
        "a.com",
        "@b.com",
        "a@b",
        "a@b.c",
        "a@b.abcdefg",
        "a@b1.com",
        "a b@c.com",
        "a@b.com trailing",
        "prefix a@b.com",
    ] {
        assert!(
            matches!(validate_email(email), Err(AppError::EmailNotValid)),
            "{email:?} should be rejected"
        );
    }
}

#[test]
fn project_name_must_be_present_and_not_blank() {
    assert!(validate_project_name(Some("JEP-390")).is_ok());
    assert!(matches!(
        validate_project_name(None),
        Err(AppError::ProjectNameNotValid)
    ));
    assert!(matches!(
        validate_project_name(Some("  ")),
        Err(AppError::ProjectNameNotValid)
    ));
}
