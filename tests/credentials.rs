use roster::auth::credentials::{CredentialCheck, StaticCredentials};
use roster::auth::extractor::Operator;
use roster::auth::password;
use roster::config::AuthConfig;

fn config(password: &str) -> AuthConfig {
    AuthConfig {
        username: "admin".to_string(),
        password_hash: password::hash(password).unwrap(),
    }
}

#[test]
fn verify_accepts_only_the_configured_pair() {
    let credentials = StaticCredentials::new(&config("hunter2")).unwrap();

    assert!(credentials.verify("admin", "hunter2"));
    assert!(!credentials.verify("admin", "hunter3"));
    assert!(!credentials.verify("root", "hunter2"));
}

#[test]
fn verify_is_repeatable_on_one_instance() {
    let credentials = StaticCredentials::new(&config("hunter2")).unwrap();

    for _ in 0..3 {
        assert!(credentials.verify("admin", "hunter2"));
    }
}

#[test]
fn malformed_hash_is_rejected_at_construction() {
    let config = AuthConfig {
        username: "admin".to_string(),
        password_hash: "not-a-phc-string".to_string(),
    };

    let err = StaticCredentials::new(&config).err().unwrap();
    assert!(err.starts_with("Invalid password hash"));
}

#[test]
fn operator_displays_username_or_anonymous() {
    let named = Operator {
        username: Some("admin".to_string()),
    };
    let open = Operator { username: None };

    assert_eq!(named.to_string(), "admin");
    assert_eq!(open.to_string(), "anonymous");
}
