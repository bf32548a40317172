//! Account lifecycle tests: signup, login, logout, and re-login scenarios

use healthconnect::account::LoginError;

use crate::helpers::*;

// ===== SIGNUP THEN LOGIN =====

#[tokio::test]
async fn test_signup_then_login_with_email() {
    let (directory, _) = test_directory().await;

    let accounts = [
        ("Asha Rao", "asha@example.com", "secret12"),
        ("Ben Okafor", "ben.okafor@clinic.in", "correct horse"),
        ("Chen Wei", "chen@mail.example.org", "exactly8"),
    ];
    for (name, email, password) in accounts {
        register(&directory, name, email, password).await;
    }

    for (name, email, password) in accounts {
        let session = directory
            .login(email, password)
            .await
            .expect("Login should succeed after signup");
        assert_eq!(session.name, name);
        assert_eq!(session.email, email);
    }
    assert_eq!(directory.len().await, 3);
}

#[tokio::test]
async fn test_login_identifier_case_insensitive_password_case_sensitive() {
    let (directory, _, _) = test_directory_with_account("a@b.com", "secret12").await;

    assert!(directory.login("A@B.COM", "secret12").await.is_ok());

    let err = directory.login("a@b.com", "SECRET12").await.unwrap_err();
    assert_eq!(err.login_error(), Some(&LoginError::IncorrectPassword));
}

#[tokio::test]
async fn test_login_with_username() {
    let (directory, _, account) =
        test_directory_with_account("Dr.Mehta@Hospital.org", "secret12").await;

    let session = directory.login("DR.MEHTA", "secret12").await.unwrap();
    assert_eq!(session.id, account.id);
    assert_eq!(session.username, "dr.mehta");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (directory, _, _) = test_directory_with_account("a@b.com", "secret12").await;

    let err = directory.login("c@d.com", "secret12").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "User not found. Please check your email or sign up."
    );
}

#[tokio::test]
async fn test_login_missing_fields_checked_before_lookup() {
    let (directory, _) = test_directory().await;

    // Empty directory, but the precondition errors still come first
    let err = directory.login("", "whatever").await.unwrap_err();
    assert_eq!(err.login_error(), Some(&LoginError::MissingIdentifier));

    let err = directory.login("someone", "").await.unwrap_err();
    assert_eq!(err.login_error(), Some(&LoginError::MissingPassword));
}

// ===== SESSIONS =====

#[tokio::test]
async fn test_second_login_replaces_session() {
    let (directory, _) = test_directory().await;
    register(&directory, "Asha", "asha@example.com", "secret12").await;
    let ben = register(&directory, "Ben", "ben@example.com", "secret34").await;

    directory.login("asha", "secret12").await.unwrap();
    directory.login("ben", "secret34").await.unwrap();

    let session = directory.current_session().await.unwrap();
    assert_eq!(session.id, ben.id);
}

#[tokio::test]
async fn test_logout_then_not_authenticated() {
    let (directory, _, _) = test_directory_with_account("a@b.com", "secret12").await;
    directory.login("a@b.com", "secret12").await.unwrap();
    assert!(directory.is_authenticated().await);

    directory.logout().await.unwrap();
    assert!(!directory.is_authenticated().await);
    assert!(directory.current_session().await.is_none());

    // Second logout is not an error
    directory.logout().await.unwrap();
}

#[tokio::test]
async fn test_relogin_after_logout() {
    let (directory, _, account) = test_directory_with_account("a@b.com", "secret12").await;

    for _ in 0..3 {
        let session = directory.login("a@b.com", "secret12").await.unwrap();
        assert_eq!(session.id, account.id);
        directory.logout().await.unwrap();
    }
    assert!(!directory.is_authenticated().await);
}
