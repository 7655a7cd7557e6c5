//! Unit tests for Auth crate

#[cfg(test)]
mod error_tests {
    use crate::error::AuthError;
    use kernel::error::{app_error::AppError, code::ErrorCode};
    use platform::password::PasswordPolicyError;
    use platform::token::TokenError;

    #[test]
    fn test_invalid_credentials_is_business_401() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.code(), ErrorCode::BusinessError);
        assert_eq!(err.message(), "Email or password is incorrect");
    }

    #[test]
    fn test_change_password_failures_are_business_errors() {
        let cases = [
            (AuthError::CredentialNotFound, 404, "Admin credential not found"),
            (
                AuthError::CurrentPasswordIncorrect,
                400,
                "Current password is incorrect",
            ),
            (
                AuthError::PasswordConfirmationMismatch,
                400,
                "New password and confirmation do not match",
            ),
            (
                AuthError::PasswordUnchanged,
                400,
                "New password must be different from the current password",
            ),
        ];

        for (error, status, message) in cases {
            let err = AppError::from(error);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.code(), ErrorCode::BusinessError);
            assert_eq!(err.message(), message);
        }
    }

    #[test]
    fn test_policy_error_is_validation_error() {
        let err = AppError::from(AuthError::PasswordPolicy(PasswordPolicyError::TooShort {
            min: 6,
            actual: 3,
        }));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(err.validation_errors().unwrap().get("new_password").is_some());
    }

    #[test]
    fn test_token_error_is_unauthorized() {
        let err = AppError::from(AuthError::Token(TokenError::Expired));
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::from(AuthError::Internal("pool poisoned".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_ne!(err.public_message(), "pool poisoned");
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::{ChangePasswordRequest, LoginRequest};

    #[test]
    fn test_login_request_validation() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c","password":"wrong"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: LoginRequest = serde_json::from_str(r#"{"email":"not-an-email"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("email must be a well-formed email address"));
        assert_eq!(errors.get("password"), Some("password is required"));
    }

    #[test]
    fn test_change_password_request_accepts_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"currentPassword":"secret123","newPassword":"secret456","confirmPassword":"secret456"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.new_password.as_deref(), Some("secret456"));
    }

    #[test]
    fn test_change_password_length_policy() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"current_password":"secret123","new_password":"abc","confirm_password":"abc"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.get("new_password"),
            Some("new_password must be between 6 and 100 characters")
        );
    }

    #[test]
    fn test_debug_never_prints_passwords() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"secret123"}"#).unwrap();
        assert!(!format!("{:?}", req).contains("secret123"));
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use kernel::audit::Actor;
    use kernel::principal::Role;
    use platform::password::{ClearTextPassword, PasswordHasher};
    use platform::token::TokenService;

    use crate::application::{
        ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
    };
    use crate::domain::entity::NewAdminCredential;
    use crate::domain::repository::CredentialRepository;
    use crate::domain::value_object::Email;
    use crate::error::AuthError;
    use crate::infra::InMemoryCredentialRepository;

    struct Fixture {
        repo: Arc<InMemoryCredentialRepository>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
    }

    async fn fixture(password: &str) -> Fixture {
        let hasher = Arc::new(PasswordHasher::with_cost(64, 1, 1).unwrap());
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let hash = hasher
            .hash(&ClearTextPassword::for_verification(password.to_string()))
            .unwrap();
        repo.insert(
            NewAdminCredential {
                email: Email::new("a@b.c").unwrap(),
                password_hash: hash.into_phc_string(),
                role: Role::Admin,
            },
            &Actor::system(),
        )
        .await
        .unwrap();

        Fixture {
            repo,
            tokens: Arc::new(
                TokenService::from_key_bytes(vec![1u8; 64], Duration::from_millis(86_400_000))
                    .unwrap(),
            ),
            hasher,
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let f = fixture("secret123").await;
        let use_case = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());

        let output = use_case.execute(login_input("a@b.c", "secret123")).await.unwrap();

        assert_eq!(output.token_type, "Bearer");
        assert_eq!(output.expires_in, 86_400);
        assert_eq!(output.full_name, "a@b.c");
        let claims = f.tokens.parse(&output.access_token).unwrap();
        assert_eq!(claims.subject(), "a@b.c");
        assert_eq!(claims.role(), Some("ADMIN"));
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let f = fixture("secret123").await;
        let use_case = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());
        assert!(use_case.execute(login_input("A@B.C", "secret123")).await.is_ok());
    }

    #[tokio::test]
    async fn test_credential_email_is_unique_ignoring_case() {
        let f = fixture("secret123").await;

        let err = f
            .repo
            .insert(
                NewAdminCredential {
                    email: Email::new("A@B.C").unwrap(),
                    password_hash: "hash".to_string(),
                    role: Role::Admin,
                },
                &Actor::system(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(f.repo.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_uses_owner_display_name() {
        let f = fixture("secret123").await;
        f.repo
            .set_owner_display_name(Some("Jane Doe".to_string()))
            .await;
        let use_case = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());

        let output = use_case.execute(login_input("a@b.c", "secret123")).await.unwrap();
        assert_eq!(output.full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let f = fixture("secret123").await;
        let use_case = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());

        for (email, password) in [
            ("a@b.c", "wrong"),
            ("unknown@b.c", "secret123"),
            ("not-an-email", "secret123"),
        ] {
            let err = use_case
                .execute(login_input(email, password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_credential() {
        let f = fixture("secret123").await;
        let credential = f.repo.find_first_active().await.unwrap().unwrap();
        f.repo.deactivate(credential.id).await;

        let use_case = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());
        let err = use_case
            .execute(login_input("a@b.c", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordInput {
        ChangePasswordInput {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let f = fixture("secret123").await;
        let use_case = ChangePasswordUseCase::new(f.repo.clone(), f.hasher.clone());
        let actor = Actor::new("a@b.c");

        use_case
            .execute(change("secret123", "secret456", "secret456"), &actor)
            .await
            .unwrap();

        let credential = f.repo.find_first_active().await.unwrap().unwrap();
        assert_eq!(credential.audit.updated_by, "a@b.c");
        assert_eq!(credential.audit.created_by, "SYSTEM");
        assert!(f.hasher.verify(
            &ClearTextPassword::for_verification("secret456".to_string()),
            &credential.password_hash
        ));

        let login = LoginUseCase::new(f.repo.clone(), f.tokens.clone(), f.hasher.clone());
        assert!(login.execute(login_input("a@b.c", "secret456")).await.is_ok());
        assert!(login.execute(login_input("a@b.c", "secret123")).await.is_err());
    }

    #[tokio::test]
    async fn test_change_password_rule_order() {
        let f = fixture("secret123").await;
        let use_case = ChangePasswordUseCase::new(f.repo.clone(), f.hasher.clone());
        let actor = Actor::new("a@b.c");

        let err = use_case
            .execute(change("wrong-current", "x", "y"), &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::CurrentPasswordIncorrect));

        let err = use_case
            .execute(change("secret123", "secret456", "secret789"), &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordConfirmationMismatch));

        let err = use_case
            .execute(change("secret123", "secret123", "secret123"), &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordUnchanged));

        let err = use_case
            .execute(change("secret123", "abc", "abc"), &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordPolicy(_)));
    }

    #[tokio::test]
    async fn test_change_password_without_credential() {
        let hasher = Arc::new(PasswordHasher::with_cost(64, 1, 1).unwrap());
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let use_case = ChangePasswordUseCase::new(repo, hasher);

        let err = use_case
            .execute(change("a", "secret456", "secret456"), &Actor::new("a@b.c"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::CredentialNotFound));
    }
}
