use dinetap_api::error::ApiError;
use dinetap_api::usecase::account::{
    CreateAccountInput, CreateAccountOutcome, CreateAccountUseCase, DeleteAccountUseCase,
    GetAccountUseCase, SignInInput, SignInOutcome, SignInUseCase, UpdateAccountInput,
    UpdateAccountUseCase,
};
use dinetap_auth_types::token::{Identity, verify_bearer};
use dinetap_domain::role::Role;
use dinetap_testing::auth::test_secrets;

use crate::helpers::{MockAccountRepo, MockMailer, MockOtpRepo, test_account, test_gate};

const VERIFICATION_CODE: &str = "let-me-bootstrap";

fn create_usecase(
    accounts: MockAccountRepo,
    otps: MockOtpRepo,
    mailer: MockMailer,
) -> CreateAccountUseCase<MockAccountRepo, MockOtpRepo, MockMailer> {
    CreateAccountUseCase {
        accounts,
        gate: test_gate(otps, mailer),
        secrets: test_secrets(),
        verification_code: VERIFICATION_CODE.to_owned(),
    }
}

fn create_input(role: Role, email: &str) -> CreateAccountInput {
    CreateAccountInput {
        role,
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        email: email.to_owned(),
        phone: "+919812345678".into(),
        password: None,
        verification_code: None,
        otp: None,
    }
}

fn identity(account: &dinetap_api::domain::types::Account) -> Identity {
    Identity {
        account_id: account.id,
        role: account.role,
    }
}

// ── Creation gating ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_superadmin_bootstrap_with_wrong_verification_code() {
    let uc = create_usecase(MockAccountRepo::empty(), MockOtpRepo::empty(), MockMailer::new());
    let mut input = create_input(Role::Superadmin, "root@example.com");
    input.verification_code = Some("wrong".into());

    let err = uc.execute(None, input).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidVerificationCode));
}

#[tokio::test]
async fn should_create_superadmin_via_verification_code_and_otp() {
    let accounts = MockAccountRepo::empty();
    let mailer = MockMailer::new();
    let uc = create_usecase(accounts.clone(), MockOtpRepo::empty(), mailer.clone());

    // Phase one: checks pass, code goes out, nothing is created yet.
    let mut input = create_input(Role::Superadmin, "root@example.com");
    input.verification_code = Some(VERIFICATION_CODE.into());
    input.password = Some("bootstrap-pass".into());
    let outcome = uc.execute(None, input).await.unwrap();
    assert!(matches!(outcome, CreateAccountOutcome::OtpSent));
    assert!(accounts.accounts.lock().unwrap().is_empty());

    // Phase two: correct code creates the account and mints a token.
    let mut input = create_input(Role::Superadmin, "root@example.com");
    input.verification_code = Some(VERIFICATION_CODE.into());
    input.password = Some("bootstrap-pass".into());
    input.otp = mailer.last_code();
    let outcome = uc.execute(None, input).await.unwrap();

    let CreateAccountOutcome::Created { account, token } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(account.role, Role::Superadmin);
    assert!(account.password_hash.is_some());

    // The minted token must verify under the superadmin secret specifically.
    let header = format!("Bearer {}", token.unwrap());
    let verified = verify_bearer(Some(&header), &test_secrets()).unwrap();
    assert_eq!(verified.role, Role::Superadmin);
    assert_eq!(verified.account_id, account.id);
}

#[tokio::test]
async fn should_require_authorization_header_for_admin_creation() {
    let uc = create_usecase(MockAccountRepo::empty(), MockOtpRepo::empty(), MockMailer::new());
    let err = uc
        .execute(None, create_input(Role::Admin, "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingAuthorization));
}

#[tokio::test]
async fn should_reject_admin_creation_by_non_superadmin() {
    let manager = test_account(Role::Manager);
    let uc = create_usecase(
        MockAccountRepo::new(vec![manager.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let err = uc
        .execute(
            Some(identity(&manager)),
            create_input(Role::Admin, "a@example.com"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn should_reject_admin_creation_by_soft_deleted_superadmin() {
    let mut superadmin = test_account(Role::Superadmin);
    superadmin.deleted = true;
    let uc = create_usecase(
        MockAccountRepo::new(vec![superadmin.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let err = uc
        .execute(
            Some(identity(&superadmin)),
            create_input(Role::Admin, "a@example.com"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound("account")));
}

#[tokio::test]
async fn should_create_admin_with_superadmin_token_and_otp() {
    let superadmin = test_account(Role::Superadmin);
    let accounts = MockAccountRepo::new(vec![superadmin.clone()]);
    let mailer = MockMailer::new();
    let uc = create_usecase(accounts.clone(), MockOtpRepo::empty(), mailer.clone());

    let outcome = uc
        .execute(
            Some(identity(&superadmin)),
            create_input(Role::Admin, "owner@example.com"),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, CreateAccountOutcome::OtpSent));

    let mut input = create_input(Role::Admin, "owner@example.com");
    input.otp = mailer.last_code();
    let outcome = uc.execute(Some(identity(&superadmin)), input).await.unwrap();

    let CreateAccountOutcome::Created { account, token } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(account.role, Role::Admin);
    let header = format!("Bearer {}", token.unwrap());
    let verified = verify_bearer(Some(&header), &test_secrets()).unwrap();
    assert_eq!(verified.role, Role::Admin);
}

#[tokio::test]
async fn should_not_send_otp_when_email_is_taken() {
    let superadmin = test_account(Role::Superadmin);
    let existing = test_account(Role::Admin);
    let mailer = MockMailer::new();
    let uc = create_usecase(
        MockAccountRepo::new(vec![superadmin.clone(), existing.clone()]),
        MockOtpRepo::empty(),
        mailer.clone(),
    );

    let err = uc
        .execute(
            Some(identity(&superadmin)),
            create_input(Role::Admin, &existing.email),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
    assert!(
        mailer.sent.lock().unwrap().is_empty(),
        "no OTP may be sent for a request that cannot succeed"
    );
}

#[tokio::test]
async fn should_create_user_without_token() {
    let admin = test_account(Role::Admin);
    let mailer = MockMailer::new();
    let uc = create_usecase(
        MockAccountRepo::new(vec![admin.clone()]),
        MockOtpRepo::empty(),
        mailer.clone(),
    );

    uc.execute(
        Some(identity(&admin)),
        create_input(Role::User, "guest@example.com"),
    )
    .await
    .unwrap();

    let mut input = create_input(Role::User, "guest@example.com");
    input.otp = mailer.last_code();
    let outcome = uc.execute(Some(identity(&admin)), input).await.unwrap();

    let CreateAccountOutcome::Created { account, token } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(account.role, Role::User);
    assert!(token.is_none(), "user accounts have no signing secret");
}

#[tokio::test]
async fn should_reject_password_for_non_superadmin_roles() {
    let superadmin = test_account(Role::Superadmin);
    let uc = create_usecase(
        MockAccountRepo::new(vec![superadmin.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let mut input = create_input(Role::Admin, "a@example.com");
    input.password = Some("secret".into());
    let err = uc
        .execute(Some(identity(&superadmin)), input)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let uc = create_usecase(MockAccountRepo::empty(), MockOtpRepo::empty(), MockMailer::new());
    let mut input = create_input(Role::Superadmin, "not-an-email");
    input.verification_code = Some(VERIFICATION_CODE.into());
    let err = uc.execute(None, input).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

// ── Sign-in ──────────────────────────────────────────────────────────────────

fn sign_in_usecase(
    accounts: MockAccountRepo,
    otps: MockOtpRepo,
    mailer: MockMailer,
) -> SignInUseCase<MockAccountRepo, MockOtpRepo, MockMailer> {
    SignInUseCase {
        accounts,
        gate: test_gate(otps, mailer),
        secrets: test_secrets(),
    }
}

#[tokio::test]
async fn should_reject_sign_in_for_user_role() {
    let uc = sign_in_usecase(MockAccountRepo::empty(), MockOtpRepo::empty(), MockMailer::new());
    let err = uc
        .execute(SignInInput {
            role: Role::User,
            email: "guest@example.com".into(),
            otp: None,
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn should_reject_sign_in_when_stored_role_differs_from_path_role() {
    let manager = test_account(Role::Manager);
    let uc = sign_in_usecase(
        MockAccountRepo::new(vec![manager.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let err = uc
        .execute(SignInInput {
            role: Role::Admin,
            email: manager.email.clone(),
            otp: None,
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn should_sign_in_admin_via_otp_round_trip() {
    let admin = test_account(Role::Admin);
    let mailer = MockMailer::new();
    let uc = sign_in_usecase(
        MockAccountRepo::new(vec![admin.clone()]),
        MockOtpRepo::empty(),
        mailer.clone(),
    );

    let outcome = uc
        .execute(SignInInput {
            role: Role::Admin,
            email: admin.email.clone(),
            otp: None,
            password: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SignInOutcome::OtpSent));
    assert_eq!(mailer.sent.lock().unwrap()[0].to, admin.email);

    let outcome = uc
        .execute(SignInInput {
            role: Role::Admin,
            email: admin.email.clone(),
            otp: mailer.last_code(),
            password: None,
        })
        .await
        .unwrap();
    let SignInOutcome::SignedIn { token } = outcome else {
        panic!("expected SignedIn");
    };
    let header = format!("Bearer {token}");
    let verified = verify_bearer(Some(&header), &test_secrets()).unwrap();
    assert_eq!(verified.role, Role::Admin);
    assert_eq!(verified.account_id, admin.id);
}

#[tokio::test]
async fn should_reject_sign_in_for_deleted_account() {
    let mut admin = test_account(Role::Admin);
    admin.deleted = true;
    let uc = sign_in_usecase(
        MockAccountRepo::new(vec![admin.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let err = uc
        .execute(SignInInput {
            role: Role::Admin,
            email: admin.email.clone(),
            otp: None,
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound("account")));
}

#[tokio::test]
async fn should_sign_in_superadmin_by_password() {
    // Bootstrap a superadmin with a password through the real creation flow
    // so the stored hash is a genuine argon2 digest.
    let accounts = MockAccountRepo::empty();
    let mailer = MockMailer::new();
    let create = create_usecase(accounts.clone(), MockOtpRepo::empty(), mailer.clone());

    let mut input = create_input(Role::Superadmin, "root@example.com");
    input.verification_code = Some(VERIFICATION_CODE.into());
    input.password = Some("bootstrap-pass".into());
    create.execute(None, input).await.unwrap();

    let mut input = create_input(Role::Superadmin, "root@example.com");
    input.verification_code = Some(VERIFICATION_CODE.into());
    input.password = Some("bootstrap-pass".into());
    input.otp = mailer.last_code();
    create.execute(None, input).await.unwrap();

    let uc = sign_in_usecase(accounts, MockOtpRepo::empty(), MockMailer::new());
    let outcome = uc
        .execute(SignInInput {
            role: Role::Superadmin,
            email: "root@example.com".into(),
            otp: None,
            password: Some("bootstrap-pass".into()),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SignInOutcome::SignedIn { .. }));

    let err = uc
        .execute(SignInInput {
            role: Role::Superadmin,
            email: "root@example.com".into(),
            otp: None,
            password: Some("wrong-pass".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_password_sign_in_for_admin_role() {
    let admin = test_account(Role::Admin);
    let uc = sign_in_usecase(
        MockAccountRepo::new(vec![admin.clone()]),
        MockOtpRepo::empty(),
        MockMailer::new(),
    );
    let err = uc
        .execute(SignInInput {
            role: Role::Admin,
            email: admin.email.clone(),
            otp: None,
            password: Some("whatever".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

// ── Self-service ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_matching_role_for_self_read() {
    let admin = test_account(Role::Admin);
    let uc = GetAccountUseCase {
        accounts: MockAccountRepo::new(vec![admin.clone()]),
    };
    let err = uc
        .execute(identity(&admin), Role::Manager)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn should_update_profile_fields() {
    let admin = test_account(Role::Admin);
    let uc = UpdateAccountUseCase {
        accounts: MockAccountRepo::new(vec![admin.clone()]),
    };
    let updated = uc
        .execute(
            identity(&admin),
            Role::Admin,
            UpdateAccountInput {
                first_name: Some("Meera".into()),
                last_name: None,
                phone: Some("+919876543210".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Meera");
    assert_eq!(updated.last_name, admin.last_name);
    assert_eq!(updated.phone, "+919876543210");
}

#[tokio::test]
async fn should_reject_empty_profile_update() {
    let admin = test_account(Role::Admin);
    let uc = UpdateAccountUseCase {
        accounts: MockAccountRepo::new(vec![admin.clone()]),
    };
    let err = uc
        .execute(
            identity(&admin),
            Role::Admin,
            UpdateAccountInput {
                first_name: None,
                last_name: None,
                phone: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn should_soft_delete_and_hide_account() {
    let admin = test_account(Role::Admin);
    let accounts = MockAccountRepo::new(vec![admin.clone()]);

    let delete = DeleteAccountUseCase {
        accounts: accounts.clone(),
    };
    delete.execute(identity(&admin), Role::Admin).await.unwrap();

    // Row still exists physically, but reads treat it as absent.
    assert_eq!(accounts.accounts.lock().unwrap().len(), 1);
    let get = GetAccountUseCase { accounts };
    let err = get.execute(identity(&admin), Role::Admin).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound("account")));
}
