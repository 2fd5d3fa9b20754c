//! Account provisioning, sign-in and self-service.
//!
//! Creation and sign-in are two-phase: the first call (no `otp`) runs every
//! business check and only then issues a one-time code, so a code is never
//! sent for a request that would fail anyway; the second call carries the
//! code and performs the actual mutation.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use uuid::Uuid;

use dinetap_auth_types::token::{Identity, RoleSecrets, issue_token};
use dinetap_domain::role::Role;

use crate::domain::repository::{AccountRepository, MailSender, OtpRepository};
use crate::domain::types::{Account, validate_email, validate_name, validate_phone};
use crate::error::ApiError;
use crate::usecase::otp::OtpGate;

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

fn password_matches(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ── CreateAccount ────────────────────────────────────────────────────────────

pub struct CreateAccountInput {
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Only accepted for superadmin bootstrap.
    pub password: Option<String>,
    /// Required for superadmin bootstrap; ignored otherwise.
    pub verification_code: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug)]
pub enum CreateAccountOutcome {
    /// First phase done: a code was sent to the account email.
    OtpSent,
    /// Second phase done. `token` is absent for the user role, which has no
    /// signing secret.
    Created {
        account: Account,
        token: Option<String>,
    },
}

pub struct CreateAccountUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub accounts: A,
    pub gate: OtpGate<O, M>,
    pub secrets: RoleSecrets,
    pub verification_code: String,
}

impl<A, O, M> CreateAccountUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub async fn execute(
        &self,
        actor: Option<Identity>,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutcome, ApiError> {
        if !validate_name(&input.first_name) || !validate_name(&input.last_name) {
            return Err(ApiError::Validation(
                "first and last name must be 2 to 50 characters".into(),
            ));
        }
        if !validate_email(&input.email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
        if !validate_phone(&input.phone) {
            return Err(ApiError::Validation("invalid phone number".into()));
        }
        if input.password.is_some() && input.role != Role::Superadmin {
            return Err(ApiError::Validation(
                "password is only accepted for superadmin accounts".into(),
            ));
        }

        self.check_actor(actor, input.role, input.verification_code.as_deref())
            .await?;

        if self.accounts.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict("email already exists".into()));
        }

        let Some(ref otp) = input.otp else {
            self.gate.issue(&input.email).await?;
            return Ok(CreateAccountOutcome::OtpSent);
        };
        self.gate.verify(&input.email, otp).await?;

        let password_hash = match input.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            role: input.role,
            password_hash,
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.accounts.create(&account).await?;

        let token = if account.role.is_token_bearing() {
            Some(issue_token(account.id, account.role, &self.secrets)?)
        } else {
            None
        };

        Ok(CreateAccountOutcome::Created { account, token })
    }

    /// Who may create which role: superadmins bootstrap with the shared
    /// verification code; admins are created by superadmins; managers by
    /// admins; users by either. The authorizing account is re-fetched so a
    /// soft-deleted actor cannot keep provisioning with a live token.
    async fn check_actor(
        &self,
        actor: Option<Identity>,
        target: Role,
        verification_code: Option<&str>,
    ) -> Result<(), ApiError> {
        match target {
            Role::Superadmin => {
                if verification_code != Some(self.verification_code.as_str()) {
                    return Err(ApiError::InvalidVerificationCode);
                }
                Ok(())
            }
            Role::Admin => self.require_live_actor(actor, &[Role::Superadmin]).await,
            Role::Manager => self.require_live_actor(actor, &[Role::Admin]).await,
            Role::User => {
                self.require_live_actor(actor, &[Role::Admin, Role::Superadmin])
                    .await
            }
        }
    }

    async fn require_live_actor(
        &self,
        actor: Option<Identity>,
        allowed: &[Role],
    ) -> Result<(), ApiError> {
        let actor = actor.ok_or(ApiError::MissingAuthorization)?;
        if !allowed.contains(&actor.role) {
            return Err(ApiError::Unauthorized);
        }
        // The token's role wins for authorization (it is bound to the signing
        // secret); the stored row only proves the actor still exists.
        self.accounts
            .find_by_id(actor.account_id)
            .await?
            .filter(|a| !a.deleted)
            .ok_or(ApiError::NotFound("account"))?;
        Ok(())
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub role: Role,
    pub email: String,
    pub otp: Option<String>,
    /// Superadmin accounts with a stored hash may sign in by password
    /// instead of the OTP round-trip.
    pub password: Option<String>,
}

#[derive(Debug)]
pub enum SignInOutcome {
    OtpSent,
    SignedIn { token: String },
}

pub struct SignInUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub accounts: A,
    pub gate: OtpGate<O, M>,
    pub secrets: RoleSecrets,
}

impl<A, O, M> SignInUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutcome, ApiError> {
        if !input.role.is_token_bearing() {
            return Err(ApiError::Validation(
                "this role has no sign-in credential".into(),
            ));
        }
        let account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .filter(|a| !a.deleted)
            .ok_or(ApiError::NotFound("account"))?;

        // A token must only ever be minted with the secret of the account's
        // stored role; otherwise sign-in would upgrade roles.
        if account.role != input.role {
            return Err(ApiError::Unauthorized);
        }

        if let Some(ref password) = input.password {
            if input.role != Role::Superadmin {
                return Err(ApiError::Validation(
                    "password sign-in is only available for superadmin accounts".into(),
                ));
            }
            let stored = account
                .password_hash
                .as_deref()
                .ok_or(ApiError::InvalidCredentials)?;
            if !password_matches(password, stored) {
                return Err(ApiError::InvalidCredentials);
            }
        } else {
            let Some(ref otp) = input.otp else {
                self.gate.issue(&input.email).await?;
                return Ok(SignInOutcome::OtpSent);
            };
            self.gate.verify(&input.email, otp).await?;
        }

        let token = issue_token(account.id, account.role, &self.secrets)?;
        Ok(SignInOutcome::SignedIn { token })
    }
}

// ── Self-service: get / update / delete ──────────────────────────────────────

pub struct GetAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAccountUseCase<A> {
    pub async fn execute(&self, identity: Identity, role: Role) -> Result<Account, ApiError> {
        if identity.role != role {
            return Err(ApiError::Unauthorized);
        }
        self.accounts
            .find_by_id(identity.account_id)
            .await?
            .filter(|a| !a.deleted)
            .ok_or(ApiError::NotFound("account"))
    }
}

pub struct UpdateAccountInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateAccountUseCase<A> {
    pub async fn execute(
        &self,
        identity: Identity,
        role: Role,
        input: UpdateAccountInput,
    ) -> Result<Account, ApiError> {
        if identity.role != role {
            return Err(ApiError::Unauthorized);
        }
        if input.first_name.is_none() && input.last_name.is_none() && input.phone.is_none() {
            return Err(ApiError::Validation("nothing to update".into()));
        }
        if let Some(ref name) = input.first_name {
            if !validate_name(name) {
                return Err(ApiError::Validation("invalid first name".into()));
            }
        }
        if let Some(ref name) = input.last_name {
            if !validate_name(name) {
                return Err(ApiError::Validation("invalid last name".into()));
            }
        }
        if let Some(ref phone) = input.phone {
            if !validate_phone(phone) {
                return Err(ApiError::Validation("invalid phone number".into()));
            }
        }

        self.accounts
            .find_by_id(identity.account_id)
            .await?
            .filter(|a| !a.deleted)
            .ok_or(ApiError::NotFound("account"))?;

        self.accounts
            .update_profile(
                identity.account_id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
                input.phone.as_deref(),
            )
            .await?;

        self.accounts
            .find_by_id(identity.account_id)
            .await?
            .ok_or(ApiError::NotFound("account"))
    }
}

pub struct DeleteAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> DeleteAccountUseCase<A> {
    pub async fn execute(&self, identity: Identity, role: Role) -> Result<(), ApiError> {
        if identity.role != role {
            return Err(ApiError::Unauthorized);
        }
        self.accounts
            .find_by_id(identity.account_id)
            .await?
            .filter(|a| !a.deleted)
            .ok_or(ApiError::NotFound("account"))?;
        self.accounts.soft_delete(identity.account_id).await
    }
}
