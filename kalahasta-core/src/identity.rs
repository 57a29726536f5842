use std::collections::HashMap;
use std::sync::Arc;

use kalahasta_shared::pii::{redact_email, Masked};
use kalahasta_shared::keys;
use tokio::sync::Mutex;

use crate::repository::{load_collection, load_record, save_collection, save_record, KeyedStore, StoreError};
use crate::user::{NewUser, ProfileUpdate, Session, User};

/// Source of one-time codes
pub trait OtpGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Six-digit codes in `100000..=999999`
pub struct RandomOtp;

impl OtpGenerator for RandomOtp {
    fn generate(&self) -> String {
        use rand::Rng;
        rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
    }
}

/// Always issues the same code. Handy for demos and tests.
pub struct FixedOtp(pub String);

impl OtpGenerator for FixedOtp {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Proof that a code was "sent". No real delivery happens; the code is handed
/// back so the caller can show it.
#[derive(Debug, Clone)]
pub struct OtpReceipt {
    pub email: Masked<String>,
    pub mobile: Option<Masked<String>>,
    pub code: Masked<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid or expired one-time code")]
    InvalidOtp,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Accounts and the current session, persisted in a keyed store.
pub struct IdentityStore {
    store: Arc<dyn KeyedStore>,
    otp: Box<dyn OtpGenerator>,
    pending: Mutex<HashMap<String, Masked<String>>>,
}

impl IdentityStore {
    pub fn new(store: Arc<dyn KeyedStore>, otp: Box<dyn OtpGenerator>) -> Self {
        Self {
            store,
            otp,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a code for `email`, replacing any code still pending for it.
    pub async fn send_otp(&self, email: &str, mobile: Option<&str>) -> OtpReceipt {
        let code = Masked(self.otp.generate());
        self.pending.lock().await.insert(email.to_string(), code.clone());

        tracing::info!("One-time code sent to {}", redact_email(email));

        OtpReceipt {
            email: Masked(email.to_string()),
            mobile: mobile.map(|m| Masked(m.to_string())),
            code,
        }
    }

    pub async fn create_account(&self, new_user: NewUser, otp: &str) -> Result<Session, IdentityError> {
        self.verify_otp(&new_user.email, otp).await?;
        validate_new_user(&new_user)?;

        let mut users = self.users().await?;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(IdentityError::EmailTaken(redact_email(&new_user.email)));
        }

        let user = new_user.into_user();
        users.push(user.clone());
        save_collection(self.store.as_ref(), keys::USERS, &users).await?;
        save_record(self.store.as_ref(), keys::SESSION, &user).await?;

        self.consume_otp(&user.email).await;
        tracing::info!("Account created for {} ({})", user.id, user.primary_craft);

        Ok(Session::new(user))
    }

    /// Sign in by email alone. There are no stored passwords.
    pub async fn login(&self, email: &str) -> Result<Session, IdentityError> {
        let user = self.find_by_email(email).await?;
        save_record(self.store.as_ref(), keys::SESSION, &user).await?;

        tracing::info!("User {} signed in", user.id);
        Ok(Session::new(user))
    }

    pub async fn login_with_otp(&self, email: &str, otp: &str) -> Result<Session, IdentityError> {
        self.verify_otp(email, otp).await?;
        let session = self.login(email).await?;
        self.consume_otp(email).await;
        Ok(session)
    }

    /// Pick up a session persisted by an earlier run.
    pub async fn restore_session(&self) -> Result<Option<Session>, IdentityError> {
        let user: Option<User> = load_record(self.store.as_ref(), keys::SESSION).await?;
        Ok(user.map(Session::new))
    }

    pub async fn logout(&self) -> Result<(), IdentityError> {
        self.store.remove(keys::SESSION).await?;
        Ok(())
    }

    pub async fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<Session, IdentityError> {
        let updated = session.user().merge(update);
        validate_user(&updated)?;

        let mut users = self.users().await?;
        if users.iter().any(|u| u.id != updated.id && u.email == updated.email) {
            return Err(IdentityError::EmailTaken(redact_email(&updated.email)));
        }
        let entry = users
            .iter_mut()
            .find(|u| u.id == updated.id)
            .ok_or_else(|| IdentityError::UserNotFound(updated.id.to_string()))?;
        *entry = updated.clone();

        save_collection(self.store.as_ref(), keys::USERS, &users).await?;
        save_record(self.store.as_ref(), keys::SESSION, &updated).await?;

        tracing::info!("Profile updated for {}", updated.id);
        Ok(Session::new(updated))
    }

    /// Remove the account and every collection stored for it.
    pub async fn delete_account(&self, session: Session) -> Result<(), IdentityError> {
        let user_id = session.user().id;

        let mut users = self.users().await?;
        users.retain(|u| u.id != user_id);
        save_collection(self.store.as_ref(), keys::USERS, &users).await?;
        self.store.remove(keys::SESSION).await?;

        for key in keys::user_scoped(user_id) {
            self.store.remove(&key).await?;
        }

        tracing::info!("Account {} deleted", user_id);
        Ok(())
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        load_collection(self.store.as_ref(), keys::USERS).await
    }

    async fn find_by_email(&self, email: &str) -> Result<User, IdentityError> {
        self.users()
            .await?
            .into_iter()
            .find(|u| u.email == email)
            .ok_or_else(|| IdentityError::UserNotFound(redact_email(email)))
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), IdentityError> {
        let pending = self.pending.lock().await;
        match pending.get(email) {
            Some(code) if code.expose() == otp => Ok(()),
            _ => {
                tracing::warn!("Rejected one-time code for {}", redact_email(email));
                Err(IdentityError::InvalidOtp)
            }
        }
    }

    async fn consume_otp(&self, email: &str) {
        self.pending.lock().await.remove(email);
    }
}

fn validate_new_user(new_user: &NewUser) -> Result<(), IdentityError> {
    require("fullName", &new_user.full_name)?;
    require_email(&new_user.email)?;
    require("primaryCraft", &new_user.primary_craft)
}

fn validate_user(user: &User) -> Result<(), IdentityError> {
    require("fullName", &user.full_name)?;
    require_email(&user.email)?;
    require("primaryCraft", &user.primary_craft)
}

fn require(field: &str, value: &str) -> Result<(), IdentityError> {
    if value.trim().is_empty() {
        return Err(IdentityError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), IdentityError> {
    require("email", email)?;
    if !email.contains('@') {
        return Err(IdentityError::Validation("email is not valid".to_string()));
    }
    Ok(())
}

/// Password form check. Nothing is stored; this only validates the form.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current: Masked<String>,
    pub new: Masked<String>,
    pub confirm: Masked<String>,
}

impl PasswordChange {
    pub const MIN_LENGTH: usize = 6;

    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.new.expose() != self.confirm.expose() {
            return Err(IdentityError::Validation("New passwords do not match".to_string()));
        }
        if self.new.expose().chars().count() < Self::MIN_LENGTH {
            return Err(IdentityError::Validation(format!(
                "Password must be at least {} characters long",
                Self::MIN_LENGTH
            )));
        }
        Ok(())
    }
}
