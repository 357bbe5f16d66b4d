//! In-memory integration tests for account storage and sessions.

use chrono::TimeDelta;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskgate::auth::{
    adapters::memory::InMemoryUserRepository,
    domain::{Email, Role},
    ports::UserRepository,
    services::{AuthError, AuthService, Credentials, SessionTokens},
};

type TestAuth = AuthService<InMemoryUserRepository, DefaultClock>;

struct AuthHarness {
    repository: Arc<InMemoryUserRepository>,
    service: TestAuth,
}

#[fixture]
fn auth() -> AuthHarness {
    let repository = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(DefaultClock);
    let tokens = SessionTokens::new(b"integration-secret", TimeDelta::hours(1), Arc::clone(&clock));
    let service = AuthService::new(Arc::clone(&repository), tokens, clock)
        .with_admin_emails([Email::new("boss@example.com").expect("valid email")]);
    AuthHarness {
        repository,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_accounts_can_sign_in(auth: AuthHarness) -> eyre::Result<()> {
    let account = auth
        .service
        .register(Credentials::new("Worker@Example.com", "hunter22"))
        .await?;
    let stored = auth
        .repository
        .find_by_email(&Email::new("worker@example.com")?)
        .await?
        .ok_or_else(|| eyre::eyre!("account was not stored"))?;
    eyre::ensure!(stored.id() == account.id());
    eyre::ensure!(stored.role() == Role::User);

    let issued = auth
        .service
        .login(Credentials::new("worker@example.com", "hunter22"))
        .await?;
    let principal = auth.service.authenticate(issued.token())?;
    eyre::ensure!(principal.id() == account.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_admin_email_gets_admin_role(auth: AuthHarness) -> eyre::Result<()> {
    auth.service
        .register(Credentials::new("boss@example.com", "hunter22"))
        .await?;
    let issued = auth
        .service
        .login(Credentials::new("boss@example.com", "hunter22"))
        .await?;
    eyre::ensure!(auth.service.authenticate(issued.token())?.is_admin());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected(auth: AuthHarness) -> eyre::Result<()> {
    auth.service
        .register(Credentials::new("worker@example.com", "hunter22"))
        .await?;
    let result = auth
        .service
        .login(Credentials::new("worker@example.com", "hunter23"))
        .await;
    eyre::ensure!(matches!(result, Err(AuthError::InvalidCredentials)));
    Ok(())
}
