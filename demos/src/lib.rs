//! A virtual user that keeps fetching the web root, once per second.
use stampede::prelude::*;

/// Fetch `/`. Status codes are left to the session to record.
#[task]
pub async fn index<S: Session>(session: &S) -> Result<(), TransportError> {
    session.get("/").await?;
    Ok(())
}

pub fn web_user<S: Session>() -> Result<UserBehavior<S>, ConfigError> {
    UserBehavior::builder("WebUser")
        .wait_time(WaitPolicy::between_secs(1., 1.)?)
        .task(index())
        .build()
}
