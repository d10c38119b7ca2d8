//! Mock identity commands.

use secrecy::SecretString;

use mycart_storefront::{AppError, AppState};

/// # Errors
///
/// Returns `AppError::Auth` for a malformed email or a storage failure.
pub async fn sign_in(state: &mut AppState, email: &str, password: String) -> Result<String, AppError> {
    let password = SecretString::from(password);
    let user = state.auth_mut().sign_in(email, &password).await?;
    Ok(format!("Signed in as {} <{}>", user.name, user.email))
}

/// # Errors
///
/// Returns `AppError::Auth` for a malformed email, a blank name, or a
/// storage failure.
pub async fn sign_up(
    state: &mut AppState,
    email: &str,
    password: String,
    name: &str,
) -> Result<String, AppError> {
    let password = SecretString::from(password);
    let user = state.auth_mut().sign_up(email, &password, name).await?;
    Ok(format!("Welcome, {}! Signed in as {}", user.name, user.email))
}

/// # Errors
///
/// Returns `AppError::Auth` if the identity cannot be persisted.
pub async fn google(state: &mut AppState) -> Result<String, AppError> {
    let user = state.auth_mut().sign_in_with_google().await?;
    Ok(format!("Signed in as {} <{}>", user.name, user.email))
}

pub fn sign_out(state: &mut AppState) -> String {
    state.auth_mut().sign_out();
    "Signed out".to_string()
}

pub fn whoami(state: &AppState) -> String {
    state.auth().current_user().map_or_else(
        || "Not signed in".to_string(),
        |user| {
            let initial = user.initial().unwrap_or('?');
            format!("[{initial}] {} <{}> ({})", user.name, user.email, user.id)
        },
    )
}
