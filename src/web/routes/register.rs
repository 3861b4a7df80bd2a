use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    email_client::MessageStream,
    web::{
        data::{DataParsingError, EmailAddress, RegisterPayload},
        Error, WebResult,
    },
    AppState,
};

/// Handles `POST /register`.
///
/// The body is taken as raw bytes and parsed by hand: a body that is not valid
/// JSON is an opaque internal error (500), while a JSON body without a usable
/// `email` is a validation failure (400). Persisting always happens before the
/// welcome send; if the write fails no email goes out.
#[tracing::instrument(name = "Registering new user", skip(app_state, body))]
pub async fn register(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Json<Value>> {
    let payload: RegisterPayload = serde_json::from_slice(&body)?;

    let email = payload.email.ok_or(DataParsingError::EmailMissing)?;
    let email = EmailAddress::parse(email)?;

    insert_user(&app_state, &email).await?;

    if app_state.send_welcome {
        send_welcome_email(&app_state, &email).await?;
        Ok(Json(
            json!({ "message": "Successfully registered and email sent!" }),
        ))
    } else {
        Ok(Json(json!({ "message": "Successfully registered!" })))
    }
}

/// Answers the CORS preflight without touching any business logic.
/// The CORS headers themselves are attached by the response mapper.
pub async fn register_preflight() -> &'static str {
    "OK"
}

/// Any method other than OPTIONS / POST.
pub async fn register_fallback() -> WebResult<()> {
    Err(Error::MethodNotAllowed)
}

/// Writes one registration record.
/// The email address is the natural key: registering the same address again is
/// a no-op on the table and still reports success to the caller.
#[tracing::instrument(name = "Saving registered email to the database", skip(app_state))]
async fn insert_user(app_state: &AppState, email: &EmailAddress) -> WebResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (email_address)
        VALUES ($1)
        ON CONFLICT (email_address) DO NOTHING
    "#,
    )
    .bind(email.as_ref())
    .execute(app_state.database_mgr.db())
    .await?;

    Ok(())
}

#[tracing::instrument(name = "Sending welcome email", skip(app_state))]
async fn send_welcome_email(app_state: &AppState, email: &EmailAddress) -> WebResult<()> {
    let text_email = app_state
        .templ_mgr
        .render_welcome_email(&app_state.relay_domain)?;

    app_state
        .email_client
        .send_email(
            email,
            "Welcome to GeniML!",
            text_email.as_str(),
            MessageStream::Outbound,
        )
        .await?;

    info!("SUCCESS");
    Ok(())
}
