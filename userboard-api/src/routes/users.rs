/// User endpoints
///
/// - `GET /` - HTML page listing every user, with an add-user form
/// - `POST /add_user` - Add a user from form fields `name` and `email`
///
/// Storage goes through [`UserStore`](userboard_shared::db::store::UserStore).
/// The MySQL store opens its own connection per request, runs exactly one
/// statement and closes the connection again.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::page::render_users_page,
};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use userboard_shared::models::user::NewUser;
use validator::Validate;

/// Add-user form
///
/// Read from `application/x-www-form-urlencoded` or `multipart/form-data`
/// bodies. When a field is repeated the first value wins. Both fields must
/// be present and non-empty. No other checks are made.
#[derive(Debug, Default, Validate)]
pub struct AddUserForm {
    /// Display name
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    /// Email address
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
}

impl AddUserForm {
    /// Collects `name` and `email` from decoded form fields
    ///
    /// Unknown fields are ignored. A repeated field keeps its first value.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in fields {
            let slot = match key.as_ref() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        form
    }

    /// Validates the form and converts it into insert data
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingFields` if either field is missing or empty.
    pub fn into_new_user(self) -> ApiResult<NewUser> {
        self.validate()?;

        match (self.name, self.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            _ => Err(ApiError::MissingFields),
        }
    }
}

/// Reads the form from either supported encoding
///
/// Any body that cannot be read as form data yields no fields, which
/// surfaces as `ApiError::MissingFields`.
#[axum::async_trait]
impl<S> FromRequest<S> for AddUserForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(unreadable)?;
            return Ok(Self::from_fields(fields));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(unreadable)?;
        let mut fields = Vec::new();
        while let Some(field) = multipart.next_field().await.map_err(unreadable)? {
            // File uploads are not form values
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(unreadable)?;
            fields.push((name, value));
        }

        Ok(Self::from_fields(fields))
    }
}

fn unreadable(err: impl fmt::Display) -> ApiError {
    tracing::debug!(error = %err, "Unreadable add_user form");
    ApiError::MissingFields
}

/// Add-user success response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Renders the user listing page
///
/// # Errors
///
/// - `500 Internal Server Error`: plain-text `Database Error: <message>`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| ApiError::from(e).into_page())?;

    tracing::debug!(count = users.len(), "Rendering user list");
    Ok(Html(render_users_page(&users)))
}

/// Adds a user
///
/// # Endpoint
///
/// ```text
/// POST /add_user
/// Content-Type: application/x-www-form-urlencoded
///
/// name=Alice&email=alice%40example.com
/// ```
///
/// `multipart/form-data` bodies with the same fields are accepted too.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "User added successfully" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `{"error": "Name and email are required"}`. A body
///   that is not form data counts as missing fields.
/// - `500 Internal Server Error`: `{"error": "<message>"}`
pub async fn add_user(
    State(state): State<AppState>,
    form: AddUserForm,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let new_user = form.into_new_user()?;
    let id = state.store.add_user(new_user).await?;

    tracing::info!(user_id = id, "User added");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User added successfully".to_string(),
        }),
    ))
}
