use actix_web::HttpRequest;
use secrecy::Secret;

use crate::inbound::http::errors::AppError;

pub struct BasicCredentials {
    pub username: String,
    pub password: Secret<String>,
}

pub fn basic_authentication(request: &HttpRequest) -> Result<BasicCredentials, AppError> {
    let headers = request.headers();
    let header_value = headers
        .get("Authorization")
        .ok_or(AppError::AuthError(
            "The 'Authorization' header is missing".to_string(),
        ))?
        .to_str()
        .map_err(|e| AppError::AuthError(e.to_string()))?;
    let base64encoded_segment = header_value
        .strip_prefix("Basic ")
        .ok_or(AppError::AuthError(
            "The authorization scheme was not 'Basic'".to_string(),
        ))?;
    let decoded_bytes =
        base64::decode_config(base64encoded_segment, base64::STANDARD).map_err(|_| {
            AppError::AuthError("Failed to base64-decode 'Basic' credentials".to_string())
        })?;
    let decoded_credentials = String::from_utf8(decoded_bytes).map_err(|_| {
        AppError::AuthError("The decoded credential string is not valid UTF8.".to_string())
    })?;

    let (username, password) = decoded_credentials.split_once(':').ok_or_else(|| {
        AppError::AuthError("A password must be provided in 'Basic' auth.".to_string())
    })?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: Secret::new(password.to_string()),
    })
}
