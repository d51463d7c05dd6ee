use crate::error::AuthError;

/// Pulls the bearer token out of the `Authorization` header.
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        tracing::trace!("no Authorization header provided");
        return Err(AuthError::NoAccessTokenProvided);
    };

    let parts = auth_header.split("Bearer ").collect::<Vec<&str>>();
    if parts.len() != 2 || parts[1].is_empty() {
        return Err(AuthError::InvalidAuthorizationHeaderFormat);
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthError::NoAccessTokenProvided)
        ));
    }

    #[test]
    fn malformed_header_is_an_error() {
        for value in ["abc.def.ghi", "Basic abc", "Bearer "] {
            assert!(matches!(
                extract_bearer_token(&headers_with(value)),
                Err(AuthError::InvalidAuthorizationHeaderFormat)
            ));
        }
    }
}
