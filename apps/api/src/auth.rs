use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

/// Caller role as asserted by the upstream identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    JobSeeker,
    Employer,
}

impl Role {
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Job Seeker" => Some(Role::JobSeeker),
            "Employer" => Some(Role::Employer),
            _ => None,
        }
    }
}

/// The authenticated caller, extracted from gateway-injected headers.
///
/// The identity provider in front of this service authenticates the session
/// and forwards `x-user-id`, `x-user-name`, `x-user-email` and `x-user-role`.
/// This service trusts those headers; it never sees credentials.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthedUser {
    /// Rejects callers whose role does not match the operation.
    pub fn require_role(&self, role: Role, message: &str) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Validation(message.to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let id = header("x-user-id")
            .and_then(|v| Uuid::parse_str(&v).ok())
            .ok_or(AppError::Unauthorized)?;
        let role = header("x-user-role")
            .and_then(|v| Role::parse(&v))
            .ok_or(AppError::Unauthorized)?;
        let name = header("x-user-name").ok_or(AppError::Unauthorized)?;
        let email = header("x-user-email").ok_or(AppError::Unauthorized)?;

        Ok(AuthedUser {
            id,
            name,
            email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_role_parse_known_values() {
        assert_eq!(Role::parse("Job Seeker"), Some(Role::JobSeeker));
        assert_eq!(Role::parse("Employer"), Some(Role::Employer));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[tokio::test]
    async fn test_extracts_full_identity() {
        let id = Uuid::new_v4();
        let mut parts = parts_with_headers(&[
            ("x-user-id", &id.to_string()),
            ("x-user-name", "Asha Rao"),
            ("x-user-email", "asha@example.com"),
            ("x-user-role", "Job Seeker"),
        ]);

        let user = AuthedUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Asha Rao");
        assert_eq!(user.role, Role::JobSeeker);
    }

    #[tokio::test]
    async fn test_missing_headers_rejected() {
        let mut parts = parts_with_headers(&[("x-user-name", "Asha Rao")]);
        let err = AuthedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_malformed_user_id_rejected() {
        let mut parts = parts_with_headers(&[
            ("x-user-id", "not-a-uuid"),
            ("x-user-name", "Asha Rao"),
            ("x-user-email", "asha@example.com"),
            ("x-user-role", "Employer"),
        ]);
        let err = AuthedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let mut parts = parts_with_headers(&[
            ("x-user-id", &Uuid::new_v4().to_string()),
            ("x-user-name", "Asha Rao"),
            ("x-user-email", "asha@example.com"),
            ("x-user-role", "Recruiter"),
        ]);
        let err = AuthedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_require_role_mismatch_is_validation_error() {
        let user = AuthedUser {
            id: Uuid::new_v4(),
            name: "E".to_string(),
            email: "e@example.com".to_string(),
            role: Role::Employer,
        };
        assert!(user.require_role(Role::Employer, "nope").is_ok());
        let err = user
            .require_role(Role::JobSeeker, "Employer not allowed to access this resource.")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
