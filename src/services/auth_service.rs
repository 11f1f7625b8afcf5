use crate::config::AdminAccount;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest};
use crate::utils::{ADMIN_CAPABILITY, JwtService, verify_password};

/// 后台管理员登录 (账号来自配置)
#[derive(Clone)]
pub struct AuthService {
    accounts: Vec<AdminAccount>,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(accounts: Vec<AdminAccount>, jwt_service: JwtService) -> Self {
        Self {
            accounts,
            jwt_service,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let invalid = || AppError::AuthError("Invalid username or password".to_string());

        let account = self
            .accounts
            .iter()
            .find(|a| a.username == request.username.trim())
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &account.password_hash)? {
            log::warn!("Failed admin login for {}", account.username);
            return Err(invalid());
        }

        let access_token = self
            .jwt_service
            .generate_access_token(&account.username, &[ADMIN_CAPABILITY])?;

        log::info!("Admin {} logged in", account.username);

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        let account = AdminAccount {
            username: "admin".into(),
            password_hash: bcrypt::hash("Password123", 4).unwrap(),
        };
        AuthService::new(vec![account], JwtService::new("secret", 3600))
    }

    #[actix_web::test]
    async fn test_login_issues_admin_token() {
        let jwt = JwtService::new("secret", 3600);
        let resp = service()
            .login(LoginRequest {
                username: "admin".into(),
                password: "Password123".into(),
            })
            .await
            .unwrap();
        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(resp.expires_in, 3600);

        let claims = jwt.verify_access_token(&resp.access_token).unwrap();
        assert!(claims.has_capability(ADMIN_CAPABILITY));
    }

    #[actix_web::test]
    async fn test_login_rejects_bad_credentials() {
        let wrong_password = service()
            .login(LoginRequest {
                username: "admin".into(),
                password: "nope".into(),
            })
            .await;
        assert!(matches!(wrong_password, Err(AppError::AuthError(_))));

        let unknown_user = service()
            .login(LoginRequest {
                username: "root".into(),
                password: "Password123".into(),
            })
            .await;
        assert!(matches!(unknown_user, Err(AppError::AuthError(_))));
    }
}
