//! UseCase: ログインとワンタイムパスワード発行
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証に成功するとトークンが発行される
//! - 異常系：認証に失敗するとトークンは発行されない

use std::sync::Arc;

use crate::domain::{AuthError, Authenticator, CredentialStore, Otp};

pub struct IssueCredentialUseCase {
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn CredentialStore>,
}

impl IssueCredentialUseCase {
    pub fn new(authenticator: Arc<dyn Authenticator>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            authenticator,
            store,
        }
    }

    /// 認証に成功した場合のみワンタイムパスワードを発行
    ///
    /// # Returns
    ///
    /// * `Ok(Otp)` - 発行されたトークン
    /// * `Err(AuthError::InvalidCredentials)` - 認証失敗（ストアは変更されない）
    pub async fn execute(&self, username: &str, password: &str) -> Result<Otp, AuthError> {
        if !self.authenticator.authenticate(username, password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(self.store.issue().await)
    }
}
