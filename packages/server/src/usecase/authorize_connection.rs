//! UseCase: WebSocket 接続の許可
//!
//! アップグレード要求に付与されたワンタイムパスワードを検証し、消費します。

use std::sync::Arc;

use crate::domain::{AuthError, CredentialStore};

pub struct AuthorizeConnectionUseCase {
    store: Arc<dyn CredentialStore>,
}

impl AuthorizeConnectionUseCase {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// # Returns
    ///
    /// * `Ok(())` - トークンが有効で、消費された
    /// * `Err(AuthError::MissingOtp)` - トークンが無い、または空
    /// * `Err(AuthError::InvalidOtp)` - 未発行・使用済み・期限切れ
    pub async fn execute(&self, otp: Option<&str>) -> Result<(), AuthError> {
        let otp = otp.filter(|otp| !otp.is_empty()).ok_or(AuthError::MissingOtp)?;
        if self.store.verify_and_consume(otp).await {
            Ok(())
        } else {
            Err(AuthError::InvalidOtp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockCredentialStore;

    #[tokio::test]
    async fn test_missing_otp_is_rejected_without_lookup() {
        // テスト項目: トークンが無い・空の場合はストアを参照せずに拒否
        // given (前提条件):
        let mut store = MockCredentialStore::new();
        store.expect_verify_and_consume().never();
        let usecase = AuthorizeConnectionUseCase::new(Arc::new(store));

        // when (操作):
        let missing = usecase.execute(None).await;
        let empty = usecase.execute(Some("")).await;

        // then (期待する結果):
        assert_eq!(missing, Err(AuthError::MissingOtp));
        assert_eq!(empty, Err(AuthError::MissingOtp));
    }

    #[tokio::test]
    async fn test_valid_otp_is_accepted() {
        // given (前提条件):
        let mut store = MockCredentialStore::new();
        store
            .expect_verify_and_consume()
            .withf(|key| key == "abc")
            .times(1)
            .return_const(true);
        let usecase = AuthorizeConnectionUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute(Some("abc")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_unknown_otp_is_rejected() {
        // given (前提条件):
        let mut store = MockCredentialStore::new();
        store.expect_verify_and_consume().return_const(false);
        let usecase = AuthorizeConnectionUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute(Some("abc")).await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::InvalidOtp));
    }
}
