//! InMemory CredentialStore 実装
//!
//! トークンは `Mutex<HashMap>` に保持します。発行・検証・期限切れ削除は
//! すべて同じロックを取るため、キーの出現と消滅は原子的に見えます。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use relay_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{CredentialStore, Otp};

pub struct InMemoryCredentialStore {
    /// Key: Otp.key
    otps: Mutex<HashMap<String, Otp>>,
    retention: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryCredentialStore {
    /// 新しい InMemoryCredentialStore を作成
    ///
    /// # Arguments
    ///
    /// * `retention` - 発行からこの時間を過ぎたトークンは期限切れ
    /// * `clock` - 発行時刻と期限判定に使う時計
    pub fn new(retention: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            otps: Mutex::new(HashMap::new()),
            retention,
            clock,
        }
    }

    /// 保持中のトークン数
    pub async fn len(&self) -> usize {
        self.otps.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.otps.lock().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn issue(&self) -> Otp {
        let otp = Otp::generate(self.clock.now_millis());
        let mut otps = self.otps.lock().await;
        otps.insert(otp.key.clone(), otp.clone());
        tracing::debug!("Issued one-time password ({} outstanding)", otps.len());
        otp
    }

    async fn verify_and_consume(&self, key: &str) -> bool {
        let mut otps = self.otps.lock().await;
        otps.remove(key).is_some()
    }

    async fn remove_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut otps = self.otps.lock().await;
        let before = otps.len();
        otps.retain(|_, otp| !otp.is_expired(now, self.retention));
        before - otps.len()
    }
}
