//! Kakao integration service
//!
//! Two concerns: building the OAuth authorize URL the login entry point
//! hands to the provider, and the "memo to self" message API used by the
//! notification center's test-send. Identity verification itself happens
//! between the provider and the backend; this client never sees a secret.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::utils::errors::{KakaoError, KakaoResult, MatchBuddyError, Result};

const OAUTH_SCOPE: &str = "profile_nickname profile_image";
const STATE_NONCE_LEN: usize = 32;

/// Kakao OAuth and messaging service
#[derive(Clone)]
pub struct KakaoService {
    client: Client,
    config: crate::config::KakaoConfig,
    enabled: bool,
}

impl KakaoService {
    /// Create a new KakaoService instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.kakao.timeout_seconds))
            .user_agent(concat!("MatchBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MatchBuddyError::Http)?;

        Ok(Self {
            client,
            config: settings.kakao.clone(),
            enabled: settings.features.kakao_messaging,
        })
    }

    /// Check if Kakao messaging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Generate a random alphanumeric state nonce for the OAuth round trip
    fn generate_state_nonce() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                abcdefghijklmnopqrstuvwxyz\
                                0123456789";
        let mut rng = rand::thread_rng();

        (0..STATE_NONCE_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    /// Build the authorize URL for the login entry point. Returns the URL
    /// and the state nonce the caller must check on callback.
    pub fn authorize_url(&self) -> (String, String) {
        let state = Self::generate_state_nonce();
        let url = format!(
            "{}/oauth/authorize?client_id={}&redirect_uri={}&response_type=code&scope={}&prompt=login&state={}",
            self.config.auth_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(OAUTH_SCOPE),
            state,
        );

        debug!(state = %state, "Authorize URL built");
        (url, state)
    }

    /// Kakao "text" template object for a message with a vote link button
    pub fn text_template(message: &str, link_url: &str) -> String {
        json!({
            "object_type": "text",
            "text": message,
            "link": {
                "web_url": link_url,
                "mobile_web_url": link_url,
            },
            "button_title": "투표 하러 가기 ⚽",
        })
        .to_string()
    }

    /// Send a text message to the owner of `access_token` via the memo API
    pub async fn send_text_to_me(
        &self,
        access_token: &str,
        message: &str,
        link_url: &str,
    ) -> KakaoResult<()> {
        if access_token.is_empty() {
            return Err(KakaoError::SessionExpired);
        }

        let url = format!(
            "{}/v2/api/talk/memo/default/send",
            self.config.api_url.trim_end_matches('/')
        );
        let template_object = Self::text_template(message, link_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .form(&[("template_object", template_object.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    KakaoError::Timeout
                } else {
                    KakaoError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Kakao memo send failed");
            return Err(KakaoError::SendFailed(format!("HTTP {status}: {body}")));
        }

        debug!("Kakao memo sent");
        Ok(())
    }
}

impl std::fmt::Debug for KakaoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoService")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> KakaoService {
        let mut settings = Settings::default();
        settings.kakao.client_id = "client-key".to_string();
        KakaoService::new(&settings).unwrap()
    }

    #[test]
    fn test_authorize_url_carries_scope_and_state() {
        let kakao = service();
        let (url, state) = kakao.authorize_url();

        assert!(url.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(url.contains("client_id=client-key"));
        assert!(url.contains("scope=profile_nickname%20profile_image"));
        assert!(url.contains(&format!("state={state}")));
        assert_eq!(state.len(), STATE_NONCE_LEN);
    }

    #[test]
    fn test_state_nonces_are_unique() {
        let a = KakaoService::generate_state_nonce();
        let b = KakaoService::generate_state_nonce();
        assert_ne!(a, b);
    }

    #[test]
    fn test_text_template_shape() {
        let template = KakaoService::text_template("투표해주세요!", "https://club.example/matches/3");
        let value: serde_json::Value = serde_json::from_str(&template).unwrap();
        assert_eq!(value["object_type"], "text");
        assert_eq!(value["text"], "투표해주세요!");
        assert_eq!(value["link"]["web_url"], "https://club.example/matches/3");
    }
}
