//! Vendor credential types
//!
//! All vendor key material lives in a single mutable row per tenant.
//! Responses never carry full secrets; `masked()` reduces every secret
//! to its last four characters.

use serde::{Deserialize, Serialize};

use crate::constants::SECRET_VISIBLE_CHARS;

/// SMS/voice vendor account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingCredentials {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number for SMS
    pub sms_number: String,
    /// Caller number for outbound voice
    pub voice_number: String,
}

/// WhatsApp Business API account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppCredentials {
    pub access_token: String,
    pub phone_number_id: String,
}

/// Satellite imagery vendor OAuth client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Mapping provider key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsCredentials {
    pub api_key: String,
}

/// Conversational voice agent vendor key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAiCredentials {
    pub api_key: String,
}

/// Carbon registry key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCredentials {
    pub api_key: String,
    pub registry_url: Option<String>,
}

/// Full vendor credential set for a tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorCredentials {
    pub messaging: Option<MessagingCredentials>,
    pub whatsapp: Option<WhatsAppCredentials>,
    pub satellite: Option<SatelliteCredentials>,
    pub maps: Option<MapsCredentials>,
    pub voice_ai: Option<VoiceAiCredentials>,
    pub registry: Option<RegistryCredentials>,
}

/// Mask a secret to its trailing characters
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let visible = secret
        .char_indices()
        .rev()
        .nth(SECRET_VISIBLE_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("****{}", &secret[visible..])
}

impl VendorCredentials {
    /// Copy with every secret field masked, safe to return over the API
    pub fn masked(&self) -> Self {
        Self {
            messaging: self.messaging.as_ref().map(|m| MessagingCredentials {
                account_sid: m.account_sid.clone(),
                auth_token: mask_secret(&m.auth_token),
                sms_number: m.sms_number.clone(),
                voice_number: m.voice_number.clone(),
            }),
            whatsapp: self.whatsapp.as_ref().map(|w| WhatsAppCredentials {
                access_token: mask_secret(&w.access_token),
                phone_number_id: w.phone_number_id.clone(),
            }),
            satellite: self.satellite.as_ref().map(|s| SatelliteCredentials {
                client_id: s.client_id.clone(),
                client_secret: mask_secret(&s.client_secret),
            }),
            maps: self.maps.as_ref().map(|m| MapsCredentials {
                api_key: mask_secret(&m.api_key),
            }),
            voice_ai: self.voice_ai.as_ref().map(|v| VoiceAiCredentials {
                api_key: mask_secret(&v.api_key),
            }),
            registry: self.registry.as_ref().map(|r| RegistryCredentials {
                api_key: mask_secret(&r.api_key),
                registry_url: r.registry_url.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(mask_secret("sk_live_abcdef1234"), "****1234");
        assert_eq!(mask_secret(""), "");
        // Short secrets are not revealed in full beyond what exists
        assert_eq!(mask_secret("ab"), "****ab");
    }

    #[test]
    fn test_masked_credentials_hide_secrets() {
        let creds = VendorCredentials {
            messaging: Some(MessagingCredentials {
                account_sid: "AC123".to_string(),
                auth_token: "super_secret_token".to_string(),
                sms_number: "+15550001111".to_string(),
                voice_number: "+15550002222".to_string(),
            }),
            maps: Some(MapsCredentials {
                api_key: "maps_key_9876".to_string(),
            }),
            ..Default::default()
        };
        let masked = creds.masked();
        let messaging = masked.messaging.unwrap();
        assert_eq!(messaging.auth_token, "****oken");
        assert_eq!(messaging.account_sid, "AC123");
        assert_eq!(masked.maps.unwrap().api_key, "****9876");
    }
}
