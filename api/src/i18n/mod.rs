//! Localized error message catalog.
//!
//! Messages live in `i18n/error_messages.toml`, loaded at startup; the
//! compiled-in copy is the fallback when the file is not deployed next
//! to the binary. Responses are localized from the `Accept-Language`
//! header, defaulting to English.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use signet_shared::types::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub en: String,
    pub zh: String,
    pub code: String,
    pub http_status: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessages {
    pub auth: HashMap<String, ErrorMessage>,
    pub token: HashMap<String, ErrorMessage>,
    pub validation: HashMap<String, ErrorMessage>,
    pub general: HashMap<String, ErrorMessage>,
}

pub static ERROR_MESSAGES: Lazy<ErrorMessages> =
    Lazy::new(|| load_error_messages().expect("Failed to load error messages"));

fn load_error_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    let config_path = Path::new("i18n/error_messages.toml");

    if config_path.exists() {
        let content = fs::read_to_string(config_path)?;
        let messages: ErrorMessages = toml::from_str(&content)?;
        Ok(messages)
    } else {
        load_default_messages()
    }
}

fn load_default_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    let default_config = include_str!("../../i18n/error_messages.toml");
    let messages: ErrorMessages = toml::from_str(default_config)?;
    Ok(messages)
}

/// Look up a message by category and key, returning the client-facing
/// error code, localized text, and HTTP status.
pub fn get_error_message(category: &str, key: &str, lang: Language) -> Option<(String, String, u16)> {
    let messages = &*ERROR_MESSAGES;

    let category_map = match category {
        "auth" => &messages.auth,
        "token" => &messages.token,
        "validation" => &messages.validation,
        "general" => &messages.general,
        _ => return None,
    };

    category_map.get(key).map(|msg| {
        let text = match lang {
            Language::English => msg.en.clone(),
            Language::Chinese => msg.zh.clone(),
        };
        (msg.code.clone(), text, msg.http_status)
    })
}

/// Substitute `{name}` placeholders in a message template.
pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
