//! Export and server configuration.

use serde::{Deserialize, Serialize};
use std::env;
use time::{Date, OffsetDateTime};

/// Fixed values written into the file header and trailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Three-column organization code following every record tag.
    pub organization_code: String,
    pub format_version: String,
    /// `02` is a meet entries file.
    pub file_code: String,
    pub file_description: String,
    pub software_name: String,
    pub software_version: String,
    pub contact_name: String,
    pub contact_phone: String,
    /// Meet-type code for the meet header; `1` is an invitational.
    pub meet_type: char,
    /// Creation date for the file header; today (UTC) when unset.
    pub created_on: Option<Date>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            organization_code: "USS".to_string(),
            format_version: "V3".to_string(),
            file_code: "02".to_string(),
            file_description: "Meet Entries".to_string(),
            software_name: "meetfile".to_string(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_name: String::new(),
            contact_phone: String::new(),
            meet_type: '1',
            created_on: None,
        }
    }
}

impl ExportOptions {
    /// Defaults overlaid with `MEETFILE_ORG_CODE`, `MEETFILE_CONTACT_NAME` and
    /// `MEETFILE_CONTACT_PHONE`.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(code) = env::var("MEETFILE_ORG_CODE") {
            options.organization_code = code;
        }
        if let Ok(name) = env::var("MEETFILE_CONTACT_NAME") {
            options.contact_name = name;
        }
        if let Ok(phone) = env::var("MEETFILE_CONTACT_PHONE") {
            options.contact_phone = phone;
        }
        options
    }

    pub fn creation_date(&self) -> Date {
        self.created_on
            .unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub export: ExportOptions,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 3001;

    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://docker:pg@0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_PORT);

        Self {
            database_url,
            port,
            export: ExportOptions::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.organization_code, "USS");
        assert_eq!(options.file_code, "02");
        assert!(options.created_on.is_none());
    }

    #[test]
    fn test_fixed_creation_date() {
        let options = ExportOptions {
            created_on: Some(date!(2024 - 01 - 02)),
            ..Default::default()
        };
        assert_eq!(options.creation_date(), date!(2024 - 01 - 02));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"contact_name":"Coach Kim","created_on":"2024-05-01"}"#)
                .unwrap();
        assert_eq!(options.contact_name, "Coach Kim");
        assert_eq!(options.organization_code, "USS");
        assert_eq!(options.created_on, Some(date!(2024 - 05 - 01)));
    }
}
