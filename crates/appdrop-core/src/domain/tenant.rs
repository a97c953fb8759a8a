//! Brand (tenant) domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use appdrop_shared::new_id;
use appdrop_shared::utils::normalize_domain;

/// A brand. `domain` is the unique, lowercase key requests are bound by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub office_address: String,
    pub domain: String,
    pub email: String,

    /// Argon2 PHC string; never sent to clients.
    #[serde(skip_serializing, default)]
    pub credential_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-registration payload for a new brand.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewTenant {
    #[validate(length(min = 1, max = 200, message = "brand name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 63, message = "brand domain is required"))]
    pub domain: String,

    #[validate(
        length(min = 1, message = "brand email is required"),
        email(message = "brand email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "brand password is required"))]
    pub password: String,

    pub office_address: String,

    pub logo: String,
}

const FIELD_ORDER: [&str; 4] = ["name", "domain", "email", "password"];

impl NewTenant {
    /// Trims every field and lowercases the domain key.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            domain: normalize_domain(&self.domain),
            email: self.email.trim().to_string(),
            password: self.password,
            office_address: self.office_address.trim().to_string(),
            logo: self.logo.trim().to_string(),
        }
    }

    /// Validates and reports the first failing field in declaration order.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| first_message(&errors))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl Tenant {
    pub fn from_registration(input: NewTenant, credential_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: input.name,
            logo: input.logo,
            office_address: input.office_address,
            domain: normalize_domain(&input.domain),
            email: input.email,
            credential_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewTenant {
        NewTenant {
            name: " Acme Co ".into(),
            domain: " AcmeCo ".into(),
            email: "owner@acme.test".into(),
            password: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalized_lowercases_domain() {
        let input = input().normalized();
        assert_eq!(input.domain, "acmeco");
        assert_eq!(input.name, "Acme Co");
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_check_reports_first_missing_field() {
        let mut input = input().normalized();
        input.name.clear();
        input.password.clear();
        assert_eq!(input.check().unwrap_err(), "brand name is required");

        let mut input = NewTenant { name: "Acme".into(), ..Default::default() };
        input.email = "owner@acme.test".into();
        assert_eq!(input.check().unwrap_err(), "brand domain is required");
    }

    #[test]
    fn test_credential_hash_not_serialized() {
        let tenant = Tenant::from_registration(input().normalized(), "$argon2id$hash".into());
        let json = serde_json::to_value(&tenant).unwrap();
        assert!(json.get("credential_hash").is_none());
        assert_eq!(json["domain"], "acmeco");
    }
}
