//! The fixed set of updatable record fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    #[serde(alias = "eventTitle")]
    Title,
    #[serde(alias = "eventSummary")]
    Summary,
    #[serde(alias = "eventDescription")]
    Description,
    #[serde(alias = "eventDescriptionP")]
    DescriptionShort,
    #[serde(alias = "eventGenre")]
    Category,
    #[serde(alias = "orgName")]
    OrgName,
    #[serde(alias = "orgDescription")]
    OrgDescription,
    #[serde(alias = "snsTwitter")]
    Twitter,
    #[serde(alias = "snsFacebook")]
    Facebook,
    #[serde(alias = "snsInstagram")]
    Instagram,
    #[serde(alias = "snsWebsite")]
    Website,
    #[serde(alias = "contactAddress")]
    ContactAddress,
}

/// What kind of value a key holds, which decides its normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FreeText,
    Handle,
    AlternateHandle,
    InstagramHandle,
    Url,
    /// Stored as given, not a verification field
    Plain,
}

impl FieldKey {
    pub const ALL: [FieldKey; 12] = [
        FieldKey::Title,
        FieldKey::Summary,
        FieldKey::Description,
        FieldKey::DescriptionShort,
        FieldKey::Category,
        FieldKey::OrgName,
        FieldKey::OrgDescription,
        FieldKey::Twitter,
        FieldKey::Facebook,
        FieldKey::Instagram,
        FieldKey::Website,
        FieldKey::ContactAddress,
    ];

    /// Social fields, in export column order.
    pub const SOCIAL: [FieldKey; 4] = [
        FieldKey::Twitter,
        FieldKey::Facebook,
        FieldKey::Instagram,
        FieldKey::Website,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Summary => "summary",
            FieldKey::Description => "description",
            FieldKey::DescriptionShort => "description_short",
            FieldKey::Category => "category",
            FieldKey::OrgName => "org_name",
            FieldKey::OrgDescription => "org_description",
            FieldKey::Twitter => "twitter",
            FieldKey::Facebook => "facebook",
            FieldKey::Instagram => "instagram",
            FieldKey::Website => "website",
            FieldKey::ContactAddress => "contact_address",
        }
    }

    /// Key name used by the submission form export.
    fn form_name(self) -> &'static str {
        match self {
            FieldKey::Title => "eventTitle",
            FieldKey::Summary => "eventSummary",
            FieldKey::Description => "eventDescription",
            FieldKey::DescriptionShort => "eventDescriptionP",
            FieldKey::Category => "eventGenre",
            FieldKey::OrgName => "orgName",
            FieldKey::OrgDescription => "orgDescription",
            FieldKey::Twitter => "snsTwitter",
            FieldKey::Facebook => "snsFacebook",
            FieldKey::Instagram => "snsInstagram",
            FieldKey::Website => "snsWebsite",
            FieldKey::ContactAddress => "contactAddress",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::Title
            | FieldKey::Summary
            | FieldKey::Description
            | FieldKey::DescriptionShort
            | FieldKey::OrgName
            | FieldKey::OrgDescription => FieldKind::FreeText,
            FieldKey::Twitter => FieldKind::Handle,
            FieldKey::Facebook => FieldKind::AlternateHandle,
            FieldKey::Instagram => FieldKind::InstagramHandle,
            FieldKey::Website => FieldKind::Url,
            FieldKey::Category | FieldKey::ContactAddress => FieldKind::Plain,
        }
    }

    pub fn is_verification_field(self) -> bool {
        self.kind() != FieldKind::Plain
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = RecordError;

    /// Accepts the snake_case name or the submission form's camelCase name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.form_name() == s)
            .ok_or_else(|| RecordError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snake_and_form_names() {
        assert_eq!("twitter".parse::<FieldKey>().unwrap(), FieldKey::Twitter);
        assert_eq!("snsTwitter".parse::<FieldKey>().unwrap(), FieldKey::Twitter);
        assert_eq!(
            "eventDescriptionP".parse::<FieldKey>().unwrap(),
            FieldKey::DescriptionShort
        );
    }

    #[test]
    fn test_parse_unknown_key() {
        let err = "snsTiktok".parse::<FieldKey>().unwrap_err();
        assert!(matches!(err, RecordError::UnknownField(ref k) if k == "snsTiktok"));
        assert!("Twitter".parse::<FieldKey>().is_err());
    }

    #[test]
    fn test_plain_fields_are_not_verification_fields() {
        let plain: Vec<FieldKey> = FieldKey::ALL
            .into_iter()
            .filter(|k| !k.is_verification_field())
            .collect();
        assert_eq!(plain, vec![FieldKey::Category, FieldKey::ContactAddress]);
    }

    #[test]
    fn test_deserialize_accepts_aliases() {
        let keys: Vec<FieldKey> = serde_yaml::from_str("[twitter, snsWebsite]").unwrap();
        assert_eq!(keys, vec![FieldKey::Twitter, FieldKey::Website]);
    }
}
