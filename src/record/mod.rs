//! Event records built from organizer submissions.
//!
//! An [`EventRecord`] is created whole from a [`RecordSnapshot`] and keeps
//! that snapshot unchanged for audit. After construction the only way to
//! change a record is a single-field update through
//! [`RecordValidator::update_field`](crate::validator::RecordValidator::update_field).

pub mod category;
pub mod field_key;
pub mod input;

use serde::{Deserialize, Serialize};

use crate::field::VerificationField;
use crate::id::EventId;
use crate::normalize::{fits_display_width, DESCRIPTION_SHORT_WIDTH};
use crate::validator::RecordValidator;

pub use category::{category_code, Category, UNMAPPED_CATEGORY_CODE};
pub use field_key::{FieldKey, FieldKind};
pub use input::{load_snapshots, parse_snapshots, SnapshotFormat};

/// One submission as delivered by the form builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSnapshot {
    pub origin_org: String,
    pub icon_ref: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub description_short: String,
    pub category: String,
    pub org_name: String,
    pub org_description: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub website: String,
    pub contact_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    id: EventId,
    origin_org: String,
    icon_ref: String,
    category_label: String,
    contact_address: String,
    title: VerificationField,
    summary: VerificationField,
    description: VerificationField,
    description_short: VerificationField,
    org_name: VerificationField,
    org_description: VerificationField,
    twitter: VerificationField,
    facebook: VerificationField,
    instagram: VerificationField,
    website: VerificationField,
    snapshot: RecordSnapshot,
}

impl EventRecord {
    /// Build a record and run every enabled normalizer over it.
    pub fn new(snapshot: RecordSnapshot, validator: &RecordValidator) -> Self {
        let mut record = Self {
            id: EventId::derive(&snapshot.origin_org),
            origin_org: snapshot.origin_org.clone(),
            icon_ref: snapshot.icon_ref.clone(),
            category_label: snapshot.category.clone(),
            contact_address: snapshot.contact_address.clone(),
            title: VerificationField::new(snapshot.title.as_str()),
            summary: VerificationField::new(snapshot.summary.as_str()),
            description: VerificationField::new(snapshot.description.as_str()),
            description_short: VerificationField::new(snapshot.description_short.as_str()),
            org_name: VerificationField::new(snapshot.org_name.as_str()),
            org_description: VerificationField::new(snapshot.org_description.as_str()),
            twitter: VerificationField::new(snapshot.twitter.as_str()),
            facebook: VerificationField::new(snapshot.facebook.as_str()),
            instagram: VerificationField::new(snapshot.instagram.as_str()),
            website: VerificationField::new(snapshot.website.as_str()),
            snapshot,
        };
        validator.validate(&mut record);
        record
    }

    /// Build one record per snapshot, in order.
    pub fn from_snapshots(
        snapshots: impl IntoIterator<Item = RecordSnapshot>,
        validator: &RecordValidator,
    ) -> Vec<Self> {
        snapshots
            .into_iter()
            .map(|s| Self::new(s, validator))
            .collect()
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn origin_org(&self) -> &str {
        &self.origin_org
    }

    pub fn icon_ref(&self) -> &str {
        &self.icon_ref
    }

    pub fn contact_address(&self) -> &str {
        &self.contact_address
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.category_label)
    }

    pub fn category_code(&self) -> u8 {
        category_code(&self.category_label)
    }

    /// The input this record was built from, unchanged by later updates.
    pub fn snapshot(&self) -> &RecordSnapshot {
        &self.snapshot
    }

    /// Verification field for `key`, or None for plain fields.
    pub fn field(&self, key: FieldKey) -> Option<&VerificationField> {
        match key {
            FieldKey::Title => Some(&self.title),
            FieldKey::Summary => Some(&self.summary),
            FieldKey::Description => Some(&self.description),
            FieldKey::DescriptionShort => Some(&self.description_short),
            FieldKey::OrgName => Some(&self.org_name),
            FieldKey::OrgDescription => Some(&self.org_description),
            FieldKey::Twitter => Some(&self.twitter),
            FieldKey::Facebook => Some(&self.facebook),
            FieldKey::Instagram => Some(&self.instagram),
            FieldKey::Website => Some(&self.website),
            FieldKey::Category | FieldKey::ContactAddress => None,
        }
    }

    pub(crate) fn field_mut(&mut self, key: FieldKey) -> Option<&mut VerificationField> {
        match key {
            FieldKey::Title => Some(&mut self.title),
            FieldKey::Summary => Some(&mut self.summary),
            FieldKey::Description => Some(&mut self.description),
            FieldKey::DescriptionShort => Some(&mut self.description_short),
            FieldKey::OrgName => Some(&mut self.org_name),
            FieldKey::OrgDescription => Some(&mut self.org_description),
            FieldKey::Twitter => Some(&mut self.twitter),
            FieldKey::Facebook => Some(&mut self.facebook),
            FieldKey::Instagram => Some(&mut self.instagram),
            FieldKey::Website => Some(&mut self.website),
            FieldKey::Category | FieldKey::ContactAddress => None,
        }
    }

    /// Replace a field's value wholesale. Verification fields restart as
    /// fresh unconfirmed fields; the caller re-normalizes.
    pub(crate) fn replace_value(&mut self, key: FieldKey, value: &str) {
        match key {
            FieldKey::Category => self.category_label = value.to_string(),
            FieldKey::ContactAddress => self.contact_address = value.to_string(),
            _ => {
                if let Some(field) = self.field_mut(key) {
                    *field = VerificationField::new(value);
                }
            }
        }
    }

    /// Current value of `key` as text: normalized value for verification
    /// fields, stored value for plain ones.
    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Category => &self.category_label,
            FieldKey::ContactAddress => &self.contact_address,
            _ => self.field(key).map(|f| f.normalized_value()).unwrap_or_default(),
        }
    }

    pub fn title(&self) -> &VerificationField {
        &self.title
    }

    pub fn org_name(&self) -> &VerificationField {
        &self.org_name
    }

    pub fn twitter(&self) -> &VerificationField {
        &self.twitter
    }

    pub fn website(&self) -> &VerificationField {
        &self.website
    }

    /// Whether the short description fits its 60-column card slot. Padding
    /// counts: this is the same measurement the validator's width gate makes.
    pub fn description_short_fits(&self) -> bool {
        fits_display_width(self.description_short.raw_input(), DESCRIPTION_SHORT_WIDTH)
    }
}
