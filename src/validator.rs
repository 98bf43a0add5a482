//! Record validation: runs field normalizers according to an enablement table.
//!
//! Which fields are normalized is data, not control flow. A
//! [`NormalizerTable`] lists the enabled field keys and, per category, the
//! keys switched off for records of that category. Fields whose normalizer
//! is disabled keep their raw input as value with [`Quality::Ok`].
//!
//! Validation never touches a field's confirmation status.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::RecordError;
use crate::field::Quality;
use crate::normalize::{
    Normalizer, ALTERNATE_HANDLE, DESCRIPTION_SHORT_WIDTH, INSTAGRAM_HANDLE, TWITTER_HANDLE,
};
use crate::record::{Category, EventRecord, FieldKey, FieldKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerTable {
    enabled: BTreeSet<FieldKey>,
    disabled_for: BTreeMap<Category, BTreeSet<FieldKey>>,
    description_short_width: usize,
}

impl Default for NormalizerTable {
    /// Social fields and the width-limited short description.
    fn default() -> Self {
        let mut enabled: BTreeSet<FieldKey> = FieldKey::SOCIAL.into_iter().collect();
        enabled.insert(FieldKey::DescriptionShort);
        Self {
            enabled,
            disabled_for: BTreeMap::new(),
            description_short_width: DESCRIPTION_SHORT_WIDTH,
        }
    }
}

impl NormalizerTable {
    /// A table with no field enabled.
    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
            disabled_for: BTreeMap::new(),
            description_short_width: DESCRIPTION_SHORT_WIDTH,
        }
    }

    /// Every verification field enabled.
    pub fn all() -> Self {
        Self {
            enabled: FieldKey::ALL
                .into_iter()
                .filter(|k| k.is_verification_field())
                .collect(),
            ..Self::none()
        }
    }

    pub fn enable(mut self, key: FieldKey) -> Self {
        self.enabled.insert(key);
        self
    }

    /// Switch `key` off for records of `category` only.
    pub fn disable_for(mut self, category: Category, key: FieldKey) -> Self {
        self.disabled_for.entry(category).or_default().insert(key);
        self
    }

    pub fn with_description_short_width(mut self, width: usize) -> Self {
        self.description_short_width = width;
        self
    }

    pub fn is_enabled(&self, key: FieldKey, category: Option<Category>) -> bool {
        if !key.is_verification_field() || !self.enabled.contains(&key) {
            return false;
        }
        match category.and_then(|c| self.disabled_for.get(&c)) {
            Some(disabled) => !disabled.contains(&key),
            None => true,
        }
    }

    /// The normalizer attached to `key`, or None for plain fields.
    pub fn normalizer(&self, key: FieldKey) -> Option<Normalizer> {
        match key.kind() {
            FieldKind::FreeText if key == FieldKey::DescriptionShort => {
                Some(Normalizer::WidthGate {
                    budget: self.description_short_width,
                })
            }
            FieldKind::FreeText => Some(Normalizer::Text),
            FieldKind::Handle => Some(Normalizer::Handle(&TWITTER_HANDLE)),
            FieldKind::AlternateHandle => Some(Normalizer::Handle(&ALTERNATE_HANDLE)),
            FieldKind::InstagramHandle => Some(Normalizer::Handle(&INSTAGRAM_HANDLE)),
            FieldKind::Url => Some(Normalizer::Url),
            FieldKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    table: NormalizerTable,
}

impl RecordValidator {
    pub fn new(table: NormalizerTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &NormalizerTable {
        &self.table
    }

    /// Re-normalize every verification field of `record` from its raw input.
    pub fn validate(&self, record: &mut EventRecord) {
        for key in FieldKey::ALL {
            self.normalize_field(record, key);
        }
    }

    /// Re-normalize a single field. Plain fields are left alone.
    pub fn normalize_field(&self, record: &mut EventRecord, key: FieldKey) {
        let enabled = self.table.is_enabled(key, record.category());
        let normalizer = self.table.normalizer(key);
        let Some(field) = record.field_mut(key) else {
            return;
        };

        match normalizer {
            Some(normalizer) if enabled => normalizer.apply(field),
            _ => {
                let raw = field.raw_input().to_string();
                field.set_normalized(raw, Quality::Ok);
            }
        }
    }

    /// Update one field by name and re-normalize it.
    ///
    /// Fails with [`RecordError::UnknownField`] when `key` is not one of the
    /// fixed field keys; the record is then unchanged. Other fields are not
    /// reprocessed, so confirmed values elsewhere in the record survive.
    pub fn update_field(
        &self,
        record: &mut EventRecord,
        key: &str,
        value: &str,
    ) -> Result<(), RecordError> {
        let key: FieldKey = key.parse()?;
        self.set_field(record, key, value);
        Ok(())
    }

    /// Typed form of [`update_field`](Self::update_field).
    pub fn set_field(&self, record: &mut EventRecord, key: FieldKey, value: &str) {
        tracing::debug!(record = %record.id(), field = %key, "updating field");
        record.replace_value(key, value);
        self.normalize_field(record, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Confirmation;
    use crate::record::RecordSnapshot;

    fn snapshot() -> RecordSnapshot {
        RecordSnapshot {
            origin_org: "Tea Club".to_string(),
            title: "  Matcha Stand ".to_string(),
            description_short: "a".repeat(61),
            category: "ドリンク".to_string(),
            twitter: "https://twitter.com/tea_club".to_string(),
            facebook: "tea.club.page".to_string(),
            website: "https://tea.example.org/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_table() {
        let table = NormalizerTable::default();
        for key in FieldKey::SOCIAL {
            assert!(table.is_enabled(key, None));
        }
        assert!(table.is_enabled(FieldKey::DescriptionShort, None));
        assert!(!table.is_enabled(FieldKey::Title, None));
        assert!(!table.is_enabled(FieldKey::ContactAddress, None));
    }

    #[test]
    fn test_disabled_text_keeps_raw() {
        let record = EventRecord::new(snapshot(), &RecordValidator::default());
        let title = record.field(FieldKey::Title).unwrap();
        assert_eq!(title.normalized_value(), "  Matcha Stand ");
        assert_eq!(title.quality(), Quality::Ok);
    }

    #[test]
    fn test_all_table_normalizes_text() {
        let validator = RecordValidator::new(NormalizerTable::all());
        let record = EventRecord::new(snapshot(), &validator);
        let title = record.field(FieldKey::Title).unwrap();
        assert_eq!(title.normalized_value(), "Matcha Stand");
        assert_eq!(title.quality(), Quality::Reformatted);
    }

    #[test]
    fn test_description_short_over_width_needs_review() {
        let record = EventRecord::new(snapshot(), &RecordValidator::default());
        let field = record.field(FieldKey::DescriptionShort).unwrap();
        assert_eq!(field.quality(), Quality::NeedsReview);

        let validator = RecordValidator::new(
            NormalizerTable::default().with_description_short_width(80),
        );
        let record = EventRecord::new(snapshot(), &validator);
        let field = record.field(FieldKey::DescriptionShort).unwrap();
        assert_eq!(field.quality(), Quality::Ok);
    }

    #[test]
    fn test_disable_for_category() {
        let table = NormalizerTable::default().disable_for(Category::Drink, FieldKey::Website);
        assert!(!table.is_enabled(FieldKey::Website, Some(Category::Drink)));
        assert!(table.is_enabled(FieldKey::Website, Some(Category::Dessert)));
        assert!(table.is_enabled(FieldKey::Website, None));

        let mut snap = snapshot();
        snap.website = "not a url".to_string();
        let record = EventRecord::new(snap, &RecordValidator::new(table));
        assert_eq!(record.website().quality(), Quality::Ok);
        assert_eq!(record.website().normalized_value(), "not a url");
    }

    #[test]
    fn test_validate_twice_is_idempotent() {
        let validator = RecordValidator::new(NormalizerTable::all());
        let mut record = EventRecord::new(snapshot(), &validator);
        let once = record.clone();
        validator.validate(&mut record);
        assert_eq!(record, once);
    }

    #[test]
    fn test_validate_does_not_touch_confirmation() {
        let validator = RecordValidator::default();
        let mut record = EventRecord::new(snapshot(), &validator);
        record
            .field_mut(FieldKey::Twitter)
            .unwrap()
            .set_confirmation(Confirmation::Confirmed);
        validator.validate(&mut record);
        assert_eq!(record.twitter().confirmation(), Confirmation::Confirmed);
    }

    #[test]
    fn test_update_field_renormalizes_target() {
        let validator = RecordValidator::default();
        let mut record = EventRecord::new(snapshot(), &validator);

        validator
            .update_field(&mut record, "snsTwitter", "!!!")
            .unwrap();
        assert_eq!(record.twitter().raw_input(), "!!!");
        assert_eq!(record.twitter().quality(), Quality::Invalid);

        validator.update_field(&mut record, "twitter", "@tea_club").unwrap();
        assert_eq!(record.twitter().normalized_value(), "tea_club");
        assert_eq!(record.twitter().quality(), Quality::Ok);
    }

    #[test]
    fn test_update_field_resets_target_confirmation_only() {
        let validator = RecordValidator::default();
        let mut record = EventRecord::new(snapshot(), &validator);
        for key in [FieldKey::Twitter, FieldKey::Website] {
            record
                .field_mut(key)
                .unwrap()
                .set_confirmation(Confirmation::Confirmed);
        }

        validator.set_field(&mut record, FieldKey::Twitter, "@other_club");

        assert_eq!(record.twitter().confirmation(), Confirmation::Unconfirmed);
        assert_eq!(record.website().confirmation(), Confirmation::Confirmed);
    }

    #[test]
    fn test_update_unknown_field_leaves_record_unchanged() {
        let validator = RecordValidator::default();
        let mut record = EventRecord::new(snapshot(), &validator);
        let before = record.clone();

        let err = validator
            .update_field(&mut record, "snsTiktok", "@tea")
            .unwrap_err();

        assert_eq!(err, RecordError::UnknownField("snsTiktok".to_string()));
        assert_eq!(record, before);
    }

    #[test]
    fn test_update_plain_fields() {
        let validator = RecordValidator::default();
        let mut record = EventRecord::new(snapshot(), &validator);
        let id = record.id().clone();

        validator.update_field(&mut record, "eventGenre", "dessert").unwrap();
        validator
            .update_field(&mut record, "contact_address", "tea@example.org")
            .unwrap();
        validator.update_field(&mut record, "org_name", "Green Tea Club").unwrap();

        assert_eq!(record.category_code(), 4);
        assert_eq!(record.contact_address(), "tea@example.org");
        // identity is derived once from the origin name
        assert_eq!(record.id(), &id);
    }
}
