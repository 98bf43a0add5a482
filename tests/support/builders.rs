use eventcheck::record::{EventRecord, RecordSnapshot};
use eventcheck::validator::RecordValidator;

pub struct SnapshotBuilder {
    snapshot: RecordSnapshot,
}

impl SnapshotBuilder {
    pub fn new(origin_org: &str) -> Self {
        Self {
            snapshot: RecordSnapshot {
                origin_org: origin_org.to_string(),
                org_name: origin_org.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.snapshot.title = title.to_string();
        self
    }

    pub fn description_short(mut self, text: &str) -> Self {
        self.snapshot.description_short = text.to_string();
        self
    }

    pub fn category(mut self, label: &str) -> Self {
        self.snapshot.category = label.to_string();
        self
    }

    pub fn twitter(mut self, handle: &str) -> Self {
        self.snapshot.twitter = handle.to_string();
        self
    }

    pub fn facebook(mut self, handle: &str) -> Self {
        self.snapshot.facebook = handle.to_string();
        self
    }

    pub fn instagram(mut self, handle: &str) -> Self {
        self.snapshot.instagram = handle.to_string();
        self
    }

    pub fn website(mut self, url: &str) -> Self {
        self.snapshot.website = url.to_string();
        self
    }

    pub fn contact(mut self, address: &str) -> Self {
        self.snapshot.contact_address = address.to_string();
        self
    }

    pub fn build(self) -> RecordSnapshot {
        self.snapshot
    }

    /// Build a record with the default normalizer table.
    pub fn record(self) -> EventRecord {
        EventRecord::new(self.snapshot, &RecordValidator::default())
    }
}
