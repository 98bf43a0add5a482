//! Public and review exports after a full pipeline run

mod support;

use eventcheck::config::RetryConfig;
use eventcheck::export::{public_rows, review_rows, to_csv, to_json};
use eventcheck::reconcile::{probe_websites, BatchReconciler};
use eventcheck::record::EventRecord;
use support::builders::SnapshotBuilder;
use support::fakes::{FakeLookup, FakeReachability};

fn pipeline() -> Vec<EventRecord> {
    let mut records = vec![
        SnapshotBuilder::new("Robotics Club")
            .title("Robot Battle")
            .category("展示・体験・販売")
            .twitter("https://twitter.com/robo_club")
            .website("http://robo.example.org")
            .contact("robo@example.org")
            .record(),
        SnapshotBuilder::new("Tea Club")
            .title("Tea House")
            .category("ドリンク")
            .twitter("teaclub")
            .instagram("https://www.instagram.com/tea.club")
            .website("http://tea.example.org")
            .record(),
    ];

    probe_websites(
        &mut records,
        &FakeReachability::new(&["http://robo.example.org"]),
        |_| {},
    );
    BatchReconciler::new(
        FakeLookup::new(&[("Robo_Club", "Robotics Club")]),
        RetryConfig::default(),
    )
    .reconcile(&mut records)
    .unwrap();

    records
}

#[test]
fn test_public_rows_only_carry_safe_values() {
    let rows = public_rows(&pipeline());

    assert_eq!(rows[0].sns_twitter, "Robo_Club");
    assert_eq!(rows[0].sns_website, "http://robo.example.org");
    assert_eq!(rows[0].category_code, 1);

    assert_eq!(rows[1].sns_twitter, "");
    assert_eq!(rows[1].sns_website, "");
    // reformatted but never confirmed
    assert_eq!(rows[1].sns_instagram, "");
    assert_eq!(rows[1].category_code, 7);
}

#[test]
fn test_public_json_never_contains_raw_or_contact() {
    let json = to_json(&public_rows(&pipeline())).unwrap();
    assert!(!json.contains("https://twitter.com/robo_club"));
    assert!(!json.contains("robo@example.org"));
    assert!(!json.contains("teaclub"));
    assert!(!json.contains("confirm"));
}

#[test]
fn test_review_rows_show_labels_and_preview() {
    let records = pipeline();
    let rows = review_rows(&records, "https://fes.example.org/preview/");

    assert_eq!(rows[0].twitter, "Robo_Club (confirmed)");
    assert_eq!(rows[0].website, "http://robo.example.org (confirmed)");
    assert_eq!(rows[0].instagram, "not set");
    assert_eq!(rows[0].contact_address, "robo@example.org");
    assert_eq!(
        rows[0].preview_url,
        format!("https://fes.example.org/preview/{}", records[0].id())
    );

    assert_eq!(rows[1].twitter, "teaclub (error/invalid input)");
    assert_eq!(rows[1].instagram, "tea.club (unconfirmed)");
    assert_eq!(rows[1].website, "http://tea.example.org (error/invalid input)");
}

#[test]
fn test_review_csv_rows() {
    let csv = to_csv(&review_rows(&pipeline(), "/preview/event-detail/"));
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Robotics Club,robo@example.org,/preview/event-detail/"));
    assert!(lines[1].contains("Robo_Club (confirmed)"));
}
