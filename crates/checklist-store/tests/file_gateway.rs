use checklist_spec::{DEFAULT_TEMPLATE_ID, FormSnapshot};
use checklist_store::{FormGateway, FormStatus, GatewayError, JsonFileGateway};

fn fixture(name: &str) -> &'static str {
    match name {
        "stored_record" => include_str!("../tests/fixtures/stored_record.json"),
        "record_without_template" => {
            include_str!("../tests/fixtures/record_without_template.json")
        }
        _ => panic!("unknown fixture {}", name),
    }
}

#[tokio::test]
async fn records_survive_reopening_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = JsonFileGateway::open(dir.path()).await.expect("open");
    let mut snapshot = FormSnapshot::new("Panel Study", "ai-disclosure");
    snapshot
        .form_data
        .answers
        .insert("q1".into(), "drafting".into());
    let record = gateway.create("ada", snapshot).await.expect("create");
    let link = gateway
        .publish(&record.id, record.snapshot(), "Ada")
        .await
        .expect("publish");
    drop(gateway);

    let reopened = JsonFileGateway::open(dir.path()).await.expect("reopen");
    let stored = reopened
        .get(&record.id)
        .await
        .expect("get")
        .expect("record");
    assert_eq!(stored.form_data.answers["q1"], "drafting");
    assert_eq!(stored.public_id.as_deref(), Some(link.public_id.as_str()));
    assert_eq!(stored.revision, 2);

    let published = reopened
        .fetch_public(&link.public_id)
        .await
        .expect("fetch")
        .expect("published");
    assert_eq!(published.snapshot().title, "Panel Study");
}

#[tokio::test]
async fn stored_records_are_read_back_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = JsonFileGateway::open(dir.path()).await.expect("open");
    let id = "5b1a5d64-8c5e-4e55-9a57-0b6f1d5c2a10";
    std::fs::write(
        dir.path().join("forms").join(format!("{}.json", id)),
        fixture("stored_record"),
    )
    .expect("write fixture");

    let record = gateway.get(id).await.expect("get").expect("record");
    assert_eq!(record.status, FormStatus::Active);
    assert!(!record.is_public);
    assert_eq!(record.revision, 0);
    assert_eq!(record.form_data.instances["model-details"].len(), 2);

    let listed = gateway.list("owner-7").await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Legacy Study");

    let updated = gateway
        .update(id, record.snapshot())
        .await
        .expect("update");
    assert_eq!(updated.revision, 1);
}

#[tokio::test]
async fn records_without_template_fall_back_to_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = JsonFileGateway::open(dir.path()).await.expect("open");
    let id = "9e3f0c2a-7d41-4b8e-a6f5-2c8d1e4b7a93";
    std::fs::write(
        dir.path().join("forms").join(format!("{}.json", id)),
        fixture("record_without_template"),
    )
    .expect("write fixture");

    let record = gateway.get(id).await.expect("get").expect("record");
    assert_eq!(record.template_id, DEFAULT_TEMPLATE_ID);
    assert_eq!(record.snapshot().template_id, DEFAULT_TEMPLATE_ID);

    let listed = gateway.list("owner-7").await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Early Pilot");
    assert_eq!(listed[0].template_id, DEFAULT_TEMPLATE_ID);
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = JsonFileGateway::open(dir.path()).await.expect("open");
    assert!(gateway.get("../escape").await.expect("get").is_none());
    let err = gateway
        .update(
            "5b1a5d64-8c5e-4e55-9a57-0b6f1d5c2a10",
            FormSnapshot::new("x", "ai-disclosure"),
        )
        .await
        .expect_err("missing");
    assert!(matches!(err, GatewayError::NotFound(_)));
    assert!(matches!(
        gateway.delete("../escape").await,
        Err(GatewayError::NotFound(_))
    ));
}

#[tokio::test]
async fn deleted_and_submitted_forms_leave_the_dashboard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = JsonFileGateway::open(dir.path()).await.expect("open");
    let keep = gateway
        .create("ada", FormSnapshot::new("Keep", "ai-disclosure"))
        .await
        .expect("create");
    let submitted = gateway
        .create("ada", FormSnapshot::new("Submitted", "ai-disclosure"))
        .await
        .expect("create");
    let deleted = gateway
        .create("ada", FormSnapshot::new("Deleted", "aapor-transparency"))
        .await
        .expect("create");

    gateway.submit(&submitted.id).await.expect("submit");
    gateway.delete(&deleted.id).await.expect("delete");

    let listed = gateway.list("ada").await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
    assert!(gateway.get(&deleted.id).await.expect("get").is_none());
}
