use claimdesk_lib::{
    claims::{ClaimError, ClaimWorkflow},
    db::{ClaimStatus, Database},
};

fn open(dir: &tempfile::TempDir) -> (Database, ClaimWorkflow) {
    let db = Database::new(dir.path().join("claims.db")).expect("open database");
    let workflow = ClaimWorkflow::new(db.clone(), "R");
    (db, workflow)
}

fn squash(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[tokio::test]
async fn submit_approve_report_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (db, workflow) = open(&dir);

    let submitted = workflow.submit_claim("10", "150", None).await.unwrap();
    assert_eq!(submitted.id, 1);
    assert_eq!(submitted.total_amount, 1500.0);

    let pending = db.list_claims_by_status(ClaimStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 1);
    assert_eq!(pending[0].total_amount, 1500.0);
    assert_eq!(pending[0].status, ClaimStatus::Pending);

    workflow.approve(1).await.unwrap();

    assert!(db
        .list_claims_by_status(ClaimStatus::Pending)
        .await
        .unwrap()
        .is_empty());
    let approved = db.list_claims_by_status(ClaimStatus::Approved).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, 1);

    let report = workflow.build_approved_report().await.unwrap();
    let expected = format!("1 10 150.00 1500.00 {}", approved[0].submitted_at_text());
    assert!(
        report.lines().any(|line| squash(line) == expected),
        "missing row {expected:?} in:\n{report}"
    );
}

#[tokio::test]
async fn submitted_totals_match_product_for_many_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let (db, workflow) = open(&dir);
    let inputs = [(0.0, 0.0), (0.0, 99.0), (7.5, 80.0), (40.0, 12.25), (1.0, 0.01)];

    for (hours, rate) in inputs {
        let submitted = workflow
            .submit_claim(&hours.to_string(), &rate.to_string(), None)
            .await
            .unwrap();
        assert_eq!(submitted.total_amount, hours * rate);

        let stored = db.get_claim(submitted.id).await.unwrap();
        assert_eq!(stored.status, ClaimStatus::Pending);
        assert_eq!(stored.total_amount, hours * rate);
    }

    let pending = db.list_claims_by_status(ClaimStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), inputs.len());
}

#[tokio::test]
async fn rejected_claims_leave_both_listings() {
    let dir = tempfile::tempdir().unwrap();
    let (db, workflow) = open(&dir);
    let submitted = workflow.submit_claim("5", "20", None).await.unwrap();

    let claim = workflow.reject(submitted.id).await.unwrap();
    assert_eq!(claim.status, ClaimStatus::Rejected);

    assert!(db
        .list_claims_by_status(ClaimStatus::Pending)
        .await
        .unwrap()
        .is_empty());
    assert!(db
        .list_claims_by_status(ClaimStatus::Approved)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        db.list_claims_by_status(ClaimStatus::Rejected)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn unknown_ids_leave_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (db, workflow) = open(&dir);
    workflow.submit_claim("1", "1", None).await.unwrap();

    assert_eq!(
        workflow.approve(99).await.unwrap_err(),
        ClaimError::NotFound { id: 99 }
    );
    assert_eq!(
        db.update_claim_status(99, ClaimStatus::Rejected)
            .await
            .unwrap_err(),
        ClaimError::NotFound { id: 99 }
    );

    let pending = db.list_claims_by_status(ClaimStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn report_rows_match_approved_count() {
    let dir = tempfile::tempdir().unwrap();
    let (_db, workflow) = open(&dir);

    let empty = workflow.build_approved_report().await.unwrap();
    assert!(empty.contains("Claims: 0"));
    assert!(!empty.lines().any(|line| line.starts_with("1 ")));

    for hours in ["1", "2", "3"] {
        let submitted = workflow.submit_claim(hours, "10", None).await.unwrap();
        workflow.approve(submitted.id).await.unwrap();
    }
    workflow.submit_claim("4", "10", None).await.unwrap();

    let report = workflow.build_approved_report().await.unwrap();
    assert!(report.contains("Claims: 3"));
    assert!(report.contains("Grand total: R60.00"));
}

#[tokio::test]
async fn reopening_and_initializing_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (db, workflow) = open(&dir);
        workflow.submit_claim("8", "100", None).await.unwrap();
        db.initialize().await.unwrap();
        db.initialize().await.unwrap();
    }

    let (db, _workflow) = open(&dir);
    db.initialize().await.unwrap();

    let pending = db.list_claims_by_status(ClaimStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].total_amount, 800.0);
}
