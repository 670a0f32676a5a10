mod common;

use account_cohorts::{
    AppError,
    directory::{AccountStatus, MockAccountDirectory, ProviderError},
    publisher::{MemoryPublisher, PublishError},
};
use common::{TestHarness, account, reference_now};

fn expected_csv(counts: &[(usize, u64)]) -> String {
    let mut csv = String::from("month,total_accounts\n");
    for month in 0..24 {
        let count = counts
            .iter()
            .find(|(m, _)| *m == month)
            .map(|(_, c)| *c)
            .unwrap_or(0);
        csv.push_str(&format!("{month},{count}\n"));
    }
    csv
}

#[tokio::test]
async fn test_end_to_end_example_report() {
    let harness = TestHarness::new(MockAccountDirectory::with_pages(vec![vec![
        account("111111111111", AccountStatus::Active, 15),
        account("222222222222", AccountStatus::Suspended, 10),
        account("333333333333", AccountStatus::Active, 721),
    ]]));

    let report = harness.job.execute_at(reference_now()).await.unwrap();

    assert_eq!(report.accounts_listed, 3);
    assert_eq!(report.histogram.total(), 1);
    assert_eq!(harness.published().unwrap(), expected_csv(&[(0, 1)]));
}

#[tokio::test]
async fn test_empty_organization_publishes_all_zero_report() {
    let harness = TestHarness::new(MockAccountDirectory::with_pages(vec![]));

    harness.job.execute_at(reference_now()).await.unwrap();

    assert_eq!(harness.published().unwrap(), expected_csv(&[]));
}

#[tokio::test]
async fn test_accounts_across_pages_are_all_counted() {
    let harness = TestHarness::new(MockAccountDirectory::with_pages(vec![
        vec![
            account("a", AccountStatus::Active, 0),
            account("b", AccountStatus::Active, 29),
        ],
        vec![account("c", AccountStatus::Active, 30)],
        vec![
            account("d", AccountStatus::Active, 719),
            account("e", AccountStatus::Active, 720),
            account("f", AccountStatus::PendingClosure, 45),
        ],
    ]));

    let report = harness.job.execute_at(reference_now()).await.unwrap();

    assert_eq!(report.accounts_listed, 6);
    assert_eq!(
        harness.published().unwrap(),
        expected_csv(&[(0, 2), (1, 1), (23, 1)])
    );
    assert_eq!(harness.directory.requested_tokens().len(), 3);
}

#[tokio::test]
async fn test_provider_failure_produces_no_report() {
    let harness = TestHarness::new(
        MockAccountDirectory::with_pages(vec![
            vec![account("a", AccountStatus::Active, 3)],
            vec![account("b", AccountStatus::Active, 3)],
        ])
        .failing_at(1, ProviderError::Unreachable("connection reset".to_string())),
    );

    let result = harness.job.execute_at(reference_now()).await;

    assert!(matches!(
        result,
        Err(AppError::Provider(ProviderError::Unreachable(_)))
    ));
    assert!(harness.published().is_none());
}

#[tokio::test]
async fn test_publish_rejection_fails_the_run() {
    let harness = TestHarness::with_publisher(
        MockAccountDirectory::with_pages(vec![vec![account("a", AccountStatus::Active, 3)]]),
        MemoryPublisher::rejecting("AccessDenied"),
    );

    let result = harness.job.execute_at(reference_now()).await;

    match result {
        Err(AppError::Publish(PublishError::Rejected(message))) => {
            assert_eq!(message, "AccessDenied")
        }
        other => panic!("expected publish rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rerun_replaces_previous_report() {
    let harness = TestHarness::new(MockAccountDirectory::with_pages(vec![vec![account(
        "a",
        AccountStatus::Active,
        65,
    )]]));

    harness.job.execute_at(reference_now()).await.unwrap();
    harness.job.execute_at(reference_now()).await.unwrap();

    assert_eq!(harness.publisher.len(), 1);
    assert_eq!(harness.published().unwrap(), expected_csv(&[(2, 1)]));
}
