use account_cohorts::{
    config::ReportConfig,
    directory::{AccountRecord, AccountStatus, MockAccountDirectory},
    jobs::CohortReportJob,
    publisher::MemoryPublisher,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::sync::Arc;

/// Fixed reference time shared by every integration test
pub fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 31)
        .unwrap()
        .and_hms_opt(6, 30, 0)
        .unwrap()
}

/// Account that joined `days` days before `reference_now`
pub fn account(id: &str, status: AccountStatus, days: i64) -> AccountRecord {
    let joined = Utc.from_utc_datetime(&reference_now()) - Duration::days(days);
    AccountRecord::new(id, status, joined)
}

/// Job wired to a scripted directory and an in-memory object store
pub struct TestHarness {
    pub job: CohortReportJob,
    pub directory: Arc<MockAccountDirectory>,
    pub publisher: Arc<MemoryPublisher>,
}

impl TestHarness {
    pub fn new(directory: MockAccountDirectory) -> Self {
        Self::with_publisher(directory, MemoryPublisher::new())
    }

    pub fn with_publisher(directory: MockAccountDirectory, publisher: MemoryPublisher) -> Self {
        let directory = Arc::new(directory);
        let publisher = Arc::new(publisher);
        let job = CohortReportJob::new(
            directory.clone(),
            publisher.clone(),
            ReportConfig::default(),
        );

        Self {
            job,
            directory,
            publisher,
        }
    }

    /// Published report as text, if any
    pub fn published(&self) -> Option<String> {
        self.publisher
            .get("accounts.csv")
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }
}
