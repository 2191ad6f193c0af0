//! Pagination over the compare endpoint.
//!
//! GitHub pages comparisons 100 commits at a time and reports the total commit
//! count alongside every page. `CommitFetcher` reads that total from the first
//! page only, then keeps requesting pages until every expected page has been
//! consumed, the collected count reaches the total, or a page comes back empty.
//! Any failed page aborts the whole fetch; partial results are never returned.

use crate::error::Result;
use crate::github::CompareService;
use crate::models::{CommitRecord, ComparisonRequest};

pub const PAGE_SIZE: usize = 100;

pub struct CommitFetcher<S> {
    service: S,
}

impl<S: CompareService> CommitFetcher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Collect every commit between `request.base` and `request.head`, in the
    /// order GitHub reports them.
    pub async fn fetch(&self, request: &ComparisonRequest) -> Result<Vec<CommitRecord>> {
        let mut commits: Vec<CommitRecord> = Vec::new();
        let mut total: Option<usize> = None;
        let mut page = 1;

        loop {
            let result = self
                .service
                .compare_page(request, page, PAGE_SIZE)
                .await?;

            let returned = result.commits.len();
            commits.extend(result.commits);

            let total = *total.get_or_insert(result.total_commits);
            if result.total_commits != total {
                tracing::debug!(
                    page,
                    first = total,
                    reported = result.total_commits,
                    "Total commit count changed between pages, keeping the first"
                );
            }

            tracing::debug!(page, returned, collected = commits.len(), total, "Fetched compare page");

            let expected_pages = total.div_ceil(PAGE_SIZE).max(1);
            if page >= expected_pages || commits.len() >= total {
                break;
            }
            if returned == 0 {
                tracing::warn!(
                    page,
                    collected = commits.len(),
                    total,
                    "Empty page before reaching the reported total, stopping"
                );
                break;
            }

            page += 1;
        }

        tracing::info!(
            owner = %request.owner,
            repo = %request.repo,
            basehead = %request.basehead(),
            pages = page,
            commits = commits.len(),
            "Comparison fetched"
        );

        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ComparePage, Credentials};
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Step {
        Page { total: usize, count: usize },
        Fail,
    }

    /// Replays a fixed plan of responses, one step per request.
    struct ScriptedService {
        plan: Vec<Step>,
        requested: Mutex<Vec<(usize, usize)>>,
    }

    impl ScriptedService {
        fn new(plan: Vec<Step>) -> Self {
            Self {
                plan,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<usize> {
            self.requested.lock().unwrap().iter().map(|(p, _)| *p).collect()
        }
    }

    #[async_trait]
    impl CompareService for ScriptedService {
        async fn compare_page(
            &self,
            _request: &ComparisonRequest,
            page: usize,
            per_page: usize,
        ) -> Result<ComparePage> {
            self.requested.lock().unwrap().push((page, per_page));
            match self.plan.get(page - 1) {
                Some(Step::Page { total, count }) => Ok(ComparePage {
                    total_commits: *total,
                    commits: (0..*count)
                        .map(|i| CommitRecord::new(format!("p{}-c{}", page, i), None, None))
                        .collect(),
                }),
                Some(Step::Fail) => Err(AppError::Remote {
                    status: 500,
                    message: "Server Error".to_string(),
                }),
                None => panic!("unexpected request for page {}", page),
            }
        }
    }

    fn request() -> ComparisonRequest {
        ComparisonRequest {
            owner: "test".to_string(),
            repo: "test".to_string(),
            base: "base".to_string(),
            head: "head".to_string(),
            credentials: Credentials {
                user: "test".to_string(),
                pass: "test".to_string(),
            },
        }
    }

    fn page(total: usize, count: usize) -> Step {
        Step::Page { total, count }
    }

    #[tokio::test]
    async fn should_fetch_single_small_page() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(3, 3)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        let shas: Vec<&str> = commits.iter().map(|c| c.sha()).collect();
        assert_eq!(shas, vec!["p1-c0", "p1-c1", "p1-c2"]);
        assert_eq!(fetcher.service.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn should_append_second_page_after_first() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(150, 100), page(150, 50)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert_eq!(commits.len(), 150);
        assert_eq!(commits[0].sha(), "p1-c0");
        assert_eq!(commits[99].sha(), "p1-c99");
        assert_eq!(commits[100].sha(), "p2-c0");
        assert_eq!(commits[149].sha(), "p2-c49");
        assert_eq!(fetcher.service.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn should_stop_after_one_request_for_exactly_one_full_page() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(100, 100)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert_eq!(commits.len(), 100);
        assert_eq!(fetcher.service.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn should_request_once_for_empty_comparison() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(0, 0)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert!(commits.is_empty());
        assert_eq!(fetcher.service.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn should_issue_ceil_total_over_page_size_requests() {
        for total in [1usize, 99, 100, 101, 200, 250, 301] {
            let mut plan = Vec::new();
            let mut left = total;
            while left > 0 {
                let count = left.min(PAGE_SIZE);
                plan.push(page(total, count));
                left -= count;
            }

            let fetcher = CommitFetcher::new(ScriptedService::new(plan));
            let commits = fetcher.fetch(&request()).await.unwrap();

            assert_eq!(commits.len(), total);
            assert_eq!(
                fetcher.service.requested_pages().len(),
                total.div_ceil(PAGE_SIZE),
                "total {}",
                total
            );
        }
    }

    #[tokio::test]
    async fn should_always_request_full_page_size() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(150, 100), page(150, 50)]));
        fetcher.fetch(&request()).await.unwrap();

        let sizes: Vec<usize> = fetcher
            .service
            .requested
            .lock()
            .unwrap()
            .iter()
            .map(|(_, s)| *s)
            .collect();
        assert_eq!(sizes, vec![PAGE_SIZE, PAGE_SIZE]);
    }

    #[tokio::test]
    async fn should_discard_partial_results_when_a_page_fails() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(250, 100), Step::Fail]));
        let result = fetcher.fetch(&request()).await;

        assert!(matches!(result, Err(AppError::Remote { status: 500, .. })));
        assert_eq!(fetcher.service.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn should_fail_without_retry_on_first_page_error() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![Step::Fail]));
        assert!(fetcher.fetch(&request()).await.is_err());
        assert_eq!(fetcher.service.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn should_use_total_from_first_page_only() {
        // Later pages claim a larger total; the first page's count decides.
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(150, 100), page(900, 50)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert_eq!(commits.len(), 150);
        assert_eq!(fetcher.service.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn should_stop_at_empty_page_when_total_is_overstated() {
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![
            page(1000, 100),
            page(1000, 100),
            page(1000, 0),
        ]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert_eq!(commits.len(), 200);
        assert_eq!(fetcher.service.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_keep_every_commit_of_short_pages() {
        // Pages shorter than requested still contribute all of their commits.
        let fetcher = CommitFetcher::new(ScriptedService::new(vec![page(200, 60), page(200, 40)]));
        let commits = fetcher.fetch(&request()).await.unwrap();

        assert_eq!(commits.len(), 100);
        assert_eq!(commits[59].sha(), "p1-c59");
        assert_eq!(commits[99].sha(), "p2-c39");
        assert_eq!(fetcher.service.requested_pages(), vec![1, 2]);
    }
}
