use super::scan_pipeline::ScanPipeline;
use crate::store::SharedContactStore;
use chrono::Utc;
use shared_types::{ScanJob, ScanJobStatus, ScanProgress};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

type JobList = Arc<RwLock<Vec<ScanJob>>>;

/// Accepts PDF uploads and runs each one as a background scan that feeds
/// the shared contact store page by page.
pub struct ScanManager {
    store: SharedContactStore,
    pipeline: ScanPipeline,
    jobs: JobList,
    active_jobs: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

/// Only PDFs are scanned. Parameters such as `; charset=` are ignored.
pub fn is_pdf_mime(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false)
}

impl ScanManager {
    pub fn new(store: SharedContactStore, pipeline: ScanPipeline) -> Self {
        Self {
            store,
            pipeline,
            jobs: Arc::new(RwLock::new(Vec::new())),
            active_jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn start_scan(&self, file_name: String, pdf: Vec<u8>) -> ScanJob {
        let job = ScanJob {
            id: Uuid::new_v4().to_string(),
            file_name,
            status: ScanJobStatus::Pending,
            progress: ScanProgress::default(),
            error_message: None,
            created_at: Utc::now().timestamp(),
            started_at: None,
            completed_at: None,
        };
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(job.clone());

        info!("Queued scan {} for {}", job.id, job.file_name);

        // Hold the lock across the spawn so a fast job cannot remove its
        // handle before it is inserted.
        let mut active_jobs = self.active_jobs.lock().await;
        let handle = tokio::spawn(Self::run_scan(
            self.pipeline.clone(),
            self.store.clone(),
            self.jobs.clone(),
            self.active_jobs.clone(),
            job.id.clone(),
            pdf,
        ));
        active_jobs.insert(job.id.clone(), handle);

        job
    }

    pub fn get_job(&self, job_id: &str) -> Option<ScanJob> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|job| job.id == job_id)
            .cloned()
    }

    /// Newest first.
    pub fn list_jobs(&self) -> Vec<ScanJob> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .cloned()
            .collect()
    }

    pub async fn active_count(&self) -> usize {
        self.active_jobs.lock().await.len()
    }

    async fn run_scan(
        pipeline: ScanPipeline,
        store: SharedContactStore,
        jobs: JobList,
        active_jobs: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
        job_id: String,
        pdf: Vec<u8>,
    ) {
        update_job(&jobs, &job_id, |job| {
            job.status = ScanJobStatus::Running;
            job.started_at = Some(Utc::now().timestamp());
        });

        let result = pipeline
            .run(&pdf, |contacts, completed, total| {
                let count = contacts.len() as u64;
                store
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .add_all(contacts);
                update_job(&jobs, &job_id, |job| {
                    job.progress
                        .record_page(completed as u64, total as u64, count)
                });
            })
            .await;

        match result {
            Ok(summary) => {
                info!(
                    "Scan {} completed: {} contacts from {} pages",
                    job_id, summary.contacts, summary.pages
                );
                update_job(&jobs, &job_id, |job| {
                    if summary.pages == 0 {
                        job.progress.record_page(0, 0, 0);
                    }
                    job.status = ScanJobStatus::Completed;
                    job.completed_at = Some(Utc::now().timestamp());
                });
            }
            Err(e) => {
                error!("Scan {} failed: {}", job_id, e);
                update_job(&jobs, &job_id, |job| {
                    job.status = ScanJobStatus::Failed;
                    job.error_message = Some(e.to_string());
                    job.completed_at = Some(Utc::now().timestamp());
                });
            }
        }

        active_jobs.lock().await.remove(&job_id);
    }
}

fn update_job(jobs: &JobList, job_id: &str, apply: impl FnOnce(&mut ScanJob)) {
    let mut jobs = jobs.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(job) = jobs.iter_mut().find(|job| job.id == job_id) {
        apply(job);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::jobs::scan_pipeline::tests::{fake_pdf, fake_pipeline, PAGE_ONE, PAGE_TWO};
    use crate::store::ContactStore;
    use std::time::Duration;

    pub(crate) async fn wait_until_idle(manager: &ScanManager) {
        for _ in 0..200 {
            if manager.active_count().await == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("scan did not finish");
    }

    #[test]
    fn test_is_pdf_mime() {
        assert!(is_pdf_mime("application/pdf"));
        assert!(is_pdf_mime("Application/PDF; charset=binary"));
        assert!(!is_pdf_mime("image/png"));
        assert!(!is_pdf_mime(""));
    }

    #[tokio::test]
    async fn test_scan_fills_store_and_completes() {
        let store = ContactStore::shared();
        let (pipeline, _) = fake_pipeline(None);
        let manager = ScanManager::new(store.clone(), pipeline);

        let job = manager
            .start_scan("cards.pdf".to_string(), fake_pdf(&[PAGE_ONE, PAGE_TWO]))
            .await;
        assert_eq!(job.status, ScanJobStatus::Pending);

        wait_until_idle(&manager).await;

        let job = manager.get_job(&job.id).unwrap();
        assert_eq!(job.status, ScanJobStatus::Completed);
        assert_eq!(job.progress.processed_pages, 2);
        assert_eq!(job.progress.contacts_extracted, 2);
        assert_eq!(job.progress.percent_complete, 100.0);
        assert!(job.completed_at.is_some());
        assert_eq!(store.read().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_partial_contacts() {
        let store = ContactStore::shared();
        let (pipeline, _) = fake_pipeline(Some(2));
        let manager = ScanManager::new(store.clone(), pipeline);

        let job = manager
            .start_scan("cards.pdf".to_string(), fake_pdf(&[PAGE_ONE, PAGE_TWO]))
            .await;
        wait_until_idle(&manager).await;

        let job = manager.get_job(&job.id).unwrap();
        assert_eq!(job.status, ScanJobStatus::Failed);
        assert!(job.error_message.unwrap().contains("page 2"));
        assert_eq!(job.progress.processed_pages, 1);
        assert_eq!(store.read().unwrap().all()[0].name, "Eva Lena Richter");
    }

    #[tokio::test]
    async fn test_list_jobs_newest_first() {
        let (pipeline, _) = fake_pipeline(None);
        let manager = ScanManager::new(ContactStore::shared(), pipeline);

        let first = manager
            .start_scan("a.pdf".to_string(), fake_pdf(&[PAGE_ONE]))
            .await;
        let second = manager
            .start_scan("b.pdf".to_string(), fake_pdf(&[PAGE_TWO]))
            .await;
        wait_until_idle(&manager).await;

        let ids: Vec<String> = manager.list_jobs().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(manager.get_job("missing").is_none());
    }
}
