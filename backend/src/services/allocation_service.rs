use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::info;

use crate::client::CourseApi;
use crate::error::AppError;
use crate::models::Batch;
use crate::optimistic::optimistic_update;

/// Keeps the batches the admin is working on and allocates staff to them.
pub struct AllocationService {
    api: Arc<dyn CourseApi>,
    roster: Mutex<Vec<Batch>>,
    timeout: Duration,
}

impl AllocationService {
    pub fn new(api: Arc<dyn CourseApi>, timeout: Duration) -> Self {
        Self {
            api,
            roster: Mutex::new(Vec::new()),
            timeout,
        }
    }

    /// Replaces the roster entries of `course_id` with the backend's list.
    pub async fn load_batches(&self, course_id: i64) -> Result<Vec<Batch>, AppError> {
        let batches = self.api.fetch_batches(course_id).await?;

        let mut roster = self.roster.lock().await;
        roster.retain(|b| b.course_id != course_id);
        roster.extend(batches.iter().cloned());

        Ok(batches)
    }

    pub async fn roster(&self) -> Vec<Batch> {
        self.roster.lock().await.clone()
    }

    /// Shows the new staff member on the batch at once and undoes it if the
    /// backend rejects the change or does not answer in time.
    ///
    /// The undo only touches this batch, and only while it still holds the
    /// staff member set here.
    pub async fn assign_staff(&self, batch_id: i64, staff_id: Option<i64>) -> Result<Batch, AppError> {
        optimistic_update(
            &self.roster,
            |roster| {
                let batch = roster
                    .iter_mut()
                    .find(|b| b.id == batch_id)
                    .ok_or(AppError::NotFound)?;
                Ok(std::mem::replace(&mut batch.staff_id, staff_id))
            },
            |roster, previous| {
                if let Some(batch) = roster
                    .iter_mut()
                    .find(|b| b.id == batch_id && b.staff_id == staff_id)
                {
                    batch.staff_id = previous;
                }
            },
            self.api.assign_staff(batch_id, staff_id),
            self.timeout,
        )
        .await?;

        info!("batch {} allocated to staff {:?}", batch_id, staff_id);

        self.roster
            .lock()
            .await
            .iter()
            .find(|b| b.id == batch_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }
}
