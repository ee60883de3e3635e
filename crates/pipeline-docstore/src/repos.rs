//! Typed repositories over the document store: users, video jobs, and
//! notification delivery logs.

use std::collections::HashMap;

use pipeline_models::{NotificationRecord, NotificationStatus, User, VideoJob, VideoStatus};

use crate::client::FirestoreClient;
use crate::error::{FirestoreError, FirestoreResult};
use crate::types::{Document, FromFirestoreValue, ToFirestoreValue, Value};

const USERS_COLLECTION: &str = "users";
const VIDEO_JOBS_COLLECTION: &str = "video_jobs";
const NOTIFICATIONS_COLLECTION: &str = "notifications";

fn get_field<T: FromFirestoreValue>(fields: &HashMap<String, Value>, key: &str) -> Option<T> {
    fields.get(key).and_then(T::from_firestore_value)
}

fn document_fields(doc: &Document) -> FirestoreResult<&HashMap<String, Value>> {
    doc.fields
        .as_ref()
        .ok_or_else(|| FirestoreError::InvalidResponse("document has no fields".to_string()))
}

/// Persistence for registered accounts. Email lookups go through Firestore's
/// structured query API since `email` is not the document id (`id` is).
pub struct UserRepository {
    client: FirestoreClient,
}

impl UserRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, user: &User) -> FirestoreResult<()> {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), user.id.to_firestore_value());
        fields.insert("email".to_string(), user.email.to_firestore_value());
        fields.insert("password_hash".to_string(), user.password_hash.to_firestore_value());
        fields.insert("name".to_string(), user.name.to_firestore_value());
        fields.insert("created_at".to_string(), user.created_at.to_firestore_value());
        fields.insert("updated_at".to_string(), user.updated_at.to_firestore_value());

        self.client
            .with_retry("users.create", || {
                self.client.create_document(USERS_COLLECTION, &user.id, fields.clone())
            })
            .await?;
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> FirestoreResult<Option<User>> {
        let docs = self
            .client
            .with_retry("users.find_by_email", || {
                self.client.query_equals(USERS_COLLECTION, "email", Value::StringValue(email.to_string()))
            })
            .await?;

        docs.first().map(Self::from_document).transpose()
    }

    pub async fn find_by_id(&self, id: &str) -> FirestoreResult<Option<User>> {
        let doc = self
            .client
            .with_retry("users.find_by_id", || self.client.get_document(USERS_COLLECTION, id))
            .await?;
        match doc {
            Some(doc) => Ok(Some(Self::from_document(&doc)?)),
            None => Ok(None),
        }
    }

    fn from_document(doc: &Document) -> FirestoreResult<User> {
        let fields = document_fields(doc)?;
        Ok(User {
            id: get_field(fields, "id").unwrap_or_default(),
            email: get_field(fields, "email").unwrap_or_default(),
            password_hash: get_field(fields, "password_hash").unwrap_or_default(),
            name: get_field(fields, "name").unwrap_or_default(),
            created_at: get_field(fields, "created_at").unwrap_or_else(chrono::Utc::now),
            updated_at: get_field(fields, "updated_at").unwrap_or_else(chrono::Utc::now),
        })
    }
}

/// Persistence for video processing job rows, owned by `user_id`.
pub struct VideoJobRepository {
    client: FirestoreClient,
}

impl VideoJobRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, job: &VideoJob) -> FirestoreResult<()> {
        self.client
            .with_retry("video_jobs.create", || {
                self.client.create_document(VIDEO_JOBS_COLLECTION, &job.id, Self::to_fields(job))
            })
            .await?;
        Ok(())
    }

    pub async fn update(&self, job: &VideoJob) -> FirestoreResult<()> {
        let fields = Self::to_fields(job);
        let mask: Vec<String> = fields.keys().cloned().collect();
        self.client
            .with_retry("video_jobs.update", || {
                self.client
                    .update_document(VIDEO_JOBS_COLLECTION, &job.id, fields.clone(), mask.clone())
            })
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> FirestoreResult<Option<VideoJob>> {
        let doc = self
            .client
            .with_retry("video_jobs.find_by_id", || self.client.get_document(VIDEO_JOBS_COLLECTION, id))
            .await?;
        match doc {
            Some(doc) => Ok(Some(Self::from_document(&doc)?)),
            None => Ok(None),
        }
    }

    pub async fn list_for_user(&self, user_id: &str) -> FirestoreResult<Vec<VideoJob>> {
        let docs = self
            .client
            .with_retry("video_jobs.list_for_user", || {
                self.client.query_equals(
                    VIDEO_JOBS_COLLECTION,
                    "user_id",
                    Value::StringValue(user_id.to_string()),
                )
            })
            .await?;

        let mut jobs: Vec<VideoJob> = docs
            .iter()
            .map(Self::from_document)
            .collect::<FirestoreResult<_>>()?;
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    fn to_fields(job: &VideoJob) -> HashMap<String, Value> {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), job.id.to_firestore_value());
        fields.insert("user_id".to_string(), job.user_id.to_firestore_value());
        fields.insert("user_email".to_string(), job.user_email.to_firestore_value());
        fields.insert("original_name".to_string(), job.original_name.to_firestore_value());
        fields.insert("raw_object_key".to_string(), job.raw_object_key.to_firestore_value());
        fields.insert(
            "processed_object_key".to_string(),
            job.processed_object_key.to_firestore_value(),
        );
        fields.insert("status".to_string(), job.status.as_str().to_firestore_value());
        fields.insert(
            "progress_percent".to_string(),
            (job.progress_percent as i64).to_firestore_value(),
        );
        fields.insert("error_message".to_string(), job.error_message.to_firestore_value());
        fields.insert("file_size".to_string(), job.file_size.to_firestore_value());
        fields.insert("created_at".to_string(), job.created_at.to_firestore_value());
        fields.insert("updated_at".to_string(), job.updated_at.to_firestore_value());
        fields
    }

    fn from_document(doc: &Document) -> FirestoreResult<VideoJob> {
        let fields = document_fields(doc)?;
        let status_str: String = get_field(fields, "status").unwrap_or_default();
        let status = match status_str.as_str() {
            "processing" => VideoStatus::Processing,
            "completed" => VideoStatus::Completed,
            "failed" => VideoStatus::Failed,
            _ => VideoStatus::Pending,
        };

        Ok(VideoJob {
            id: get_field(fields, "id").unwrap_or_default(),
            user_id: get_field(fields, "user_id").unwrap_or_default(),
            user_email: get_field(fields, "user_email").unwrap_or_default(),
            original_name: get_field(fields, "original_name").unwrap_or_default(),
            raw_object_key: get_field(fields, "raw_object_key").unwrap_or_default(),
            processed_object_key: get_field(fields, "processed_object_key"),
            status,
            progress_percent: get_field::<i64>(fields, "progress_percent").unwrap_or(0) as u8,
            error_message: get_field(fields, "error_message"),
            file_size: get_field(fields, "file_size").unwrap_or(0),
            created_at: get_field(fields, "created_at").unwrap_or_else(chrono::Utc::now),
            updated_at: get_field(fields, "updated_at").unwrap_or_else(chrono::Utc::now),
        })
    }
}

/// Persistence for notification delivery logs, written once by the
/// notification worker after it has attempted a relay.
pub struct NotificationRepository {
    client: FirestoreClient,
}

impl NotificationRepository {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, record: &NotificationRecord) -> FirestoreResult<()> {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), record.id.to_firestore_value());
        fields.insert("subject".to_string(), record.subject.to_firestore_value());
        fields.insert("from".to_string(), record.from.to_firestore_value());
        fields.insert("to".to_string(), record.to.to_firestore_value());
        fields.insert("html".to_string(), record.html.to_firestore_value());
        let status_str = match record.status {
            NotificationStatus::Success => "SUCCESS",
            NotificationStatus::Failure => "FAILURE",
        };
        fields.insert("status".to_string(), status_str.to_firestore_value());

        self.client
            .with_retry("notifications.create", || {
                self.client.create_document(NOTIFICATIONS_COLLECTION, &record.id, fields.clone())
            })
            .await?;
        Ok(())
    }
}
