//! Generic Redis Streams queue.
//!
//! Each logical queue (video processing, notification requests) is its own
//! [`Queue`] instance bound to its own stream name and consumer group;
//! message payloads are whatever the caller's `T` is.

use std::marker::PhantomData;
use std::time::Duration;

use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{QueueError, QueueResult};

#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub redis_url: String,
    pub stream_name: String,
    pub consumer_group: String,
    /// How long a claimed message is invisible to other consumers before it
    /// is eligible for redelivery to a different consumer.
    pub visibility_timeout: Duration,
}

impl QueueConfig {
    /// Reads `REDIS_URL` plus the given stream/group env var names, falling
    /// back to `default_stream`/`default_group` when unset.
    pub fn from_env(
        stream_env: &str,
        default_stream: &str,
        group_env: &str,
        default_group: &str,
    ) -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            stream_name: std::env::var(stream_env)
                .unwrap_or_else(|_| default_stream.to_string()),
            consumer_group: std::env::var(group_env)
                .unwrap_or_else(|_| default_group.to_string()),
            visibility_timeout: Duration::from_secs(
                std::env::var("QUEUE_VISIBILITY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}

/// Outcome of decoding one delivered message.
pub enum Delivery<T> {
    Message { message_id: String, payload: T },
    /// The payload could not be deserialized. Callers must delete this
    /// message explicitly (no dead-letter queue exists in this design; a
    /// poison-pill message is dropped, not retried).
    Undecodable { message_id: String, raw_error: String },
}

pub struct Queue<T> {
    client: redis::Client,
    config: QueueConfig,
    _payload: PhantomData<T>,
}

impl<T> Queue<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(config: QueueConfig) -> QueueResult<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        Ok(Self {
            client,
            config,
            _payload: PhantomData,
        })
    }

    /// Creates the consumer group if it doesn't already exist.
    pub async fn init(&self) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let result: Result<(), redis::RedisError> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg("$")
            .arg("MKSTREAM")
            .query_async(&mut conn)
            .await;

        match result {
            Ok(_) => info!(stream = %self.config.stream_name, "created consumer group"),
            Err(e) if e.to_string().contains("BUSYGROUP") => {
                debug!(stream = %self.config.stream_name, "consumer group already exists");
            }
            Err(e) => return Err(QueueError::Redis(e)),
        }

        Ok(())
    }

    /// Enqueues a message. `idempotency_key` dedupes enqueue attempts for a
    /// fixed window; a duplicate call within that window is rejected rather
    /// than silently dropped, so callers can tell a retry from a dropped send.
    pub async fn enqueue(&self, payload: &T, idempotency_key: &str) -> QueueResult<String> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let dedup_key = format!("pipeline:dedup:{}:{}", self.config.stream_name, idempotency_key);
        let acquired: bool = redis::cmd("SET")
            .arg(&dedup_key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(3600)
            .query_async(&mut conn)
            .await
            .unwrap_or(false);

        if !acquired {
            return Err(QueueError::enqueue_failed("duplicate enqueue rejected"));
        }

        let body = serde_json::to_string(payload)?;

        let message_id: String = redis::cmd("XADD")
            .arg(&self.config.stream_name)
            .arg("*")
            .arg("payload")
            .arg(&body)
            .query_async(&mut conn)
            .await?;

        info!(message_id = %message_id, stream = %self.config.stream_name, "enqueued message");
        Ok(message_id)
    }

    /// Long-polling receive of up to `count` new messages.
    pub async fn receive(
        &self,
        consumer_name: &str,
        count: usize,
        block: Duration,
    ) -> QueueResult<Vec<Delivery<T>>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let result: redis::streams::StreamReadReply = redis::cmd("XREADGROUP")
            .arg("GROUP")
            .arg(&self.config.consumer_group)
            .arg(consumer_name)
            .arg("COUNT")
            .arg(count)
            .arg("BLOCK")
            .arg(block.as_millis() as u64)
            .arg("STREAMS")
            .arg(&self.config.stream_name)
            .arg(">")
            .query_async(&mut conn)
            .await?;

        let mut deliveries = Vec::new();

        for stream_key in result.keys {
            for entry in stream_key.ids {
                let message_id = entry.id.clone();
                if let Some(redis::Value::BulkString(payload)) = entry.map.get("payload") {
                    let payload_str = String::from_utf8_lossy(payload);
                    match serde_json::from_str::<T>(&payload_str) {
                        Ok(payload) => deliveries.push(Delivery::Message { message_id, payload }),
                        Err(e) => {
                            warn!(message_id = %message_id, error = %e, "undecodable message");
                            deliveries.push(Delivery::Undecodable {
                                message_id,
                                raw_error: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(deliveries)
    }

    /// Reclaims messages that have been pending longer than
    /// `config.visibility_timeout`, handling redelivery after a crashed
    /// consumer.
    pub async fn claim_stale(
        &self,
        consumer_name: &str,
        count: usize,
    ) -> QueueResult<Vec<Delivery<T>>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let min_idle_ms = self.config.visibility_timeout.as_millis() as u64;

        let pending_details: Vec<Vec<redis::Value>> = redis::cmd("XPENDING")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg("-")
            .arg("+")
            .arg(count)
            .query_async(&mut conn)
            .await?;

        let mut ids_to_claim = Vec::new();
        for detail in pending_details {
            if let (Some(redis::Value::BulkString(id_bytes)), Some(redis::Value::Int(idle_ms))) =
                (detail.first(), detail.get(2))
            {
                if *idle_ms as u64 >= min_idle_ms {
                    if let Ok(id) = String::from_utf8(id_bytes.clone()) {
                        ids_to_claim.push(id);
                    }
                }
            }
        }

        if ids_to_claim.is_empty() {
            return Ok(Vec::new());
        }

        let mut cmd = redis::cmd("XCLAIM");
        cmd.arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg(consumer_name)
            .arg(min_idle_ms);
        for id in &ids_to_claim {
            cmd.arg(id);
        }

        let claimed: Vec<Vec<redis::Value>> = cmd.query_async(&mut conn).await?;
        let mut deliveries = Vec::new();

        for message in claimed {
            let (Some(redis::Value::BulkString(id_bytes)), Some(redis::Value::Array(fields))) =
                (message.first(), message.get(1))
            else {
                continue;
            };
            let Ok(message_id) = String::from_utf8(id_bytes.clone()) else {
                continue;
            };

            let mut payload_str = None;
            let mut i = 0;
            while i + 1 < fields.len() {
                if let (
                    Some(redis::Value::BulkString(field_bytes)),
                    Some(redis::Value::BulkString(value_bytes)),
                ) = (fields.get(i), fields.get(i + 1))
                {
                    if field_bytes.as_slice() == b"payload" {
                        payload_str = String::from_utf8(value_bytes.clone()).ok();
                        break;
                    }
                }
                i += 2;
            }

            if let Some(raw) = payload_str {
                match serde_json::from_str::<T>(&raw) {
                    Ok(payload) => deliveries.push(Delivery::Message { message_id, payload }),
                    Err(e) => deliveries.push(Delivery::Undecodable {
                        message_id,
                        raw_error: e.to_string(),
                    }),
                }
            }
        }

        Ok(deliveries)
    }

    /// Acknowledges and removes a message after it has reached a terminal
    /// outcome (success, or a handled failure that should not be retried).
    pub async fn delete(&self, message_id: &str) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        redis::cmd("XACK")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg(message_id)
            .query_async::<()>(&mut conn)
            .await?;

        redis::cmd("XDEL")
            .arg(&self.config.stream_name)
            .arg(message_id)
            .query_async::<()>(&mut conn)
            .await?;

        debug!(message_id = %message_id, "deleted message");
        Ok(())
    }

    pub async fn len(&self) -> QueueResult<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let len: u64 = conn.xlen(&self.config.stream_name).await?;
        Ok(len)
    }
}
