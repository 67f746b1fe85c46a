//! Request construction and response interpretation per operation
//!
//! A [`BatchPlan`] tells the executor how to turn one batch of items into a request
//! and how to read the response. The executor owns partitioning, staggering, retry
//! and reporting.

use super::operation::{Addressing, BulkOperation, Endpoint, Noun, REDIRECT_RULES};
use crate::adapters::zendesk::{ApiRequest, ApiResponse, ZendeskClient};
use crate::domain::{BulkError, RedirectRule, ResourceId, Result};
use serde_json::{json, Value};
use std::collections::HashSet;

/// An item the server did not process although the batch request succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub item: String,
    pub reason: String,
}

impl Unresolved {
    pub fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            reason: reason.into(),
        }
    }
}

/// Per-operation request builder and response reader
pub trait BatchPlan<I> {
    fn noun(&self) -> Noun;

    /// Progressive verb, e.g. "Archiving"
    fn verb(&self) -> &'static str;

    fn endpoint(&self) -> Endpoint;

    /// Short text identifying an item in log lines
    fn label(&self, item: &I) -> String;

    fn request(&self, client: &ZendeskClient, batch: &[I]) -> Result<ApiRequest>;

    /// Items a successful response reports as not processed
    fn unresolved(&self, _batch: &[I], _response: &ApiResponse) -> Vec<Unresolved> {
        Vec::new()
    }

    fn success_message(&self, batch: &[I], response: &ApiResponse) -> String;

    fn not_found_message(&self, batch: &[I]) -> String {
        let labels: Vec<String> = batch.iter().map(|item| self.label(item)).collect();
        format!(
            "[{}] {} not found or already processed",
            labels.join(","),
            self.noun().count(batch.len())
        )
    }

    /// "Archiving 1 article...", "Archiving 3 articles..."
    fn progress_message(&self, total: usize) -> String {
        format!("{} {}...", self.verb(), self.noun().count(total))
    }
}

fn single<'a, I>(batch: &'a [I], endpoint: &Endpoint) -> Result<&'a I> {
    match batch {
        [item] => Ok(item),
        _ => Err(BulkError::Validation(format!(
            "{} accepts exactly one item per request, got {}",
            endpoint.path,
            batch.len()
        ))),
    }
}

fn join_ids(batch: &[ResourceId]) -> String {
    batch
        .iter()
        .map(ResourceId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Plan for the enumerated [`BulkOperation`]s over resource identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    operation: BulkOperation,
    topic_id: Option<String>,
}

impl OperationPlan {
    /// `topic_id` is required by [`BulkOperation::PatchPosts`] and ignored otherwise
    pub fn new(operation: BulkOperation, topic_id: Option<String>) -> Result<Self> {
        let topic_id = topic_id
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if operation == BulkOperation::PatchPosts && topic_id.is_none() {
            return Err(BulkError::Configuration(
                "a destination topic id (--topic-id) is required to patch posts".to_string(),
            ));
        }

        Ok(Self {
            operation,
            topic_id,
        })
    }

    pub fn operation(&self) -> BulkOperation {
        self.operation
    }

    fn job_failures(response: &ApiResponse) -> Vec<Unresolved> {
        let Ok(body) = response.json::<Value>() else {
            return Vec::new();
        };

        let Some(results) = body
            .pointer("/job_status/results")
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        results
            .iter()
            .filter(|entry| {
                entry.get("error").is_some_and(|e| !e.is_null())
                    || entry.get("success").and_then(Value::as_bool) == Some(false)
            })
            .map(|entry| {
                let id = entry
                    .get("id")
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_else(|| "?".to_string());
                let reason = entry
                    .get("details")
                    .or_else(|| entry.get("error"))
                    .and_then(Value::as_str)
                    .unwrap_or("failed")
                    .to_string();
                Unresolved::new(id, reason)
            })
            .collect()
    }

    fn missing_tickets(batch: &[ResourceId], response: &ApiResponse) -> Vec<Unresolved> {
        let Ok(body) = response.json::<Value>() else {
            return Vec::new();
        };

        let returned: HashSet<String> = body
            .get("tickets")
            .and_then(Value::as_array)
            .map(|tickets| {
                tickets
                    .iter()
                    .filter_map(|t| t.get("id"))
                    .map(|id| match id {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        batch
            .iter()
            .filter(|id| !returned.contains(id.as_str()))
            .map(|id| Unresolved::new(id.as_str(), "not found"))
            .collect()
    }
}

impl BatchPlan<ResourceId> for OperationPlan {
    fn noun(&self) -> Noun {
        self.operation.resource().noun()
    }

    fn verb(&self) -> &'static str {
        self.operation.verb()
    }

    fn endpoint(&self) -> Endpoint {
        self.operation.endpoint()
    }

    fn label(&self, item: &ResourceId) -> String {
        item.to_string()
    }

    fn request(&self, client: &ZendeskClient, batch: &[ResourceId]) -> Result<ApiRequest> {
        let endpoint = self.endpoint();

        let request = match endpoint.addressing {
            Addressing::IdsQuery => {
                let url = format!("{}?ids={}", client.api_url(endpoint.path), join_ids(batch));
                ApiRequest::new(endpoint.method, url)
            }
            Addressing::PathId | Addressing::Body => {
                let id = single(batch, &endpoint)?;
                let path = endpoint.path.replace("{id}", id.as_str());
                ApiRequest::new(endpoint.method, client.api_url(&path))
            }
        };

        Ok(match (&self.operation, &self.topic_id) {
            (BulkOperation::PatchPosts, Some(topic_id)) => {
                request.with_body(json!({ "topic_id": topic_id }))
            }
            _ => request,
        })
    }

    fn unresolved(&self, batch: &[ResourceId], response: &ApiResponse) -> Vec<Unresolved> {
        match self.operation {
            BulkOperation::ShowTickets => Self::missing_tickets(batch, response),
            _ => Self::job_failures(response),
        }
    }

    fn success_message(&self, batch: &[ResourceId], response: &ApiResponse) -> String {
        let body = response.json::<Value>().unwrap_or(Value::Null);

        match self.operation {
            BulkOperation::ArchiveArticles => {
                format!("[{}] Article successfully archived.", join_ids(batch))
            }
            BulkOperation::PatchPosts => {
                let post = body.get("post").cloned().unwrap_or(Value::Null);
                let field = |name: &str, fallback: &str| match post.get(name) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => fallback.to_string(),
                    Some(other) => other.to_string(),
                };
                format!(
                    "[{}] Post: {} - Topic: {}",
                    field("updated_at", "-"),
                    field("id", &join_ids(batch)),
                    field("topic_id", self.topic_id.as_deref().unwrap_or("-"))
                )
            }
            BulkOperation::ShowTickets => {
                let tickets = body
                    .get("tickets")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let mut lines = vec![format!("Found {}", self.noun().count(tickets.len()))];
                lines.extend(tickets.iter().map(|t| {
                    format!(
                        "[{}] {}",
                        t.get("id").map(Value::to_string).unwrap_or_default(),
                        t.get("subject").and_then(Value::as_str).unwrap_or("")
                    )
                }));
                lines.join("\n")
            }
            _ => {
                let mut message = format!(
                    "{} {}: {}",
                    self.operation.completed(),
                    self.noun().count(batch.len()),
                    join_ids(batch)
                );
                if let Some(job) = body.get("job_status") {
                    let id = job.get("id").and_then(Value::as_str).unwrap_or("-");
                    let status = job.get("status").and_then(Value::as_str).unwrap_or("-");
                    message.push_str(&format!(" (job {id}, {status})"));
                }
                message
            }
        }
    }

    fn not_found_message(&self, batch: &[ResourceId]) -> String {
        match self.operation {
            BulkOperation::ArchiveArticles => format!(
                "[Article ID: {}] There was an error archiving this article; it doesn't exist or has already been archived.",
                join_ids(batch)
            ),
            _ => format!(
                "[{}] {} not found or already processed",
                join_ids(batch),
                self.noun().count(batch.len())
            ),
        }
    }
}

/// Plan for creating Guide redirect rules, one rule per request
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectPlan;

impl BatchPlan<RedirectRule> for RedirectPlan {
    fn noun(&self) -> Noun {
        Noun::new("redirect", "redirects")
    }

    fn verb(&self) -> &'static str {
        "Setting"
    }

    fn endpoint(&self) -> Endpoint {
        REDIRECT_RULES
    }

    fn label(&self, rule: &RedirectRule) -> String {
        rule.redirect_from.clone()
    }

    fn request(&self, client: &ZendeskClient, batch: &[RedirectRule]) -> Result<ApiRequest> {
        let endpoint = self.endpoint();
        let rule = single(batch, &endpoint)?;
        let body = json!({
            "redirect_rule": {
                "redirect_from": rule.redirect_from,
                "redirect_status": rule.redirect_status,
                "redirect_to": rule.redirect_to,
            }
        });
        Ok(ApiRequest::new(endpoint.method, client.api_url(endpoint.path)).with_body(body))
    }

    fn success_message(&self, batch: &[RedirectRule], _response: &ApiResponse) -> String {
        batch
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
