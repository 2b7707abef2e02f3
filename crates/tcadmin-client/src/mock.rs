//! Test doubles for the transport and browser seams
//!
//! `MockTransport` records every call and answers from a queue of canned
//! bodies; `MockBrowser` records the actions a login performs.

use crate::error::TcAdminError;
use crate::login::ScriptedBrowser;
use crate::models::RequestParameters;
use crate::transport::Transport;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Endpoint posted to
    pub url: String,
    /// Form fields sent
    pub params: RequestParameters,
    /// Timeout applied to the call
    pub timeout: Duration,
}

/// Transport that answers from a queue.
///
/// Clones share the same queue and request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Transport with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body
    pub fn push_body(&self, body: impl Into<String>) {
        lock(&self.responses).push_back(Ok(body.into()));
    }

    /// Queue a transport failure
    pub fn push_error(&self, message: impl Into<String>) {
        lock(&self.responses).push_back(Err(message.into()));
    }

    /// All calls seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Most recent call
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &RequestParameters,
        timeout: Duration,
    ) -> Result<String, TcAdminError> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            params: form.clone(),
            timeout,
        });

        match lock(&self.responses).pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(TcAdminError::Transport(message)),
            None => Err(TcAdminError::Transport("no mock response queued".to_string())),
        }
    }
}

/// Something a [`MockBrowser`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    /// Header added
    Header(String),
    /// Page loaded
    Get(String),
    /// Form field filled (name, value)
    SetField(String, String),
    /// Form submitted with the named button
    Submit(String),
}

/// Browser whose page title changes once a form is submitted
#[derive(Debug, Clone, Default)]
pub struct MockBrowser {
    title: Option<String>,
    title_after_submit: Option<String>,
    cookies: HashMap<String, String>,
    actions: Vec<BrowserAction>,
}

impl MockBrowser {
    /// Browser showing the login page
    pub fn new() -> Self {
        Self {
            title: Some("Login".to_string()),
            ..Self::default()
        }
    }

    /// Page title once a form is submitted
    pub fn with_title_after_submit(mut self, title: impl Into<String>) -> Self {
        self.title_after_submit = Some(title.into());
        self
    }

    /// Cookie the browser holds once a form is submitted
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Actions performed so far
    pub fn actions(&self) -> &[BrowserAction] {
        &self.actions
    }

    fn submitted(&self) -> bool {
        self.actions.iter().any(|a| matches!(a, BrowserAction::Submit(_)))
    }
}

#[async_trait::async_trait]
impl ScriptedBrowser for MockBrowser {
    fn add_header(&mut self, header: &str) {
        self.actions.push(BrowserAction::Header(header.to_string()));
    }

    async fn get(&mut self, url: &str) -> Result<(), TcAdminError> {
        self.actions.push(BrowserAction::Get(url.to_string()));
        Ok(())
    }

    fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), TcAdminError> {
        self.actions.push(BrowserAction::SetField(name.to_string(), value.to_string()));
        Ok(())
    }

    async fn click_submit_by_name(&mut self, name: &str) -> Result<(), TcAdminError> {
        self.actions.push(BrowserAction::Submit(name.to_string()));
        if let Some(title) = self.title_after_submit.clone() {
            self.title = Some(title);
        }
        Ok(())
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn cookie_value(&self, name: &str) -> Option<String> {
        if !self.submitted() {
            return None;
        }
        self.cookies.get(name).cloned()
    }
}
