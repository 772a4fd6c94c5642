//! Test doubles shared by the unit tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::hardware::Hardware;
use crate::params::{MemoryParams, ParamStore};
use crate::prompt::Prompt;
use crate::ssh_keys::{FetchError, KeySource};

enum Reply {
    Body(String),
    NotFound,
    Status(u16),
}

/// Key source returning a canned reply after an optional delay
pub struct ScriptedSource {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn body(body: &str) -> Self {
        Self::new(Reply::Body(body.to_string()))
    }

    pub fn not_found() -> Self {
        Self::new(Reply::NotFound)
    }

    pub fn status(code: u16) -> Self {
        Self::new(Reply::Status(code))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeySource for ScriptedSource {
    fn keys_url(&self, username: &str) -> String {
        format!("https://keys.test/{}.keys", username)
    }

    async fn fetch_keys(&self, _username: &str) -> std::result::Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::NotFound => Err(FetchError::NotFound),
            Reply::Status(code) => Err(FetchError::Status(*code)),
        }
    }
}

/// Store whose writes fail, either all of them or only those for one key
pub struct FailingParams {
    inner: MemoryParams,
    failing_key: Option<&'static str>,
}

impl FailingParams {
    pub fn all() -> Self {
        Self {
            inner: MemoryParams::new(),
            failing_key: None,
        }
    }

    pub fn on_key(key: &'static str) -> Self {
        Self {
            inner: MemoryParams::new(),
            failing_key: Some(key),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.snapshot()
    }

    fn check(&self, key: &str) -> Result<()> {
        match self.failing_key {
            Some(failing) if failing != key => Ok(()),
            _ => Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into()),
        }
    }
}

impl ParamStore for FailingParams {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.check(key)?;
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

/// Prompt with scripted answers that records what was shown
#[derive(Default)]
pub struct RecordingPrompt {
    pub texts: RefCell<VecDeque<Option<String>>>,
    pub confirm_answer: bool,
    pub confirmations: RefCell<Vec<String>>,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingPrompt {
    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    pub fn with_text(self, text: Option<&str>) -> Self {
        self.texts.borrow_mut().push_back(text.map(str::to_string));
        self
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn request_text(&self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.texts.borrow_mut().pop_front().flatten())
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.confirmations.borrow_mut().push(prompt.to_string());
        self.confirm_answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Hardware that only counts power actions
#[derive(Default)]
pub struct FakeHardware {
    pub tici: bool,
    pub os_version: String,
    pub reboots: AtomicUsize,
    pub poweroffs: AtomicUsize,
}

impl FakeHardware {
    pub fn tici() -> Self {
        Self {
            tici: true,
            ..Self::default()
        }
    }

    pub fn reboots(&self) -> usize {
        self.reboots.load(Ordering::SeqCst)
    }

    pub fn poweroffs(&self) -> usize {
        self.poweroffs.load(Ordering::SeqCst)
    }
}

impl Hardware for FakeHardware {
    fn is_tici(&self) -> bool {
        self.tici
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }

    fn reboot(&self) -> Result<()> {
        self.reboots.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn poweroff(&self) -> Result<()> {
        self.poweroffs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
