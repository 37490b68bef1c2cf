//! In-memory platform built from a device snapshot.
//!
//! Implements every service trait over plain data and records the requests
//! it receives, so callers can inspect exactly what went over the wire.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use activity_protocol::constants::{FLAGGED_REQUEST_SINCE, PAGE_USER_OFFSET};
use activity_protocol::{
    ApplicationId, InstalledRecord, PlatformVersion, PlayHistoryRequest, UserIdentity,
};
use serde::{Deserialize, Serialize};

use crate::context::ServiceLifecycle;
use crate::error::{ResultCode, ServiceError};
use crate::services::{
    AccountService, AppletStorage, HostEnvironment, InstalledAppService, PlayHistoryService,
    SubAppletPayload,
};

/// Result returned when a request uses the wrong layout for the platform.
pub const RESULT_INVALID_REQUEST: ResultCode = ResultCode::from_parts(178, 3);

/// Result returned by simulated service failures.
pub const RESULT_SIMULATED_FAILURE: ResultCode = ResultCode::from_parts(178, 1);

/// Size of the common-arguments storage pushed ahead of the page storage.
const COMMON_ARGS_LEN: usize = 0x20;

fn is_false(v: &bool) -> bool {
    !*v
}

/// Optional byte buffers stored as hex strings. Malformed hex fails to
/// deserialize.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => s.serialize_some(&hex::encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| {
                hex::decode(&s)
                    .map_err(|e| serde::de::Error::custom(format!("invalid hex {s:?}: {e}")))
            })
            .transpose()
    }
}

/// A user account in a device snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotUser {
    pub id: UserIdentity,
    #[serde(default)]
    pub played: Vec<ApplicationId>,
    /// Play history queries for this user fail.
    #[serde(default, skip_serializing_if = "is_false")]
    pub history_fails: bool,
}

/// Describes a device for [`MemoryPlatform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    pub platform_version: PlatformVersion,
    #[serde(default)]
    pub users: Vec<SnapshotUser>,
    #[serde(default)]
    pub installed: Vec<ApplicationId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub account_listing_fails: bool,
    /// Page index at which installed listing starts failing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_fails_at_page: Option<u32>,
    /// Page storage handed over when launched as a library applet, written
    /// as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
    pub page_storage: Option<Vec<u8>>,
}

impl DeviceSnapshot {
    pub fn new(platform_version: PlatformVersion) -> Self {
        Self {
            platform_version,
            users: Vec::new(),
            installed: Vec::new(),
            account_listing_fails: false,
            installed_fails_at_page: None,
            page_storage: None,
        }
    }

    /// Adds a user with the given play history.
    pub fn with_user(mut self, id: UserIdentity, played: &[u64]) -> Self {
        self.users.push(SnapshotUser {
            id,
            played: played.iter().copied().map(ApplicationId).collect(),
            history_fails: false,
        });
        self
    }

    pub fn with_installed(mut self, installed: &[u64]) -> Self {
        self.installed = installed.iter().copied().map(ApplicationId).collect();
        self
    }

    /// Sets the page storage to name `user` at the expected offset.
    pub fn with_page_user(mut self, user: UserIdentity) -> Self {
        let mut page = vec![0u8; PAGE_USER_OFFSET];
        page.extend_from_slice(&user.to_bytes());
        self.page_storage = Some(page);
        self
    }
}

/// A request seen by the in-memory play history service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub command_id: u32,
    pub input: Vec<u8>,
    pub limit: usize,
}

/// Lifecycle events recorded by [`MemoryPlatform::sessions`].
pub type SessionLog = Arc<Mutex<Vec<String>>>;

/// In-memory implementation of every platform service.
pub struct MemoryPlatform {
    snapshot: DeviceSnapshot,
    storages: Mutex<VecDeque<AppletStorage>>,
    queries: Mutex<Vec<RecordedQuery>>,
    page_requests: Mutex<Vec<u32>>,
    session_log: SessionLog,
}

impl MemoryPlatform {
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        let storages = match &snapshot.page_storage {
            Some(page) => VecDeque::from([
                AppletStorage::new(vec![0; COMMON_ARGS_LEN]),
                AppletStorage::new(page.clone()),
            ]),
            None => VecDeque::new(),
        };

        Self {
            snapshot,
            storages: Mutex::new(storages),
            queries: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            session_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }

    /// Play history requests received so far.
    pub fn queries(&self) -> Vec<RecordedQuery> {
        lock(&self.queries).clone()
    }

    /// Page indices requested from the installed listing so far.
    pub fn page_requests(&self) -> Vec<u32> {
        lock(&self.page_requests).clone()
    }

    /// Sessions matching the services this platform provides.
    pub fn sessions(&self) -> Vec<Box<dyn ServiceLifecycle>> {
        ["accounts", "applications", "play-history"]
            .into_iter()
            .map(|name| {
                Box::new(MemorySession {
                    name,
                    log: Arc::clone(&self.session_log),
                }) as Box<dyn ServiceLifecycle>
            })
            .collect()
    }

    pub fn session_log(&self) -> SessionLog {
        Arc::clone(&self.session_log)
    }

    fn user(&self, id: &UserIdentity) -> Option<&SnapshotUser> {
        self.snapshot.users.iter().find(|u| u.id == *id)
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl AccountService for MemoryPlatform {
    fn list_all_users(&self, max_slots: usize) -> Result<Vec<UserIdentity>, ServiceError> {
        if self.snapshot.account_listing_fails {
            return Err(ServiceError::Status(RESULT_SIMULATED_FAILURE));
        }
        Ok(self
            .snapshot
            .users
            .iter()
            .take(max_slots)
            .map(|u| u.id)
            .collect())
    }
}

impl PlayHistoryService for MemoryPlatform {
    fn dispatch(
        &self,
        command_id: u32,
        input: &[u8],
        out: &mut [ApplicationId],
    ) -> Result<u32, ServiceError> {
        lock(&self.queries).push(RecordedQuery {
            command_id,
            input: input.to_vec(),
            limit: out.len(),
        });

        let request = PlayHistoryRequest::decode(input)
            .map_err(|_| ServiceError::Status(RESULT_INVALID_REQUEST))?;

        let expects_flagged = self.snapshot.platform_version >= FLAGGED_REQUEST_SINCE;
        let is_flagged = matches!(request, PlayHistoryRequest::Flagged { .. });
        if expects_flagged != is_flagged {
            return Err(ServiceError::Status(RESULT_INVALID_REQUEST));
        }

        let Some(user) = self.user(&request.user()) else {
            return Ok(0);
        };
        if user.history_fails {
            return Err(ServiceError::Status(RESULT_SIMULATED_FAILURE));
        }

        let written = user.played.len().min(out.len());
        out[..written].copy_from_slice(&user.played[..written]);
        Ok(written as u32)
    }
}

impl InstalledAppService for MemoryPlatform {
    fn list_page(
        &self,
        page_index: u32,
        records: &mut [InstalledRecord],
    ) -> Result<usize, ServiceError> {
        lock(&self.page_requests).push(page_index);

        if self
            .snapshot
            .installed_fails_at_page
            .is_some_and(|at| page_index >= at)
        {
            return Err(ServiceError::Status(RESULT_SIMULATED_FAILURE));
        }

        let installed = &self.snapshot.installed;
        let start = (page_index as usize)
            .saturating_mul(records.len())
            .min(installed.len());
        let end = start.saturating_add(records.len()).min(installed.len());

        for (record, id) in records.iter_mut().zip(&installed[start..end]) {
            *record = InstalledRecord {
                application_id: *id,
            };
        }
        Ok(end - start)
    }
}

impl HostEnvironment for MemoryPlatform {
    fn platform_version(&self) -> PlatformVersion {
        self.snapshot.platform_version
    }
}

impl SubAppletPayload for MemoryPlatform {
    fn is_sub_applet(&self) -> bool {
        self.snapshot.page_storage.is_some()
    }

    fn pop_storage(&self) -> Result<AppletStorage, ServiceError> {
        lock(&self.storages)
            .pop_front()
            .ok_or_else(|| ServiceError::Storage("no input storage left".into()))
    }
}

struct MemorySession {
    name: &'static str,
    log: SessionLog,
}

impl ServiceLifecycle for MemorySession {
    fn name(&self) -> &'static str {
        self.name
    }

    fn start(&mut self) -> Result<(), ServiceError> {
        lock(&self.log).push(format!("start {}", self.name));
        Ok(())
    }

    fn stop(&mut self) {
        lock(&self.log).push(format!("stop {}", self.name));
    }
}
