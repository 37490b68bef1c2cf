//! Recently-played queries against the play history service.
//!
//! The service changed its request layout at 10.0.0 without changing the
//! command id. The layout is picked from the platform version on every call;
//! see [`activity_protocol::request`] for both layouts.

use activity_protocol::constants::PLAY_HISTORY_COMMAND_ID;
use activity_protocol::{ApplicationId, PlayHistoryRequest, PlayedTitles, UserIdentity};
use tracing::debug;

use crate::error::ServiceError;
use crate::services::{HostEnvironment, PlayHistoryService};

/// Version-aware adapter over [`PlayHistoryService`].
pub struct PlayHistoryAdapter<'a> {
    service: &'a dyn PlayHistoryService,
    host: &'a dyn HostEnvironment,
}

impl<'a> PlayHistoryAdapter<'a> {
    pub fn new(service: &'a dyn PlayHistoryService, host: &'a dyn HostEnvironment) -> Self {
        Self { service, host }
    }

    /// Returns up to `limit` titles `user` has played.
    ///
    /// `flag` is forwarded in the request header on platforms that have one.
    pub fn query_played(
        &self,
        user: UserIdentity,
        flag: bool,
        limit: u32,
    ) -> Result<PlayedTitles, ServiceError> {
        let version = self.host.platform_version();
        let request = PlayHistoryRequest::for_version(version, user, flag);
        let input = request.encode();
        debug!(
            %user,
            %version,
            request_len = input.len(),
            payload = %hex::encode(&input),
            "querying recently played titles"
        );

        let mut ids = vec![ApplicationId::default(); limit as usize];
        let reported = self
            .service
            .dispatch(PLAY_HISTORY_COMMAND_ID, &input, &mut ids)?;

        let count = (reported as usize).min(ids.len());
        ids.truncate(count);
        debug!(%user, reported, count, "play history query returned");

        Ok(PlayedTitles {
            user,
            application_ids: ids,
            total: reported,
        })
    }
}
