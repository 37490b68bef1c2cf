use activity_protocol::{ApplicationId, InstalledRecord};
use tracing::{debug, warn};

use crate::services::InstalledAppService;

/// Paginated enumeration of installed applications.
pub struct InstalledCatalog<'a> {
    service: &'a dyn InstalledAppService,
}

impl<'a> InstalledCatalog<'a> {
    pub fn new(service: &'a dyn InstalledAppService) -> Self {
        Self { service }
    }

    /// Drains the installed application listing, `page_size` records at a time.
    ///
    /// Stops at the first failed or empty page and returns everything read
    /// before it.
    pub fn list_installed(&self, page_size: u32) -> Vec<ApplicationId> {
        let mut records = vec![InstalledRecord::default(); page_size as usize];
        let mut ids = Vec::new();
        let mut page_index: u32 = 0;

        loop {
            let count = match self.service.list_page(page_index, &mut records) {
                Ok(0) => break,
                Ok(count) => count.min(records.len()),
                Err(e) => {
                    warn!(page_index, error = %e, "installed application listing failed");
                    break;
                }
            };

            ids.extend(records[..count].iter().map(|r| r.application_id));

            // One page per iteration, regardless of how many records it held.
            page_index = match page_index.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(count = ids.len(), pages = page_index, "listed installed applications");
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResultCode, ServiceError};
    use std::sync::Mutex;

    /// Serves a scripted sequence of page sizes; `None` is a failure.
    struct ScriptedPages {
        pages: Vec<Option<usize>>,
        requests: Mutex<Vec<u32>>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<Option<usize>>) -> Self {
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<u32> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl InstalledAppService for ScriptedPages {
        fn list_page(
            &self,
            page_index: u32,
            records: &mut [InstalledRecord],
        ) -> Result<usize, ServiceError> {
            self.requests.lock().unwrap().push(page_index);
            match self.pages.get(page_index as usize).copied().flatten() {
                Some(count) => {
                    for (i, record) in records.iter_mut().take(count).enumerate() {
                        record.application_id = ApplicationId(page_index as u64 * 100 + i as u64);
                    }
                    Ok(count)
                }
                None if (page_index as usize) < self.pages.len() => {
                    Err(ServiceError::Status(ResultCode::from_parts(16, 1)))
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn drains_until_empty_page() {
        let service = ScriptedPages::new(vec![Some(3), Some(3), Some(3), Some(0)]);
        let ids = InstalledCatalog::new(&service).list_installed(3);

        assert_eq!(ids.len(), 9);
        assert_eq!(service.requests(), vec![0, 1, 2, 3]);
        assert_eq!(ids[0], ApplicationId(0));
        assert_eq!(ids[3], ApplicationId(100));
        assert_eq!(ids[8], ApplicationId(202));
    }

    #[test]
    fn failure_keeps_earlier_pages() {
        let service = ScriptedPages::new(vec![Some(2), None, Some(2)]);
        let ids = InstalledCatalog::new(&service).list_installed(2);

        assert_eq!(ids, vec![ApplicationId(0), ApplicationId(1)]);
        assert_eq!(service.requests(), vec![0, 1]);
    }

    #[test]
    fn partial_page_does_not_end_listing() {
        let service = ScriptedPages::new(vec![Some(4), Some(1), Some(4), Some(0)]);
        let ids = InstalledCatalog::new(&service).list_installed(4);

        assert_eq!(ids.len(), 9);
        assert_eq!(service.requests(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn first_page_failure_is_empty() {
        let service = ScriptedPages::new(vec![None]);
        let ids = InstalledCatalog::new(&service).list_installed(10);

        assert!(ids.is_empty());
        assert_eq!(service.requests(), vec![0]);
    }
}
