//! Adapters over the device's platform services.
//!
//! Each adapter borrows the service trait it needs and absorbs or surfaces
//! failures the way the inventory expects:
//!
//! - [`AccountDirectory`]: user identities, plus the page user handed to a
//!   library applet
//! - [`PlayHistoryAdapter`]: recently-played titles, with the request layout
//!   picked from the platform version
//! - [`InstalledCatalog`]: paginated installed application listing
//! - [`ServiceContext`]: scoped start/stop of the service sessions

pub mod accounts;
pub mod catalog;
pub mod context;
pub mod error;
pub mod memory;
pub mod play_history;
pub mod services;

// Re-export primary types.
pub use accounts::AccountDirectory;
pub use catalog::InstalledCatalog;
pub use context::{ServiceContext, ServiceLifecycle};
pub use error::{ResultCode, ServiceError};
pub use memory::{DeviceSnapshot, MemoryPlatform};
pub use play_history::PlayHistoryAdapter;
pub use services::{
    AccountService, AppletStorage, HostEnvironment, InstalledAppService, Platform,
    PlayHistoryService, SubAppletPayload,
};
