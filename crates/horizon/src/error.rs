use std::fmt;

use activity_protocol::ProtocolError;

/// Raw result code returned by a platform service call.
///
/// Zero is success; everything else packs a module number in the low 9 bits
/// and a description in the next 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(pub u32);

impl ResultCode {
    pub const SUCCESS: ResultCode = ResultCode(0);

    pub const fn from_parts(module: u32, description: u32) -> Self {
        Self((module & 0x1FF) | ((description & 0x1FFF) << 9))
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    pub fn module(self) -> u32 {
        self.0 & 0x1FF
    }

    pub fn description(self) -> u32 {
        (self.0 >> 9) & 0x1FFF
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:04} (0x{:x})",
            2000 + self.module(),
            self.description(),
            self.0
        )
    }
}

/// Errors for platform service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service call failed with result {0}")]
    Status(ResultCode),

    #[error("failed to start {service} session: result {code}")]
    SessionStart {
        service: &'static str,
        code: ResultCode,
    },

    #[error("applet storage error: {0}")]
    Storage(String),

    #[error("not running as a library applet")]
    NotSubApplet,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_code_parts() {
        let rc = ResultCode::from_parts(178, 2);
        assert_eq!(rc.module(), 178);
        assert_eq!(rc.description(), 2);
        assert!(!rc.is_success());
        assert!(ResultCode::SUCCESS.is_success());
    }

    #[test]
    fn result_code_display() {
        let rc = ResultCode::from_parts(124, 1);
        assert!(rc.to_string().starts_with("2124-0001"));
    }
}
