use crate::error::PrebinError;

pub fn get_exit_code(error: &PrebinError) -> i32 {
    match error {
        PrebinError::ConfigFile(_)
        | PrebinError::InvalidConfig(_)
        | PrebinError::ValidationError(_) => 2,

        PrebinError::UnsupportedPlatform { .. } => 3,

        PrebinError::NotInstalled { .. } => 4,

        PrebinError::PermissionDenied(_) => 13,

        PrebinError::Download { .. } | PrebinError::Http(_) => 20,

        PrebinError::ChecksumMismatch { .. } => 21,

        PrebinError::Extract(_) => 22,

        // EX_TEMPFAIL: another process holds the installation lock
        PrebinError::LockingAcquire { .. } | PrebinError::LockingTimeout { .. } => 75,

        _ => 1,
    }
}
