//! Raise the permission bits of files and directories to a minimum, never
//! lowering any bit that is already granted.

pub mod cli;
pub mod enforce;
pub mod error;
pub mod perm;
pub mod walk;

pub use enforce::{Change, Chmod, Enforcer, LogReport, Report, SetMode, Summary};
pub use error::{CliError, EnforceError, ModeError};
pub use perm::{Permission, PermissionSet};
pub use walk::{Entry, Traverse, Tree};
