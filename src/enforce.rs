use crate::error::EnforceError;
use crate::perm::PermissionSet;
use crate::walk::{Entry, Traverse};
use log::{debug, info};
use nix::sys::stat::{fchmodat, FchmodatFlags, Mode};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

// setuid, setgid, sticky
const SPECIAL_BITS: u32 = 0o7000;

/// A permission raise that was applied, or would be in a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: PathBuf,
    pub permissions: PermissionSet,
    pub is_dir: bool,
    pub dry_run: bool,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.dry_run {
            write!(f, "[dry run] ")?;
        }
        write!(
            f,
            "chmod {} {}",
            self.permissions.octal_string(self.is_dir),
            self.path.display()
        )
    }
}

pub trait SetMode {
    fn set_mode(&mut self, path: &Path, mode: u32) -> io::Result<()>;
}

/// Changes modes with `fchmodat(2)` relative to the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct Chmod;

impl SetMode for Chmod {
    fn set_mode(&mut self, path: &Path, mode: u32) -> io::Result<()> {
        let mode = Mode::from_bits_truncate(mode as nix::sys::stat::mode_t);

        fchmodat(None, path, mode, FchmodatFlags::FollowSymlink).map_err(|why| match why {
            nix::Error::Sys(errno) => io::Error::from_raw_os_error(errno as i32),
            other => io::Error::new(io::ErrorKind::Other, other),
        })
    }
}

pub trait Report {
    fn changed(&mut self, change: &Change);
}

/// Writes every change as one `info` line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReport;

impl Report for LogReport {
    fn changed(&mut self, change: &Change) {
        info!("{}", change);
    }
}

impl Report for Vec<Change> {
    fn changed(&mut self, change: &Change) {
        self.push(change.clone());
    }
}

#[derive(Debug, Default)]
pub struct Summary {
    pub changed: usize,
    pub failures: Vec<EnforceError>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Enforcer<T, S, R> {
    target: PermissionSet,
    dry_run: bool,
    tree: T,
    setter: S,
    reporter: R,
}

impl<T, S, R> Enforcer<T, S, R>
where
    T: Traverse,
    S: SetMode,
    R: Report,
{
    pub fn new(target: PermissionSet, dry_run: bool, tree: T, setter: S, reporter: R) -> Self {
        Enforcer {
            target,
            dry_run,
            tree,
            setter,
            reporter,
        }
    }

    /// Enforces the target on every root in order. A failing root is
    /// recorded and the next root still runs.
    pub fn run<P: AsRef<Path>>(&mut self, roots: &[P]) -> Summary {
        let mut summary = Summary::default();

        for root in roots {
            match self.enforce_root(root.as_ref()) {
                Ok(n) => summary.changed += n,
                Err((n, why)) => {
                    summary.changed += n;
                    summary.failures.push(why);
                }
            }
        }

        summary
    }

    /// Walks one root. Stops at the first error, returning it together
    /// with the number of changes made before it.
    fn enforce_root(&mut self, root: &Path) -> Result<usize, (usize, EnforceError)> {
        debug!("ensuring {} under {}", self.target, root.display());

        let mut changed = 0;
        for entry in self.tree.entries(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let why = EnforceError::Walk {
                        root: root.to_path_buf(),
                        source,
                    };
                    return Err((changed, why));
                }
            };

            match self.enforce_entry(entry) {
                Ok(true) => changed += 1,
                Ok(false) => {}
                Err((path, source)) => {
                    let why = EnforceError::Apply {
                        root: root.to_path_buf(),
                        path,
                        source,
                    };
                    return Err((changed, why));
                }
            }
        }

        Ok(changed)
    }

    fn enforce_entry(&mut self, entry: Entry) -> Result<bool, (PathBuf, io::Error)> {
        let current = PermissionSet::from_mode(entry.mode);
        let updated = self.target.union(current);

        if updated == current {
            debug!("{} already allows {}", entry.path.display(), current);
            return Ok(false);
        }

        if !self.dry_run {
            // directory bit is for display only
            let mode = updated.encode(false) | (entry.mode & SPECIAL_BITS);
            if let Err(why) = self.setter.set_mode(&entry.path, mode) {
                return Err((entry.path, why));
            }
        }

        self.reporter.changed(&Change {
            path: entry.path,
            permissions: updated,
            is_dir: entry.is_dir,
            dry_run: self.dry_run,
        });

        Ok(true)
    }

    pub fn into_parts(self) -> (T, S, R) {
        (self.tree, self.setter, self.reporter)
    }
}
