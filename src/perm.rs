use crate::error::ModeError;
use std::fmt;
use std::str::FromStr;

/// Read, write and execute rights of one class of user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permission {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Permission {
    /// Builds a permission from one octal digit. Only the low three bits are looked at.
    pub fn from_digit(d: u32) -> Permission {
        Permission {
            read: d & 0o4 != 0,
            write: d & 0o2 != 0,
            execute: d & 0o1 != 0,
        }
    }

    pub fn octal(&self) -> u32 {
        let mut v = 0;
        if self.read {
            v += 4;
        }
        if self.write {
            v += 2;
        }
        if self.execute {
            v += 1;
        }
        v
    }

    pub fn union(self, other: Permission) -> Permission {
        Permission {
            read: self.read || other.read,
            write: self.write || other.write,
            execute: self.execute || other.execute,
        }
    }
}

// absent bits are left out, not padded with '-'
impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.read {
            write!(f, "r")?;
        }
        if self.write {
            write!(f, "w")?;
        }
        if self.execute {
            write!(f, "x")?;
        }
        Ok(())
    }
}

/// Owner, group and everyone permissions of one filesystem entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionSet {
    pub owner: Permission,
    pub group: Permission,
    pub everyone: Permission,
}

impl PermissionSet {
    pub fn from_digits(digits: [u32; 3]) -> PermissionSet {
        PermissionSet {
            owner: Permission::from_digit(digits[0]),
            group: Permission::from_digit(digits[1]),
            everyone: Permission::from_digit(digits[2]),
        }
    }

    /// Decodes the nine permission bits of a raw `st_mode`. File type and
    /// setuid/setgid/sticky bits are dropped.
    pub fn from_mode(mode: u32) -> PermissionSet {
        PermissionSet::from_digits([(mode >> 6) & 0o7, (mode >> 3) & 0o7, mode & 0o7])
    }

    /// Bitwise OR of both sets. The result never lacks a bit either side has.
    pub fn union(self, other: PermissionSet) -> PermissionSet {
        PermissionSet {
            owner: self.owner.union(other.owner),
            group: self.group.union(other.group),
            everyone: self.everyone.union(other.everyone),
        }
    }

    /// Numeric mode with the directory flag in the fourth octal digit.
    ///
    /// The flag occupies the sticky bit's position, so mask with `0o777`
    /// before handing the value to `chmod`.
    pub fn encode(&self, is_dir: bool) -> u32 {
        let dir_bit = if is_dir { 1 } else { 0 };

        dir_bit << 9 | self.owner.octal() << 6 | self.group.octal() << 3 | self.everyone.octal()
    }

    /// `encode` rendered as exactly four octal digits, e.g. `1755` or `0644`.
    pub fn octal_string(&self, is_dir: bool) -> String {
        format!("{:04o}", self.encode(is_dir))
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.owner, self.group, self.everyone)
    }
}

impl FromStr for PermissionSet {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<PermissionSet, ModeError> {
        let count = s.chars().count();
        if count != 3 {
            return Err(ModeError::Length(count));
        }

        let mut digits = [0u32; 3];
        for (i, c) in s.chars().enumerate() {
            digits[i] = c.to_digit(8).ok_or(ModeError::Digit(c))?;
        }

        Ok(PermissionSet::from_digits(digits))
    }
}
