//! Owner/group/other permission checks over a 9-character "rwxrwxrwx" string.
//! This is not POSIX mode bits: group membership is simply `uid % 10`.

use std::fmt;
use std::str::FromStr;

use crate::config::{NUM_GROUPS, PERMISSION_LEN};
use crate::error::FsError;
use crate::{Inode, Result};

const FLAGS: &[u8; 3] = b"rwx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    fn offset(self) -> usize {
        match self {
            Access::Read => 0,
            Access::Write => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Owner,
    Group,
    Other,
}

impl Class {
    fn base(self) -> usize {
        match self {
            Class::Owner => 0,
            Class::Group => 3,
            Class::Other => 6,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Permissions([u8; PERMISSION_LEN]);

impl Permissions {
    pub const NONE: Self = Self(*b"---------");

    pub fn allows(&self, class: Class, access: Access) -> bool {
        let idx = class.base() + access.offset();
        self.0[idx] == FLAGS[access.offset()]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII ever gets in through from_str.
        std::str::from_utf8(&self.0).unwrap_or("?????????")
    }
}

impl FromStr for Permissions {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != PERMISSION_LEN {
            return Err(FsError::InvalidPermissions(s.to_string()));
        }
        let mut perms = [0u8; PERMISSION_LEN];
        for (i, &c) in bytes.iter().enumerate() {
            if c != b'-' && c != FLAGS[i % 3] {
                return Err(FsError::InvalidPermissions(s.to_string()));
            }
            perms[i] = c;
        }
        Ok(Self(perms))
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permissions({})", self.as_str())
    }
}

pub fn group_of(uid: u32) -> u32 {
    uid % NUM_GROUPS
}

/// First match wins: the owner always passes, then the group bit, then the other bit.
pub fn check_access(inode: &Inode, uid: u32, access: Access) -> Result<()> {
    if inode.owner_uid == uid {
        return Ok(());
    }
    if inode.gid == Some(group_of(uid)) && inode.permissions.allows(Class::Group, access) {
        return Ok(());
    }
    if inode.permissions.allows(Class::Other, access) {
        return Ok(());
    }
    tracing::warn!(inode = inode.id, uid, ?access, "permission denied");
    Err(FsError::PermissionDenied)
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_inode(owner: u32, perms: &str) -> Inode {
        let mut inode = Inode::empty(0);
        inode.owner_uid = owner;
        inode.gid = Some(group_of(owner));
        inode.permissions = perms.parse().unwrap();
        inode
    }

    #[test]
    fn test_parse() {
        let perms: Permissions = "rw-r--r--".parse().unwrap();
        assert_eq!(perms.to_string(), "rw-r--r--");
        assert!(perms.allows(Class::Owner, Access::Write));
        assert!(perms.allows(Class::Group, Access::Read));
        assert!(!perms.allows(Class::Group, Access::Write));
        assert!(perms.allows(Class::Other, Access::Read));

        assert!("rw-r--r-".parse::<Permissions>().is_err());
        assert!("wr-r--r--".parse::<Permissions>().is_err());
        assert!("rw-r--r--x".parse::<Permissions>().is_err());
    }

    #[test]
    fn test_owner_bypass() {
        let inode = make_inode(1001, "---------");
        assert!(check_access(&inode, 1001, Access::Read).is_ok());
        assert!(check_access(&inode, 1001, Access::Write).is_ok());
    }

    #[test]
    fn test_group_and_other() {
        let inode = make_inode(1001, "rw-r-----");
        assert!(check_access(&inode, 1011, Access::Read).is_ok());
        assert_eq!(check_access(&inode, 1011, Access::Write), Err(FsError::PermissionDenied));
        assert_eq!(check_access(&inode, 2002, Access::Read), Err(FsError::PermissionDenied));

        let inode = make_inode(1001, "rw----rw-");
        assert!(check_access(&inode, 2002, Access::Write).is_ok());
    }

    #[test]
    fn test_unset_group() {
        // An inode whose group is unset never matches on the group bits.
        let mut inode = make_inode(1001, "rwxrwx---");
        inode.gid = None;
        assert_eq!(check_access(&inode, 1011, Access::Read), Err(FsError::PermissionDenied));
    }
}
