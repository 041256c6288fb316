//! Absolute paths inside the virtual namespace.
//!
//! A `VfsPath` is a sequence of non-empty segments. Strings are only parsed
//! and formatted at the boundary, so `/src` can never be mistaken for a
//! prefix of `/src2`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VfsPath {
    segments: Vec<String>,
}

impl VfsPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses any string. Empty segments and `.` are dropped and a missing
    /// leading `/` is tolerated. `..` is kept as an ordinary name, so every
    /// non-root input names a non-root path.
    pub fn parse(raw: &str) -> Self {
        Self::root().join(raw)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<VfsPath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Every proper ancestor except the root, outermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = VfsPath> + '_ {
        (1..self.segments.len()).map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    pub fn join(&self, name: &str) -> VfsPath {
        let mut joined = self.clone();
        joined.segments.extend(
            name.split('/')
                .filter(|p| !p.is_empty() && *p != ".")
                .map(str::to_string),
        );
        joined
    }

    /// True when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &VfsPath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments.starts_with(&ancestor.segments)
    }

    /// Rewrites the `from` prefix of `self` onto `to`.
    pub fn rebase(&self, from: &VfsPath, to: &VfsPath) -> Option<VfsPath> {
        if self != from && !self.is_descendant_of(from) {
            return None;
        }
        let mut segments = to.segments.clone();
        segments.extend_from_slice(&self.segments[from.segments.len()..]);
        Some(Self { segments })
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.name()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext)
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for VfsPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for VfsPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for VfsPath {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&String> for VfsPath {
    fn from(value: &String) -> Self {
        Self::parse(value)
    }
}

impl From<&VfsPath> for VfsPath {
    fn from(value: &VfsPath) -> Self {
        value.clone()
    }
}

impl Serialize for VfsPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VfsPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/vfs_path.rs"]
mod tests;
