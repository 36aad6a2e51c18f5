//! Derby definitions - static catalog data.
//!
//! A `DerbyRecord` holds the immutable facts about one derby: its name,
//! the two rival teams, and optional history text for the info screens.
//! Runtime card state (flipped, matched) lives in `Card`.

use serde::{Deserialize, Serialize};

/// Identifier shared by the two cards of one derby.
///
/// Unique within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// One side of a derby.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Display name of the club.
    pub name: String,

    /// Opaque image reference, resolved by the shell (e.g. an asset path).
    pub image_ref: String,
}

impl TeamInfo {
    pub fn new(name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Static derby definition.
///
/// ```
/// use derby_memory::cards::{DerbyRecord, GroupId, TeamInfo};
///
/// let derby = DerbyRecord::new(
///     GroupId::new(2),
///     "Manchester Derby",
///     TeamInfo::new("Man City", "assets/images/manchestercity.png"),
///     TeamInfo::new("Man United", "assets/images/manchesterunited.png"),
/// )
/// .with_history("Two clubs from the same industrial city.");
///
/// assert_eq!(derby.title(), "Manchester Derby (Man City vs Man United)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerbyRecord {
    /// Group shared by both cards of this derby.
    pub group: GroupId,

    /// Derby name, shown when the pair is found.
    pub name: String,

    pub team_a: TeamInfo,
    pub team_b: TeamInfo,

    /// Background text for the info screens.
    #[serde(default)]
    pub history: Option<String>,
}

impl DerbyRecord {
    #[must_use]
    pub fn new(group: GroupId, name: impl Into<String>, team_a: TeamInfo, team_b: TeamInfo) -> Self {
        Self {
            group,
            name: name.into(),
            team_a,
            team_b,
            history: None,
        }
    }

    /// Attach history text (builder pattern).
    #[must_use]
    pub fn with_history(mut self, history: impl Into<String>) -> Self {
        self.history = Some(history.into());
        self
    }

    /// Heading used by the info screens: "<derby> (<A> vs <B>)".
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({} vs {})", self.name, self.team_a.name, self.team_b.name)
    }

    /// Both sides, team A first.
    #[must_use]
    pub fn teams(&self) -> [&TeamInfo; 2] {
        [&self.team_a, &self.team_b]
    }
}
