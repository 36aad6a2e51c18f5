//! The derby catalog.
//!
//! `DerbyCatalog` is the ordered, validated list of derbies a board is
//! built from. It is read-only once constructed. Malformed data is
//! rejected here, at startup, so the board generator never has to deal
//! with singleton groups.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{DerbyRecord, GroupId};

/// Reasons a catalog is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no derbies")]
    Empty,

    #[error("group id {0} appears more than once")]
    DuplicateGroup(GroupId),

    #[error("{0} has no derby name")]
    MissingName(GroupId),

    #[error("{group} is missing the name of team {side}")]
    MissingTeam { group: GroupId, side: char },

    #[error("{0} pairs a team with itself")]
    IdenticalTeams(GroupId),
}

/// Ordered collection of derby definitions.
///
/// ## Example
///
/// ```
/// use derby_memory::cards::DerbyCatalog;
///
/// let catalog = DerbyCatalog::reference();
/// assert_eq!(catalog.len(), 8);
/// assert_eq!(catalog.card_count(), 16);
///
/// let first = catalog.iter().next().unwrap();
/// assert_eq!(first.name, "North London Derby");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DerbyRecord>", into = "Vec<DerbyRecord>")]
pub struct DerbyCatalog {
    records: Vec<DerbyRecord>,
}

impl DerbyCatalog {
    /// Validate and wrap a list of derbies.
    pub fn new(records: Vec<DerbyRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = FxHashSet::default();
        for record in &records {
            if !seen.insert(record.group) {
                return Err(CatalogError::DuplicateGroup(record.group));
            }
            if record.name.trim().is_empty() {
                return Err(CatalogError::MissingName(record.group));
            }
            for (side, team) in [('A', &record.team_a), ('B', &record.team_b)] {
                if team.name.trim().is_empty() {
                    return Err(CatalogError::MissingTeam { group: record.group, side });
                }
            }
            if record.team_a == record.team_b {
                return Err(CatalogError::IdenticalTeams(record.group));
            }
        }

        Ok(Self { records })
    }

    /// Wrap records already known to be valid (built-in data).
    pub(crate) fn from_trusted(records: Vec<DerbyRecord>) -> Self {
        Self { records }
    }

    /// Number of derbies (N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cards on a board built from this catalog (2N).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.records.len() * 2
    }

    /// Look up a derby by group.
    #[must_use]
    pub fn get(&self, group: GroupId) -> Option<&DerbyRecord> {
        self.records.iter().find(|r| r.group == group)
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DerbyRecord> {
        self.records.iter()
    }

    /// Split the catalog into info-screen pages of `per_page` derbies.
    ///
    /// Yields nothing when `per_page` is zero.
    pub fn info_pages(&self, per_page: usize) -> impl Iterator<Item = InfoPage<'_>> {
        let total = self.page_count(per_page);
        self.records
            .chunks(per_page.max(1))
            .take(total)
            .enumerate()
            .map(move |(i, entries)| InfoPage {
                number: i + 1,
                total,
                entries,
            })
    }

    /// A single info page (1-based), if it exists.
    #[must_use]
    pub fn info_page(&self, number: usize, per_page: usize) -> Option<InfoPage<'_>> {
        number
            .checked_sub(1)
            .and_then(|index| self.info_pages(per_page).nth(index))
    }

    /// Number of info pages at `per_page` derbies each (zero for an empty page size).
    #[must_use]
    pub fn page_count(&self, per_page: usize) -> usize {
        if per_page == 0 {
            return 0;
        }
        self.records.len().div_ceil(per_page)
    }
}

impl TryFrom<Vec<DerbyRecord>> for DerbyCatalog {
    type Error = CatalogError;

    fn try_from(records: Vec<DerbyRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<DerbyCatalog> for Vec<DerbyRecord> {
    fn from(catalog: DerbyCatalog) -> Self {
        catalog.records
    }
}

/// One page of the derby background screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoPage<'a> {
    /// 1-based page number.
    pub number: usize,
    pub total: usize,
    pub entries: &'a [DerbyRecord],
}

impl InfoPage<'_> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total
    }

    /// Catalog positions covered by this page, 1-based and inclusive ("1-4").
    #[must_use]
    pub fn range_label(&self, per_page: usize) -> String {
        let start = (self.number - 1) * per_page + 1;
        let end = start + self.entries.len() - 1;
        format!("{start}-{end}")
    }
}
