//! Card system: derby definitions, card instances, and the catalog.
//!
//! ## Key Types
//!
//! - `GroupId`: Identifier shared by the two cards of one derby
//! - `DerbyRecord`: Static derby data (name, teams, history)
//! - `DerbyCatalog`: Validated, ordered list of derbies
//! - `CardId`: Board position of a card
//! - `Card`: Runtime card state (flipped, matched)

pub mod definition;
pub mod instance;
pub mod registry;
mod reference;

pub use definition::{DerbyRecord, GroupId, TeamInfo};
pub use instance::{Card, CardFace, CardId, CardView};
pub use registry::{CatalogError, DerbyCatalog, InfoPage};
