//! Entity structs for every Product Discovery Hub table.
//!
//! Each entity maps to one table in the libSQL schema (see
//! `pdh-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod canvas;
mod csd;
mod link;
mod okr;
mod persona;
mod project;
mod rice;
mod roadmap;

pub use canvas::{BusinessModelCanvas, CanvasItem, ProductVisionBoard};
pub use csd::CsdItem;
pub use link::{FrameworkLink, ItemResponse, LinkedItemSnippet};
pub use okr::{KeyResult, Objective};
pub use persona::{Persona, PersonaDetail};
pub use project::Project;
pub use rice::RiceItem;
pub use roadmap::RoadmapItem;
