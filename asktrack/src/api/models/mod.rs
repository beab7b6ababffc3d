//! API request and response data models.
//!
//! These define the public wire contract, which is inherited from the
//! upstream system: PascalCase-with-underscore installer fields
//! (`Int_number`, `Int_Branch`) on the auth surface, camelCase on the
//! inventory surface, and the tri-state `isinstalled` flag. Database models
//! stay separate so the storage representation can evolve independently.

pub mod auth;
pub mod inventory;
