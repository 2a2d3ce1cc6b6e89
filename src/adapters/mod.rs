//! External integrations
//!
//! Clients for the two remote collaborators: the ZTC catalog API the import
//! writes to and the Selectielijst taxonomy API the parser reads from.

pub mod catalog;
pub mod selectielijst;
