//! Catalog of foreign-data objects.
//!
//! Holds foreign servers, user mappings and foreign tables, running the option
//! validator whenever one is defined. A definition that fails validation is
//! never stored, so planning only ever sees relations with a full identity.

mod error;
mod types;

pub use error::CatalogError;
pub use types::{ColumnDef, ForeignServer, ForeignTable, UserMapping};

use std::collections::HashMap;

use crate::options::{DefElem, ObjectKind, RelationDescriptor, validate_options};

/// First relation id handed out; lower ids are reserved for the host.
const FIRST_FOREIGN_RELID: u32 = 16384;

/// In-memory catalog of foreign-data objects.
#[derive(Debug)]
pub struct ForeignCatalog {
    servers: HashMap<String, ForeignServer>,
    user_mappings: HashMap<(String, String), UserMapping>,
    tables: HashMap<u32, ForeignTable>,
    table_names: HashMap<String, u32>,
    next_relid: u32,
}

impl Default for ForeignCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ForeignCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            servers: HashMap::new(),
            user_mappings: HashMap::new(),
            tables: HashMap::new(),
            table_names: HashMap::new(),
            next_relid: FIRST_FOREIGN_RELID,
        }
    }

    /// Defines a foreign server. Servers accept no options.
    pub fn create_server(&mut self, name: &str, options: Vec<DefElem>) -> Result<(), CatalogError> {
        if self.servers.contains_key(name) {
            return Err(CatalogError::ServerAlreadyExists {
                name: name.to_string(),
            });
        }
        validate_options(&options, ObjectKind::ForeignServer)?;
        self.servers.insert(
            name.to_string(),
            ForeignServer {
                name: name.to_string(),
                options,
            },
        );
        Ok(())
    }

    /// Defines a user mapping for an existing server. Mappings accept no options.
    pub fn create_user_mapping(
        &mut self,
        user: &str,
        server: &str,
        options: Vec<DefElem>,
    ) -> Result<(), CatalogError> {
        self.require_server(server)?;
        validate_options(&options, ObjectKind::UserMapping)?;
        self.user_mappings.insert(
            (user.to_string(), server.to_string()),
            UserMapping {
                user: user.to_string(),
                server: server.to_string(),
                options,
            },
        );
        Ok(())
    }

    /// Defines a foreign table on an existing server and returns its relation id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the options do not name exactly one
    /// schema and one table.
    pub fn create_foreign_table(
        &mut self,
        name: &str,
        server: &str,
        columns: Vec<ColumnDef>,
        options: Vec<DefElem>,
    ) -> Result<u32, CatalogError> {
        if self.table_names.contains_key(name) {
            return Err(CatalogError::TableAlreadyExists {
                name: name.to_string(),
            });
        }
        self.require_server(server)?;
        let descriptor = RelationDescriptor::from_options(&options)?;

        let relid = self.next_relid;
        self.next_relid += 1;
        self.tables.insert(
            relid,
            ForeignTable {
                relid,
                name: name.to_string(),
                server: server.to_string(),
                columns,
                options,
                descriptor,
            },
        );
        self.table_names.insert(name.to_string(), relid);
        Ok(relid)
    }

    /// Returns the foreign table with the given relation id.
    pub fn foreign_table(&self, relid: u32) -> Result<&ForeignTable, CatalogError> {
        self.tables
            .get(&relid)
            .ok_or(CatalogError::RelationNotFound { relid })
    }

    /// Looks up a foreign table by its local name.
    pub fn lookup_table(&self, name: &str) -> Option<&ForeignTable> {
        self.table_names
            .get(name)
            .and_then(|relid| self.tables.get(relid))
    }

    /// Returns the foreign server with the given name.
    pub fn server(&self, name: &str) -> Option<&ForeignServer> {
        self.servers.get(name)
    }

    /// Returns the user mapping for `user` on `server`.
    pub fn user_mapping(&self, user: &str, server: &str) -> Option<&UserMapping> {
        self.user_mappings
            .get(&(user.to_string(), server.to_string()))
    }

    fn require_server(&self, name: &str) -> Result<(), CatalogError> {
        if self.servers.contains_key(name) {
            Ok(())
        } else {
            Err(CatalogError::ServerNotFound {
                name: name.to_string(),
            })
        }
    }
}
