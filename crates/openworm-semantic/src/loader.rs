//! Re-expresses the relational database as statements.
//!
//! Every entity becomes `(<ns><id>, rdfs:label, "name")`; every relationship
//! becomes `(<ns><id1>, <ns><relation>, <ns><id2>)`. Ids are cast to TEXT by
//! SQLite, so an INTEGER 42 and a TEXT '42' name the same entity. Rows with a
//! NULL column, or an id that does not form a valid IRI, are skipped.

use std::time::Instant;

use oxigraph::model::vocab::rdfs;
use oxigraph::model::{Literal, Triple};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use openworm_core::SemanticConfig;

use crate::error::{Result, SemanticError};
use crate::store::StatementStore;
use crate::term::Namespace;

const ENTITY_QUERY: &str =
    "SELECT DISTINCT CAST(ID AS TEXT), CAST(Entity AS TEXT) FROM tblentity";

const RELATIONSHIP_QUERY: &str = "SELECT DISTINCT CAST(EnID1 AS TEXT), CAST(Relation AS TEXT), \
     CAST(EnID2 AS TEXT) FROM tblrelationship";

/// Builds a `StatementStore` from the configured SQLite database.
#[derive(Debug, Clone)]
pub struct StatementStoreLoader {
    config: SemanticConfig,
    namespace: Namespace,
}

impl StatementStoreLoader {
    pub fn new(config: SemanticConfig) -> Self {
        let namespace = Namespace::new(config.namespace.clone());
        Self { config, namespace }
    }

    /// Identity of the data source, used as a cache key.
    pub fn source_key(&self) -> String {
        self.config.db_path.display().to_string()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Open the database read-only, read both tables, and close it again.
    ///
    /// The connection is closed whether or not the reads succeed.
    pub async fn load(&self) -> Result<StatementStore> {
        let start = Instant::now();
        let path = &self.config.db_path;
        if !path.is_file() {
            return Err(SemanticError::MissingDatabase { path: path.clone() });
        }

        let mut conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await?;

        let result = read_triples(&mut conn, &self.namespace).await;
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, db_path = %path.display(), "Failed to close database");
        }
        let triples = result?;

        let store = StatementStore::from_triples(triples)?;
        tracing::info!(
            db_path = %path.display(),
            statements = store.len(),
            labels = store.label_count(),
            fingerprint = %store.fingerprint(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Built statement store"
        );
        Ok(store)
    }
}

async fn read_triples(conn: &mut SqliteConnection, ns: &Namespace) -> Result<Vec<Triple>> {
    let mut triples = Vec::new();
    let mut null_rows = 0usize;
    let mut invalid_ids = 0usize;

    let entities: Vec<(Option<String>, Option<String>)> =
        sqlx::query_as(ENTITY_QUERY).fetch_all(&mut *conn).await?;
    for row in entities {
        let (Some(id), Some(name)) = row else {
            null_rows += 1;
            continue;
        };
        match ns.iri(&id) {
            Ok(subject) => triples.push(Triple::new(
                subject,
                rdfs::LABEL.into_owned(),
                Literal::new_simple_literal(name),
            )),
            Err(_) => invalid_ids += 1,
        }
    }

    let relationships: Vec<(Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as(RELATIONSHIP_QUERY).fetch_all(&mut *conn).await?;
    for row in relationships {
        let (Some(id1), Some(relation), Some(id2)) = row else {
            null_rows += 1;
            continue;
        };
        match (ns.iri(&id1), ns.iri(&relation), ns.iri(&id2)) {
            (Ok(s), Ok(p), Ok(o)) => triples.push(Triple::new(s, p, o)),
            _ => invalid_ids += 1,
        }
    }

    if null_rows > 0 || invalid_ids > 0 {
        tracing::debug!(null_rows, invalid_ids, "Skipped rows");
    }
    Ok(triples)
}
