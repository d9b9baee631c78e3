//! Backup file naming.
//!
//! One rule for every entity: slugified identifier, a kind marker, and the
//! organization id for the kinds whose names are only unique per
//! organization.

/// The kind of entity being written. Datasources and users carry their
/// organization id because their names can repeat across organizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Dashboard,
    Datasource { org_id: i64 },
    User { org_id: i64 },
}

/// Lowercase an identifier and collapse every run of characters outside
/// the ASCII alphanumerics into a single hyphen, so slugs are always
/// lowercase ASCII no matter what the service hands back.
pub fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Deterministic backup file name for one entity.
pub fn backup_file_name(kind: EntityKind, identifier: &str) -> String {
    let slug = slugify(identifier);
    match kind {
        EntityKind::Dashboard => format!("{}.db.json", slug),
        EntityKind::Datasource { org_id } => format!("{}.ds.{}.json", slug, org_id),
        EntityKind::User { org_id } => format!("{}.user.{}.json", slug, org_id),
    }
}
