use mongodb::{Database, bson::doc};

/// Run the server `ping` command against `db`.
///
/// Unlike `listDatabases`, `ping` needs no privileges beyond the target database.
pub async fn ping(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await.map(|_| ())
}
