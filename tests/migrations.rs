#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use smstab::db::db::Db;
    use smstab::db::migrations::{get_db_version, MigrationManager};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("smstab.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), MigrationManager::new().latest_version());

        for table in ["data_tables", "data_columns", "shortcuts", "passwords"] {
            let count: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1", [table], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Connection::open(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        let versions: Vec<u32> = history.iter().map(|(version, _)| *version).collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(history[0].1, "create_data_tables");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Connection::open(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), 3);

        drop(conn);
        let db = Db::open(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), 3);
    }
}
