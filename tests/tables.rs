#[cfg(test)]
mod tests {
    use smstab::db::db::Db;
    use smstab::db::rows::Rows;
    use smstab::db::tables::{Metadata, Tables};
    use smstab::libs::column::{ColumnRef, ColumnType, TableDef};
    use smstab::libs::query::{Comparator, Constraint, Query};
    use smstab::libs::store::{MetadataProvider, RowOrigin, RowStore};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TablesTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for TablesTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("smstab.db");
            TablesTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl TablesTestContext {
        fn tables(&self) -> Tables {
            Tables::with_db(Db::open(&self.db_path).unwrap())
        }

        fn rows(&self) -> Rows {
            Rows::with_db(Db::open(&self.db_path).unwrap())
        }
    }

    fn origin() -> RowOrigin {
        RowOrigin {
            phone: "+1".to_string(),
            timestamp: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_table_lifecycle(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("visits", "visits")).unwrap();

        let mut patient = ColumnRef::new("patient", "p", ColumnType::Text);
        patient.display_name = "Patient".to_string();
        patient.sms_label = Some("pt".to_string());
        tables.add_column("visits", &patient).unwrap();
        tables.add_column("visits", &ColumnRef::new("slot", "slot", ColumnType::DateRange)).unwrap();

        let def = tables.get("visits").unwrap().unwrap();
        assert_eq!(def.columns.len(), 2);
        assert_eq!(def.columns[0], patient);
        assert_eq!(def.columns[1].column_type, ColumnType::DateRange);
        assert_eq!(def.column_by_label("p").map(|c| c.key.as_str()), Some("patient"));

        tables.delete("visits").unwrap();
        assert!(tables.get("visits").unwrap().is_none());
        assert!(tables.get_all().unwrap().is_empty());
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_duplicates_are_refused(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("t", "t")).unwrap();
        assert!(tables.create(&TableDef::new("t", "other")).is_err());

        tables.add_column("t", &ColumnRef::new("name", "name", ColumnType::Text)).unwrap();
        assert!(tables.add_column("t", &ColumnRef::new("name", "n", ColumnType::Text)).is_err());
        assert!(tables.add_column("t", &ColumnRef::new("other", "name", ColumnType::Text)).is_err());
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_identifiers_are_validated(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        assert!(tables.create(&TableDef::new("bad name", "x")).is_err());
        assert!(tables.create(&TableDef::new("_system", "x")).is_err());
        assert!(tables.create(&TableDef::new("t\"; DROP", "x")).is_err());
        assert!(tables.create(&TableDef::new("ok", "two words")).is_err());

        tables.create(&TableDef::new("ok", "ok")).unwrap();
        assert!(tables.add_column("ok", &ColumnRef::new("a-b", "ab", ColumnType::Text)).is_err());
        assert!(tables.add_column("missing", &ColumnRef::new("a", "a", ColumnType::Text)).is_err());
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_access_control(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("t", "t")).unwrap();

        tables.set_access_control("t", Some("staff")).unwrap();
        assert_eq!(tables.get("t").unwrap().unwrap().access_control, Some("staff".to_string()));

        tables.set_access_control("t", None).unwrap();
        assert_eq!(tables.get("t").unwrap().unwrap().access_control, None);

        assert!(tables.set_access_control("missing", Some("staff")).is_err());
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_metadata_lists_tables_by_display_name(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("b", "zebra")).unwrap();
        tables.create(&TableDef::new("a", "apple")).unwrap();

        let metadata = Metadata::with_db(Db::open(&ctx.db_path).unwrap());
        let names: Vec<String> = metadata.data_tables().unwrap().into_iter().map(|t| t.display_name).collect();
        assert_eq!(names, vec!["apple".to_string(), "zebra".to_string()]);
        assert!(metadata.shortcuts().unwrap().is_empty());
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_rows_insert_and_filter(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("t", "t")).unwrap();
        tables.add_column("t", &ColumnRef::new("name", "name", ColumnType::Text)).unwrap();
        tables.add_column("t", &ColumnRef::new("age", "age", ColumnType::Number)).unwrap();
        let def = tables.get("t").unwrap().unwrap();

        let rows = ctx.rows();
        for (name, age) in [("Al", "25"), ("Bo", "40"), ("Cy", "40")] {
            let values = BTreeMap::from([("name".to_string(), name.to_string()), ("age".to_string(), age.to_string())]);
            rows.insert(&def, &values, &origin()).unwrap();
        }

        let query = Query {
            constraints: vec![
                Constraint::single("age", Comparator::Eq, "40".to_string()),
                Constraint::single("name", Comparator::Ne, "Cy".to_string()),
            ],
            order_by: None,
        };
        let found = rows.query(&def, &["name", "age"], &query).unwrap();
        assert_eq!(found, vec![vec![Some("Bo".to_string()), Some("40".to_string())]]);
    }

    #[test_context(TablesTestContext)]
    #[test]
    fn test_transient_column_is_not_stored(ctx: &mut TablesTestContext) {
        let mut tables = ctx.tables();
        tables.create(&TableDef::new("t", "t")).unwrap();
        let mut note = ColumnRef::new("note", "note", ColumnType::Text);
        note.persisted = false;
        tables.add_column("t", &note).unwrap();
        let def = tables.get("t").unwrap().unwrap();
        assert!(!def.columns[0].persisted);

        let rows = ctx.rows();
        let values = BTreeMap::from([("note".to_string(), "hi".to_string())]);
        assert!(rows.insert(&def, &values, &origin()).is_err());
        assert!(rows.query(&def, &["note"], &Query::default()).is_err());
    }
}
