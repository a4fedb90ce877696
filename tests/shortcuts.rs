#[cfg(test)]
mod tests {
    use smstab::db::db::Db;
    use smstab::db::shortcuts::Shortcuts;
    use smstab::db::tables::Metadata;
    use smstab::libs::shortcut::{Expander, ShortcutDefinition};
    use smstab::libs::store::MetadataProvider;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ShortcutTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for ShortcutTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("smstab.db");
            ShortcutTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl ShortcutTestContext {
        fn shortcuts(&self) -> Shortcuts {
            Shortcuts::with_db(Db::open(&self.db_path).unwrap())
        }
    }

    #[test_context(ShortcutTestContext)]
    #[test]
    fn test_shortcut_crud(ctx: &mut ShortcutTestContext) {
        let mut shortcuts = ctx.shortcuts();
        let first = shortcuts.create(&ShortcutDefinition::new("free", "%d%", "@visits /slot 30 =slot %d%")).unwrap();
        let second = shortcuts.create(&ShortcutDefinition::new("who", "%p%", "@visits ?slot =patient %p%")).unwrap();
        assert!(second > first);

        let all = shortcuts.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, first);
        assert_eq!(all[0].1.name, "free");
        assert_eq!(all[1].1.output_pattern, "@visits ?slot =patient %p%");

        shortcuts.delete(first).unwrap();
        let all = shortcuts.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, second);

        assert!(shortcuts.delete(first).is_err());
    }

    #[test_context(ShortcutTestContext)]
    #[test]
    fn test_stored_shortcuts_expand(ctx: &mut ShortcutTestContext) {
        let mut shortcuts = ctx.shortcuts();
        shortcuts.create(&ShortcutDefinition::new("free", "%d%", "@visits /slot 30 =slot %d%")).unwrap();

        let metadata = Metadata::with_db(Db::open(&ctx.db_path).unwrap());
        let definitions = metadata.shortcuts().unwrap();
        let expander = Expander::new(&definitions, '@');
        assert_eq!(expander.expand("@free tomorrow"), "@visits /slot 30 =slot tomorrow");
    }
}
