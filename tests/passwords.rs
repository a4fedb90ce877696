#[cfg(test)]
mod tests {
    use smstab::db::db::Db;
    use smstab::db::passwords::{Passwords, SAVED_REVOKED};
    use smstab::db::tables::SAVED_COMPLETE;
    use smstab::libs::store::PasswordStore;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct PasswordTestContext {
        _temp_dir: TempDir,
        passwords: Passwords,
    }

    impl TestContext for PasswordTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("smstab.db")).unwrap();
            PasswordTestContext {
                _temp_dir: temp_dir,
                passwords: Passwords::with_db(db),
            }
        }
    }

    #[test_context(PasswordTestContext)]
    #[test]
    fn test_passwords_are_scoped(ctx: &mut PasswordTestContext) {
        ctx.passwords.add("staff", "+100", "secret").unwrap();
        ctx.passwords.add("staff", "+100", "spare").unwrap();
        ctx.passwords.add("staff", "+200", "other").unwrap();
        ctx.passwords.add("admins", "+100", "root").unwrap();

        assert_eq!(
            ctx.passwords.passwords("staff", "+100").unwrap(),
            vec!["secret".to_string(), "spare".to_string()]
        );
        assert_eq!(ctx.passwords.passwords("admins", "+100").unwrap(), vec!["root".to_string()]);
        assert!(ctx.passwords.passwords("staff", "+300").unwrap().is_empty());
        assert_eq!(ctx.passwords.list("staff").unwrap().len(), 3);
    }

    #[test_context(PasswordTestContext)]
    #[test]
    fn test_revoke_keeps_the_record(ctx: &mut PasswordTestContext) {
        let id = ctx.passwords.add("staff", "+100", "secret").unwrap();
        ctx.passwords.revoke(id).unwrap();

        assert!(ctx.passwords.passwords("staff", "+100").unwrap().is_empty());
        let entries = ctx.passwords.list("staff").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].saved, SAVED_REVOKED);

        // Revoking twice, or an unknown id, is an error.
        assert!(ctx.passwords.revoke(id).is_err());
        assert!(ctx.passwords.revoke(id + 100).is_err());
    }

    #[test_context(PasswordTestContext)]
    #[test]
    fn test_new_entries_are_complete(ctx: &mut PasswordTestContext) {
        ctx.passwords.add("staff", "+100", "secret").unwrap();
        let entries = ctx.passwords.list("staff").unwrap();
        assert_eq!(entries[0].saved, SAVED_COMPLETE);
        assert_eq!(entries[0].phone, "+100");
    }
}
