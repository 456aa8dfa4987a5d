
/// Database tests need a reachable Postgres; skip unless `DATABASE_URL` is provided.
pub(crate) fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

#[test]
fn issue_title_rules() {
    assert!(crate::issue::validate_title("Ship v1").is_ok());
    assert!(crate::issue::validate_title("   ").is_err());
    assert!(crate::issue::validate_title(&"x".repeat(256)).is_err());
}

#[test]
fn roadmap_name_rules() {
    assert!(crate::roadmap::validate_name("Rust backend").is_ok());
    assert!(crate::roadmap::validate_name("").is_err());
}
