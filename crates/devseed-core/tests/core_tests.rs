use std::fs;
use tempfile::TempDir;

use devseed_core::error::Error;
use devseed_core::fixtures::load_user_profiles;

#[test]
fn load_profiles_in_lexical_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b_bob.yml"), "email: bob@example.com\n").unwrap();
    fs::write(dir.join("a_alice.yaml"), "email: alice@example.com\n").unwrap();
    fs::write(dir.join("c_carol.yml"), "email: carol@example.com\n").unwrap();

    let fixtures = load_user_profiles(dir).expect("load");

    let emails: Vec<&str> = fixtures.iter().map(|f| f.email.as_str()).collect();
    assert_eq!(emails, ["alice@example.com", "bob@example.com", "carol@example.com"]);
}

#[test]
fn load_profiles_ignores_other_files_and_subdirectories() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("user.yml"), "email: a@x.com\n").unwrap();
    fs::write(dir.join("README.md"), "# not a fixture").unwrap();
    fs::create_dir(dir.join("archive")).unwrap();
    fs::write(dir.join("archive").join("old.yml"), "email: old@x.com\n").unwrap();

    let fixtures = load_user_profiles(dir).expect("load");

    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].email, "a@x.com");
}

#[test]
fn load_profiles_parses_nested_sections() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("ada.yml"),
        r#"
email: ada@example.com
password: s3cret
profile:
  name: Ada Lovelace
  timezone: Europe/London
ventures:
  - title: Analytical Engine
    description: General purpose computation
  - title: Notes
    description: The first published algorithm
user_settings:
  theme: dark
"#,
    )
    .unwrap();

    let fixtures = load_user_profiles(tmp.path()).expect("load");
    let ada = &fixtures[0];

    assert_eq!(ada.password.as_deref(), Some("s3cret"));
    assert_eq!(ada.profile.as_ref().and_then(|p| p.name.as_deref()), Some("Ada Lovelace"));
    let ventures = ada.ventures.as_ref().expect("ventures");
    assert_eq!(ventures.len(), 2);
    assert_eq!(ventures[1].title, "Notes");
    assert!(ada.cofounder_preferences.is_none());
    assert_eq!(ada.user_settings.as_ref().expect("settings").extra["theme"], "dark");
}

#[test]
fn missing_directory_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = load_user_profiles(&tmp.path().join("absent")).expect_err("must fail");
    assert!(matches!(err, Error::NotFound(_)), "{err}");
}

#[test]
fn malformed_document_aborts_the_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.yml"), "email: a@x.com\n").unwrap();
    fs::write(tmp.path().join("b.yml"), "email: [unterminated\n").unwrap();

    let err = load_user_profiles(tmp.path()).expect_err("must fail");
    match err {
        Error::Fixture { path, .. } => assert!(path.ends_with("b.yml")),
        other => panic!("expected fixture error, got {other}"),
    }
}

#[test]
fn empty_directory_yields_no_fixtures() {
    let tmp = TempDir::new().unwrap();
    assert!(load_user_profiles(tmp.path()).expect("load").is_empty());
}
