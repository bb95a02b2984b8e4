use histrace_testing::TestWorld;
use histrace_types::Dialect;

fn world() -> TestWorld {
    TestWorld::new(Dialect::Bash).with_history(&[(1000, "true"), (1001, "false"), (1002, "ls /")])
}

#[test]
fn test_bookmark_saves_entry_command() {
    let world = world();
    let result = world.run(&["bookmark", "3", "root_listing"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let saved = std::fs::read_to_string(world.bookmarks_dir().join("root_listing")).unwrap();
    assert_eq!(saved, "ls /");
}

#[test]
fn test_bookmark_of_missing_entry_fails() {
    let world = world();
    let result = world.run(&["b", "42", "nothing"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Error:"));
    assert!(!world.bookmarks_dir().join("nothing").exists());
}

#[test]
fn test_invalid_bookmark_name_is_rejected() {
    let world = world();

    for name in ["1abc", "with-dash", "a.b"] {
        let result = world.run(&["bookmark", "1", name]).unwrap();
        assert_eq!(result.code(), Some(1), "name {:?} should be rejected", name);
    }
    assert_eq!(std::fs::read_dir(world.bookmarks_dir()).unwrap().count(), 0);
}

#[test]
fn test_list_bookmarks() {
    let world = world();
    world.place_bookmark("deploy", "make deploy").unwrap();
    world.place_bookmark("b", "cargo build").unwrap();

    let result = world.run(&["bookmarks"]).unwrap();
    assert!(result.success());
    assert_eq!(result.stdout(), "b         cargo build\ndeploy    make deploy\n");

    let json = world.run(&["lb", "--format", "json"]).unwrap().json().unwrap();
    assert_eq!(json[0]["name"], "b");
    assert_eq!(json[1]["command"], "make deploy");
}

#[test]
fn test_remove_bookmarks() {
    let world = world();
    world.place_bookmark("one", "echo 1").unwrap();
    world.place_bookmark("two", "echo 2").unwrap();

    let result = world.run(&["remove-bookmarks", "one", "missing"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(!world.bookmarks_dir().join("one").exists());
    assert!(world.bookmarks_dir().join("two").exists());

    let result = world.run(&["rb", "two"]).unwrap();
    assert!(result.success());
    assert!(!world.bookmarks_dir().join("two").exists());
}
