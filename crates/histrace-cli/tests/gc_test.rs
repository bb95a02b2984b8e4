use histrace_testing::TestWorld;
use histrace_types::Dialect;

fn world_with_traces() -> TestWorld {
    let world = TestWorld::new(Dialect::Bash).with_history(&[(1, "a"), (2, "b"), (3, "c")]);
    for (age, (timestamp, command)) in [(10, (1, "a")), (5, (2, "b")), (1, (3, "c"))] {
        let path = world.place_trace(timestamp, command, b"out\n").unwrap();
        world.age_file(&path, age).unwrap();
    }
    world
}

fn trace_count(world: &TestWorld) -> usize {
    std::fs::read_dir(world.traces_dir()).unwrap().count()
}

#[test]
fn test_gc_traces_keep_latest() {
    let world = world_with_traces();

    let result = world.run(&["gc-traces", "--keep-latest", "1"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.stdout(), "Removed 2 traces\n");
    assert_eq!(trace_count(&world), 1);

    let show = world.run(&["show"]).unwrap();
    let marked: Vec<&str> = show.stdout().lines().filter(|l| l.contains('*')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].starts_with("!3"));
}

#[test]
fn test_gc_traces_older_than() {
    let world = world_with_traces();

    let result = world.run(&["gt", "--older-than", "3", "--format", "json"]).unwrap();
    assert!(result.success());
    let json = result.json().unwrap();
    assert_eq!(json["kind"], "traces");
    assert_eq!(json["removed"], 2);
    assert_eq!(trace_count(&world), 1);
}

#[test]
fn test_gc_bookmarks_all() {
    let world = TestWorld::new(Dialect::Bash);
    world.place_bookmark("one", "echo 1").unwrap();
    world.place_bookmark("two", "echo 2").unwrap();

    let result = world.run(&["gb", "--all"]).unwrap();
    assert!(result.success());
    assert_eq!(result.stdout(), "Removed 2 bookmarks\n");
    assert_eq!(std::fs::read_dir(world.bookmarks_dir()).unwrap().count(), 0);
}

#[test]
fn test_gc_requires_exactly_one_policy() {
    let world = world_with_traces();

    let none = world.run(&["gc-traces"]).unwrap();
    assert!(!none.success());

    let both = world.run(&["gc-traces", "--all", "--keep-latest", "1"]).unwrap();
    assert!(!both.success());
    assert_eq!(trace_count(&world), 3);
}

#[test]
fn test_gc_rejects_zero() {
    let world = world_with_traces();

    let result = world.run(&["gc-traces", "--keep-latest", "0"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Error:"));
    assert_eq!(trace_count(&world), 3);
}
