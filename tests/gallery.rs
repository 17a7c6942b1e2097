use std::rc::Rc;

use pattern_gallery::catalog::{self, Category};
use pattern_gallery::mediator::Participant;
use pattern_gallery::storage::{load_json, save_json};
use pattern_gallery::{
    Colleague, GalleryConfig, GalleryError, JsonFileStore, KeyValueStore, Mediator,
    MulticastRegistry, PageContext, Retention, SortAlgorithm, Sorter, Stack,
};
use tempfile::TempDir;

fn run_pages(config: &GalleryConfig, names: &[&str]) -> String {
    let mut buffer: Vec<u8> = Vec::new();
    {
        let mut ctx = PageContext::new(&mut buffer, config);
        for name in names {
            let page = catalog::find(name).unwrap();
            catalog::run_page(page, &mut ctx).unwrap();
        }
    }
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_config_drives_strategy_and_memento() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("memento.json");
    let toml = format!(
        "[sort]\nalgorithm = \"lomuto\"\nsample_size = 8\nseed = 3\n\n[storage]\npath = {:?}\n",
        store_path.to_str().unwrap()
    );
    let config = GalleryConfig::from_toml(&toml).unwrap();

    let first = run_pages(&config, &["strategy", "memento"]);
    let second = run_pages(&config, &["strategy"]);

    assert!(first.contains("Input (8 items)"));
    assert!(first.contains("* lomuto"));
    // Seeded sample gives the same transcript every time
    assert!(first.starts_with(&second));

    let store = JsonFileStore::open(&store_path).unwrap();
    assert_eq!(store.keys(), vec!["notepad/greeting"]);
}

#[test]
fn test_unknown_page_reports_suggestion() {
    match catalog::find("decorater") {
        Err(GalleryError::UnknownPage { name, suggestion }) => {
            assert_eq!(name, "decorater");
            assert_eq!(suggestion.as_deref(), Some("decorator"));
        }
        other => panic!("expected UnknownPage, got {:?}", other),
    }
}

#[test]
fn test_catalog_covers_three_families() {
    let total: usize = Category::ALL
        .iter()
        .map(|c| catalog::by_category(*c).count())
        .sum();
    assert_eq!(total, catalog::pages().len());
}

#[test]
fn test_registry_with_mediator_members() {
    // A registry can watch the same colleagues a mediator routes between
    let mut room: Mediator<String> = Mediator::new();
    let mut audit: MulticastRegistry<dyn Colleague<String>> = MulticastRegistry::new();

    let alice: Rc<dyn Colleague<String>> = Participant::new("alice");
    let bob_participant = Participant::new("bob");
    let bob: Rc<dyn Colleague<String>> = bob_participant.clone();

    room.join(&alice);
    room.join(&bob);
    audit.add(&alice, Retention::Weak);
    audit.add(&bob, Retention::Weak);

    assert_eq!(room.broadcast(&alice, &"hello".to_string()), 1);
    assert_eq!(
        bob_participant.inbox(),
        vec![("alice".to_string(), "hello".to_string())]
    );

    drop(alice);
    assert_eq!(room.members(), vec!["bob"]);
    assert_eq!(audit.invoke(|c| c.receive("audit", &"ping".to_string())), 1);
    assert_eq!(bob_participant.inbox().len(), 2);
}

#[test]
fn test_sorted_stack_snapshot_through_store() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::open(dir.path().join("kv.json")).unwrap();

    let mut values = vec![9, -2, 7, 7, 0, 3];
    let sorter: Sorter<i32> = SortAlgorithm::Hoare.into();
    sorter.sort(&mut values);

    let stack: Stack<i32> = values.iter().copied().collect();
    assert_eq!(stack.peek(), Some(&9));
    let top_down: Vec<i32> = stack.iter().copied().collect();

    save_json(&mut store, "stack", &top_down).unwrap();
    let loaded: Option<Vec<i32>> = load_json(&store, "stack").unwrap();
    assert_eq!(loaded, Some(vec![9, 7, 7, 3, 0, -2]));
}
