use sporlmix::management::DraftManager;

#[test]
fn test_add_assigns_increasing_ids() {
    let mut drafts = DraftManager::new();

    let first = drafts.add("Morning".to_string(), String::new(), false).id;
    let second = drafts.add("Night".to_string(), "late".to_string(), true).id;

    assert!(second > first);
    assert_eq!(drafts.count(), 2);
    assert_eq!(drafts.all()[1].description, "late");
    assert!(drafts.all()[1].public);
}

#[test]
fn test_ids_are_not_reused_after_remove() {
    let mut drafts = DraftManager::new();
    drafts.add("A".to_string(), String::new(), false);
    let removed = drafts.remove(0).expect("removed");

    let next = drafts.add("B".to_string(), String::new(), false).id;
    assert_ne!(removed.id, next);
}

#[test]
fn test_remove_keeps_order() {
    let mut drafts = DraftManager::new();
    for name in ["A", "B", "C"] {
        drafts.add(name.to_string(), String::new(), false);
    }

    let removed = drafts.remove(1).expect("removed");
    assert_eq!(removed.name, "B");

    let names: Vec<&str> = drafts.all().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert!(drafts.remove(5).is_none());
}

#[test]
fn test_edit_drafts() {
    let mut drafts = DraftManager::new();
    drafts.add("Old".to_string(), String::new(), false);

    assert!(drafts.rename(0, "New".to_string()));
    assert!(drafts.describe(0, "songs for the road".to_string()));
    assert_eq!(drafts.toggle_public(0), Some(true));
    assert_eq!(drafts.toggle_public(0), Some(false));

    let draft = drafts.get(0).expect("draft");
    assert_eq!(draft.name, "New");
    assert_eq!(draft.description, "songs for the road");

    assert!(!drafts.rename(3, "x".to_string()));
    assert!(!drafts.describe(3, "x".to_string()));
    assert_eq!(drafts.toggle_public(3), None);
}

#[test]
fn test_clear() {
    let mut drafts = DraftManager::default();
    drafts.add("A".to_string(), String::new(), false);
    drafts.clear();

    assert_eq!(drafts.count(), 0);
    assert!(drafts.all().is_empty());
}
