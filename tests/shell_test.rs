use sporlmix::cli::ShellCommand;

#[test]
fn test_parse_simple_commands() {
    assert_eq!(ShellCommand::parse(""), Ok(ShellCommand::Empty));
    assert_eq!(ShellCommand::parse("   "), Ok(ShellCommand::Empty));
    assert_eq!(ShellCommand::parse("profile"), Ok(ShellCommand::Profile));
    assert_eq!(ShellCommand::parse("drafts"), Ok(ShellCommand::Drafts));
    assert_eq!(ShellCommand::parse("token"), Ok(ShellCommand::Token));
    assert_eq!(ShellCommand::parse("login"), Ok(ShellCommand::Login));
    assert_eq!(ShellCommand::parse("help"), Ok(ShellCommand::Help));
    assert_eq!(ShellCommand::parse("exit"), Ok(ShellCommand::Quit));
}

#[test]
fn test_parse_liked() {
    assert_eq!(ShellCommand::parse("liked"), Ok(ShellCommand::Liked(20)));
    assert_eq!(ShellCommand::parse("liked 5"), Ok(ShellCommand::Liked(5)));
    assert!(ShellCommand::parse("liked many").is_err());
}

#[test]
fn test_parse_liked_limit_range() {
    assert_eq!(ShellCommand::parse("liked 1"), Ok(ShellCommand::Liked(1)));
    assert_eq!(ShellCommand::parse("liked 50"), Ok(ShellCommand::Liked(50)));
    assert!(ShellCommand::parse("liked 0").is_err());
    assert!(ShellCommand::parse("liked 51").is_err());
    assert!(ShellCommand::parse("liked 500").is_err());
}

#[test]
fn test_parse_draft_clear() {
    assert_eq!(
        ShellCommand::parse("draft clear"),
        Ok(ShellCommand::DraftClear)
    );
}

#[test]
fn test_parse_draft_add() {
    assert_eq!(
        ShellCommand::parse("draft add My Mix"),
        Ok(ShellCommand::DraftAdd {
            name: "My Mix".to_string(),
            public: false
        })
    );
    assert_eq!(
        ShellCommand::parse("draft add --public Road Trip"),
        Ok(ShellCommand::DraftAdd {
            name: "Road Trip".to_string(),
            public: true
        })
    );
    assert!(ShellCommand::parse("draft add").is_err());
    assert!(ShellCommand::parse("draft add --public").is_err());
}

#[test]
fn test_parse_draft_numbers_are_one_based() {
    assert_eq!(
        ShellCommand::parse("draft rm 1"),
        Ok(ShellCommand::DraftRemove(0))
    );
    assert_eq!(
        ShellCommand::parse("draft toggle 3"),
        Ok(ShellCommand::DraftToggle(2))
    );
    assert!(ShellCommand::parse("draft rm 0").is_err());
    assert!(ShellCommand::parse("draft rm").is_err());
    assert!(ShellCommand::parse("draft rm x").is_err());
}

#[test]
fn test_parse_draft_text_arguments() {
    assert_eq!(
        ShellCommand::parse("draft describe 2 songs for the road"),
        Ok(ShellCommand::DraftDescribe {
            index: 1,
            description: "songs for the road".to_string()
        })
    );
    assert_eq!(
        ShellCommand::parse("draft rename 1 Evening"),
        Ok(ShellCommand::DraftRename {
            index: 0,
            name: "Evening".to_string()
        })
    );
    assert!(ShellCommand::parse("draft rename 1").is_err());
}

#[test]
fn test_parse_unknown() {
    assert!(ShellCommand::parse("dance").is_err());
    assert!(ShellCommand::parse("draft fly 1").is_err());
    assert!(ShellCommand::parse("draft").is_err());
}
