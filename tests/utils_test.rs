use chrono::{Duration, TimeZone, Utc};
use sporlmix::types::{
    Followers, Image, PlaylistDraft, SavedTrack, SavedTracksPage, SimpleAlbum, SimpleArtist,
    TokenData, Track, User,
};
use sporlmix::utils::*;

// Helper function to create a test track
fn create_test_saved_track(name: &str, artists: &[&str], added_at: &str) -> SavedTrack {
    SavedTrack {
        added_at: added_at.to_string(),
        track: Track {
            id: Some(format!("{}_id", name)),
            name: name.to_string(),
            uri: format!("spotify:track:{}", name),
            artists: artists
                .iter()
                .map(|a| SimpleArtist {
                    id: None,
                    name: a.to_string(),
                })
                .collect(),
            album: Some(SimpleAlbum {
                id: None,
                name: format!("{} (album)", name),
                release_date: None,
            }),
        },
    }
}

fn create_test_user() -> User {
    User {
        id: "user-1".to_string(),
        display_name: Some("Test User".to_string()),
        country: Some("DE".to_string()),
        email: None,
        images: vec![Image {
            url: "https://i.scdn.co/image/abc".to_string(),
            height: Some(300),
            width: Some(300),
        }],
        followers: Some(Followers { total: 12 }),
        product: None,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), CODE_VERIFIER_LENGTH);
    assert!(verifier.len() >= 43);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(&verifier));

    // SHA-256 is 32 bytes, 43 chars in base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    assert_ne!(challenge, generate_code_challenge("different_verifier"));
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // Example from RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_expires_at_from() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(expires_at_from(Some(120), now), now + Duration::seconds(120));
    assert_eq!(
        expires_at_from(None, now),
        now + Duration::seconds(DEFAULT_TOKEN_TTL_SECS)
    );
}

#[test]
fn test_token_expiry_boundary() {
    let expires_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = TokenData {
        access_token: "A1".to_string(),
        refresh_token: None,
        expires_at,
        scope: None,
    };

    assert!(!token.is_expired_at(expires_at - Duration::seconds(1)));
    assert!(token.is_expired_at(expires_at));
    assert!(token.is_expired_at(expires_at + Duration::seconds(1)));
}

#[test]
fn test_join_artist_names() {
    let track = create_test_saved_track("song", &["Alpha", "Beta"], "2024-01-01T00:00:00Z");
    assert_eq!(join_artist_names(&track.track.artists), "Alpha, Beta");
    assert_eq!(join_artist_names(&[]), "");
}

#[test]
fn test_track_rows() {
    let page = SavedTracksPage {
        items: vec![
            create_test_saved_track("first", &["Alpha"], "2024-03-10T08:15:00Z"),
            create_test_saved_track("second", &["Beta", "Gamma"], "2024-02-01T00:00:00Z"),
        ],
        total: 2,
        limit: 20,
    };

    let rows = track_rows(&page);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].added, "2024-03-10");
    assert_eq!(rows[0].name, "first");
    assert_eq!(rows[0].album, "first (album)");
    assert_eq!(rows[1].artists, "Beta, Gamma");
}

#[test]
fn test_profile_rows() {
    let user = create_test_user();
    let rows = profile_rows(&user);

    let fields: Vec<&str> = rows.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(fields, vec!["Name", "Country", "Followers"]);
    assert_eq!(rows[0].value, "Test User");
    assert_eq!(rows[2].value, "12");
}

#[test]
fn test_profile_rows_without_display_name() {
    let mut user = create_test_user();
    user.display_name = None;

    let rows = profile_rows(&user);
    assert_eq!(rows[0].value, "Spotify user");
}

#[test]
fn test_draft_rows() {
    let drafts = vec![
        PlaylistDraft {
            id: 7,
            name: "Morning".to_string(),
            description: "coffee".to_string(),
            public: true,
        },
        PlaylistDraft {
            id: 9,
            name: "Night".to_string(),
            description: String::new(),
            public: false,
        },
    ];

    let rows = draft_rows(&drafts);
    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].public, "yes");
    assert_eq!(rows[1].index, 2);
    assert_eq!(rows[1].public, "no");
}
