use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    DraftTableRow, PlaylistDraft, ProfileTableRow, SavedTracksPage, SimpleArtist, TrackTableRow,
    User,
};

pub const CODE_VERIFIER_LENGTH: usize = 64;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_VERIFIER_LENGTH)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Absolute expiry for a token minted at `now` with the provider reported TTL.
pub fn expires_at_from(expires_in: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
    let ttl = expires_in
        .and_then(Duration::try_seconds)
        .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_TTL_SECS));
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn join_artist_names(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn profile_rows(user: &User) -> Vec<ProfileTableRow> {
    let mut rows = vec![ProfileTableRow {
        field: "Name".to_string(),
        value: user
            .display_name
            .clone()
            .unwrap_or_else(|| "Spotify user".to_string()),
    }];

    let optional = [
        ("Country", user.country.clone()),
        ("Email", user.email.clone()),
        ("Plan", user.product.clone()),
        ("Followers", user.followers.as_ref().map(|f| f.total.to_string())),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            rows.push(ProfileTableRow {
                field: field.to_string(),
                value,
            });
        }
    }
    rows
}

pub fn track_rows(page: &SavedTracksPage) -> Vec<TrackTableRow> {
    page.items
        .iter()
        .map(|saved| TrackTableRow {
            // added_at is RFC 3339, the date part is enough for a table
            added: saved.added_at.chars().take(10).collect(),
            name: saved.track.name.clone(),
            artists: join_artist_names(&saved.track.artists),
            album: saved
                .track
                .album
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn draft_rows(drafts: &[PlaylistDraft]) -> Vec<DraftTableRow> {
    drafts
        .iter()
        .enumerate()
        .map(|(i, d)| DraftTableRow {
            index: i + 1,
            name: d.name.clone(),
            description: d.description.clone(),
            public: if d.public { "yes" } else { "no" }.to_string(),
        })
        .collect()
}
