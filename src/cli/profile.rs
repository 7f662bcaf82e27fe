use tabled::Table;

use crate::{
    Res, error, info, spotify::client::SpotifyClient, success,
    types::{SavedTracksPage, TrackTableRow},
    utils,
};

pub async fn profile() {
    let client = super::auth::connect().await;
    if let Err(e) = show_profile(&client).await {
        error!("Failed to load profile: {}", e);
    }
}

pub async fn liked_songs(limit: u32) {
    let client = super::auth::connect().await;
    if let Err(e) = show_liked_songs(&client, limit).await {
        error!("Failed to load liked songs: {}", e);
    }
}

pub async fn show_profile(client: &SpotifyClient) -> Res<()> {
    let user = client.get_user().await?;
    let image_url = client.get_profile_image_url().await?;

    let table = Table::new(utils::profile_rows(&user));
    println!("{}", table);

    match image_url {
        Some(url) => info!("Profile image: {}", url),
        None => info!("No profile image"),
    }
    Ok(())
}

pub async fn show_liked_songs(client: &SpotifyClient, limit: u32) -> Res<()> {
    let page: SavedTracksPage = client.get_liked_songs(limit).await?;

    if page.items.is_empty() {
        info!("No liked songs found.");
        return Ok(());
    }

    let rows: Vec<TrackTableRow> = utils::track_rows(&page);
    let table = Table::new(rows);
    println!("{}", table);

    success!("Showing {} of {} liked songs", page.items.len(), page.total);
    Ok(())
}
