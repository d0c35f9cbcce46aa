//! End-to-end mirror cycles
//!
//! Config file on disk -> Emby client against a mock server -> cycle runner
//! -> symlinks in a temporary library.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use mirror_core::{CancelToken, CycleReport, CycleRunner, MirrorConfig, OutcomeStatus};
use mirror_emby::EmbyClient;
use mirror_fs::NormalizedPath;
use mirror_test_utils::library::MediaLibrary;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Server-side root the mock catalogue reports paths under.
const SERVER_ROOT: &str = "/srv/emby/media";

fn write_config(library: &MediaLibrary, server: &MockServer) -> MirrorConfig {
    let config_path = library.root().join("mirror.yaml");
    let yaml = [
        "server:".to_string(),
        format!("  url: {}", server.uri()),
        "  api_key: secret".to_string(),
        "  timeout_secs: 5".to_string(),
        "collections:".to_string(),
        "  - name: trending movies".to_string(),
        format!("    target: '{}'", library.mirror_path("movies").display()),
        "    kind: movie".to_string(),
        "  - id: \"20\"".to_string(),
        format!("    target: '{}'", library.mirror_path("shows").display()),
        "    kind: show".to_string(),
        "path_rules:".to_string(),
        format!("  - from: {SERVER_ROOT}"),
        format!("    to: '{}'", library.media_root().display()),
    ]
    .join("\n");
    fs::write(&config_path, yaml).unwrap();
    MirrorConfig::load(&NormalizedPath::new(&config_path)).unwrap()
}

/// Catalogue path of a file under the library's media root.
fn server_path(library: &MediaLibrary, local: &Path) -> String {
    let relative = local.strip_prefix(library.media_root()).unwrap();
    format!("{}/{}", SERVER_ROOT, relative.display())
}

async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_catalogue(server: &MockServer, library: &MediaLibrary, movies: &[&str]) {
    mount(
        server,
        "/emby/Collections",
        json!({"Items": [{"Id": "10", "Name": "trending movies"}, {"Id": "20", "Name": "trending shows"}]}),
    )
    .await;

    let items: Vec<Value> = movies
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let file = library.add_movie(title);
            json!({"Id": format!("m{i}"), "Name": title, "Type": "Movie", "Path": server_path(library, &file)})
        })
        .collect();
    mount(server, "/emby/Collections/10/Items", json!({ "Items": items })).await;

    let episode = library.add_show("Severance");
    mount(
        server,
        "/emby/Collections/20/Items",
        json!({"Items": [{"Id": "s1", "Name": "Severance", "Type": "Series"}]}),
    )
    .await;
    mount(
        server,
        "/emby/Shows/s1/Episodes",
        json!({"Items": [{"Id": "e1", "Name": "Pilot", "Type": "Episode", "Path": server_path(library, &episode)}]}),
    )
    .await;
}

/// Run one cycle on the blocking pool with a fresh client.
async fn cycle(config: MirrorConfig) -> CycleReport {
    tokio::task::spawn_blocking(move || {
        let client = EmbyClient::from_config(&config.server).unwrap();
        CycleRunner::new(config, client).run_cycle(&CancelToken::new())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn full_cycle_mirrors_movies_and_shows() {
    let server = MockServer::start().await;
    let library = MediaLibrary::new();
    mount_catalogue(&server, &library, &["Heat (1995)", "Alien: Romulus"]).await;
    let config = write_config(&library, &server);

    let report = cycle(config.clone()).await;

    assert!(report.is_success(), "{:#?}", report);
    let movies = library.mirror_path("movies");
    let shows = library.mirror_path("shows");
    assert_eq!(
        library.link_names(&movies),
        vec!["Alien_ Romulus.lnk", "Heat (1995).lnk"]
    );
    assert_eq!(library.link_names(&shows), vec!["Severance.lnk"]);
    assert_eq!(
        library.link_target(&shows, "Severance.lnk"),
        Some(library.media_root().join("tv/Severance").canonicalize().unwrap())
    );
    assert_eq!(
        library.link_target(&movies, "Heat (1995).lnk"),
        Some(library.media_root().join("movies/Heat (1995)").canonicalize().unwrap())
    );

    // Unchanged catalogue, unchanged mirrors
    let again = cycle(config).await;
    assert!(!again.has_drift());
}

#[tokio::test(flavor = "multi_thread")]
async fn membership_change_is_mirrored() {
    let library = MediaLibrary::new();

    let before = MockServer::start().await;
    mount_catalogue(&before, &library, &["Heat", "Alien"]).await;
    cycle(write_config(&library, &before)).await;

    let after = MockServer::start().await;
    mount_catalogue(&after, &library, &["Alien", "Dune"]).await;
    let report = cycle(write_config(&library, &after)).await;

    let movies = report.outcomes[0].report().unwrap();
    assert_eq!(movies.reconcile.created(), 1);
    assert_eq!(movies.reconcile.removed(), 1);
    assert_eq!(
        library.link_names(&library.mirror_path("movies")),
        vec!["Alien.lnk", "Dune.lnk"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_outage_keeps_existing_mirror() {
    let library = MediaLibrary::new();

    let healthy = MockServer::start().await;
    mount_catalogue(&healthy, &library, &["Heat"]).await;
    cycle(write_config(&library, &healthy)).await;

    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;
    let report = cycle(write_config(&library, &broken)).await;

    assert_eq!(report.failed_count(), 2);
    assert!(matches!(
        &report.outcomes[0].status,
        OutcomeStatus::Failed { error } if error.contains("503")
    ));
    assert_eq!(
        library.link_names(&library.mirror_path("movies")),
        vec!["Heat.lnk"]
    );
    assert_eq!(
        library.link_names(&library.mirror_path("shows")),
        vec!["Severance.lnk"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn item_moved_on_disk_is_dropped_from_mirror() {
    let server = MockServer::start().await;
    let library = MediaLibrary::new();
    mount_catalogue(&server, &library, &["Heat", "Alien"]).await;
    let config = write_config(&library, &server);
    cycle(config.clone()).await;

    fs::remove_dir_all(library.media_root().join("movies/Heat")).unwrap();
    let report = cycle(config).await;

    let movies = report.outcomes[0].report().unwrap();
    assert_eq!(movies.unresolved.len(), 1);
    assert_eq!(movies.unresolved[0].name, "Heat");
    assert_eq!(
        library.link_names(&library.mirror_path("movies")),
        vec!["Alien.lnk"]
    );
}
