use pmomedialib::{Category, LibraryError, LibraryIndex, MediaNode, NodeKind};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn ids(nodes: &[MediaNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Bibliothèque de test : un morceau partagé entre une playlist et un album
fn sample_library() -> String {
    json!({
        "recentTracks": [
            {"id": "track_2", "title": "Stairway to Heaven", "artist": "Led Zeppelin", "album": "Led Zeppelin IV"},
            {"id": "track_3", "title": "Hotel California", "artist": "Eagles"}
        ],
        "playlists": [
            {
                "id": "p1",
                "title": "Rock Classics",
                "artworkRef": "https://example.com/rock.jpg",
                "items": [
                    {"id": "track_1", "title": "Bohemian Rhapsody", "artist": "Queen"},
                    {"id": "track_4", "title": "Smoke on the Water", "artist": "Deep Purple"}
                ]
            }
        ],
        "albums": [
            {
                "id": "a1",
                "title": "A Night at the Opera",
                "subtitle": "1975",
                "items": [
                    {"id": "track_1", "title": "Bohemian Rhapsody", "artist": "Queen", "album": "A Night at the Opera"}
                ]
            }
        ],
        "artists": [
            {"id": "1", "title": "Eagles", "items": [{"id": "track_3", "title": "Hotel California", "artist": "Eagles"}]}
        ]
    })
    .to_string()
}

fn loaded_index() -> LibraryIndex {
    let index = LibraryIndex::new();
    index.replace_library(&sample_library()).unwrap();
    index
}

#[test]
fn test_road_trip_scenario() {
    let index = LibraryIndex::new();
    index
        .replace_library(
            r#"{"playlists":[{"id":"p1","title":"Road Trip","items":[{"id":"t1","title":"Song A","artist":"X"}]}]}"#,
        )
        .unwrap();

    let rows = index.list_children("playlists");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "playlist_p1");
    assert_eq!(rows[0].title, "Road Trip");
    assert_eq!(rows[0].subtitle.as_deref(), Some("1 tracks"));
    assert_eq!(rows[0].kind, NodeKind::Browsable);

    let children = index.list_children("playlist_p1");
    assert_eq!(ids(&children), ["shuffle_playlist_p1", "t1"]);
    assert_eq!(children[0].kind, NodeKind::Playable);
    assert_eq!(children[1].subtitle.as_deref(), Some("X"));
}

#[test]
fn test_root_is_stable() {
    let index = LibraryIndex::new();
    let empty = index.list_children("root");
    index.replace_library(&sample_library()).unwrap();
    let loaded = index.list_children("root");

    assert_eq!(ids(&loaded), ["recent", "playlists", "albums", "artists"]);
    assert_eq!(empty, loaded);
    assert!(loaded.iter().all(MediaNode::is_browsable));
}

#[test]
fn test_id_disambiguation() {
    let index = LibraryIndex::new();
    index
        .replace_library(
            &json!({
                "playlists": [{"id": "1", "title": "Mix", "items": [{"id": "pt", "title": "From playlist"}]}],
                "albums": [{"id": "1", "title": "Debut", "items": [{"id": "at", "title": "From album"}]}]
            })
            .to_string(),
        )
        .unwrap();

    let playlist = index.list_children("playlist_1");
    let album = index.list_children("album_1");
    assert_eq!(ids(&playlist), ["shuffle_playlist_1", "pt"]);
    assert_eq!(ids(&album), ["shuffle_album_1", "at"]);
    assert!(index.list_children("artist_1").is_empty());
}

#[test]
fn test_shuffle_first_and_not_counted() {
    let index = loaded_index();
    for category in Category::ENTITIES {
        for row in index.list_children(category.root_id()) {
            let children = index.list_children(&row.id);
            let shuffle = &children[0];
            assert_eq!(shuffle.id, format!("shuffle_{}", row.id));
            assert!(shuffle.is_playable());
            assert!(!shuffle.is_track());
            assert!(children[1..].iter().all(MediaNode::is_track));
        }
    }

    let rows = index.list_children("playlists");
    assert_eq!(rows[0].subtitle.as_deref(), Some("2 tracks"));
    assert_eq!(rows[0].artwork.as_deref(), Some("https://example.com/rock.jpg"));
    assert_eq!(
        index.list_children("playlist_p1")[0].artwork.as_deref(),
        Some("https://example.com/rock.jpg")
    );
    // Sous-titre explicite conservé
    assert_eq!(index.list_children("albums")[0].subtitle.as_deref(), Some("1975"));
}

#[test]
fn test_unknown_ids_degrade_to_empty() {
    let index = loaded_index();
    for id in [
        "nonexistent",
        "",
        "playlist_",
        "playlist_nope",
        "album_p1",
        "shuffle_playlist_p1",
        "track_1",
        "ROOT",
    ] {
        assert!(index.list_children(id).is_empty(), "{id} should have no children");
    }
}

#[test]
fn test_search_counts_duplicates() {
    let index = loaded_index();

    let queen = index.search("queen");
    assert_eq!(ids(&queen), ["track_1", "track_1"]);
    assert!(queen.iter().all(|n| n.title == "Bohemian Rhapsody"));

    assert!(index.search("").is_empty());
    assert_eq!(index.search("QUEEN").len(), 2);
}

#[test]
fn test_search_whitespace_query_matches_as_substring() {
    let index = LibraryIndex::new();
    index
        .replace_library(r#"{"recentTracks":[{"id":"t1","title":"Bohemian Rhapsody","artist":"Queen"}]}"#)
        .unwrap();

    let hits = index.search(" ");
    assert_eq!(ids(&hits), ["t1"]);
    assert!(index.search("  ").is_empty());
}

#[test]
fn test_search_scan_order_and_scope() {
    let index = loaded_index();

    // recent d'abord, puis playlists, albums, artistes
    let eagles = index.search("eagles");
    assert_eq!(ids(&eagles), ["track_3", "track_3"]);

    let hotel = index.search("hotel");
    assert_eq!(hotel.len(), 2);

    // Les lignes d'entité et les entrées aléatoires ne sont pas indexées
    assert!(index.search("rock classics").is_empty());
    assert!(index.search("opera").is_empty());
    assert!(index.search("shuffle").is_empty());
}

#[test]
fn test_failed_replace_keeps_previous_snapshot() {
    let index = loaded_index();
    let node_ids = ["root", "recent", "playlists", "albums", "artists", "playlist_p1", "album_a1", "artist_1"];
    let before: Vec<Vec<MediaNode>> = node_ids.iter().map(|id| index.list_children(id)).collect();
    let search_before = index.search("e");

    let malformed = [
        "{".to_string(),
        "[]".to_string(),
        r#"{"recentTracks": 3}"#.to_string(),
        // recent valide mais album invalide : rien ne doit être publié
        json!({"recentTracks": [], "albums": [{"id": "x", "items": []}]}).to_string(),
        json!({"playlists": [{"id": "p9", "title": "P", "items": [{"title": "no id"}]}]}).to_string(),
    ];

    for doc in &malformed {
        assert!(index.replace_library(doc).is_err(), "{doc} should be rejected");
        let after: Vec<Vec<MediaNode>> = node_ids.iter().map(|id| index.list_children(id)).collect();
        assert_eq!(before, after);
        assert_eq!(search_before, index.search("e"));
    }
}

#[test]
fn test_error_names_category_and_field() {
    let index = LibraryIndex::new();
    let err = index
        .replace_library(r#"{"albums": [{"id": "a", "title": "A"}, {"title": "B"}]}"#)
        .unwrap_err();

    assert_eq!(err.category(), Some(Category::Albums));
    assert_eq!(err.field(), Some("id"));
    assert_eq!(err.location().map(|l| l.index), Some(1));
    assert!(matches!(err, LibraryError::MissingField { .. }));
}

#[test]
fn test_absent_categories_are_kept() {
    let index = loaded_index();
    index
        .replace_library(r#"{"playlists": [{"id": "new", "title": "Fresh"}]}"#)
        .unwrap();

    assert_eq!(ids(&index.list_children("playlists")), ["playlist_new"]);
    assert!(index.list_children("playlist_p1").is_empty());
    // Les autres catégories ne sont pas touchées
    assert_eq!(index.list_children("recent").len(), 2);
    assert_eq!(ids(&index.list_children("albums")), ["album_a1"]);

    index.replace_library(r#"{"albums": []}"#).unwrap();
    assert!(index.list_children("albums").is_empty());
    assert!(index.list_children("album_a1").is_empty());
}

#[test]
fn test_stats() {
    let stats = loaded_index().stats();
    assert_eq!(stats.recent_tracks, 2);
    assert_eq!(stats.playlists, 1);
    assert_eq!(stats.albums, 1);
    assert_eq!(stats.artists, 1);
    assert_eq!(stats.indexed_tracks, 6);
}

#[test]
fn test_readers_never_see_a_mix_of_snapshots() {
    fn library(tag: &str) -> String {
        json!({
            "recentTracks": [{"id": format!("{tag}_r"), "title": tag}],
            "playlists": [{"id": "p", "title": tag, "items": [{"id": format!("{tag}_t"), "title": tag}]}],
            "albums": [{"id": "a", "title": tag, "items": [{"id": format!("{tag}_u"), "title": tag}]}]
        })
        .to_string()
    }

    let index = Arc::new(LibraryIndex::new());
    index.replace_library(&library("aaa")).unwrap();

    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for round in 0..200 {
                let tag = if round % 2 == 0 { "bbb" } else { "aaa" };
                index.replace_library(&library(tag)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = index.snapshot();
                    let recent = &snapshot.recent_tracks()[0].title;
                    let playlist = &snapshot.listing(Category::Playlists)[0].title;
                    let album = &snapshot.listing(Category::Albums)[0].title;
                    assert_eq!(recent, playlist);
                    assert_eq!(recent, album);

                    // Une recherche voit toujours 3 morceaux d'un seul et même instantané
                    let hits = index.search("aaa").len();
                    assert!(hits == 0 || hits == 3, "saw {hits} matches");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
