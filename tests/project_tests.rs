// Host-side tests for the project descriptor, URL parameters and card data.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod project {
    include!("../src/core/project.rs");
}

use project::*;

const CATALOG: &str = r#"{
  "p1": {
    "projectName": "Harbour View",
    "assetsPath": "assets/p1/",
    "exterior": {
      "modelAndroid": "tower.glb",
      "modelIOS": "tower.usdz",
      "variants": [
        { "name": "Type A", "suffix": "_a", "thumbnail": "a.png" },
        { "name": "Type B", "suffix": "" }
      ]
    },
    "interior": {
      "startRoom": "r2",
      "floorplanImage": "plan.png",
      "rooms": [
        { "id": "r1", "name": "Living", "tex": "r1.jpg", "thumbnail": "r1_t.jpg",
          "mapCoords": { "x": 10, "y": 20 } },
        { "id": "r2", "name": "Kitchen", "tex": "r2.jpg", "mapCoords": { "x": 55.5, "y": 60 } }
      ]
    }
  },
  "bare": { "projectName": "Empty lot" }
}"#;

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).expect("fixture parses")
}

fn p1() -> Project {
    catalog().get("p1").unwrap().clone()
}

#[test]
fn catalog_parses_all_projects() {
    let c = catalog();
    assert_eq!(c.len(), 2);
    let p = c.get("p1").unwrap();
    assert_eq!(p.project_name, "Harbour View");
    assert_eq!(p.rooms().len(), 2);
    assert_eq!(p.variants().len(), 2);
    assert_eq!(
        p.rooms()[1].map_coords,
        MapCoords { x: 55.5, y: 60.0 }
    );
}

#[test]
fn optional_sections_may_be_missing() {
    let c = catalog();
    let bare = c.get("bare").unwrap();
    assert!(bare.exterior.is_none() && bare.interior.is_none());
    assert_eq!(bare.assets_path, "");
    assert!(bare.rooms().is_empty());
    assert!(bare.variants().is_empty());
}

#[test]
fn unknown_project_is_an_error() {
    let err = catalog().get("nope").unwrap_err();
    assert!(matches!(err, ProjectError::UnknownProject(ref id) if id == "nope"));
    assert_eq!(err.to_string(), "unknown project: nope");
}

#[test]
fn malformed_catalog_is_a_parse_error() {
    assert!(matches!(
        Catalog::from_json("{ not json"),
        Err(ProjectError::Parse(_))
    ));
    // a room without its texture is rejected as a whole
    let bad = r#"{"x": {"projectName": "X", "interior": {"rooms": [{"id": "a", "name": "A"}]}}}"#;
    assert!(Catalog::from_json(bad).is_err());
}

#[test]
fn requested_room_wins_over_start_room() {
    let p = p1();
    let interior = p.interior.as_ref().unwrap();
    assert_eq!(interior.start_room_index(Some("r1")), 0);
    assert_eq!(interior.start_room_index(None), 1);
    assert_eq!(interior.start_room_index(Some("")), 1);
    // Unknown room falls back to the first room, not startRoom
    assert_eq!(interior.start_room_index(Some("attic")), 0);

    let no_start = Interior {
        start_room: None,
        ..interior.clone()
    };
    assert_eq!(no_start.start_room_index(None), 0);
}

#[test]
fn variant_index_falls_back_to_first() {
    let p = p1();
    let ext = p.exterior.as_ref().unwrap();
    assert_eq!(ext.variant_index(Some("1")), 1);
    assert_eq!(ext.variant_index(Some("0")), 0);
    assert_eq!(ext.variant_index(Some("7")), 0);
    assert_eq!(ext.variant_index(Some("-1")), 0);
    assert_eq!(ext.variant_index(Some("two")), 0);
    assert_eq!(ext.variant_index(None), 0);
}

#[test]
fn variant_suffix_goes_before_extension() {
    let p = p1();
    let ext = p.exterior.as_ref().unwrap();
    assert_eq!(
        ext.model_files(0),
        ModelFiles {
            android: "tower_a.glb".into(),
            ios: "tower_a.usdz".into(),
        }
    );
    // Empty suffix and out of range both use the base model
    assert_eq!(ext.model_files(1).android, "tower.glb");
    assert_eq!(ext.model_files(9).ios, "tower.usdz");
}

#[test]
fn thumbnails_fall_back() {
    let p = p1();
    assert_eq!(p.rooms()[0].thumbnail_file(), "r1_t.jpg");
    assert_eq!(p.rooms()[1].thumbnail_file(), "r2.jpg");
    assert_eq!(p.variants()[0].thumbnail_file(), "a.png");
    assert_eq!(p.variants()[1].thumbnail_file(), "plan_default.png");
    assert_eq!(p.asset_url("r2.jpg"), "assets/p1/r2.jpg");
}

#[test]
fn query_parsing() {
    let q = PageQuery::parse("?id=p1&room=r1&variant=2&utm=x");
    assert_eq!(q.id.as_deref(), Some("p1"));
    assert_eq!(q.room.as_deref(), Some("r1"));
    assert_eq!(q.variant.as_deref(), Some("2"));
    assert_eq!(q.project_id().unwrap(), "p1");

    assert_eq!(PageQuery::parse("id=p1"), PageQuery::parse("?id=p1"));
    assert_eq!(
        PageQuery::parse("?id=my%20proj&id=other").id.as_deref(),
        Some("my proj")
    );
    assert_eq!(PageQuery::parse(""), PageQuery::default());
}

#[test]
fn missing_or_empty_id_is_an_error() {
    for search in ["", "?", "?variant=1", "?id="] {
        assert!(
            matches!(
                PageQuery::parse(search).project_id(),
                Err(ProjectError::MissingProjectId)
            ),
            "{search:?}"
        );
    }
}

#[test]
fn view_target_urls() {
    assert_eq!(
        ViewTarget::Exterior { variant: None }.url("p1"),
        "exterior?id=p1"
    );
    assert_eq!(
        ViewTarget::Exterior { variant: Some(2) }.url("p1"),
        "exterior?id=p1&variant=2"
    );
    assert_eq!(
        ViewTarget::Interior {
            room: Some("r1".into())
        }
        .url("p1"),
        "interior?id=p1&room=r1"
    );
    assert_eq!(
        ViewTarget::Interior {
            room: Some("r/1".into())
        }
        .url("my proj"),
        "interior?id=my+proj&room=r%2F1"
    );
}

#[test]
fn target_urls_parse_back_to_the_same_view() {
    let url = ViewTarget::Interior {
        room: Some("r 2".into()),
    }
    .url("p1");
    let (_, search) = url.split_once('?').unwrap();
    let q = PageQuery::parse(search);
    assert_eq!(q.project_id().unwrap(), "p1");
    assert_eq!(q.room.as_deref(), Some("r 2"));
}

#[test]
fn exterior_cards_list_overview_then_variants() {
    let p = p1();
    let cards = exterior_cards(&p, "p1");
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].icon, "landscape");
    assert_eq!(cards[0].target_url, "exterior?id=p1");
    assert_eq!(cards[1].title, "Type A");
    assert_eq!(cards[1].image_url, "assets/p1/a.png");
    assert_eq!(cards[1].target_url, "exterior?id=p1&variant=0");
    assert_eq!(cards[2].image_url, "assets/p1/plan_default.png");
    assert_eq!(cards[2].icon, "apartment");
}

#[test]
fn interior_cards_list_overview_then_rooms() {
    let p = p1();
    let cards = interior_cards(&p, "p1");
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].icon, "chair");
    assert_eq!(cards[0].target_url, "interior?id=p1");
    assert_eq!(cards[1].image_url, "assets/p1/r1_t.jpg");
    assert_eq!(cards[2].title, "Kitchen");
    assert_eq!(cards[2].image_url, "assets/p1/r2.jpg");
    assert_eq!(cards[2].target_url, "interior?id=p1&room=r2");
    assert!(cards[2].desc.contains("Kitchen"));
}

#[test]
fn project_without_sections_still_has_overview_cards() {
    let c = catalog();
    let bare = c.get("bare").unwrap();
    assert_eq!(exterior_cards(bare, "bare").len(), 1);
    assert_eq!(interior_cards(bare, "bare").len(), 1);
}

#[test]
fn platform_from_user_agent() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120";
    let desktop = "Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0";
    assert_eq!(Platform::from_user_agent(iphone), Platform::Ios);
    assert_eq!(Platform::from_user_agent("Mozilla/5.0 (iPad; CPU OS 16_0)"), Platform::Ios);
    assert_eq!(Platform::from_user_agent(android), Platform::Android);
    assert_eq!(Platform::from_user_agent(desktop), Platform::Other);
}
