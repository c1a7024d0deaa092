//! Integration tests for the catalog endpoint.

mod common;

use common::{encode, TestHarness};
use lt_core::{Catalog, SortOrder};

async fn fetch_catalog(addr: std::net::SocketAddr) -> serde_json::Value {
    let resp = reqwest::get(format!("http://{addr}/api/courses"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    resp.json().await.unwrap()
}

fn names(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| {
            e.get("name")
                .or_else(|| e.get("filename"))
                .and_then(|v| v.as_str())
                .unwrap()
                .to_string()
        })
        .collect()
}

#[tokio::test]
async fn empty_library_has_no_courses() {
    let (_h, addr) = TestHarness::with_server().await;
    let json = fetch_catalog(addr).await;
    assert_eq!(json, serde_json::json!({ "courses": [] }));
}

#[tokio::test]
async fn missing_root_is_an_empty_catalog() {
    let (_h, addr) = TestHarness::with_server_config(|c| {
        c.library.courses_path = "/nonexistent/lectern/courses".into();
    })
    .await;
    let json = fetch_catalog(addr).await;
    assert_eq!(json["courses"], serde_json::json!([]));
}

#[tokio::test]
async fn catalog_shape_matches_the_tree() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_video("Rust 101", "Module 1", "01 Intro.mp4", 10);
    h.add_file("Rust 101/Module 1/01 Intro.srt", "1\n");
    h.add_video("Rust 101", "Module 1", "02 Ownership.mp4", 10);

    let json = fetch_catalog(addr).await;
    assert_eq!(
        json,
        serde_json::json!({
            "courses": [{
                "name": "Rust 101",
                "path": "Rust 101",
                "modules": [{
                    "name": "Module 1",
                    "path": "Rust 101/Module 1",
                    "videos": [
                        {
                            "filename": "01 Intro.mp4",
                            "title": "01 Intro",
                            "hasSubtitles": true,
                            "path": "Rust 101/Module 1/01 Intro.mp4"
                        },
                        {
                            "filename": "02 Ownership.mp4",
                            "title": "02 Ownership",
                            "hasSubtitles": false,
                            "path": "Rust 101/Module 1/02 Ownership.mp4"
                        }
                    ]
                }]
            }]
        })
    );
}

#[tokio::test]
async fn empty_and_hidden_entries_are_omitted() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_video("Course", "Module", "Lesson.mp4", 4);
    h.add_video("Course", "Module", ".Hidden.mp4", 4);
    h.add_file("Course/Module/notes.txt", "not a video");
    h.add_dir("Course/Empty Module");
    h.add_file("Course/Only Notes/readme.md", "#");
    h.add_dir("Empty Course");
    h.add_video(".Hidden Course", "Module", "Lesson.mp4", 4);
    h.add_video("Course", ".hidden module", "Lesson.mp4", 4);
    h.add_file("stray.mp4", "top-level files are ignored");

    let json = fetch_catalog(addr).await;
    let courses = &json["courses"];
    assert_eq!(names(courses), vec!["Course"]);
    assert_eq!(names(&courses[0]["modules"]), vec!["Module"]);
    assert_eq!(names(&courses[0]["modules"][0]["videos"]), vec!["Lesson.mp4"]);
}

#[tokio::test]
async fn subtitles_need_a_visible_same_stem_srt() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_video("C", "M", "a.mp4", 1);
    h.add_file("C/M/a.srt", "1\n");
    h.add_video("C", "M", "b.mp4", 1);
    h.add_file("C/M/b.en.srt", "1\n");
    h.add_video("C", "M", "c.mp4", 1);
    h.add_file("C/M/c.SRT.txt", "1\n");

    let json = fetch_catalog(addr).await;
    let videos = json["courses"][0]["modules"][0]["videos"].as_array().unwrap();
    let flags: Vec<bool> = videos
        .iter()
        .map(|v| v["hasSubtitles"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![true, false, false]);
}

#[tokio::test]
async fn default_order_is_lexical() {
    let (h, addr) = TestHarness::with_server().await;
    for module in ["Module 2", "Module 10", "Module 1"] {
        h.add_video("Course", module, "Lesson.mp4", 1);
    }

    let json = fetch_catalog(addr).await;
    assert_eq!(
        names(&json["courses"][0]["modules"]),
        vec!["Module 1", "Module 10", "Module 2"]
    );
}

#[tokio::test]
async fn natural_order_is_configurable() {
    let (h, addr) = TestHarness::with_server_config(|c| {
        c.library.sort_order = SortOrder::Natural;
    })
    .await;
    for module in ["Module 2", "Module 10", "Module 1"] {
        h.add_video("Course", module, "Lesson.mp4", 1);
    }
    for video in ["Part 9.mp4", "Part 11.mp4"] {
        h.add_video("Course", "Module 1", video, 1);
    }

    let json = fetch_catalog(addr).await;
    let modules = &json["courses"][0]["modules"];
    assert_eq!(names(modules), vec!["Module 1", "Module 2", "Module 10"]);
    assert_eq!(
        names(&modules[0]["videos"]),
        vec!["Lesson.mp4", "Part 9.mp4", "Part 11.mp4"]
    );
}

#[tokio::test]
async fn every_listed_video_is_streamable() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_video("Rust 101", "Module 1", "01 Intro.mp4", 32);
    h.add_video("Rust 101", "Module 2", "Traits & Generics.mp4", 16);
    h.add_video("Go #2", "Basics", "100% Done.mp4", 8);

    let catalog: Catalog = serde_json::from_value(fetch_catalog(addr).await).unwrap();
    assert_eq!(catalog.video_count(), 3);

    for video in catalog.videos() {
        let encoded: Vec<String> = video.path.split('/').map(encode).collect();
        let url = format!("http://{addr}/api/video/{}", encoded.join("/"));
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), 200, "{} should stream", video.path);
        assert!(h.root().join(&video.path).is_file());
    }
}

#[tokio::test]
async fn concurrent_scans_during_mutation_stay_consistent() {
    let (h, addr) = TestHarness::with_server().await;
    h.add_video("Stable", "Module", "Lesson.mp4", 1);

    let root = h.root().to_path_buf();
    let writer = tokio::task::spawn_blocking(move || {
        for i in 0..20 {
            let dir = root.join(format!("Course {i}")).join("Module");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("Lesson.mp4"), b"x").unwrap();
        }
    });

    let readers: Vec<_> = (0..8)
        .map(|_| tokio::spawn(async move { fetch_catalog(addr).await }))
        .collect();

    for reader in readers {
        let json = reader.await.unwrap();
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        assert!(catalog.courses.iter().any(|c| c.name == "Stable"));
        for course in &catalog.courses {
            assert!(!course.modules.is_empty());
            for module in &course.modules {
                assert!(!module.videos.is_empty());
                for video in &module.videos {
                    assert_eq!(
                        video.path,
                        format!("{}/{}/{}", course.name, module.name, video.filename)
                    );
                }
            }
        }
    }

    writer.await.unwrap();
}
