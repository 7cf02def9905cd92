// SPDX-License-Identifier: MPL-2.0
//! Gallery section loading, retry and filtering.

use gallery_lens::application::port::{AnalyticsEvent, AnalyticsEventKind, ServiceError};
use gallery_lens::application::{Collaborators, GallerySection, LoadState};
use gallery_lens::config::{self, Config};
use gallery_lens::domain::gallery::{
    CategorySelection, GalleryItem, ItemDetails, ItemId, StoreId,
};
use gallery_lens::domain::ui::ViewMode;
use gallery_lens::error::Error;
use gallery_lens::infrastructure::{
    ChannelAnalytics, InMemoryGalleryService, NoopImageCache, NoopShareSheet,
};
use gallery_lens::ui::state::GestureInput;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tokio::sync::mpsc::Receiver;

fn scenario_items() -> Vec<GalleryItem> {
    vec![
        GalleryItem::image(
            ItemDetails::new("1", "https://cdn.example.com/1.jpg", "food")
                .with_tags(["spicy", "veg"]),
        ),
        GalleryItem::image(
            ItemDetails::new("2", "https://cdn.example.com/2.jpg", "food").with_tags(["spicy"]),
        ),
        GalleryItem::image(
            ItemDetails::new("3", "https://cdn.example.com/3.jpg", "drinks").with_tags(["cold"]),
        ),
        GalleryItem::video(
            ItemDetails::new("4", "https://cdn.example.com/4.mp4", "Food"),
            "https://cdn.example.com/4.jpg",
        ),
    ]
}

fn section_with(service: &InMemoryGalleryService) -> (GallerySection, Receiver<AnalyticsEvent>) {
    let (analytics, events) = ChannelAnalytics::new(64);
    let collaborators = Collaborators::new(
        Arc::new(service.clone()),
        Arc::new(NoopShareSheet),
        Arc::new(NoopImageCache),
    )
    .with_analytics(Arc::new(analytics));
    let section = GallerySection::new(StoreId::new("store-1"), collaborators, &Config::default());
    (section, events)
}

fn ids(items: &[&GalleryItem]) -> Vec<ItemId> {
    items.iter().map(|item| item.id().clone()).collect()
}

#[tokio::test]
async fn load_derives_categories_and_tag_universe() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, mut events) = section_with(&service);

    section.load().await.unwrap();

    assert_eq!(section.load_state(), &LoadState::Ready);
    assert_eq!(section.view_mode(), ViewMode::Categories);
    let names: Vec<&str> = section.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["food", "drinks"]);
    assert_eq!(section.categories()[0].count, 3);
    assert_eq!(section.tag_universe(), ["cold", "spicy", "veg"]);
    assert_eq!(
        events.try_recv().unwrap().kind,
        AnalyticsEventKind::SectionViewed
    );
}

#[tokio::test]
async fn category_and_tag_narrow_the_result() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.select_category("food");
    assert_eq!(section.view_mode(), ViewMode::Grid);
    assert_eq!(section.filtered_indices(), [0, 1, 3]);

    assert!(section.toggle_tag("veg"));
    assert_eq!(ids(&section.filtered_items()), vec![ItemId::from("1")]);

    // The chooser still offers every tag.
    assert_eq!(section.tag_universe(), ["cold", "spicy", "veg"]);
}

#[tokio::test]
async fn tag_filter_drops_untagged_items() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.toggle_tag("SPICY");
    assert_eq!(section.view_mode(), ViewMode::Grid);
    assert_eq!(
        ids(&section.filtered_items()),
        vec![ItemId::from("1"), ItemId::from("2")]
    );

    assert!(!section.toggle_tag("spicy"));
    assert_eq!(section.filtered_indices().len(), 4);
}

#[tokio::test]
async fn clearing_filters_returns_to_categories() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.select_category("drinks");
    section.toggle_tag("cold");
    section.clear_filters();

    assert_eq!(section.view_mode(), ViewMode::Categories);
    assert!(!section.selection().is_active());
    assert_eq!(section.filtered_indices().len(), 4);
}

#[tokio::test]
async fn category_literally_named_all_can_be_selected() {
    let mut items = scenario_items();
    items.push(GalleryItem::image(ItemDetails::new("5", "https://cdn.example.com/5.jpg", "All")));
    let service = InMemoryGalleryService::new(items, Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.set_category(CategorySelection::Named("All".into()));
    assert_eq!(ids(&section.filtered_items()), vec![ItemId::from("5")]);

    section.select_category("ALL");
    assert_eq!(section.filtered_indices().len(), 5);

    section.set_category(CategorySelection::Named("all".into()));
    assert_eq!(section.filtered_indices(), [4]);
    section.select_all_categories();
    assert!(!section.selection().is_active());
    assert_eq!(section.view_mode(), ViewMode::Grid);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_wait_for_manual_retry() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    service.fail_gallery(3, ServiceError::Network("offline".into()));
    let (mut section, _events) = section_with(&service);

    let result = section.load().await;
    assert!(matches!(result, Err(Error::Service(ServiceError::Network(_)))));
    assert_eq!(service.calls().gallery, 3);
    assert!(section.load_state().can_retry());
    assert!(matches!(
        section.load_state(),
        LoadState::Failed { attempts: 3, .. }
    ));

    // No further automatic attempts.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(service.calls().gallery, 3);

    assert!(section.retry().await.unwrap());
    assert_eq!(service.calls().gallery, 4);
    assert!(section.load_state().is_ready());
    assert_eq!(section.items().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn transient_failure_recovers_within_budget() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    service.fail_categories(2, ServiceError::Status { status: 503 });
    let (mut section, _events) = section_with(&service);

    section.load().await.unwrap();
    assert_eq!(service.calls().categories, 3);
    assert!(section.load_state().is_ready());
    assert!(!section.retry().await.unwrap());
}

#[tokio::test]
async fn viewer_opens_over_the_filtered_subset() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.select_category("drinks");
    let viewer = section.open_viewer(5).unwrap();
    assert_eq!(viewer.len(), 1);
    assert_eq!(viewer.current_item().unwrap().id(), &ItemId::from("3"));
}

#[tokio::test]
async fn viewer_shares_the_unfiltered_collection() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    let viewer = section.open_viewer(0).unwrap();
    assert!(Arc::ptr_eq(viewer.items(), section.items()));
}

#[tokio::test]
async fn empty_filter_result_cannot_open_viewer() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    section.select_category("desserts");
    assert!(matches!(section.open_viewer(0), Err(Error::EmptyGallery)));
}

#[tokio::test]
async fn viewer_pans_before_the_viewport_is_measured() {
    let service = InMemoryGalleryService::new(scenario_items(), Vec::new());
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();

    let viewer = section.open_viewer(0).unwrap();
    let mut transforms = viewer.gesture().unwrap().subscribe();

    viewer.gesture_input(GestureInput::DoubleTap);
    transforms.wait_for(|t| t.scale == 2.0).await.unwrap();

    viewer.gesture_input(GestureInput::PanStart);
    viewer.gesture_input(GestureInput::PanUpdate { dx: 50.0, dy: 50.0 });
    viewer.gesture_input(GestureInput::PanEnd);
    let panned = *transforms.wait_for(|t| t.translate_x != 0.0).await.unwrap();

    assert_eq!(panned.translate_x, 50.0);
    assert_eq!(panned.translate_y, 50.0);
}

#[tokio::test]
async fn fixture_file_drives_a_full_session() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let fixture = dir.path().join("gallery.toml");
    std::fs::write(
        &fixture,
        r#"
        [[items]]
        id = "a"
        url = "https://cdn.example.com/a.jpg"
        category = "rooms"
        tags = ["sea view"]
        views = 4

        [[items]]
        id = "b"
        type = "video"
        url = "https://cdn.example.com/b.mp4"
        thumbnail = "https://cdn.example.com/b.jpg"
        category = "rooms"

        [[categories]]
        name = "rooms"
        cover_image = "https://cdn.example.com/a.jpg"
        count = 2
        "#,
    )
    .unwrap();

    let service = InMemoryGalleryService::from_fixture_path(&fixture).unwrap();
    let (mut section, _events) = section_with(&service);
    section.load().await.unwrap();
    assert_eq!(section.categories().len(), 1);
    assert_eq!(
        section.categories()[0].cover_image.as_deref(),
        Some("https://cdn.example.com/a.jpg")
    );

    let mut viewer = section.open_viewer(0).unwrap();
    while viewer.next() {}
    let summary = viewer.close().unwrap();
    assert_eq!((summary.viewed, summary.total), (2, 2));
}

#[test]
fn settings_round_trip_through_toml() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Config::default();
    settings.prefetch.radius = 4;
    settings.gesture.clamp_pan = false;
    settings.retry.max_attempts = 5;
    config::save_to_path(&settings, &path).expect("Failed to write config");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, settings);
}
