// tests/directory_view.rs
//
// DirectoryView: debounce, page anchoring, snapshot adoption, view state.
//
use std::sync::Arc;
use std::time::{Duration, Instant};

use property_directory::config::options::QueryOptions;
use property_directory::query::{Filters, SortOrder};
use property_directory::view::{DirectoryView, ViewState};
use property_directory::{PropertyRecord, Snapshot, SnapshotStore, Status};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn records(n: usize) -> Vec<PropertyRecord> {
    (0..n)
        .map(|i| {
            let mut r = PropertyRecord::new(format!("Venue {i:02}"));
            r.id = i;
            r.city = if i % 2 == 0 { "Goa".into() } else { "Pune".into() };
            r.rooms = i as u32;
            r
        })
        .collect()
}

fn view_with(n: usize) -> DirectoryView {
    let mut v = DirectoryView::new(QueryOptions::default());
    v.set_snapshot(Arc::new(Snapshot::new(1, records(n))));
    v
}

#[test]
fn typing_quickly_recomputes_once_with_last_value() {
    let mut v = DirectoryView::new(QueryOptions::default());
    let mut data = records(3);
    data[0].name = "abc lodge".into();
    data[1].name = "abx camp".into();
    v.set_snapshot(Arc::new(Snapshot::new(1, data)));
    let before = v.recompute_count();

    let t0 = Instant::now();
    v.set_search("a", t0);
    assert!(!v.tick(t0 + ms(100)));
    v.set_search("ab", t0 + ms(100));
    v.set_search("abc", t0 + ms(250));

    // 150 ms after the last keystroke: still waiting.
    assert!(!v.tick(t0 + ms(400)));
    assert_eq!(v.recompute_count(), before);

    assert!(v.tick(t0 + ms(550)));
    assert_eq!(v.recompute_count(), before + 1);
    assert_eq!(v.filters().search, "abc");
    assert_eq!(v.len(), 1);

    assert!(!v.tick(t0 + ms(5_000)));
    assert_eq!(v.recompute_count(), before + 1);
}

#[test]
fn raw_search_does_not_filter_until_settled() {
    let mut v = view_with(5);
    let t0 = Instant::now();
    v.set_search("zzz", t0);
    assert_eq!(v.raw_search(), "zzz");
    assert_eq!(v.len(), 5);
    assert_eq!(v.next_deadline(), Some(t0 + ms(300)));
}

#[test]
fn filter_change_returns_to_first_page() {
    let mut v = view_with(20);
    assert_eq!(v.total_pages(), 3);
    assert!(v.go_to_page(3));

    v.set_room_range(0, 15);
    assert_eq!(v.current_page(), 1);
    assert_eq!(v.len(), 16);

    assert!(v.go_to_page(2));
    v.toggle_sort();
    assert_eq!(v.current_page(), 1);
    assert_eq!(v.filters().sort, SortOrder::Desc);
    assert_eq!(v.page()[0].rooms, 15);
}

#[test]
fn out_of_range_page_is_ignored() {
    let mut v = view_with(20);
    assert!(!v.go_to_page(0));
    assert!(!v.go_to_page(4));
    assert_eq!(v.current_page(), 1);
    assert_eq!(v.page().len(), 9);
}

#[test]
fn refresh_keeps_page_when_it_still_exists() {
    let mut v = view_with(20);
    assert!(v.go_to_page(2));

    assert!(v.set_snapshot(Arc::new(Snapshot::new(2, records(19)))));
    assert_eq!(v.current_page(), 2);

    assert!(v.set_snapshot(Arc::new(Snapshot::new(3, records(4)))));
    assert_eq!(v.current_page(), 1);
}

#[test]
fn city_filter_and_facets() {
    let mut v = view_with(6);
    assert_eq!(v.facets().cities, vec!["Goa", "Pune"]);

    v.set_city(Some("Pune".into()));
    assert_eq!(v.results().map(|r| r.rooms).collect::<Vec<_>>(), vec![1, 3, 5]);
    // Facets still list every city.
    assert_eq!(v.facets().cities.len(), 2);
}

#[test]
fn clear_restores_defaults() {
    let mut v = view_with(10);
    let t0 = Instant::now();
    v.set_city(Some("Goa".into()));
    v.set_room_range(2, 4);
    v.toggle_sort();
    v.set_search("pending", t0);

    v.clear();
    assert_eq!(v.filters(), &Filters::default());
    assert_eq!(v.raw_search(), "");
    assert!(v.next_deadline().is_none());
    assert_eq!(v.len(), 10);
}

#[test]
fn syncs_only_on_new_generation() {
    let store = SnapshotStore::new();
    let mut v = DirectoryView::new(QueryOptions::default());
    assert!(!v.sync(&store));

    store.publish(records(3));
    assert!(v.sync(&store));
    assert!(!v.sync(&store));
    assert_eq!(v.len(), 3);
}

#[test]
fn view_state_follows_status() {
    let mut v = DirectoryView::new(QueryOptions::default());
    assert_eq!(v.state(&Status::Uninitialized), ViewState::Loading);
    assert_eq!(v.state(&Status::Ready), ViewState::Empty);

    v.set_snapshot(Arc::new(Snapshot::new(1, records(2))));
    assert_eq!(v.state(&Status::Ready), ViewState::Results);
    assert_eq!(
        v.state(&Status::Error("Failed to load property data.".into())),
        ViewState::Error("Failed to load property data.".into())
    );

    v.set_city(Some("Nowhere".into()));
    assert_eq!(v.state(&Status::Ready), ViewState::Empty);
}
