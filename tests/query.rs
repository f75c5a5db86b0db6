// tests/query.rs
//
// Pure query engine: filters, sort, facets, pagination.
//
use property_directory::PropertyRecord;
use property_directory::query::{Facets, Filters, Paginator, SortOrder, query, select, total_pages};

fn rec(name: &str, city: &str, location: &str, rooms: u32) -> PropertyRecord {
    let mut r = PropertyRecord::new(name);
    r.city = city.into();
    r.location = location.into();
    r.rooms = rooms;
    r
}

fn names(recs: &[&PropertyRecord]) -> Vec<String> {
    recs.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn end_to_end_city_filter_ascending() {
    let data = vec![rec("A", "X", "L1", 3), rec("B", "Y", "L2", 1)];
    let filters = Filters { city: Some("X".into()), sort: SortOrder::Asc, ..Filters::default() };
    assert_eq!(names(&query(&data, &filters)), vec!["A"]);
}

#[test]
fn default_filters_keep_everything_sorted_ascending() {
    let data = vec![rec("A", "X", "L", 5), rec("B", "X", "L", 0), rec("C", "X", "L", 600)];
    assert_eq!(select(&data, &Filters::default()), vec![1, 0, 2]);
}

#[test]
fn room_range_is_inclusive() {
    let data = vec![
        rec("one", "X", "L", 1),
        rec("two", "X", "L", 2),
        rec("four", "X", "L", 4),
        rec("five", "X", "L", 5),
    ];
    let filters = Filters { min_rooms: 2, max_rooms: 4, ..Filters::default() };
    assert_eq!(names(&query(&data, &filters)), vec!["two", "four"]);
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let data = vec![rec("Palm Grove", "Goa", "Baga", 1), rec("Hill Inn", "Manali", "Old", 2)];

    let filters = Filters { search: "  GROVE ".into(), ..Filters::default() };
    assert_eq!(names(&query(&data, &filters)), vec!["Palm Grove"]);

    let blank = Filters { search: "   ".into(), ..Filters::default() };
    assert_eq!(query(&data, &blank).len(), 2);
}

#[test]
fn city_and_location_match_exactly() {
    let data = vec![
        rec("A", "Goa", "Baga", 1),
        rec("B", "goa", "Baga", 1),
        rec("C", "Goa", "Calangute", 1),
    ];
    let filters = Filters {
        city: Some("Goa".into()),
        location: Some("Baga".into()),
        ..Filters::default()
    };
    assert_eq!(names(&query(&data, &filters)), vec!["A"]);
}

#[test]
fn predicates_are_anded() {
    let data = vec![
        rec("Palm One", "Goa", "Baga", 3),
        rec("Palm Two", "Goa", "Baga", 9),
        rec("Palm Three", "Pune", "Baga", 3),
        rec("Lotus", "Goa", "Baga", 3),
    ];
    let filters = Filters {
        search: "palm".into(),
        city: Some("Goa".into()),
        max_rooms: 5,
        ..Filters::default()
    };
    assert_eq!(names(&query(&data, &filters)), vec!["Palm One"]);
}

#[test]
fn sort_is_stable_across_toggles() {
    let data = vec![
        rec("A", "X", "L", 3),
        rec("B", "X", "L", 2),
        rec("C", "X", "L", 3),
        rec("D", "X", "L", 2),
    ];
    let mut filters = Filters::default();
    let asc = names(&query(&data, &filters));
    assert_eq!(asc, vec!["B", "D", "A", "C"]);

    filters.sort = filters.sort.toggled();
    assert_eq!(names(&query(&data, &filters)), vec!["A", "C", "B", "D"]);

    filters.sort = filters.sort.toggled();
    assert_eq!(names(&query(&data, &filters)), asc);
}

/* ---------------- Facets ---------------- */

#[test]
fn facets_come_from_whole_snapshot_in_first_seen_order() {
    let data = vec![
        rec("A", "Pune", "Baner", 12),
        rec("B", "Goa", "Baga", 3),
        rec("C", "Pune", "Kothrud", 3),
        rec("D", "Goa", "Baner", 40),
    ];
    let f = Facets::from_records(&data);
    assert_eq!(f.cities, vec!["Pune", "Goa"]);
    assert_eq!(f.locations, vec!["Baner", "Baga", "Kothrud"]);
    assert_eq!(f.rooms, vec![3, 12, 40]);
    assert_eq!(f.max_rooms, 40);
}

#[test]
fn facets_of_empty_snapshot() {
    assert_eq!(Facets::from_records(&[]), Facets::default());
}

/* ---------------- Pagination ---------------- */

#[test]
fn twenty_items_make_three_pages() {
    let mut p = Paginator::new(9);
    p.reset(20);
    assert_eq!(p.total_pages(), 3);

    assert!(!p.go_to(0));
    assert_eq!(p.current(), 1);
    assert!(!p.go_to(4));
    assert_eq!(p.current(), 1);

    assert!(p.go_to(3));
    assert_eq!(p.range(), 18..20);
    assert!(!p.go_to(4));
    assert_eq!(p.current(), 3);
}

#[test]
fn next_and_prev_stop_at_edges() {
    let mut p = Paginator::new(9);
    p.reset(10);
    assert!(!p.prev());
    assert!(p.next());
    assert_eq!(p.range(), 9..10);
    assert!(!p.next());
    assert!(p.prev());
    assert_eq!(p.current(), 1);
}

#[test]
fn page_counts() {
    assert_eq!(total_pages(0, 9), 0);
    assert_eq!(total_pages(9, 9), 1);
    assert_eq!(total_pages(10, 9), 2);

    let mut p = Paginator::new(9);
    p.reset(0);
    assert_eq!(p.range(), 0..0);
    assert!(!p.go_to(1));
}

#[test]
fn resize_clamps_vanished_page() {
    let mut p = Paginator::new(9);
    p.reset(30);
    assert!(p.go_to(4));
    p.resize(25);
    assert_eq!(p.current(), 3);
    p.resize(0);
    assert_eq!(p.current(), 1);
}
