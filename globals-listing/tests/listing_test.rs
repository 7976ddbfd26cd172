//! Integration tests for the globals listing

use globals_api::{GlobalSet, Site, ViewRows};
use globals_listing::{
    is_visible, EditTargetResolver, GlobalsIndex, Listing, ListingPresets,
    MemoryGlobalSetRepository, PermissionSet, SiteRegistry,
};

fn index(globals: Vec<GlobalSet>) -> GlobalsIndex {
    let repository = MemoryGlobalSetRepository::with_globals(globals).expect("unique handles");
    GlobalsIndex::new(repository, &ListingPresets::testing()).expect("valid config")
}

fn en_fr(selected: &str) -> SiteRegistry {
    SiteRegistry::new(vec![
        Site::new("en")
            .with_name("English")
            .with_locale("en")
            .with_url("http://localhost/"),
        Site::new("fr")
            .with_name("French")
            .with_locale("fr")
            .with_url("http://localhost/fr/"),
    ])
    .expect("valid sites")
    .with_selected(selected)
    .expect("known site")
}

fn entries(rows: &ViewRows) -> Vec<(&str, &str)> {
    rows.iter()
        .map(|row| (row.handle.as_str(), row.edit_url.as_str()))
        .collect()
}

#[test]
fn test_lists_globals() {
    let user = PermissionSet::from_tokens([
        "access cp",
        "edit test_one globals",
        "edit test_three globals",
    ]);
    let index = index(vec![
        GlobalSet::new("test_one", "default"),
        GlobalSet::new("test_two", "default"),
        GlobalSet::new("test_three", "default"),
    ]);

    let rows = index
        .list(&user, &SiteRegistry::single("default"))
        .expect("listing");

    assert_eq!(
        entries(&rows),
        vec![
            ("test_one", "http://localhost/cp/globals/test_one"),
            ("test_three", "http://localhost/cp/globals/test_three"),
        ]
    );
}

#[test]
fn test_uses_configure_url_when_missing_in_selected_site_with_permission() {
    let user = PermissionSet::from_tokens([
        "access cp",
        "access en site",
        "access fr site",
        "configure globals",
    ]);
    let index = index(vec![
        GlobalSet::new("test_one", "en").with_localization("fr"),
        GlobalSet::new("test_two", "en"),
    ]);

    let rows = index.list(&user, &en_fr("fr")).expect("listing");

    assert_eq!(
        entries(&rows),
        vec![
            ("test_one", "http://localhost/cp/globals/test_one?site=fr"),
            ("test_two", "http://localhost/cp/globals/test_two/edit"),
        ]
    );
}

#[test]
fn test_filters_out_globals_missing_in_selected_site_without_configure() {
    let user = PermissionSet::from_tokens([
        "access cp",
        "access en site",
        "access fr site",
        "edit test_one globals",
        "edit test_three globals",
    ]);
    let index = index(vec![
        GlobalSet::new("test_one", "en").with_localization("fr"),
        GlobalSet::new("test_two", "en"),
        GlobalSet::new("test_three", "en"),
    ]);

    let rows = index.list(&user, &en_fr("fr")).expect("listing");

    assert_eq!(rows.len(), 1);
    assert_eq!(
        entries(&rows),
        vec![("test_one", "http://localhost/cp/globals/test_one?site=fr")]
    );
}

#[test]
fn test_filters_out_globals_in_sites_without_access() {
    let user = PermissionSet::from_tokens(["access cp", "edit fr globals", "access fr site"]);
    let index = index(vec![GlobalSet::new("en", "en"), GlobalSet::new("fr", "fr")]);

    let rows = index.list(&user, &en_fr("fr")).expect("listing");

    assert_eq!(rows.len(), 1);
    let sorted = rows.sorted_by_handle();
    assert_eq!(
        entries(&sorted),
        vec![("fr", "http://localhost/cp/globals/fr?site=fr")]
    );
}

#[test]
fn test_default_site_urls_are_unqualified() {
    let user = PermissionSet::from_tokens(["edit test_one globals", "access en site"]);
    let index = index(vec![GlobalSet::new("test_one", "en").with_localization("fr")]);

    let rows = index.list(&user, &en_fr("en")).expect("listing");
    assert_eq!(
        entries(&rows),
        vec![("test_one", "http://localhost/cp/globals/test_one")]
    );
}

#[test]
fn test_no_site_access_hides_everything_without_configure() {
    let user = PermissionSet::from_tokens([
        "access cp",
        "access en site",
        "edit test_one globals",
        "edit test_two globals",
    ]);
    let index = index(vec![
        GlobalSet::new("test_one", "en").with_localization("fr"),
        GlobalSet::new("test_two", "fr"),
    ]);

    let rows = index.list(&user, &en_fr("fr")).expect("listing");
    assert!(rows.is_empty());
}

#[test]
fn test_configure_sees_everything_without_site_access() {
    let user = PermissionSet::from_tokens(["configure globals"]);
    let index = index(vec![
        GlobalSet::new("test_one", "en"),
        GlobalSet::new("test_two", "fr"),
    ]);

    let rows = index.list(&user, &en_fr("fr")).expect("listing");
    assert_eq!(
        entries(&rows),
        vec![
            ("test_one", "http://localhost/cp/globals/test_one/edit"),
            ("test_two", "http://localhost/cp/globals/test_two?site=fr"),
        ]
    );
}

#[test]
fn test_filter_and_projection_agree() {
    let globals = vec![
        GlobalSet::new("a", "en"),
        GlobalSet::new("b", "en").with_localization("fr"),
        GlobalSet::new("c", "fr"),
    ];
    let users = [
        PermissionSet::new(),
        PermissionSet::from_tokens(["configure globals"]),
        PermissionSet::from_tokens(["edit a globals", "edit b globals", "access fr site"]),
        PermissionSet::from_tokens(["edit c globals", "access en site"]),
        PermissionSet::from_tokens([
            "edit a globals",
            "edit c globals",
            "access en site",
            "access fr site",
        ]),
    ];
    let resolver = EditTargetResolver::from_config(&ListingPresets::testing()).expect("valid config");

    for user in &users {
        for selected in ["en", "fr"] {
            let selection = en_fr(selected).selection();
            let listing = Listing::new(&globals, user, selection.clone(), &resolver);
            let rows = listing.collect();

            let expected: Vec<&str> = globals
                .iter()
                .filter(|set| is_visible(set, user, &selection))
                .map(|set| set.handle().as_str())
                .collect();
            let actual: Vec<&str> = rows.iter().map(|row| row.handle.as_str()).collect();
            assert_eq!(actual, expected, "user {:?} site {}", user, selected);

            // Idempotent
            assert_eq!(listing.collect(), rows);
        }
    }
}

#[test]
fn test_view_data_contract() {
    let user = PermissionSet::from_tokens(["configure globals"]);
    let rows = index(vec![GlobalSet::new("seo", "en")])
        .list(&user, &en_fr("en"))
        .expect("listing");

    let json = serde_json::to_value(&rows).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([{"handle": "seo", "edit_url": "http://localhost/cp/globals/seo"}])
    );
}
