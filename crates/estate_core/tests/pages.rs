use estate_core::db::open_db_in_memory;
use estate_core::notice::{FAILED_TO_LOAD_PROPERTY, PROPERTY_NOT_FOUND};
use estate_core::view::page::{delete_prompt, submit_create, submit_delete, submit_edit};
use estate_core::{
    load_page, Notice, NoticeKind, Page, PropertyDraft, PropertyForm, PropertyRepository,
    PropertyService, Route, SqlitePropertyRepository,
};
use uuid::Uuid;

fn form(name: &str, lat: &str, lng: &str, price: &str) -> PropertyForm {
    PropertyForm {
        name: name.to_string(),
        lat: lat.to_string(),
        lng: lng.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn root_redirects_to_unfocused_map() {
    let conn = open_db_in_memory().unwrap();
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));
    service.seed_sample_data().unwrap();

    let page = load_page(&service, Route::parse("/").unwrap()).unwrap();
    match page {
        Page::Map { properties, focus } => {
            assert_eq!(properties.len(), 3);
            assert_eq!(focus, None);
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn create_flow_navigates_to_detail_of_new_property() {
    let conn = open_db_in_memory().unwrap();
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));

    let villa = form(" Sunset Villa ", "37.75", "-122.5", "2500000");
    let next = submit_create(&service, &villa).unwrap();
    let Route::PropertyDetail(id) = next else {
        panic!("unexpected route: {next:?}");
    };

    match load_page(&service, next).unwrap() {
        Page::Detail { property } => {
            assert_eq!(property.id, id);
            assert_eq!(property.name, "Sunset Villa");
            assert_eq!(property.price, 2_500_000.0);
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn invalid_form_raises_alert_and_stores_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));

    let notice = submit_create(&service, &form("Villa", "abc", "1", "1")).unwrap_err();
    assert_eq!(
        notice,
        Notice::alert("Please enter valid numbers for coordinates and price")
    );

    let notice = submit_create(&service, &form("", "1", "1", "1")).unwrap_err();
    assert_eq!(notice, Notice::alert("Please enter a property name"));

    assert!(service.list().unwrap().is_empty());
}

#[test]
fn edit_page_prefills_form_and_submit_updates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);
    let created = repo
        .create(&PropertyDraft::new("Loft", 37.7, -122.4, 500_000.0))
        .unwrap();
    let service = PropertyService::new(repo);

    let Page::Edit { form: mut edit, .. } =
        load_page(&service, Route::EditProperty(created.id)).unwrap()
    else {
        panic!("expected edit page");
    };
    assert_eq!(edit.name, "Loft");

    edit.price = "525000".to_string();
    let next = submit_edit(&service, created.id, &edit).unwrap();
    assert_eq!(next, Route::PropertyDetail(created.id));
    assert_eq!(service.get(created.id).unwrap().unwrap().price, 525_000.0);
}

#[test]
fn missing_property_surfaces_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));
    let missing = Uuid::new_v4();

    let notice = load_page(&service, Route::PropertyDetail(missing)).unwrap_err();
    assert_eq!(notice.kind, NoticeKind::Panel);
    assert_eq!(notice.message, PROPERTY_NOT_FOUND);

    let notice = submit_edit(&service, missing, &form("Ghost", "1", "2", "3")).unwrap_err();
    assert_eq!(notice, Notice::alert(PROPERTY_NOT_FOUND));

    let notice = submit_delete(&service, missing).unwrap_err();
    assert_eq!(notice, Notice::alert(PROPERTY_NOT_FOUND));
}

#[test]
fn storage_failure_surfaces_failed_to_load() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("DROP TABLE properties;", []).unwrap();
    let service = PropertyService::new(SqlitePropertyRepository::new(&conn));

    let notice = load_page(&service, Route::PropertyDetail(Uuid::new_v4())).unwrap_err();
    assert_eq!(notice, Notice::panel(FAILED_TO_LOAD_PROPERTY));

    let notice = load_page(&service, Route::PropertyList).unwrap_err();
    assert_eq!(notice, Notice::panel("Error loading properties"));
}

#[test]
fn delete_flow_confirms_and_returns_to_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePropertyRepository::new(&conn);
    let created = repo
        .create(&PropertyDraft::new("Cabin", 39.0, -120.0, 300_000.0))
        .unwrap();
    let service = PropertyService::new(repo);

    assert_eq!(
        delete_prompt(&created),
        "Are you sure you want to delete \"Cabin\"?"
    );
    assert_eq!(submit_delete(&service, created.id).unwrap(), Route::PropertyList);

    match load_page(&service, Route::PropertyList).unwrap() {
        Page::List { properties } => assert!(properties.is_empty()),
        other => panic!("unexpected page: {other:?}"),
    }
}
