mod common;

use cafes::forms::NAME_TAKEN;
use common::{draft, form_fields, test_app};
use axum::http::StatusCode;

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let (app, _store) = test_app().await;
    app.get("/")
        .send()
        .await
        .assert_ok()
        .assert_html_contains("No cafes yet.")
        .assert_html_contains("Cafe &amp; Wifi");
}

#[tokio::test]
async fn list_shows_every_cafe_with_links() {
    let (app, store) = test_app().await;
    let a = store.create(&draft("Prufrock")).await.unwrap();
    let b = store.create(&draft("Lantana")).await.unwrap();

    app.get("/")
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Prufrock")
        .assert_html_contains("Lantana")
        .assert_html_contains(&format!("/show_cafe/{}", a.id))
        .assert_html_contains(&format!("/edit-cafe/{}", b.id))
        .assert_html_contains(&format!("/delete/{}", b.id))
        .assert_not_contains("No cafes yet.");
}

#[tokio::test]
async fn show_renders_details() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Ozone")).await.unwrap();

    app.get(&format!("/show_cafe/{}", cafe.id))
        .send()
        .await
        .assert_ok()
        .assert_html_contains("<h1>Ozone</h1>")
        .assert_html_contains("Shoreditch")
        .assert_html_contains("£2.50");
}

#[tokio::test]
async fn show_unknown_or_malformed_id_is_404() {
    let (app, _store) = test_app().await;
    app.get("/show_cafe/42")
        .send()
        .await
        .assert_not_found()
        .assert_html_contains("No cafe with id 42");
    app.get("/show_cafe/abc").send().await.assert_not_found();
}

#[tokio::test]
async fn new_form_is_blank() {
    let (app, _store) = test_app().await;
    app.get("/new-cafe")
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Add a new cafe")
        .assert_html_contains("Cafe Name")
        .assert_html_contains("Approximated price in £")
        .assert_html_contains(r#"action="/new-cafe""#)
        .assert_html_contains("Submit Post")
        .assert_not_contains("Please correct the errors below.");
}

#[tokio::test]
async fn valid_submission_creates_and_redirects() {
    let (app, store) = test_app().await;

    app.post("/new-cafe")
        .form(&form_fields("Prufrock"))
        .send()
        .await
        .assert_redirect_to("/show_cafe/1");

    let cafe = store.get(1).await.unwrap();
    assert!(cafe.matches(&draft("Prufrock")));

    app.get("/show_cafe/1")
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Prufrock");
}

#[tokio::test]
async fn unchecked_boxes_are_false() {
    let (app, store) = test_app().await;
    app.post("/new-cafe")
        .form(&form_fields("Plain"))
        .send()
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let cafe = store.get(1).await.unwrap();
    assert!(cafe.has_toilet && cafe.has_wifi);
    assert!(!cafe.has_sockets && !cafe.can_take_calls);
}

#[tokio::test]
async fn missing_name_rerenders_with_error() {
    let (app, store) = test_app().await;
    let mut fields = form_fields("");
    fields.retain(|(k, _)| *k != "name");

    app.post("/new-cafe")
        .form(&fields)
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Please correct the errors below.")
        .assert_html_contains("This field is required.")
        .assert_html_contains(r#"value="Shoreditch""#);

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn blank_name_never_creates() {
    let (app, store) = test_app().await;
    for blank in ["", "   "] {
        app.submit("/new-cafe", &form_fields(blank))
            .await
            .assert_ok()
            .assert_html_contains("This field is required.");
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn bad_image_url_is_rejected() {
    let (app, store) = test_app().await;
    let fields: Vec<_> = form_fields("Bad Image")
        .into_iter()
        .map(|(k, v)| if k == "img_url" { (k, "not-a-url") } else { (k, v) })
        .collect();

    app.post("/new-cafe")
        .form(&fields)
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Invalid URL.");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_name_is_a_field_error() {
    let (app, store) = test_app().await;
    store.create(&draft("Monmouth")).await.unwrap();

    app.post("/new-cafe")
        .form(&form_fields("Monmouth"))
        .send()
        .await
        .assert_ok()
        .assert_html_contains(NAME_TAKEN);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Lantana")).await.unwrap();

    app.get(&format!("/edit-cafe/{}", cafe.id))
        .send()
        .await
        .assert_ok()
        .assert_html_contains("Edit cafe")
        .assert_html_contains(r#"value="Lantana""#)
        .assert_html_contains(r#"value="20-30""#)
        .assert_html_contains(r#"name="has_wifi" value="y" checked"#)
        .assert_not_contains(r#"name="has_sockets" value="y" checked"#)
        .assert_html_contains(&format!(r#"action="/edit-cafe/{}""#, cafe.id));
}

#[tokio::test]
async fn edit_updates_and_redirects() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Lantana")).await.unwrap();

    let fields: Vec<_> = form_fields("Lantana")
        .into_iter()
        .map(|(k, v)| if k == "seats" { (k, "50+") } else { (k, v) })
        .chain([("has_sockets", "y")])
        .collect();

    app.post(&format!("/edit-cafe/{}", cafe.id))
        .form(&fields)
        .send()
        .await
        .assert_redirect_to(&format!("/show_cafe/{}", cafe.id));

    let updated = store.get(cafe.id).await.unwrap();
    assert_eq!(updated.seats, "50+");
    assert!(updated.has_sockets);
    assert_eq!(updated.name, "Lantana");
}

#[tokio::test]
async fn invalid_edit_leaves_row_untouched() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Lantana")).await.unwrap();

    let fields: Vec<_> = form_fields("Lantana")
        .into_iter()
        .map(|(k, v)| if k == "seats" { (k, "") } else { (k, v) })
        .collect();

    app.post(&format!("/edit-cafe/{}", cafe.id))
        .form(&fields)
        .send()
        .await
        .assert_ok()
        .assert_html_contains("This field is required.");
    assert_eq!(store.get(cafe.id).await.unwrap(), cafe);
}

#[tokio::test]
async fn blank_name_never_edits() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Lantana")).await.unwrap();

    let fields: Vec<_> = form_fields("")
        .into_iter()
        .map(|(k, v)| if k == "seats" { (k, "50+") } else { (k, v) })
        .collect();
    app.submit(&format!("/edit-cafe/{}", cafe.id), &fields)
        .await
        .assert_ok()
        .assert_html_contains("This field is required.");

    assert_eq!(store.get(cafe.id).await.unwrap(), cafe);
}

#[tokio::test]
async fn surrounding_spaces_do_not_make_a_new_name() {
    let (app, store) = test_app().await;
    store.create(&draft("Monmouth")).await.unwrap();

    app.submit("/new-cafe", &form_fields("  Monmouth "))
        .await
        .assert_ok()
        .assert_html_contains(NAME_TAKEN);
    assert_eq!(store.count().await.unwrap(), 1);

    app.submit("/new-cafe", &form_fields(" Workshop  "))
        .await
        .assert_status(StatusCode::SEE_OTHER);
    let names: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Monmouth", "Workshop"]);
}

#[tokio::test]
async fn renaming_onto_another_cafe_is_a_field_error() {
    let (app, store) = test_app().await;
    store.create(&draft("Monmouth")).await.unwrap();
    let other = store.create(&draft("Workshop")).await.unwrap();

    app.post(&format!("/edit-cafe/{}", other.id))
        .form(&form_fields("Monmouth"))
        .send()
        .await
        .assert_ok()
        .assert_html_contains(NAME_TAKEN);
    assert_eq!(store.get(other.id).await.unwrap().name, "Workshop");
}

#[tokio::test]
async fn edit_unknown_id_is_404() {
    let (app, _store) = test_app().await;
    app.get("/edit-cafe/7").send().await.assert_not_found();
    app.post("/edit-cafe/7")
        .form(&form_fields("Nowhere"))
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn delete_redirects_home_then_404s() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Ozone")).await.unwrap();
    let path = format!("/delete/{}", cafe.id);

    app.get(&path).send().await.assert_redirect_to("/");
    assert_eq!(store.count().await.unwrap(), 0);
    app.get(&format!("/show_cafe/{}", cafe.id))
        .send()
        .await
        .assert_not_found();

    app.get(&path).send().await.assert_not_found();
}

#[tokio::test]
async fn delete_accepts_post() {
    let (app, store) = test_app().await;
    let cafe = store.create(&draft("Kaffeine")).await.unwrap();
    app.post(&format!("/delete/{}", cafe.id))
        .send()
        .await
        .assert_redirect_to("/");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let (app, _store) = test_app().await;
    app.post("/new-cafe")
        .form(&form_fields("First"))
        .send()
        .await
        .assert_redirect_to("/show_cafe/1");
    app.get("/delete/1").send().await.assert_redirect_to("/");
    app.post("/new-cafe")
        .form(&form_fields("Second"))
        .send()
        .await
        .assert_redirect_to("/show_cafe/2");
}
