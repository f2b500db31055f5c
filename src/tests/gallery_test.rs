use actix_web::http::{header, StatusCode};
use actix_web::test;

use super::{png_bytes, test_env, MultipartBody};

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

fn card_count(html: &str) -> usize {
    html.matches("class=\"card ").count()
}

#[actix_web::test]
async fn test_initial_page_shows_intro_and_cards() {
    let env = test_env().await;
    env.seed(4).await;
    let app = init_app!(env);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("explore-button"));
    assert_eq!(card_count(&html), 4);
    assert!(!html.contains("next-button"));
}

#[actix_web::test]
async fn test_last_page_of_twenty() {
    let env = test_env().await;
    env.seed(20).await;
    let app = init_app!(env);

    let req = test::TestRequest::get()
        .uri("/?view=listing&page=3")
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();

    assert_eq!(card_count(&html), 2);
    assert!(html.contains("Destination 19"));
    assert!(html.contains("Destination 20"));
    assert!(html.contains("prev-button"));
    assert!(!html.contains("next-button"));

    let req = test::TestRequest::get().uri("/?view=listing").to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert_eq!(card_count(&html), 9);
    assert!(!html.contains("prev-button"));
    assert!(html.contains("next-button"));
}

#[actix_web::test]
async fn test_detail_uses_smallest_title_for_long_name() {
    let env = test_env().await;
    let app = init_app!(env);

    let body = MultipartBody::new()
        .text("name", "Plitvice Lakes Natl. Park")
        .text("location", "Croatia")
        .text("description", "Terraced lakes")
        .file("backgroundImage", "lakes.png", &png_bytes(70));
    let req = test::TestRequest::post()
        .uri("/destinations")
        .insert_header((header::CONTENT_TYPE, MultipartBody::content_type()))
        .set_payload(body.finish())
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/?view=detail&id={id}"))
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();

    assert!(html.contains("destination-name text-6xl"));
    assert!(html.contains("<body class=\"bg-cover bg-center\" style=\"background-image: url('/uploads/"));
    assert!(html.contains(&format!("data-id=\"{id}\"")));
}

#[actix_web::test]
async fn test_gallery_submit_redirects_to_listing() {
    let env = test_env().await;
    let app = init_app!(env);

    let body = MultipartBody::new()
        .text("name", "Banff")
        .text("location", "Canada")
        .text("description", "Turquoise lakes");
    let req = test::TestRequest::post()
        .uri("/gallery/destinations?view=listing&modal=add")
        .insert_header((header::CONTENT_TYPE, MultipartBody::content_type()))
        .set_payload(body.finish())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.starts_with("/?view=listing"));
    assert!(target.contains("notice="));
    assert!(!target.contains("modal="));
    assert_eq!(env.service.list().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_gallery_submit_failure_keeps_modal() {
    let env = test_env().await;
    let app = init_app!(env);

    let body = MultipartBody::new().text("name", "Banff");
    let req = test::TestRequest::post()
        .uri("/gallery/destinations?view=listing&modal=add")
        .insert_header((header::CONTENT_TYPE, MultipartBody::content_type()))
        .set_payload(body.finish())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.contains("modal=add"));
    assert!(target.contains("error="));
    assert!(env.service.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_gallery_update_and_delete() {
    let env = test_env().await;
    let ids = env.seed(2).await;
    let app = init_app!(env);
    let id = ids[0];

    let body = MultipartBody::new().text("description", "Edited from the modal");
    let req = test::TestRequest::post()
        .uri(&format!("/gallery/destinations/{id}?view=detail&id={id}&modal=edit"))
        .insert_header((header::CONTENT_TYPE, MultipartBody::content_type()))
        .set_payload(body.finish())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        env.service.get(id).await.unwrap().description,
        "Edited from the modal"
    );

    let req = test::TestRequest::post()
        .uri(&format!("/gallery/destinations/{id}/delete?view=detail&id={id}&modal=edit"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/?view=listing"));

    let remaining: Vec<i64> = env
        .service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(remaining, vec![ids[1]]);
}

#[actix_web::test]
async fn test_explore_picks_a_destination() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/explore").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?view=listing");

    let ids = env.seed(3).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/explore").to_request()).await;
    let target = location(&resp);
    assert!(target.starts_with("/?view=detail&id="));
    let picked: i64 = target.rsplit('=').next().unwrap().parse().unwrap();
    assert!(ids.contains(&picked));
}
