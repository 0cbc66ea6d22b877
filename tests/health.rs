use product_catalog::routes::health::{health_check, home};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");
    assert!(response.0.status);

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn home_is_a_live_placeholder() {
    let response = home().await;
    assert!(response.0.status);
    assert_eq!(response.0.data.expect("home data").status, "ok");
}
