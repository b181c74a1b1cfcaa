mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn label_feed_filters_and_projects() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    for body in [
        json!({ "codigoProducto": "P1", "descripcion": "Widget", "precioBase": 9.99, "idEtiqueta": "E-1", "stock": 3 }),
        json!({ "codigoProducto": "P2", "descripcion": "Gadget", "precioBase": 5 }),
        json!({ "codigoProducto": "P3", "descripcion": "Gizmo", "precioBase": 2.5, "idEtiqueta": null }),
    ] {
        let (status, created) = server.create_product(body).await?;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);
    }

    let res = server.client.get(server.url("/api/etiquetas")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let labels = res.json::<Value>().await?;
    assert_eq!(
        labels,
        json!([{
            "codigoProducto": "P1",
            "descripcion": "Widget",
            "idEtiqueta": "E-1",
            "precioBase": 9.99
        }])
    );
    Ok(())
}

#[tokio::test]
async fn assigning_and_clearing_a_label_changes_visibility() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server
        .create_product(json!({ "codigoProducto": "P2", "descripcion": "Gadget", "precioBase": 5 }))
        .await?;

    let labels = |server: &common::TestServer| {
        let request = server.client.get(server.url("/api/etiquetas"));
        async move { anyhow::Ok(request.send().await?.json::<Vec<Value>>().await?) }
    };

    assert!(labels(&server).await?.is_empty());

    let res = server
        .admin(Method::PUT, "/admin/productos/P2")
        .json(&json!({ "idEtiqueta": "E-9" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let visible = labels(&server).await?;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["idEtiqueta"], json!("E-9"));
    assert!(visible[0].get("_id").is_none());

    let res = server
        .admin(Method::PUT, "/admin/productos/P2")
        .json(&json!({ "idEtiqueta": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(labels(&server).await?.is_empty());
    Ok(())
}
