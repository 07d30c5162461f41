use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use configs::{AppConfig, StorageConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

const CPF: &str = "52998224725";

struct TestApp {
    base_url: String,
    data_file: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(dir) = self.data_file.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

/// Serve the app on an ephemeral port over an isolated record file.
async fn start_server() -> anyhow::Result<TestApp> {
    let data_file = PathBuf::from(format!("target/test-data/{}/funcionarios.txt", Uuid::new_v4()));
    let cfg = AppConfig {
        storage: StorageConfig { data_file: data_file.clone() },
        ..AppConfig::default()
    };
    let app: Router = server::build_app(&cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

fn payload(cpf: &str) -> Value {
    json!({
        "name": "Ana Souza",
        "cpf": cpf,
        "workCard": "1234567",
        "nationalId": "MG1234567",
        "role": "Analyst",
        "department": "Finance",
        "room": "3A",
        "phone": "1111",
        "address": {
            "uf": "MG",
            "city": "Belo Horizonte",
            "neighborhood": "Centro",
            "number": "100",
            "postalCode": "30110-000"
        }
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/employees", app.base_url);

    // empty roster without a file
    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    // create with formatted identifier
    let res = c.post(&url).json(&payload("529.982.247-25")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.headers()["location"], format!("/api/employees/{CPF}").as_str());
    let created = res.json::<Value>().await?;
    assert_eq!(created["cpf"], CPF);

    // get returns the same record
    let res = c.get(format!("{url}/{CPF}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // duplicate
    let res = c.post(&url).json(&payload(CPF)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // partial update: null phone kept, room replaced
    let res = c
        .put(format!("{url}/{CPF}"))
        .json(&json!({"phone": null, "room": "5B", "address": {"city": "Contagem"}}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["phone"], "1111");
    assert_eq!(updated["room"], "5B");
    assert_eq!(updated["address"]["city"], "Contagem");
    assert_eq!(updated["address"]["uf"], "MG");

    // file holds one 13-field line
    let content = tokio::fs::read_to_string(&app.data_file).await?;
    assert_eq!(content.lines().count(), 1);
    assert_eq!(content.trim_end().split('|').count(), 13);

    // delete returns the removed record, then 404
    let res = c.delete(format!("{url}/{CPF}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["room"], "5B");
    let res = c.get(format!("{url}/{CPF}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 404);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_identifier_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/employees", app.base_url);

    for res in [
        c.get(format!("{url}/11111111111")).send().await?,
        c.put(format!("{url}/123")).json(&json!({})).send().await?,
        c.put(format!("{url}/123"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await?,
        c.delete(format!("{url}/52998224726")).send().await?,
        c.post(&url).json(&payload("52998224726")).send().await?,
    ] {
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<Value>().await?["error"], "Invalid Identifier");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_payload_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/employees", app.base_url);

    let res = c
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid Input");

    let res = c.post(&url).json(&json!({"name": "No Address", "cpf": CPF})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let mut bad = payload(CPF);
    bad["phone"] = json!("11|11");
    let res = c.post(&url).json(&bad).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid Input");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_line_in_file_is_skipped() -> anyhow::Result<()> {
    let app = start_server().await?;
    let good = "Ana|52998224725|1|2|Dev|IT|1A|5555|SP|Campinas|Cambui|7|13025-000";
    tokio::fs::create_dir_all(app.data_file.parent().unwrap()).await?;
    let mut content = format!("{good}\nbroken|line|with|five|fields\n").into_bytes();
    content.extend_from_slice(b"Jo\xe3o|11144477735|1|2|Dev|IT|1A|5555|SP|S\xe3o Paulo|Centro|7|01000-000\n");
    tokio::fs::write(&app.data_file, content).await?;

    let res = reqwest::get(format!("{}/api/employees", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Ana");

    let res = reqwest::get(format!("{}/api/employees/{CPF}", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api-docs/openapi.json", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/api/employees/{cpf}"].is_object());
    Ok(())
}
