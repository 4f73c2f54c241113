mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn missing_title_yields_400() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Presence validation runs before any storage access
    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(common::auth_token(common::unique_user_id(0)))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body.get("code").and_then(|v| v.as_str()), Some("BAD_REQUEST"));
    Ok(())
}

#[tokio::test]
async fn create_update_delete_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping create_update_delete_round_trip: database unavailable");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let user_id = common::unique_user_id(1);
    let token = common::auth_token(user_id);

    // Create
    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy milk" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let task = res.json::<Value>().await?;
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["completed"], false);
    assert_eq!(task["user_id"].as_i64(), Some(user_id));
    let id = task["id"].as_i64().expect("created task has an id");

    // Immediate list includes it as the first element
    let res = client
        .get(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let tasks = res.json::<Value>().await?;
    let tasks = tasks.as_array().expect("list returns an array");
    assert_eq!(tasks[0]["id"].as_i64(), Some(id));

    // Update flips completed
    let res = client
        .put(format!("{}/api/tasks/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy milk", "completed": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["id"].as_i64(), Some(id));
    assert_eq!(updated["completed"], true);

    // Delete
    let res = client
        .delete(format!("{}/api/tasks/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Subsequent list no longer includes it
    let res = client
        .get(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let tasks = res.json::<Value>().await?;
    let tasks = tasks.as_array().expect("list returns an array");
    assert!(
        tasks.iter().all(|t| t["id"].as_i64() != Some(id)),
        "deleted task still listed: {:?}",
        tasks
    );

    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_owner_and_completed() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping create_ignores_client_supplied_owner_and_completed: database unavailable");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let user_id = common::unique_user_id(2);

    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(common::auth_token(user_id))
        .json(&json!({
            "title": "Sneaky",
            "completed": true,
            "user_id": 999,
            "id": 123456789
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let task = res.json::<Value>().await?;
    assert_eq!(task["completed"], false);
    assert_eq!(task["user_id"].as_i64(), Some(user_id));
    assert_ne!(task["id"].as_i64(), Some(123456789));

    Ok(())
}

#[tokio::test]
async fn listing_is_scoped_to_caller_and_newest_first() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping listing_is_scoped_to_caller_and_newest_first: database unavailable");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let token_a = common::auth_token(common::unique_user_id(3));
    let token_b = common::auth_token(common::unique_user_id(4));

    let mut ids_a = Vec::new();
    for title in ["first", "second"] {
        let res = client
            .post(format!("{}/api/tasks", server.base_url))
            .bearer_auth(&token_a)
            .json(&json!({ "title": title }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        ids_a.push(res.json::<Value>().await?["id"].as_i64().unwrap());
    }

    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token_b)
        .json(&json!({ "title": "other owner" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // A sees exactly its own two tasks, newest first
    let res = client
        .get(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token_a)
        .send()
        .await?;
    let tasks = res.json::<Value>().await?;
    let tasks = tasks.as_array().expect("list returns an array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"].as_i64(), Some(ids_a[1]));
    assert_eq!(tasks[1]["id"].as_i64(), Some(ids_a[0]));
    assert_eq!(tasks[0]["title"], "second");

    Ok(())
}

#[tokio::test]
async fn cross_owner_update_and_delete_yield_404() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping cross_owner_update_and_delete_yield_404: database unavailable");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let token_owner = common::auth_token(common::unique_user_id(5));
    let token_other = common::auth_token(common::unique_user_id(6));

    let res = client
        .post(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token_owner)
        .json(&json!({ "title": "mine" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["id"].as_i64().unwrap();

    // Another subject cannot update or delete it, and cannot tell it exists
    let res = client
        .put(format!("{}/api/tasks/{}", server.base_url, id))
        .bearer_auth(&token_other)
        .json(&json!({ "title": "stolen", "completed": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/tasks/{}", server.base_url, id))
        .bearer_auth(&token_other)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The owner still sees it untouched
    let res = client
        .get(format!("{}/api/tasks", server.base_url))
        .bearer_auth(&token_owner)
        .send()
        .await?;
    let tasks = res.json::<Value>().await?;
    let tasks = tasks.as_array().expect("list returns an array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "mine");
    assert_eq!(tasks[0]["completed"], false);

    // Updating or deleting an id that never existed is the same 404
    let res = client
        .delete(format!("{}/api/tasks/999999999", server.base_url))
        .bearer_auth(&token_other)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
