mod common;

use common::*;
use netback_client::application_impl::*;
use netback_client::application_port::*;
use netback_client::domain_model::*;
use netback_client::infra::*;
use serde_json::json;
use uuid::Uuid;

const ID: &str = "00000000-0000-0000-0000-000000000001";

fn api(h: &Harness) -> NetbackApiImpl {
    NetbackApiImpl::new(h.client.clone())
}

fn device_json() -> serde_json::Value {
    json!({
        "id": ID,
        "hostname": "core-sw-01",
        "ipAddress": "10.0.0.1",
        "manufacturer_name": "Cisco",
        "backup_tracker": {
            "success_count": 3,
            "no_change_count": 1,
            "error_count": 0,
            "last_status": "success",
            "last_attempt_time": "2025-03-01T10:00:00Z"
        }
    })
}

#[tokio::test]
async fn test_device_calls_map_to_endpoints() {
    let h = harness(|request| match request.method {
        HttpMethod::Get if request.url.ends_with("/networkdevice/") => {
            reply(200, json!([device_json()]))
        }
        HttpMethod::Delete => reply(204, serde_json::Value::Null),
        _ => reply(200, device_json()),
    });
    h.client.set_credential(token("T1"));
    let api = api(&h);
    let id = DeviceId(Uuid::from_u128(1));

    let devices = api.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip_address, "10.0.0.1");
    assert_eq!(devices[0].backup_tracker.as_ref().unwrap().success_count, 3);

    api.get_device(id).await.unwrap();
    api.update_device(
        id,
        &DevicePatch {
            hostname: Some("core-sw-02".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    api.delete_device(id).await.unwrap();

    let sent: Vec<(HttpMethod, String)> = h
        .transport
        .requests()
        .into_iter()
        .map(|r| (r.method, r.url))
        .collect();
    let device_url = format!("{BASE_URL}/networkdevice/{ID}/");
    assert_eq!(
        sent,
        vec![
            (HttpMethod::Get, format!("{BASE_URL}/networkdevice/")),
            (HttpMethod::Get, device_url.clone()),
            (HttpMethod::Patch, device_url.clone()),
            (HttpMethod::Delete, device_url),
        ]
    );
    let patch = &h.transport.requests()[2];
    assert_eq!(patch.body, Some(json!({ "hostname": "core-sw-02" })));
    assert_eq!(patch.header("x-csrf-token"), Some(CSRF));
}

#[tokio::test]
async fn test_list_with_non_array_body_is_empty() {
    let h = harness(|_| reply(200, json!({ "detail": "maintenance" })));

    let devices = api(&h).list_devices().await.unwrap();

    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_resource_calls_go_through_refresh() {
    let h = harness(|request| {
        if request.url.ends_with(REFRESH_PATH) {
            reply(200, json!({ "access": "T2" }))
        } else if bearer(request) == Some("Bearer T2") {
            reply(200, json!({ "id": ID, "username": "ana", "role": "admin" }))
        } else {
            reply(401, json!({}))
        }
    });
    h.client.set_credential(token("T1"));

    let me = api(&h).current_user().await.unwrap();

    assert_eq!(me.username, "ana");
    assert_eq!(h.transport.count(REFRESH_PATH), 1);
    assert_eq!(h.transport.count("/users/me/"), 2);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_sending() {
    let h = harness(|_| reply(200, json!({})));
    let api = api(&h);

    let errors = vec![
        api.create_user(&UserInput::default()).await.unwrap_err(),
        api.create_device(&DeviceInput {
            hostname: "core-sw-01".into(),
            ip_address: "10.0.0.1".into(),
            model: None,
            manufacturer: ManufacturerId(Uuid::from_u128(2)),
            device_type: DeviceTypeId(Uuid::from_u128(3)),
            area: None,
            vault_credential: Some(VaultCredentialId(Uuid::from_u128(4))),
            custom_user: Some("admin".into()),
            custom_pass: None,
        })
        .await
        .unwrap_err(),
        api.create_country(&CountryInput { name: " ".into() })
            .await
            .unwrap_err(),
        api.create_site(&SiteInput {
            name: "Lisboa".into(),
            country: None,
        })
        .await
        .unwrap_err(),
        api.create_area(&AreaInput {
            name: "DC1".into(),
            site: None,
        })
        .await
        .unwrap_err(),
        api.update_backup_schedule("25:00").await.unwrap_err(),
        api.ping("").await.unwrap_err(),
    ];

    for error in errors {
        assert!(
            matches!(error, ApiError::InvalidInput(_)),
            "unexpected error: {error:?}"
        );
    }
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_device_without_vault_credential_sends_explicit_null() {
    let h = harness(|_| reply(201, device_json()));

    api(&h)
        .create_device(&DeviceInput {
            hostname: "core-sw-01".into(),
            ip_address: "10.0.0.1".into(),
            model: None,
            manufacturer: ManufacturerId(Uuid::from_u128(2)),
            device_type: DeviceTypeId(Uuid::from_u128(3)),
            area: None,
            vault_credential: None,
            custom_user: Some("admin".into()),
            custom_pass: Some("pw".into()),
        })
        .await
        .unwrap();

    let body = h.transport.requests()[0].body.clone().unwrap();
    assert_eq!(body["vaultCredential"], serde_json::Value::Null);
    assert_eq!(body["customUser"], json!("admin"));
    assert!(body.get("model").is_none());
}

#[tokio::test]
async fn test_missing_schedule_reads_as_unset() {
    let h = harness(|request| {
        if request.method == HttpMethod::Get {
            reply(404, json!({ "detail": "Not found." }))
        } else {
            reply(200, json!({ "scheduled_time": "02:30" }))
        }
    });
    let api = api(&h);

    assert_eq!(api.backup_schedule().await.unwrap().scheduled_time, None);
    let updated = api.update_backup_schedule("02:30").await.unwrap();

    assert_eq!(updated.scheduled_time.as_deref(), Some("02:30"));
    assert_eq!(
        h.transport.requests()[1].body,
        Some(json!({ "scheduled_time": "02:30" }))
    );
}

#[tokio::test]
async fn test_area_filter_prefers_site() {
    let h = harness(|_| reply(200, json!([])));

    api(&h)
        .list_areas(
            Some(SiteId(Uuid::from_u128(5))),
            Some(CountryId(Uuid::from_u128(6))),
        )
        .await
        .unwrap();

    let query = &h.transport.requests()[0].query;
    assert_eq!(
        query,
        &vec![(
            "site_id".to_string(),
            "00000000-0000-0000-0000-000000000005".to_string()
        )]
    );
}

#[tokio::test]
async fn test_rule_set_save_creates_or_replaces() {
    let h = harness(|_| reply(200, json!({ "id": ID, "name": "access", "rules": [] })));
    let api = api(&h);
    let input = RuleSetInput {
        name: "access".into(),
        rules: json!([]),
        vault_credential: None,
    };

    api.save_rule_set(None, &input).await.unwrap();
    api.save_rule_set(Some(RuleSetId(Uuid::from_u128(1))), &input)
        .await
        .unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].url, format!("{BASE_URL}/classification-rules/"));
    assert_eq!(sent[1].method, HttpMethod::Put);
    assert_eq!(sent[1].url, format!("{BASE_URL}/classification-rules/{ID}/"));
}

#[tokio::test]
async fn test_ping_failure_statuses_become_outcomes() {
    let h = harness(|_| {
        reply(
            408,
            json!({ "status": "error", "data": { "message": "Request timed out" } }),
        )
    });

    let outcome = api(&h).ping("10.0.0.9").await.unwrap();

    assert!(!outcome.reachable);
    assert_eq!(outcome.message, "Request timed out");
}
