use ::appmanager_client::{AppManagerClient, SavepointFilter};
use ::appmanager_common::{
    config::ClientConfig,
    error::ErrorType,
    resource::{
        Deployment, DeploymentMetadata, DeploymentTarget, Labels, SessionCluster,
        SessionClusterMetadata, SessionClusterSpec, Stateful,
    },
    serde_json::json,
};
use ::httpmock::{prelude::*, Method::PATCH};
use ::std::num::NonZeroU64;

fn client(server: &MockServer) -> AppManagerClient {
    let mut config = ClientConfig::new(server.base_url());
    config.wait_interval_secs = NonZeroU64::MIN;
    config.wait_timeout_secs = NonZeroU64::new(3).unwrap();
    AppManagerClient::new(config)
}

fn ui_config() -> ::appmanager_common::serde_json::Value {
    json!({
        "flinkImageTagsAndRepository": {
            "1.17.1": {
                "flinkVersion": "1.17",
                "image": {
                    "repository": "registry.example.com/flink/flink",
                    "pullPolicy": "IfNotPresent"
                }
            }
        }
    })
}

#[tokio::test]
async fn list_namespaces_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces")
            .header("content-type", "application/json");
        then.status(200).json_body(json!({
            "kind": "NamespaceList",
            "apiVersion": "v1",
            "items": [
                { "metadata": { "name": "default" }, "status": { "state": "ACTIVE" } },
                { "metadata": { "name": "etl" }, "status": { "state": "INIT" } }
            ]
        }));
    });
    let namespaces = client(&server).list_namespaces().await.unwrap();

    mock.assert();
    assert_eq!(namespaces.len(), 2);
    assert_eq!(namespaces[1].name(), Some("etl"));
    assert_eq!(namespaces[1].current_state(), Some("INIT"));
}

#[tokio::test]
async fn create_namespace_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/namespaces/etl");
        then.status(400).json_body(json!({
            "kind": "Error",
            "message": "bad request",
            "reason": "BadRequest",
            "statusCode": 400,
            "context": { "exceptionMessage": "name required" }
        }));
    });
    let err = client(&server).create_namespace("etl").await.unwrap_err();

    mock.assert();
    assert_eq!(err.to_string(), "bad request: name required");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn get_namespace_error_without_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(500).body("Internal Server Error");
    });
    let err = client(&server).get_namespace("etl").await.unwrap_err();

    mock.assert();
    assert_eq!(err.get_error_type(), ErrorType::Api(500));
}

#[tokio::test]
async fn get_namespace_with_empty_name() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });
    let err = client(&server).get_namespace("").await.unwrap_err();

    mock.assert_hits(0);
    assert_eq!(err.get_error_type(), ErrorType::IllegalArgument);
}

#[tokio::test]
async fn wait_namespace_state_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(200).json_body(json!({
            "metadata": { "name": "etl" },
            "status": { "state": "ACTIVE" }
        }));
    });
    let namespace = client(&server)
        .wait_namespace_state("etl", "ACTIVE")
        .await
        .unwrap();

    mock.assert_hits(1);
    assert_eq!(namespace.current_state(), Some("ACTIVE"));
}

#[tokio::test]
async fn wait_namespace_state_timeout() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(200).json_body(json!({ "status": { "state": "INIT" } }));
    });
    let err = client(&server)
        .wait_namespace_state("etl", "ACTIVE")
        .await
        .unwrap_err();

    assert_eq!(err.get_error_type(), ErrorType::Timeout);
    assert!(mock.hits() <= 3);
}

#[tokio::test]
async fn wait_namespace_state_fetch_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(503).json_body(json!({ "message": "unavailable" }));
    });
    let err = client(&server)
        .wait_namespace_state("etl", "ACTIVE")
        .await
        .unwrap_err();

    mock.assert_hits(1);
    assert_eq!(err.get_error_type(), ErrorType::FailToFetch);
    assert_eq!(err.to_string(), "Fail to fetch resource: unavailable");
}

#[tokio::test]
async fn wait_namespace_state_with_invalid_target() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });
    let err = client(&server)
        .wait_namespace_state("etl", "RUNNING")
        .await
        .unwrap_err();

    mock.assert_hits(0);
    assert_eq!(err.get_error_type(), ErrorType::InvalidState);
}

#[tokio::test]
async fn delete_namespace_completed_success() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/namespaces/etl");
        then.status(200).json_body(json!({
            "metadata": { "name": "etl" },
            "status": { "state": "MARKED_FOR_DELETION" }
        }));
    });
    let get = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(404).json_body(json!({ "message": "namespace etl not found" }));
    });
    client(&server).delete_namespace_completed("etl").await.unwrap();

    delete.assert();
    get.assert();
}

#[tokio::test]
async fn delete_missing_namespace() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/namespaces/etl");
        then.status(404).json_body(json!({ "message": "namespace etl not found" }));
    });
    let get = server.mock(|when, then| {
        when.method(GET).path("/api/v1/namespaces/etl");
        then.status(404);
    });
    client(&server).delete_namespace_completed("etl").await.unwrap();

    delete.assert();
    get.assert_hits(0);
}

#[tokio::test]
async fn create_deployment_target_success() {
    let server = MockServer::start();
    let target = DeploymentTarget::new("dt", "etl", "flink-jobs");
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/etl/deployment-targets")
            .json_body(json!({
                "metadata": { "name": "dt", "namespace": "etl" },
                "spec": { "kubernetes": { "namespace": "flink-jobs" } }
            }));
        then.status(200).json_body(json!({
            "kind": "DeploymentTarget",
            "metadata": { "id": "dt-1", "name": "dt", "namespace": "etl" },
            "spec": { "kubernetes": { "namespace": "flink-jobs" } }
        }));
    });
    let created = client(&server)
        .create_deployment_target(&target, "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(created.k8s_namespace(), Some("flink-jobs"));
    assert_eq!(
        created.metadata.and_then(|metadata| metadata.id).as_deref(),
        Some("dt-1")
    );
}

#[tokio::test]
async fn delete_deployment_target_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v1/namespaces/etl/deployment-targets/dt");
        then.status(409).json_body(json!({
            "message": "conflict",
            "context": { "exceptionMessage": "deployment target is in use" }
        }));
    });
    let err = client(&server)
        .delete_deployment_target("dt", "etl")
        .await
        .unwrap_err();

    mock.assert();
    assert_eq!(err.to_string(), "conflict: deployment target is in use");
}

#[tokio::test]
async fn create_session_cluster_success() {
    let server = MockServer::start();
    let ui = server.mock(|when, then| {
        when.method(GET).path("/ui/config.json");
        then.status(200).json_body(ui_config());
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/etl/sessionclusters")
            .json_body(json!({
                "metadata": { "name": "sc", "namespace": "etl" },
                "spec": {
                    "flinkVersion": "1.17",
                    "flinkImageRegistry": "registry.example.com",
                    "flinkImageRepository": "flink/flink",
                    "flinkImagePullPolicy": "IfNotPresent",
                    "flinkImageTag": "1.17.1"
                }
            }));
        then.status(200).json_body(json!({
            "metadata": { "name": "sc", "namespace": "etl" },
            "status": { "state": "STOPPED" }
        }));
    });
    let cluster = SessionCluster {
        metadata: Some(SessionClusterMetadata {
            name: Some("sc".to_owned()),
            ..Default::default()
        }),
        spec: Some(SessionClusterSpec {
            flink_image_tag: Some("1.17.1".to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let created = client(&server)
        .create_session_cluster(cluster, "etl")
        .await
        .unwrap();

    ui.assert();
    create.assert();
    assert_eq!(created.current_state(), Some("STOPPED"));
}

#[tokio::test]
async fn create_session_cluster_with_unknown_image() {
    let server = MockServer::start();
    let ui = server.mock(|when, then| {
        when.method(GET).path("/ui/config.json");
        then.status(200).json_body(ui_config());
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/etl/sessionclusters");
        then.status(200);
    });
    let cluster = SessionCluster {
        spec: Some(SessionClusterSpec {
            flink_image_tag: Some("0.9".to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let err = client(&server)
        .create_session_cluster(cluster, "etl")
        .await
        .unwrap_err();

    ui.assert();
    create.assert_hits(0);
    assert_eq!(err.get_error_type(), ErrorType::FailToResolveImage);
}

#[tokio::test]
async fn update_session_cluster_without_image_tag() {
    let server = MockServer::start();
    let ui = server.mock(|when, then| {
        when.method(GET).path("/ui/config.json");
        then.status(200).json_body(ui_config());
    });
    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/v1/namespaces/etl/sessionclusters/sc")
            .json_body(json!({
                "metadata": { "name": "sc", "namespace": "etl" },
                "spec": { "state": "STOPPED" }
            }));
        then.status(200).json_body(json!({
            "metadata": { "name": "sc" },
            "status": { "state": "STOPPING" }
        }));
    });
    let cluster = SessionCluster {
        metadata: Some(SessionClusterMetadata {
            name: Some("sc".to_owned()),
            namespace: Some("etl".to_owned()),
            ..Default::default()
        }),
        spec: Some(SessionClusterSpec {
            state: Some("STOPPED".to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let updated = client(&server)
        .update_session_cluster(cluster, "etl")
        .await
        .unwrap();

    ui.assert_hits(0);
    patch.assert();
    assert_eq!(updated.current_state(), Some("STOPPING"));
}

#[tokio::test]
async fn list_deployments_with_labels() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/etl/deployments")
            .query_param("labelSelector", "app=wordcount,team=data");
        then.status(200).json_body(json!({
            "kind": "DeploymentList",
            "items": [{ "metadata": { "name": "wordcount" } }]
        }));
    });
    let labels = Labels::from([
        ("team".to_owned(), "data".to_owned()),
        ("app".to_owned(), "wordcount".to_owned()),
    ]);
    let deployments = client(&server)
        .list_deployments(&labels, "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(deployments[0].name(), Some("wordcount"));
}

#[tokio::test]
async fn create_deployment_stamps_namespace() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/etl/deployments")
            .json_body(json!({ "metadata": { "name": "wordcount", "namespace": "etl" } }));
        then.status(201).json_body(json!({
            "metadata": { "id": "d-1", "name": "wordcount", "namespace": "etl" }
        }));
    });
    let deployment = Deployment {
        metadata: Some(DeploymentMetadata {
            name: Some("wordcount".to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let created = client(&server)
        .create_deployment(deployment, "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(created.name(), Some("wordcount"));
}

#[tokio::test]
async fn wait_deployment_state_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/etl/deployments/wordcount");
        then.status(200).json_body(json!({
            "metadata": { "name": "wordcount" },
            "status": { "state": "RUNNING", "running": { "jobId": "j-1" } }
        }));
    });
    let deployment = client(&server)
        .wait_deployment_state("wordcount", "RUNNING", "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(deployment.current_state(), Some("RUNNING"));
}

#[tokio::test]
async fn list_jobs_of_deployment() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/etl/jobs")
            .query_param("deploymentId", "d-1");
        then.status(200).json_body(json!({
            "items": [{
                "metadata": { "id": "j-1", "deploymentId": "d-1" },
                "status": { "state": "STARTED" }
            }]
        }));
    });
    let jobs = client(&server).list_jobs(Some("d-1"), "etl").await.unwrap();

    mock.assert();
    assert_eq!(jobs[0].current_state(), Some("STARTED"));
}

#[tokio::test]
async fn list_savepoints_with_filter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/etl/savepoints")
            .query_param("jobID", "j-1");
        then.status(200).json_body(json!({
            "items": [{
                "metadata": { "id": "sp-1", "jobID": "j-1" },
                "status": { "state": "COMPLETED" }
            }]
        }));
    });
    let filter = SavepointFilter {
        job_id: Some("j-1".to_owned()),
        ..Default::default()
    };
    let savepoints = client(&server).list_savepoints(&filter, "etl").await.unwrap();

    mock.assert();
    assert_eq!(savepoints[0].current_state(), Some("COMPLETED"));
}

#[tokio::test]
async fn delete_savepoint_with_force() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v1/namespaces/etl/savepoints/sp-1")
            .query_param("force", "true");
        then.status(200);
    });
    client(&server)
        .delete_savepoint("sp-1", "etl", true)
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn upload_jar_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/namespaces/etl/artifacts/upload")
            .body_contains("name=\"file\"")
            .body_contains("filename=\"wordcount.jar\"");
        then.status(200).json_body(json!({
            "kind": "Artifact",
            "metadata": { "filename": "wordcount.jar", "uri": "s3://artifacts/etl/wordcount.jar" }
        }));
    });
    let uri = client(&server)
        .upload_jar("wordcount.jar", "etl", b"PK\x03\x04".to_vec())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(uri, "s3://artifacts/etl/wordcount.jar");
}

#[tokio::test]
async fn upload_jar_rejects_other_files() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });
    let err = client(&server)
        .upload_jar("job.properties", "etl", Vec::new())
        .await
        .unwrap_err();

    mock.assert_hits(0);
    assert_eq!(err.get_error_type(), ErrorType::IllegalArgument);
}

#[tokio::test]
async fn delete_artifact_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v1/namespaces/etl/artifacts/delete")
            .query_param("filename", "wordcount.jar");
        then.status(200).json_body(json!(true));
    });
    let deleted = client(&server)
        .delete_artifact("wordcount.jar", "etl")
        .await
        .unwrap();

    mock.assert();
    assert!(deleted);
}

#[tokio::test]
async fn download_artifact_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/namespaces/etl/artifacts/download")
            .query_param("filename", "job.properties");
        then.status(200).body("parallelism=2\n");
    });
    let content = client(&server)
        .download_artifact("job.properties", "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(content, b"parallelism=2\n");
}

#[tokio::test]
async fn get_system_info_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ui/appmanager/status/system-info");
        then.status(200).json_body(json!({
            "kind": "SystemInformation",
            "status": { "buildVersion": "2.6.3", "commitShaShort": "abc1234" }
        }));
    });
    let info = client(&server).get_system_info().await.unwrap();

    mock.assert();
    assert_eq!(
        info.status.and_then(|status| status.build_version).as_deref(),
        Some("2.6.3")
    );
}

#[tokio::test]
async fn cover_deployment_defaults_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/namespaces/etl/deployment-defaults")
            .json_body(json!({ "spec": { "maxJobCreationAttempts": 4 } }));
        then.status(200).json_body(json!({ "spec": { "maxJobCreationAttempts": 4 } }));
    });
    let defaults = ::appmanager_common::resource::DeploymentDefaults {
        spec: Some(::appmanager_common::resource::DeploymentSpec {
            max_job_creation_attempts: Some(4),
            ..Default::default()
        }),
        ..Default::default()
    };
    let covered = client(&server)
        .cover_deployment_defaults(&defaults, "etl")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(covered, defaults);
}
