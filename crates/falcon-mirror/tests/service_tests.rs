//! Mirror service against an in-memory entity store.

mod common;

use common::fixtures::{
    backup_cluster, primary_cluster, BACKUP_CLUSTER, HDFS_PROCESS, HIVE_PROCESS, PRIMARY_CLUSTER,
};
use common::store::{InMemoryStore, StoreCall};
use common::{DatasetBuilder, SnapshotBuilder};
use falcon_mirror::model::RunOn;
use falcon_mirror::{
    ClusterContext, Config, DecodeMode, EntityType, Frequency, Job, JobSubtype, MirrorError,
    MirrorService, ProcessEntity, UiModel,
};

fn store_with_clusters() -> InMemoryStore {
    InMemoryStore::new()
        .with_entity(PRIMARY_CLUSTER)
        .with_entity(BACKUP_CLUSTER)
}

fn service(store: InMemoryStore) -> MirrorService<InMemoryStore> {
    MirrorService::new(store, Config::default())
}

#[tokio::test]
async fn test_load_decodes_stored_process() {
    let service = service(InMemoryStore::new().with_entity(HDFS_PROCESS));

    let job = service.load("hdfs-dr-daily", DecodeMode::Edit).await.unwrap();
    assert_eq!(job.ui.subtype(), JobSubtype::Hdfs);
    assert_eq!(job.ui.name(), "hdfs-dr-daily");
    assert_eq!(job.base.name(), "hdfs-dr-daily");

    let cloned = service.load("hdfs-dr-daily", DecodeMode::Clone).await.unwrap();
    assert_eq!(cloned.ui.name(), "");
}

#[tokio::test]
async fn test_load_missing_process() {
    let service = service(InMemoryStore::new());

    let err = service.load("nope", DecodeMode::Edit).await.unwrap_err();
    match err {
        MirrorError::Client(client) => assert!(client.is_not_found()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_save_new_hdfs_job_submits_process() {
    let service = service(store_with_clusters());
    let mut job = service.new_job(JobSubtype::Hdfs);
    job.ui = DatasetBuilder::hdfs("hdfs-new").into_ui();

    let result = service.save(&job, false).await.unwrap();
    assert!(result.is_success());
    assert_eq!(
        service.store().calls(),
        vec![StoreCall::Submit {
            kind: EntityType::Process,
            name: "hdfs-new".to_string(),
        }]
    );

    let stored = service
        .store()
        .definition(EntityType::Process, "hdfs-new")
        .unwrap();
    let process = ProcessEntity::parse(&stored).unwrap();
    assert_eq!(
        process.property("drSourceClusterFS").as_deref(),
        Some("hdfs://nn1:8020")
    );
    assert_eq!(process.tags(), "_falcon_mirroring_type=HDFS");
}

#[tokio::test]
async fn test_edit_hive_job_updates_process() {
    let service = service(store_with_clusters().with_entity(HIVE_PROCESS));

    let mut job = service.load("hive-dr-sales", DecodeMode::Edit).await.unwrap();
    if let UiModel::Dataset(model) = &mut job.ui {
        model.frequency = Frequency::hours(12);
        model.run_on = RunOn::Source;
    }

    service.save(&job, true).await.unwrap();
    assert_eq!(
        service.store().calls(),
        vec![StoreCall::Update {
            kind: EntityType::Process,
            name: "hive-dr-sales".to_string(),
        }]
    );

    let stored = service
        .store()
        .definition(EntityType::Process, "hive-dr-sales")
        .unwrap();
    let process = ProcessEntity::parse(&stored).unwrap();
    assert_eq!(process.frequency().as_deref(), Some("hours(12)"));
    assert_eq!(process.primary_cluster().unwrap().name, "primaryCluster");
    assert_eq!(
        process.property("clusterForJobRunWriteEP").as_deref(),
        Some("hdfs://nn1:8020")
    );
}

#[tokio::test]
async fn test_validate_does_not_store() {
    let service = service(store_with_clusters());
    let job = Job {
        ui: DatasetBuilder::hdfs("hdfs-new").into_ui(),
        base: falcon_mirror::default_process(JobSubtype::Hdfs),
    };

    let result = service.validate(&job).await.unwrap();
    assert!(result.is_success());
    assert_eq!(
        service.store().calls(),
        vec![StoreCall::Validate {
            kind: EntityType::Process,
        }]
    );
    assert!(service
        .store()
        .definition(EntityType::Process, "hdfs-new")
        .is_none());
}

#[tokio::test]
async fn test_submitting_existing_name_is_rejected() {
    let service = service(store_with_clusters().with_entity(HDFS_PROCESS));
    let job = service.load("hdfs-dr-daily", DecodeMode::Edit).await.unwrap();

    let err = service.save(&job, false).await.unwrap_err();
    assert!(matches!(err, MirrorError::Client(_)));
}

#[tokio::test]
async fn test_save_requires_cluster_definitions() {
    let service = service(InMemoryStore::new().with_entity(PRIMARY_CLUSTER));
    let job = Job {
        ui: DatasetBuilder::hdfs("hdfs-new").into_ui(),
        base: falcon_mirror::default_process(JobSubtype::Hdfs),
    };

    let err = service.save(&job, false).await.unwrap_err();
    match err {
        MirrorError::Client(client) => assert!(client.is_not_found()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.store().calls().is_empty());
}

#[tokio::test]
async fn test_save_snapshot_submits_extension() {
    let service = service(InMemoryStore::new());
    let job = Job {
        ui: SnapshotBuilder::new("snap-new")
            .run_on(RunOn::Target)
            .alert("ops@example.com")
            .into_ui(),
        base: falcon_mirror::default_process(JobSubtype::Snapshot),
    };

    service.save(&job, false).await.unwrap();
    service.save(&job, true).await.unwrap();

    let calls = service.store().calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        StoreCall::SubmitExtension {
            extension,
            properties,
        } => {
            assert_eq!(extension, "HDFS-SNAPSHOT-MIRRORING");
            assert!(properties.starts_with("jobName=snap-new\n"));
            assert!(properties.contains("jobClusterName=backupCluster\n"));
            assert!(properties.contains("jobNotificationReceivers=ops@example.com\n"));
        }
        other => panic!("unexpected call: {other:?}"),
    }
    assert!(matches!(calls[1], StoreCall::UpdateExtension { .. }));
}

#[tokio::test]
async fn test_new_job_applies_configured_defaults() {
    let mut config = Config::default();
    config.defaults.owner = "etl".to_string();
    config.defaults.group = "dr".to_string();
    config.defaults.timezone = "GMT+01:00".to_string();
    let service = MirrorService::new(InMemoryStore::new(), config);

    let job = service.new_job(JobSubtype::Snapshot);
    match &job.ui {
        UiModel::Snapshot(model) => {
            assert_eq!(model.acl.owner, "etl");
            assert_eq!(model.acl.group, "dr");
            assert_eq!(model.acl.permission, "0x755");
            assert_eq!(model.validity.timezone, "GMT+01:00");
        }
        UiModel::Dataset(_) => panic!("expected a snapshot model"),
    }
    assert_eq!(job.base.workflow().unwrap().name, "hdfs-snapshot-mirroring-workflow");
}

#[tokio::test]
async fn test_cluster_context_fetches_each_cluster_once() {
    let service = service(store_with_clusters());

    let context = service
        .cluster_context("primaryCluster", "primaryCluster")
        .await
        .unwrap();
    assert_eq!(context.len(), 1);

    let context = service.cluster_context("", "backupCluster").await.unwrap();
    assert_eq!(
        context.write_endpoint("backupCluster").as_deref(),
        Some("hdfs://nn2:8020")
    );
}

#[test]
fn test_apply_cluster_defaults_fills_hive_endpoints() {
    let mut ui = DatasetBuilder::hive("hive-orders")
        .without_hive_endpoints()
        .build();
    ui.target.hive_metastore_uri.clear();
    let clusters = ClusterContext::new()
        .with_cluster(primary_cluster())
        .with_cluster(backup_cluster());

    MirrorService::<InMemoryStore>::apply_cluster_defaults(&mut ui, &clusters);

    assert_eq!(
        ui.hive_options.source.staging_path,
        "/apps/falcon/primaryCluster/staging"
    );
    assert_eq!(
        ui.hive_options.target.hive_server2_endpoint,
        "hive2://meta2:10000"
    );
    assert_eq!(ui.source.hive_metastore_uri, "thrift://meta1:9083");
    assert_eq!(ui.target.hive_metastore_uri, "thrift://meta2:9083");
}

#[test]
fn test_apply_cluster_defaults_keeps_user_values() {
    let mut ui = DatasetBuilder::hdfs("hdfs-new").build();
    ui.source.url.clear();
    ui.target.url = "hdfs://custom:8020".to_string();
    let clusters = ClusterContext::new()
        .with_cluster(primary_cluster())
        .with_cluster(backup_cluster());

    MirrorService::<InMemoryStore>::apply_cluster_defaults(&mut ui, &clusters);

    assert_eq!(ui.source.url, "hdfs://nn1:8020");
    assert_eq!(ui.target.url, "hdfs://custom:8020");
}
