//! Default process documents used as the base for a new job.

use crate::codec::{encode_tags, Frequency};
use crate::model::JobSubtype;

use super::process::{AclSpec, ProcessEntity, RetrySpec, Workflow};

const WORKFLOW_ENGINE: &str = "oozie";

const HDFS_PROPERTIES: &[(&str, &str)] = &[
    ("oozie.wf.subworkflow.classpath.inheritance", "true"),
    ("distcpMaxMaps", "5"),
    ("distcpMapBandwidth", "100"),
    ("drSourceDir", ""),
    ("drTargetDir", ""),
    ("drTargetClusterFS", ""),
    ("drSourceClusterFS", ""),
    ("drNotificationReceivers", "NA"),
    ("targetCluster", ""),
    ("sourceCluster", ""),
];

const HIVE_PROPERTIES: &[(&str, &str)] = &[
    ("oozie.wf.subworkflow.classpath.inheritance", "true"),
    ("distcpMaxMaps", "1"),
    ("distcpMapBandwidth", "100"),
    ("targetCluster", ""),
    ("sourceCluster", ""),
    ("targetHiveServer2Uri", ""),
    ("sourceHiveServer2Uri", ""),
    ("sourceStagingPath", ""),
    ("targetStagingPath", ""),
    ("targetNN", ""),
    ("sourceNN", ""),
    ("sourceServicePrincipal", "hive"),
    ("targetServicePrincipal", "hive"),
    ("targetMetastoreUri", ""),
    ("sourceMetastoreUri", ""),
    ("sourceTable", ""),
    ("sourceDatabase", ""),
    ("maxEvents", "-1"),
    ("replicationMaxMaps", "5"),
    ("clusterForJobRun", ""),
    ("clusterForJobRunWriteEP", ""),
    ("drJobName", ""),
    ("drNotificationReceivers", "NA"),
];

const SNAPSHOT_PROPERTIES: &[(&str, &str)] = &[
    ("distcpMaxMaps", ""),
    ("distcpMapBandwidth", ""),
    ("tdeEncryptionEnabled", "false"),
    ("sourceCluster", ""),
    ("sourceSnapshotDir", ""),
    ("targetCluster", ""),
    ("targetSnapshotDir", ""),
    ("sourceSnapshotRetentionNumber", "3"),
    ("targetSnapshotRetentionNumber", "3"),
    ("sourceSnapshotRetentionAgeLimit", "days(15)"),
    ("targetSnapshotRetentionAgeLimit", "days(15)"),
];

fn workflow(subtype: JobSubtype) -> Workflow {
    let (name, path) = match subtype {
        JobSubtype::Hdfs => (
            "hdfs-dr-workflow",
            "/apps/data-mirroring/workflows/hdfs-replication-workflow.xml",
        ),
        JobSubtype::Hive => (
            "falcon-dr-hive-workflow",
            "/apps/data-mirroring/workflows/hive-disaster-recovery-workflow.xml",
        ),
        JobSubtype::Snapshot => (
            "hdfs-snapshot-mirroring-workflow",
            "/apps/data-mirroring/workflows/hdfs-snapshot-mirroring-workflow.xml",
        ),
    };
    Workflow {
        name: name.to_string(),
        engine: WORKFLOW_ENGINE.to_string(),
        path: path.to_string(),
        lib: String::new(),
    }
}

/// Builds the unnamed process document a new job of `subtype` starts from.
pub fn default_process(subtype: JobSubtype) -> ProcessEntity {
    let mut process = ProcessEntity::new("");

    process.set_tags(&encode_tags(&subtype.marker_tags("")));
    process.set_parallel("1");
    process.set_order("LAST_ONLY");
    process.set_frequency(&Frequency::minutes(5).encode());
    process.set_timezone("UTC");

    let properties = match subtype {
        JobSubtype::Hdfs => HDFS_PROPERTIES,
        JobSubtype::Hive => HIVE_PROPERTIES,
        JobSubtype::Snapshot => SNAPSHOT_PROPERTIES,
    };
    for (name, value) in properties {
        process.set_property(name, value);
    }

    process.set_workflow(&workflow(subtype));
    process.set_retry(&RetrySpec {
        policy: "periodic".to_string(),
        delay: Frequency::minutes(30).encode(),
        attempts: "3".to_string(),
    });
    process.set_acl(&AclSpec {
        owner: String::new(),
        group: "users".to_string(),
        permission: "0x755".to_string(),
    });

    process
}
