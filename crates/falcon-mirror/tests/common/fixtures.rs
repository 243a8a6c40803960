//! Entity documents used across the integration tests.

#![allow(dead_code)]

use falcon_mirror::ClusterEntity;

pub const PRIMARY_CLUSTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cluster xmlns="uri:falcon:cluster:0.1" name="primaryCluster" colo="east" description="">
    <interfaces>
        <interface type="readonly" endpoint="hftp://nn1:50070" version="2.2.0"/>
        <interface type="write" endpoint="hdfs://nn1:8020" version="2.2.0"/>
        <interface type="execute" endpoint="rm1:8050" version="2.2.0"/>
        <interface type="workflow" endpoint="http://oozie1:11000/oozie/" version="4.0.0"/>
        <interface type="registry" endpoint="thrift://meta1:9083" version="0.13.0"/>
    </interfaces>
    <locations>
        <location name="staging" path="/apps/falcon/primaryCluster/staging"/>
        <location name="working" path="/apps/falcon/primaryCluster/working"/>
    </locations>
</cluster>"#;

pub const BACKUP_CLUSTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cluster xmlns="uri:falcon:cluster:0.1" name="backupCluster" colo="west" description="">
    <interfaces>
        <interface type="readonly" endpoint="hftp://nn2:50070" version="2.2.0"/>
        <interface type="write" endpoint="hdfs://nn2:8020" version="2.2.0"/>
        <interface type="registry" endpoint="thrift://meta2:9083" version="0.13.0"/>
    </interfaces>
    <locations>
        <location name="staging" path="/apps/falcon/backupCluster/staging"/>
    </locations>
</cluster>"#;

/// HDFS to HDFS job running on the source cluster.
pub const HDFS_PROCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><process xmlns="uri:falcon:process:0.1" name="hdfs-dr-daily"><tags>_falcon_mirroring_type=HDFS,owner=dr-team</tags><clusters><cluster name="primaryCluster"><validity start="2016-04-01T00:00Z" end="2017-04-01T00:00Z"/></cluster></clusters><parallel>1</parallel><order>LAST_ONLY</order><frequency>days(1)</frequency><timezone>UTC</timezone><properties><property name="oozie.wf.subworkflow.classpath.inheritance" value="true"/><property name="distcpMaxMaps" value="5"/><property name="distcpMapBandwidth" value="100"/><property name="drSourceDir" value="/data/clicks"/><property name="drTargetDir" value="/backup/clicks"/><property name="drTargetClusterFS" value="hdfs://nn2:8020"/><property name="drSourceClusterFS" value="hdfs://nn1:8020"/><property name="drNotificationReceivers" value="NA"/><property name="targetCluster" value="backupCluster"/><property name="sourceCluster" value="primaryCluster"/></properties><workflow name="hdfs-dr-workflow" engine="oozie" path="/apps/data-mirroring/workflows/hdfs-replication-workflow.xml" lib=""/><retry policy="periodic" delay="minutes(30)" attempts="3"/><ACL owner="hrt_qa" group="users" permission="0x755"/></process>"#;

/// HIVE job replicating whole databases, running on the target cluster.
pub const HIVE_PROCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><process xmlns="uri:falcon:process:0.1" name="hive-dr-sales"><tags>_falcon_extension_name=HIVE-MIRRORING,_falcon_extension_job=hive-dr-sales</tags><clusters><cluster name="backupCluster"><validity start="2016-04-01T00:00Z" end="2017-04-01T00:00Z"/></cluster></clusters><parallel>1</parallel><order>LAST_ONLY</order><frequency>hours(6)</frequency><timezone>GMT+02:00</timezone><properties><property name="oozie.wf.subworkflow.classpath.inheritance" value="true"/><property name="distcpMaxMaps" value="1"/><property name="distcpMapBandwidth" value="100"/><property name="targetCluster" value="backupCluster"/><property name="sourceCluster" value="primaryCluster"/><property name="targetHiveServer2Uri" value="hive2://meta2:10000"/><property name="sourceHiveServer2Uri" value="hive2://meta1:10000"/><property name="sourceStagingPath" value="*"/><property name="targetStagingPath" value="*"/><property name="targetNN" value="hdfs://nn2:8020"/><property name="sourceNN" value="hdfs://nn1:8020"/><property name="sourceServicePrincipal" value="hive"/><property name="targetServicePrincipal" value="hive"/><property name="targetMetastoreUri" value="thrift://meta2:9083"/><property name="sourceMetastoreUri" value="thrift://meta1:9083"/><property name="sourceTable" value="*"/><property name="sourceDatabase" value="db1,db2"/><property name="maxEvents" value="-1"/><property name="replicationMaxMaps" value="5"/><property name="clusterForJobRun" value="backupCluster"/><property name="clusterForJobRunWriteEP" value="hdfs://nn2:8020"/><property name="drJobName" value="hive-dr-sales"/><property name="drNotificationReceivers" value="dba@example.com"/></properties><workflow name="falcon-dr-hive-workflow" engine="oozie" path="/apps/data-mirroring/workflows/hive-disaster-recovery-workflow.xml" lib=""/><retry policy="periodic" delay="minutes(30)" attempts="3"/><ACL owner="hrt_qa" group="users" permission="0x755"/></process>"#;

/// Snapshot job with a notification element.
pub const SNAPSHOT_PROCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><process xmlns="uri:falcon:process:0.1" name="snap-warehouse"><tags>_falcon_extension_name=HDFS-SNAPSHOT-MIRRORING,_falcon_extension_job=snap-warehouse</tags><clusters><cluster name="primaryCluster"><validity start="2016-04-01T00:00Z" end="2017-04-01T00:00Z"/></cluster></clusters><parallel>1</parallel><order>LAST_ONLY</order><frequency>hours(1)</frequency><timezone>UTC</timezone><properties><property name="distcpMaxMaps" value=""/><property name="distcpMapBandwidth" value="50"/><property name="tdeEncryptionEnabled" value="false"/><property name="sourceCluster" value="primaryCluster"/><property name="sourceSnapshotDir" value="/apps/warehouse"/><property name="targetCluster" value="backupCluster"/><property name="targetSnapshotDir" value="/apps/warehouse-copy"/><property name="sourceSnapshotRetentionNumber" value="3"/><property name="targetSnapshotRetentionNumber" value="6"/><property name="sourceSnapshotRetentionAgeLimit" value="days(15)"/><property name="targetSnapshotRetentionAgeLimit" value="days(30)"/></properties><workflow name="hdfs-snapshot-mirroring-workflow" engine="oozie" path="/apps/data-mirroring/workflows/hdfs-snapshot-mirroring-workflow.xml" lib=""/><retry policy="periodic" delay="minutes(30)" attempts="3"/><ACL owner="hrt_qa" group="users" permission="0x755"/><notification type="email" to="ops@example.com"/></process>"#;

pub fn primary_cluster() -> ClusterEntity {
    ClusterEntity::parse(PRIMARY_CLUSTER).unwrap()
}

pub fn backup_cluster() -> ClusterEntity {
    ClusterEntity::parse(BACKUP_CLUSTER).unwrap()
}
