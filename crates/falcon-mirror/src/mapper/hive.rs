//! HIVE mirroring property table.
//!
//! The database selection is stored in `sourceDatabase`/`sourceTable`. A
//! `*` table or a `*` staging path marks whole-database replication, in
//! which case `sourceDatabase` holds the database list.

use crate::entity::ProcessEntity;
use crate::error::MappingError;
use crate::model::{DatasetUiModel, HiveDatabaseType, MirrorType};

use super::common::{encode_header, run_on_for_job_run, Header, HeaderRef};
use super::properties::{join_receivers, write_property, PropertyMap};
use super::ClusterContext;

const ALL: &str = "*";

/// Properties owned by the HIVE mapping.
pub const PROPERTIES: &[&str] = &[
    "distcpMaxMaps",
    "distcpMapBandwidth",
    "maxEvents",
    "replicationMaxMaps",
    "sourceCluster",
    "targetCluster",
    "sourceMetastoreUri",
    "targetMetastoreUri",
    "sourceHiveMetastoreKerberosPrincipal",
    "targetHiveMetastoreKerberosPrincipal",
    "sourceHive2KerberosPrincipal",
    "targetHive2KerberosPrincipal",
    "sourceStagingPath",
    "targetStagingPath",
    "sourceHiveServer2Uri",
    "targetHiveServer2Uri",
    "sourceNN",
    "targetNN",
    "sourceTable",
    "sourceDatabase",
    "clusterForJobRun",
    "clusterForJobRunWriteEP",
    "drJobName",
    "drNotificationReceivers",
];

pub(crate) fn decode(
    process: &ProcessEntity,
    header: Header,
) -> Result<DatasetUiModel, MappingError> {
    let props = PropertyMap::from_process(process);
    let (mut ui, primary) = header.into_dataset(MirrorType::Hive);

    let allocation = &mut ui.allocation.hive;
    if let Some(value) = props.number("distcpMaxMaps")? {
        allocation.max_maps_distcp = value;
    }
    if let Some(value) = props.number("distcpMapBandwidth")? {
        allocation.max_bandwidth = value;
    }
    if let Some(value) = props.number("maxEvents")? {
        allocation.max_maps_events = value;
    }
    if let Some(value) = props.number("replicationMaxMaps")? {
        allocation.max_maps_mirror = value;
    }

    ui.source.cluster = props.string("sourceCluster");
    ui.target.cluster = props.string("targetCluster");
    ui.source.hive_metastore_uri = props.string("sourceMetastoreUri");
    ui.target.hive_metastore_uri = props.string("targetMetastoreUri");
    ui.source.hive_metastore_kerberos_principal =
        props.string("sourceHiveMetastoreKerberosPrincipal");
    ui.target.hive_metastore_kerberos_principal =
        props.string("targetHiveMetastoreKerberosPrincipal");
    ui.source.hive2_kerberos_principal = props.string("sourceHive2KerberosPrincipal");
    ui.target.hive2_kerberos_principal = props.string("targetHive2KerberosPrincipal");

    let options = &mut ui.hive_options;
    options.source.staging_path = props.string("sourceStagingPath");
    options.target.staging_path = props.string("targetStagingPath");
    options.source.hive_server2_endpoint = props.string("sourceHiveServer2Uri");
    options.target.hive_server2_endpoint = props.string("targetHiveServer2Uri");

    let table = props.string("sourceTable");
    let database = props.string("sourceDatabase");
    let whole_databases = table == ALL
        || options.source.staging_path == ALL
        || options.target.staging_path == ALL;

    let source = &mut ui.source;
    if whole_databases {
        source.hive_database_type = HiveDatabaseType::Databases;
        source.hive_databases = database;
    } else {
        source.hive_database_type = HiveDatabaseType::Tables;
        source.hive_database = database;
    }
    source.hive_tables = table;

    let job_cluster = props
        .get("clusterForJobRun")
        .filter(|c| !c.is_empty())
        .unwrap_or(primary.as_str());
    ui.run_on = run_on_for_job_run(job_cluster, &ui.source.cluster);
    ui.alerts = props.receivers("drNotificationReceivers");

    Ok(ui)
}

pub(crate) fn encode(
    ui: &DatasetUiModel,
    process: &mut ProcessEntity,
    clusters: &ClusterContext,
) -> Result<(), MappingError> {
    let run_on_cluster = ui.run_on_endpoint().cluster.as_str();

    let source_nn = write_endpoint(process, clusters, &ui.source.cluster, "sourceNN")?;
    let target_nn = write_endpoint(process, clusters, &ui.target.cluster, "targetNN")?;
    let job_run_ep = write_endpoint(process, clusters, run_on_cluster, "clusterForJobRunWriteEP")?;
    let (source_table, source_database) = selection(ui)?;
    let receivers = join_receivers(
        &ui.alerts,
        process.property("drNotificationReceivers").as_deref(),
    );

    encode_header(process, &HeaderRef::dataset(ui))?;

    let allocation = &ui.allocation.hive;
    write_property(
        process,
        "distcpMaxMaps",
        &allocation.max_maps_distcp.to_string(),
    );
    write_property(
        process,
        "distcpMapBandwidth",
        &allocation.max_bandwidth.to_string(),
    );
    write_property(process, "maxEvents", &allocation.max_maps_events.to_string());
    write_property(
        process,
        "replicationMaxMaps",
        &allocation.max_maps_mirror.to_string(),
    );

    write_property(process, "sourceCluster", &ui.source.cluster);
    write_property(process, "targetCluster", &ui.target.cluster);
    write_property(process, "sourceMetastoreUri", &ui.source.hive_metastore_uri);
    write_property(process, "targetMetastoreUri", &ui.target.hive_metastore_uri);
    write_property(
        process,
        "sourceHiveMetastoreKerberosPrincipal",
        &ui.source.hive_metastore_kerberos_principal,
    );
    write_property(
        process,
        "targetHiveMetastoreKerberosPrincipal",
        &ui.target.hive_metastore_kerberos_principal,
    );
    write_property(
        process,
        "sourceHive2KerberosPrincipal",
        &ui.source.hive2_kerberos_principal,
    );
    write_property(
        process,
        "targetHive2KerberosPrincipal",
        &ui.target.hive2_kerberos_principal,
    );

    let options = &ui.hive_options;
    write_property(process, "sourceStagingPath", &options.source.staging_path);
    write_property(process, "targetStagingPath", &options.target.staging_path);
    write_property(
        process,
        "sourceHiveServer2Uri",
        &options.source.hive_server2_endpoint,
    );
    write_property(
        process,
        "targetHiveServer2Uri",
        &options.target.hive_server2_endpoint,
    );

    write_property(process, "sourceNN", &source_nn);
    write_property(process, "targetNN", &target_nn);
    write_property(process, "sourceTable", source_table);
    write_property(process, "sourceDatabase", source_database);
    write_property(process, "clusterForJobRun", run_on_cluster);
    write_property(process, "clusterForJobRunWriteEP", &job_run_ep);
    write_property(process, "drJobName", &ui.name);
    write_property(process, "drNotificationReceivers", &receivers);
    Ok(())
}

/// `(sourceTable, sourceDatabase)` for the source's selection.
fn selection(ui: &DatasetUiModel) -> Result<(&str, &str), MappingError> {
    let source = &ui.source;
    match source.hive_database_type {
        HiveDatabaseType::Databases => {
            if source.hive_databases.is_empty() {
                return Err(MappingError::missing("sourceDatabase"));
            }
            Ok((ALL, &source.hive_databases))
        }
        HiveDatabaseType::Tables => {
            if source.hive_database.is_empty() {
                return Err(MappingError::missing("sourceDatabase"));
            }
            if source.hive_tables.is_empty() {
                return Err(MappingError::missing("sourceTable"));
            }
            Ok((&source.hive_tables, &source.hive_database))
        }
    }
}

/// Write endpoint of `cluster`, falling back to the base document's value.
fn write_endpoint(
    process: &ProcessEntity,
    clusters: &ClusterContext,
    cluster: &str,
    property: &str,
) -> Result<String, MappingError> {
    clusters
        .write_endpoint(cluster)
        .or_else(|| process.property(property).filter(|v| !v.is_empty()))
        .ok_or_else(|| MappingError::missing(property))
}
