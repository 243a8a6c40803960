//! HDFS mirroring property table.

use crate::codec::LocationKind;
use crate::entity::ProcessEntity;
use crate::error::MappingError;
use crate::model::{DatasetUiModel, Endpoint, MirrorType};

use super::common::{encode_header, run_on_for, Header, HeaderRef};
use super::properties::{join_receivers, write_property, PropertyMap};
use super::ClusterContext;

/// Properties owned by the HDFS mapping.
pub const PROPERTIES: &[&str] = &[
    "distcpMaxMaps",
    "distcpMapBandwidth",
    "drSourceDir",
    "drTargetDir",
    "drSourceClusterFS",
    "drTargetClusterFS",
    "drNotificationReceivers",
    "sourceCluster",
    "targetCluster",
];

pub(crate) fn decode(
    process: &ProcessEntity,
    header: Header,
) -> Result<DatasetUiModel, MappingError> {
    let props = PropertyMap::from_process(process);
    let (mut ui, primary) = header.into_dataset(MirrorType::Hdfs);

    let allocation = &mut ui.allocation.hdfs;
    if let Some(max_maps) = props.number("distcpMaxMaps")? {
        allocation.max_maps = max_maps;
    }
    if let Some(bandwidth) = props.number("distcpMapBandwidth")? {
        allocation.max_bandwidth = bandwidth;
    }

    ui.source.path = props.string("drSourceDir");
    ui.target.path = props.string("drTargetDir");
    ui.source.cluster = props.string("sourceCluster");
    ui.target.cluster = props.string("targetCluster");
    ui.source.url = props.string("drSourceClusterFS");
    ui.target.url = props.string("drTargetClusterFS");
    ui.alerts = props.receivers("drNotificationReceivers");

    ui.run_on = run_on_for(&primary, &ui.target.cluster);
    ui.source.location = LocationKind::classify(&ui.source.url);
    ui.target.location = LocationKind::classify(&ui.target.url);

    Ok(ui)
}

pub(crate) fn encode(
    ui: &DatasetUiModel,
    process: &mut ProcessEntity,
    clusters: &ClusterContext,
) -> Result<(), MappingError> {
    let source_fs = cluster_fs(&ui.source, clusters, "drSourceClusterFS")?;
    let target_fs = cluster_fs(&ui.target, clusters, "drTargetClusterFS")?;
    let receivers = join_receivers(
        &ui.alerts,
        process.property("drNotificationReceivers").as_deref(),
    );

    encode_header(process, &HeaderRef::dataset(ui))?;

    let allocation = &ui.allocation.hdfs;
    write_property(process, "distcpMaxMaps", &allocation.max_maps.to_string());
    write_property(
        process,
        "distcpMapBandwidth",
        &allocation.max_bandwidth.to_string(),
    );
    write_property(process, "drSourceDir", &ui.source.path);
    write_property(process, "drTargetDir", &ui.target.path);
    write_property(process, "drSourceClusterFS", &source_fs);
    write_property(process, "drTargetClusterFS", &target_fs);
    write_property(process, "sourceCluster", hdfs_cluster(&ui.source));
    write_property(process, "targetCluster", hdfs_cluster(&ui.target));
    write_property(process, "drNotificationReceivers", &receivers);
    Ok(())
}

/// File system URI of an endpoint: the cluster's write interface for HDFS,
/// the entered URL otherwise or when the cluster is unknown.
fn cluster_fs(
    endpoint: &Endpoint,
    clusters: &ClusterContext,
    field: &str,
) -> Result<String, MappingError> {
    let from_cluster = match endpoint.location {
        LocationKind::Hdfs => clusters.write_endpoint(&endpoint.cluster),
        LocationKind::S3 | LocationKind::Azure => None,
    };
    from_cluster
        .or_else(|| Some(endpoint.url.clone()).filter(|url| !url.is_empty()))
        .ok_or_else(|| MappingError::missing(field))
}

fn hdfs_cluster(endpoint: &Endpoint) -> &str {
    match endpoint.location {
        LocationKind::Hdfs => &endpoint.cluster,
        LocationKind::S3 | LocationKind::Azure => "",
    }
}
